use anchor_lang::solana_program::keccak;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
/// 10% royalty ceiling.
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

/// Off-chain JSON document the metadata URI of a mint message points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub seller_fee_basis_points: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name.trim().is_empty() {
            return Err(MetadataError::MissingName);
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(MetadataError::NameTooLong(self.name.len()));
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(MetadataError::SymbolTooLong(self.symbol.len()));
        }
        if self.seller_fee_basis_points > MAX_SELLER_FEE_BASIS_POINTS {
            return Err(MetadataError::RoyaltyTooHigh(self.seller_fee_basis_points));
        }
        if self
            .attributes
            .iter()
            .any(|a| a.trait_type.is_empty() || a.value.is_empty())
        {
            return Err(MetadataError::IncompleteAttribute);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<Vec<u8>, MetadataError> {
        self.validate()?;
        serde_json::to_vec(self).map_err(|e| MetadataError::Json(e.to_string()))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, MetadataError> {
        let metadata: Self =
            serde_json::from_slice(bytes).map_err(|e| MetadataError::Json(e.to_string()))?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Keccak-256 of the JSON document, used to check an uploaded copy.
    pub fn hash(&self) -> Result<[u8; 32], MetadataError> {
        Ok(keccak::hash(&self.to_json()?).0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("NFT name is required")]
    MissingName,
    #[error("NFT name is {0} bytes, the limit is 32")]
    NameTooLong(usize),
    #[error("NFT symbol is {0} bytes, the limit is 10")]
    SymbolTooLong(usize),
    #[error("Royalty of {0} basis points exceeds 10%")]
    RoyaltyTooHigh(u16),
    #[error("Attributes need both a trait type and a value")]
    IncompleteAttribute,
    #[error("Invalid metadata JSON: {0}")]
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NftMetadata {
        NftMetadata {
            name: "Cosmic Explorer #1234".to_string(),
            symbol: "COSMIC".to_string(),
            description: "Minted on ZetaChain from Solana".to_string(),
            image: "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".to_string(),
            seller_fee_basis_points: 500,
            attributes: vec![NftAttribute {
                trait_type: "Background".to_string(),
                value: "Nebula".to_string(),
            }],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let metadata = sample();

        let json = metadata.to_json().unwrap();
        let parsed = NftMetadata::from_json(&json).unwrap();

        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        let metadata = sample();
        let mut renamed = sample();
        renamed.name = "Cosmic Explorer #1235".to_string();

        assert_eq!(metadata.hash().unwrap(), sample().hash().unwrap());
        assert_ne!(metadata.hash().unwrap(), renamed.hash().unwrap());
    }

    #[test]
    fn test_validation() {
        let mut metadata = sample();
        metadata.name = "  ".to_string();
        assert_eq!(metadata.validate(), Err(MetadataError::MissingName));

        let mut metadata = sample();
        metadata.name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            metadata.validate(),
            Err(MetadataError::NameTooLong(MAX_NAME_LEN + 1))
        );

        let mut metadata = sample();
        metadata.seller_fee_basis_points = 1_001;
        assert_eq!(metadata.validate(), Err(MetadataError::RoyaltyTooHigh(1_001)));

        let mut metadata = sample();
        metadata.attributes[0].value.clear();
        assert_eq!(metadata.validate(), Err(MetadataError::IncompleteAttribute));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = br#"{"name":"Solo","symbol":"","image":"https://example/1.png"}"#;

        let metadata = NftMetadata::from_json(json).unwrap();
        assert_eq!(metadata.seller_fee_basis_points, 0);
        assert!(metadata.attributes.is_empty());
        assert!(metadata.description.is_empty());
    }
}
