use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::{
    address::hex_to_array,
    constants::{
        MAX_METADATA_URI_LEN, MESSAGE_LEN_PREFIX_LEN, MESSAGE_TAG_LEN, MINT_MESSAGE_TAG,
        UNIQUE_ID_LEN,
    },
    error::{CodecError, Result},
};

const HEADER_LEN: usize = MESSAGE_TAG_LEN + MESSAGE_LEN_PREFIX_LEN;

/// Idempotency token carried by every mint message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniqueId(pub [u8; UNIQUE_ID_LEN]);

impl UniqueId {
    /// Fills all 32 bytes from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; UNIQUE_ID_LEN];
        rand::rng().fill(&mut bytes);
        Self(bytes)
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        hex_to_array::<UNIQUE_ID_LEN>(input).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; UNIQUE_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for UniqueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Payload asking the ZetaChain side to mint an NFT.
///
/// Wire layout, in order:
/// * 8 bytes  - `ZNFTMINT` tag
/// * 4 bytes  - little-endian length of the metadata URI
/// * N bytes  - UTF-8 metadata URI
/// * 32 bytes - unique id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainMessage {
    pub metadata_uri: String,
    pub unique_id: UniqueId,
}

impl CrossChainMessage {
    pub fn new(metadata_uri: impl Into<String>, unique_id: UniqueId) -> Result<Self> {
        let metadata_uri = metadata_uri.into();
        check_uri_len(&metadata_uri)?;

        Ok(Self {
            metadata_uri,
            unique_id,
        })
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.metadata_uri.len() + UNIQUE_ID_LEN
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(&self.metadata_uri, &self.unique_id)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (metadata_uri, unique_id) = decode(bytes)?;
        Ok(Self {
            metadata_uri,
            unique_id,
        })
    }
}

pub fn encode(metadata_uri: &str, unique_id: &UniqueId) -> Result<Vec<u8>> {
    check_uri_len(metadata_uri)?;

    let mut data = Vec::with_capacity(HEADER_LEN + metadata_uri.len() + UNIQUE_ID_LEN);
    data.extend_from_slice(&MINT_MESSAGE_TAG);
    // Bounded by MAX_METADATA_URI_LEN so the cast cannot overflow.
    data.extend_from_slice(&(metadata_uri.len() as u32).to_le_bytes());
    data.extend_from_slice(metadata_uri.as_bytes());
    data.extend_from_slice(unique_id.as_bytes());
    Ok(data)
}

pub fn decode(bytes: &[u8]) -> Result<(String, UniqueId)> {
    if bytes.len() < HEADER_LEN + UNIQUE_ID_LEN {
        return Err(CodecError::MalformedMessage(format!(
            "{} bytes is below the {} byte minimum",
            bytes.len(),
            HEADER_LEN + UNIQUE_ID_LEN
        )));
    }

    let (tag, rest) = bytes.split_at(MESSAGE_TAG_LEN);
    if tag != MINT_MESSAGE_TAG {
        return Err(CodecError::MalformedMessage(format!(
            "unknown tag 0x{}",
            hex::encode(tag)
        )));
    }

    let (len_prefix, rest) = rest.split_at(MESSAGE_LEN_PREFIX_LEN);
    let declared_len =
        u32::from_le_bytes([len_prefix[0], len_prefix[1], len_prefix[2], len_prefix[3]]) as usize;

    let uri_len = rest.len() - UNIQUE_ID_LEN;
    if declared_len != uri_len {
        return Err(CodecError::MalformedMessage(format!(
            "declared uri length {declared_len} but {uri_len} bytes remain"
        )));
    }

    let (uri_bytes, id_bytes) = rest.split_at(uri_len);
    let metadata_uri = String::from_utf8(uri_bytes.to_vec())
        .map_err(|e| CodecError::MalformedMessage(format!("uri is not UTF-8: {e}")))?;

    let mut unique_id = [0u8; UNIQUE_ID_LEN];
    unique_id.copy_from_slice(id_bytes);

    Ok((metadata_uri, UniqueId(unique_id)))
}

fn check_uri_len(metadata_uri: &str) -> Result<()> {
    if metadata_uri.len() > MAX_METADATA_URI_LEN {
        return Err(CodecError::EncodingTooLarge {
            len: metadata_uri.len(),
            max: MAX_METADATA_URI_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let uris = [
            "",
            "https://example/1.json",
            "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "https://example/ünïcödé.json",
        ];

        for uri in uris {
            let unique_id = UniqueId::generate();
            let encoded = encode(uri, &unique_id).unwrap();

            let (decoded_uri, decoded_id) = decode(&encoded).unwrap();
            assert_eq!(decoded_uri, uri);
            assert_eq!(decoded_id, unique_id);
        }
    }

    #[test]
    fn test_round_trip_at_length_limit() {
        let uri = "a".repeat(MAX_METADATA_URI_LEN);
        let message = CrossChainMessage::new(uri.clone(), UniqueId([9; 32])).unwrap();

        let decoded = CrossChainMessage::decode(&message.encode().unwrap()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_layout() {
        let uri = "https://example/1.json";
        let unique_id = UniqueId([0xAB; 32]);

        let encoded = encode(uri, &unique_id).unwrap();

        assert_eq!(encoded.len(), 8 + 4 + uri.len() + 32);
        assert_eq!(&encoded[..8], b"ZNFTMINT");
        assert_eq!(&encoded[8..12], &(uri.len() as u32).to_le_bytes());
        assert_eq!(&encoded[12..12 + uri.len()], uri.as_bytes());
        assert_eq!(&encoded[12 + uri.len()..], &[0xAB; 32]);
    }

    #[test]
    fn test_encode_rejects_oversized_uri() {
        let uri = "a".repeat(MAX_METADATA_URI_LEN + 1);

        let result = encode(&uri, &UniqueId::generate());
        assert_eq!(
            result,
            Err(CodecError::EncodingTooLarge {
                len: MAX_METADATA_URI_LEN + 1,
                max: MAX_METADATA_URI_LEN,
            })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_tag() {
        let mut encoded = encode("https://example/1.json", &UniqueId::generate()).unwrap();
        encoded[0] = b'X';

        let result = decode(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let mut encoded = encode("https://example/1.json", &UniqueId::generate()).unwrap();
        encoded[8] += 1;

        let result = decode(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));

        // Trailing garbage also breaks the declared length
        let mut encoded = encode("https://example/1.json", &UniqueId::generate()).unwrap();
        encoded.push(0);

        let result = decode(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_buffer() {
        let encoded = encode("", &UniqueId::generate()).unwrap();

        let result = decode(&encoded[..encoded.len() - 1]);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));

        let result = decode(&[]);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut encoded = encode("ab", &UniqueId::generate()).unwrap();
        encoded[12] = 0xFF;

        let result = decode(&encoded);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_generated_ids_differ() {
        let first = UniqueId::generate();
        let second = UniqueId::generate();

        assert_ne!(first, second);
        assert_ne!(first.0, [0u8; 32]);
    }

    #[test]
    fn test_unique_id_hex_round_trip() {
        let unique_id = UniqueId::generate();

        let parsed = UniqueId::from_hex(&unique_id.to_string()).unwrap();
        assert_eq!(parsed, unique_id);

        let result = UniqueId::from_hex("0x1234");
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));
    }
}
