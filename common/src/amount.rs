use crate::error::{CodecError, Result};

/// Parses a decimal string such as `"0.01"` into base units with `decimals` places.
///
/// Rejects signs, exponents, more fractional digits than `decimals`, zero and
/// anything that overflows `u64`.
pub fn parse_amount(input: &str, decimals: u8) -> Result<u64> {
    let invalid = |reason: &str| CodecError::InvalidAmount(format!("{input:?}: {reason}"));

    let trimmed = input.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid("too many decimal places"));
    }

    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| invalid("unsupported decimals"))?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid("overflow"))?
    };

    let mut fraction_units = 0u64;
    if !fraction.is_empty() {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        fraction_units = padded.parse::<u64>().map_err(|_| invalid("overflow"))?;
    }

    let amount = whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(|| invalid("overflow"))?;

    if amount == 0 {
        return Err(invalid("must be greater than zero"));
    }

    Ok(amount)
}

/// Renders base units as a decimal string, trimming trailing zeros.
pub fn format_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let digits = format!("{amount:0>width$}", width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
