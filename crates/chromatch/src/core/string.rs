use crate::error::ColorFormatError;

/// Parse a color in hexadecimal format. If successful, this function returns
/// the three coordinates as unsigned bytes. It transparently handles
/// three-digit shorthands, whose digits are doubled, i.e., `f00` denotes the
/// same color as `ff0000`.
///
/// The leading `#` is optional and digits are case-insensitive. Any other
/// length, or any character that is not a hexadecimal digit, is an error.
pub(crate) fn parse_hex_color(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 3 && digits.len() != 6 {
        return Err(ColorFormatError::UnexpectedLength);
    } else if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorFormatError::MalformedDigit);
    }

    fn parse_coordinate(digits: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = digits.len() / 3;
        let t = digits
            .get(factor * index..factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedLength)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedDigit)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(digits, 0)?;
    let c2 = parse_coordinate(digits, 1)?;
    let c3 = parse_coordinate(digits, 2)?;
    Ok([c1, c2, c3])
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{parse_hex_color, ColorFormatError};

    #[test]
    fn test_parse_hex() -> Result<(), ColorFormatError> {
        assert_eq!(parse_hex_color("#123")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hex_color("#112233")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hex_color("112233")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hex_color("CAFE00")?, [0xca_u8, 0xfe, 0x00]);
        assert_eq!(parse_hex_color("f00")?, parse_hex_color("#ff0000")?);

        assert_eq!(parse_hex_color("#ff"), Err(ColorFormatError::UnexpectedLength));
        assert_eq!(parse_hex_color("#ff00001"), Err(ColorFormatError::UnexpectedLength));
        assert_eq!(parse_hex_color(""), Err(ColorFormatError::UnexpectedLength));
        assert_eq!(parse_hex_color("zzzzzz"), Err(ColorFormatError::MalformedDigit));
        assert_eq!(parse_hex_color("#0g0000"), Err(ColorFormatError::MalformedDigit));
        assert_eq!(parse_hex_color("#💩00"), Err(ColorFormatError::MalformedDigit));
        assert_eq!(parse_hex_color("+a0000"), Err(ColorFormatError::MalformedDigit));

        Ok(())
    }
}
