//! Unsigned LEB128 varints, the chain's native encoding for counts and lengths

use crate::error::DecodeError;

/// Encode an unsigned varint (7 data bits per byte, low group first)
pub fn encode_uvarint(mut value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(10);
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            result.push(byte);
            return result;
        }
        result.push(byte | 0x80);
    }
}

/// Decode an unsigned varint, returning the value and the number of bytes read
pub fn decode_uvarint(bytes: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate() {
        let shift = 7 * i as u32;
        if shift >= 64 || (shift == 63 && (byte & 0x7f) > 1) {
            return Err(DecodeError::MalformedScalar(
                "Varint overflows 64 bits".to_string(),
            ));
        }
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(DecodeError::MalformedScalar("Truncated varint".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00")]
    #[case(1, "01")]
    #[case(127, "7f")]
    #[case(128, "8001")]
    #[case(300, "ac02")]
    #[case(16383, "ff7f")]
    #[case(16384, "808001")]
    #[case(u32::MAX as u64, "ffffffff0f")]
    fn test_uvarint_boundaries(#[case] value: u64, #[case] expected: &str) {
        let encoded = encode_uvarint(value);
        assert_eq!(hex::encode(&encoded), expected);

        let (decoded, read) = decode_uvarint(&encoded).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(read, encoded.len());
    }

    #[test]
    fn test_u64_max() {
        let encoded = encode_uvarint(u64::MAX);
        assert_eq!(encoded.len(), 10);
        assert_eq!(decode_uvarint(&encoded).unwrap().0, u64::MAX);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let (value, read) = decode_uvarint(&[0x80, 0x01, 0xff]).unwrap();
        assert_eq!(value, 128);
        assert_eq!(read, 2);
    }

    #[test]
    fn test_decode_rejects_truncated() {
        assert!(decode_uvarint(&[]).is_err());
        assert!(decode_uvarint(&[0x80]).is_err());
    }

    #[test]
    fn test_decode_rejects_overflow() {
        let bytes = [0xff; 11];
        assert!(decode_uvarint(&bytes).is_err());
    }
}
