//! Binary ↔ text mapping for payloads.
//!
//! Uses the RFC 4648 standard base64 alphabet with `=` padding and no line
//! wrapping, so a payload is always one printable token. Decoding is strict:
//! characters outside the alphabet, missing or misplaced padding and
//! non-zero trailing bits are all rejected.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::status::{CodecError, StatusResult};

/// Encodes arbitrary bytes as padded base64.
pub fn to_text(bytes: &[u8]) -> StatusResult<String> {
    let len = base64::encoded_len(bytes.len(), true).ok_or_else(|| {
        CodecError::OutOfMemory(format!("{} bytes are too many to encode as text", bytes.len()))
    })?;
    let mut text = String::new();
    text.try_reserve_exact(len)?;
    BASE64.encode_string(bytes, &mut text);
    Ok(text)
}

/// Decodes text produced by [`to_text`]. Fails with `MalformedText`.
pub fn from_text(text: &str) -> StatusResult<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(base64::decoded_len_estimate(text.len()))?;
    BASE64.decode_vec(text, &mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ErrorCode;

    #[test]
    fn test_known_vectors() {
        let vectors: [(&[u8], &str); 7] = [
            (b"", ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foob", "Zm9vYg=="),
            (b"fooba", "Zm9vYmE="),
            (b"foobar", "Zm9vYmFy"),
        ];
        for (bytes, text) in vectors {
            assert_eq!(to_text(bytes).unwrap(), text);
            assert_eq!(from_text(text).unwrap(), bytes);
        }
    }

    #[test]
    fn test_no_line_wrapping() {
        let bytes = vec![0xABu8; 4096];
        let text = to_text(&bytes).unwrap();
        assert!(!text.contains('\n'));
        assert!(!text.contains('\r'));
        assert_eq!(from_text(&text).unwrap(), bytes);
    }

    #[test]
    fn test_rejects_foreign_characters() {
        for text in ["Zm9v!", "Zm 9v", "Zm9v\n", "Zm-_", "Zé=="] {
            let err = from_text(text).unwrap_err();
            assert_eq!(err.code(), ErrorCode::MalformedText, "{:?}", text);
        }
    }

    #[test]
    fn test_rejects_bad_padding() {
        for text in ["Zg", "Zg=", "Zg===", "Z===", "=Zg=", "Zm9vY"] {
            let err = from_text(text).unwrap_err();
            assert_eq!(err.code(), ErrorCode::MalformedText, "{:?}", text);
        }
    }

    #[test]
    fn test_rejects_trailing_bits() {
        // "Zh==" carries bits beyond the single encoded byte.
        assert_eq!(from_text("Zh==").unwrap_err().code(), ErrorCode::MalformedText);
    }

    #[test]
    fn test_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(from_text(&to_text(&bytes).unwrap()).unwrap(), bytes);
    }
}
