//! PKCS#7 padding
//!
//! Padding is always added: an input that is already block-aligned gains a
//! full block of `0x10` bytes, so the pad length is in `1..=BLOCK_SIZE`.

use super::BLOCK_SIZE;
use crate::error::{CryptError, CryptResult};

/// Length of `pad(data)` for an input of `len` bytes
pub fn padded_len(len: usize) -> usize {
    len + (BLOCK_SIZE - len % BLOCK_SIZE)
}

/// Append PKCS#7 padding
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip and validate PKCS#7 padding
///
/// The last byte `n` must lie in `1..=BLOCK_SIZE` and the trailing `n` bytes
/// must all equal `n`. Anything else is reported as
/// [`CryptError::InvalidPadding`], which after decryption almost always means
/// a wrong key or a damaged file.
pub fn unpad(padded: &[u8]) -> CryptResult<&[u8]> {
    let Some(&last) = padded.last() else {
        return Err(CryptError::EnvelopeTooShort { len: 0 });
    };

    let n = last as usize;
    if n == 0 || n > BLOCK_SIZE || n > padded.len() {
        return Err(CryptError::InvalidPadding);
    }

    let (data, tail) = padded.split_at(padded.len() - n);
    if tail.iter().any(|&b| b != last) {
        return Err(CryptError::InvalidPadding);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_hello_world() {
        let padded = pad(b"hello world");
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..11], b"hello world");
        assert_eq!(&padded[11..], &[5u8; 5]);
    }

    #[test]
    fn test_pad_aligned_input_gets_full_block() {
        let data = [0xAAu8; 32];
        let padded = pad(&data);
        assert_eq!(padded.len(), 48);
        assert_eq!(&padded[32..], &[16u8; 16]);
    }

    #[test]
    fn test_pad_empty() {
        assert_eq!(pad(b""), vec![16u8; 16]);
    }

    #[test]
    fn test_pad_lengths() {
        for len in 0..=64 {
            let data = vec![1u8; len];
            let padded = pad(&data);
            assert_eq!(padded.len() % BLOCK_SIZE, 0, "len {}", len);
            assert!(padded.len() > len, "len {}", len);
            assert_eq!(padded.len(), padded_len(len));
            assert_eq!(unpad(&padded).unwrap(), data.as_slice());
        }
    }

    #[test]
    fn test_unpad_empty_is_too_short() {
        assert!(matches!(
            unpad(b""),
            Err(CryptError::EnvelopeTooShort { len: 0 })
        ));
    }

    #[test]
    fn test_unpad_rejects_zero() {
        let mut block = [3u8; 16];
        block[15] = 0;
        assert!(matches!(unpad(&block), Err(CryptError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_rejects_oversized_count() {
        let block = [17u8; 16];
        assert!(matches!(unpad(&block), Err(CryptError::InvalidPadding)));

        let block = [0xFFu8; 32];
        assert!(matches!(unpad(&block), Err(CryptError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_rejects_inconsistent_run() {
        let mut block = pad(b"hello world");
        block[12] = 4;
        assert!(matches!(unpad(&block), Err(CryptError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_count_longer_than_input() {
        // A short buffer claiming more padding than it holds
        let buf = [4u8, 4, 4];
        assert!(matches!(unpad(&buf), Err(CryptError::InvalidPadding)));
    }
}
