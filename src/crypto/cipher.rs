//! AES-CBC block chaining
//!
//! Thin wrapper over the RustCrypto `cbc` mode. Padding is handled by the
//! envelope codec, so the mode always runs with `NoPadding` and the buffers
//! passed in must already be block-aligned.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::key::{Key, KeySize};
use super::BLOCK_SIZE;
use crate::error::{CryptError, CryptResult};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// A CBC initialization vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; BLOCK_SIZE]);

impl Iv {
    /// Draw a fresh IV from the OS random source
    pub fn generate() -> Self {
        Self::from_rng(&mut OsRng)
    }

    /// Draw a fresh IV from a caller-supplied secure source
    pub fn from_rng<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build an IV from exactly `BLOCK_SIZE` bytes
    pub fn from_slice(bytes: &[u8]) -> CryptResult<Self> {
        let bytes: [u8; BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptError::InvalidIvLength {
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl From<[u8; BLOCK_SIZE]> for Iv {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

fn check_aligned(data: &[u8]) -> CryptResult<()> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(CryptError::MalformedCiphertextLength { len: data.len() });
    }
    Ok(())
}

fn bad_key(key: &Key) -> CryptError {
    CryptError::InvalidKeySize {
        actual: key.as_bytes().len(),
    }
}

/// Encrypt block-aligned plaintext in CBC mode
///
/// The output has the same length as the input. Identical key, IV and
/// plaintext always produce identical ciphertext.
pub fn encrypt_block_chain(key: &Key, iv: &Iv, padded_plaintext: &[u8]) -> CryptResult<Vec<u8>> {
    check_aligned(padded_plaintext)?;

    let mut buf = padded_plaintext.to_vec();
    let len = buf.len();
    let (k, iv) = (key.as_bytes(), iv.as_bytes().as_slice());

    let result = match key.size() {
        KeySize::Aes128 => Aes128CbcEnc::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map(|_| ()),
        KeySize::Aes192 => Aes192CbcEnc::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map(|_| ()),
        KeySize::Aes256 => Aes256CbcEnc::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map(|_| ()),
    };
    result.map_err(|_| CryptError::MalformedCiphertextLength { len })?;

    Ok(buf)
}

/// Decrypt block-aligned ciphertext in CBC mode
///
/// A wrong key or IV is not detected here; the result is simply garbage that
/// the padding check will usually reject.
pub fn decrypt_block_chain(key: &Key, iv: &Iv, ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
    check_aligned(ciphertext)?;

    let mut buf = ciphertext.to_vec();
    let len = buf.len();
    let (k, iv) = (key.as_bytes(), iv.as_bytes().as_slice());

    let result = match key.size() {
        KeySize::Aes128 => Aes128CbcDec::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map(|_| ()),
        KeySize::Aes192 => Aes192CbcDec::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map(|_| ()),
        KeySize::Aes256 => Aes256CbcDec::new_from_slices(k, iv)
            .map_err(|_| bad_key(key))?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map(|_| ()),
    };
    result.map_err(|_| CryptError::MalformedCiphertextLength { len })?;

    Ok(buf)
}
