//! Envelope framing and whole-buffer encrypt/decrypt
//!
//! An envelope is the IV followed directly by the CBC ciphertext of the
//! padded plaintext. There is no header, version tag or MAC; both sides agree
//! on cipher, mode and key out of band.

use rand::{CryptoRng, RngCore};

use super::cipher::{decrypt_block_chain, encrypt_block_chain, Iv};
use super::key::Key;
use super::padding::{pad, padded_len, unpad};
use super::BLOCK_SIZE;
use crate::error::{CryptError, CryptResult};

/// Size of the envelope produced for a plaintext of `plaintext_len` bytes
pub fn envelope_len(plaintext_len: usize) -> usize {
    BLOCK_SIZE + padded_len(plaintext_len)
}

/// Split an envelope into its IV and ciphertext
pub fn split(envelope: &[u8]) -> CryptResult<(Iv, &[u8])> {
    if envelope.len() < BLOCK_SIZE {
        return Err(CryptError::EnvelopeTooShort {
            len: envelope.len(),
        });
    }

    let (iv, ciphertext) = envelope.split_at(BLOCK_SIZE);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptError::MalformedCiphertextLength {
            len: ciphertext.len(),
        });
    }

    Ok((Iv::from_slice(iv)?, ciphertext))
}

/// Concatenate an IV and ciphertext into an envelope
pub fn join(iv: &Iv, ciphertext: &[u8]) -> Vec<u8> {
    let mut envelope = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    envelope.extend_from_slice(iv.as_bytes());
    envelope.extend_from_slice(ciphertext);
    envelope
}

/// Encrypt a buffer under a fresh random IV
pub fn encrypt(raw: &[u8], key: &Key) -> CryptResult<Vec<u8>> {
    encrypt_with_iv(raw, key, &Iv::generate())
}

/// Encrypt a buffer, drawing the IV from `rng`
pub fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
    raw: &[u8],
    key: &Key,
    rng: &mut R,
) -> CryptResult<Vec<u8>> {
    encrypt_with_iv(raw, key, &Iv::from_rng(rng))
}

fn encrypt_with_iv(raw: &[u8], key: &Key, iv: &Iv) -> CryptResult<Vec<u8>> {
    let padded = pad(raw);
    let ciphertext = encrypt_block_chain(key, iv, &padded)?;
    Ok(join(iv, &ciphertext))
}

/// Decrypt an envelope back to the original bytes
///
/// Returns [`CryptError::InvalidPadding`] when the key is wrong or the
/// envelope was altered, in the (likely) case the damage reaches the padding.
pub fn decrypt(envelope: &[u8], key: &Key) -> CryptResult<Vec<u8>> {
    let (iv, ciphertext) = split(envelope)?;
    let padded = decrypt_block_chain(key, &iv, ciphertext)?;
    unpad(&padded).map(<[u8]>::to_vec)
}
