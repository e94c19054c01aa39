//! AES-GCM encryption of entity text.
//!
//! The `key` parameter is used as raw bytes; its length picks the cipher
//! (16 → AES-128, 24 → AES-192, 32 → AES-256). Each call draws a fresh
//! 96-bit nonce, so output is not deterministic.
//!
//! ```text
//! base64( nonce[12] ‖ ciphertext ‖ tag[16] )
//! ```

use super::params::required_str;
use super::{Operator, OperatorTraits};
use crate::{ParamError, Params};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use base64::Engine;
use rand::RngCore;

const KEY: &str = "key";

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

type Aes192Gcm = AesGcm<aes_gcm::aes::Aes192, U12>;

fn key_bytes(params: &Params) -> Result<&[u8], ParamError> {
    let key = required_str(params, KEY)?.as_bytes();
    match key.len() {
        16 | 24 | 32 => Ok(key),
        other => Err(ParamError::Constraint {
            name: KEY.to_string(),
            constraint: format!("must be 16, 24 or 32 bytes long (got {other})"),
        }),
    }
}

fn cipher_failure(action: &str) -> ParamError {
    ParamError::Constraint { name: KEY.to_string(), constraint: format!("{action} failed") }
}

fn seal<C>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ParamError>
where
    C: Aead + AeadCore<NonceSize = U12> + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| cipher_failure("key setup"))?;

    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext =
        cipher.encrypt(GenericArray::from_slice(&nonce), plaintext).map_err(|_| cipher_failure("encryption"))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn open<C>(key: &[u8], sealed: &[u8]) -> Result<Vec<u8>, ParamError>
where
    C: Aead + AeadCore<NonceSize = U12> + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| cipher_failure("key setup"))?;
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
    cipher.decrypt(GenericArray::from_slice(nonce), ciphertext).map_err(|_| cipher_failure("decryption"))
}

/// Replaces the text with its AES-GCM ciphertext, base64 encoded.
///
/// [`Encrypt::decrypt`] recovers the original given the same key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encrypt;

impl Encrypt {
    /// Reverse of [`Operator::operate`] for this operator.
    ///
    /// Fails with [`ParamError::Constraint`] on a malformed token, a wrong
    /// key or tampered data.
    pub fn decrypt(&self, token: &str, params: &Params) -> Result<String, ParamError> {
        let key = key_bytes(params)?;
        let malformed = || ParamError::Constraint {
            name: "token".to_string(),
            constraint: "must be base64 of nonce and ciphertext".to_string(),
        };

        let sealed = base64::engine::general_purpose::STANDARD.decode(token.trim()).map_err(|_| malformed())?;
        if sealed.len() < NONCE_SIZE + TAG_SIZE {
            return Err(malformed());
        }

        let plaintext = match key.len() {
            16 => open::<Aes128Gcm>(key, &sealed)?,
            24 => open::<Aes192Gcm>(key, &sealed)?,
            _ => open::<Aes256Gcm>(key, &sealed)?,
        };
        String::from_utf8(plaintext).map_err(|_| malformed())
    }
}

impl Operator for Encrypt {
    fn name(&self) -> &str {
        "encrypt"
    }

    fn traits(&self) -> OperatorTraits {
        OperatorTraits::REVERSIBLE
    }

    fn validate(&self, params: &Params) -> Result<(), ParamError> {
        key_bytes(params).map(|_| ())
    }

    fn operate(&self, text: &str, params: &Params) -> Result<String, ParamError> {
        let key = key_bytes(params)?;
        let sealed = match key.len() {
            16 => seal::<Aes128Gcm>(key, text.as_bytes())?,
            24 => seal::<Aes192Gcm>(key, text.as_bytes())?,
            _ => seal::<Aes256Gcm>(key, text.as_bytes())?,
        };

        tracing::trace!(plaintext_len = text.len(), sealed_len = sealed.len(), "encrypted entity");
        Ok(base64::engine::general_purpose::STANDARD.encode(sealed))
    }
}
