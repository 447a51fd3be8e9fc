use hmac::{Mac, SimpleHmac};
use sha2::Sha256;

use super::errors::CryptoError;

/// Webhook signature, as a hex-encoded HMAC-SHA256 digest.
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Check if a signature is valid.
    ///
    /// The comparison runs in constant time through [`Mac::verify_slice`].
    pub fn is_valid(&self, body: &[u8], secret: &str) -> Result<bool, CryptoError> {
        let decoded_signature =
            &hex::decode(self.0).map_err(|_| CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            })?;
        let mut hmac = SimpleHmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| {
            CryptoError::InvalidSecretKeyLength {
                key: secret.to_string(),
            }
        })?;

        hmac.update(body);
        Ok(hmac.verify_slice(decoded_signature).is_ok())
    }
}
