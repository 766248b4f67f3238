//! ECDSA P-256 signer.
//!
//! Signatures are DER-encoded over SHA-256 of the message.

use crate::domain::errors::CredentialError;
use crate::ports::outbound::ProposalSigner;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;
use p256::SecretKey;
use shared_types::NetworkError;

/// Client or peer signing key.
#[derive(Clone)]
pub struct EcdsaSigner {
    key: SigningKey,
}

impl EcdsaSigner {
    /// Parse a PEM private key (PKCS#8, or SEC1 `EC PRIVATE KEY`).
    pub fn from_pem(pem: &str) -> Result<Self, CredentialError> {
        let secret = match SecretKey::from_pkcs8_pem(pem) {
            Ok(secret) => secret,
            Err(pkcs8_err) => SecretKey::from_sec1_pem(pem).map_err(|_| {
                CredentialError::InvalidKey(format!("not a P-256 private key: {pkcs8_err}"))
            })?,
        };
        Ok(Self {
            key: SigningKey::from(secret),
        })
    }

    /// Fresh random key.
    pub fn generate() -> Self {
        Self {
            key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.key)
    }

    /// SEC1 encoded public key.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.verifying_key().to_encoded_point(true).as_bytes().to_vec()
    }
}

impl ProposalSigner for EcdsaSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, NetworkError> {
        let signature: Signature = self
            .key
            .try_sign(message)
            .map_err(|e| NetworkError::Signing(e.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("public_key", &hex_prefix(&self.public_key_bytes()))
            .finish()
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

/// Check a DER signature produced by [`EcdsaSigner`].
pub fn verify_signature(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_der(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}
