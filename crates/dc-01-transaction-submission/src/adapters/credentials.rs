//! MSP directory loading.
//!
//! Layout:
//!
//! ```text
//! <msp>/
//! ├── keystore/<random-name>_sk     exactly one private key
//! └── signcerts/<user>-cert.pem     signed certificate
//! ```
//!
//! The key file name changes whenever the network's crypto material is
//! regenerated, so it is discovered by listing the directory.

use crate::adapters::signing::EcdsaSigner;
use crate::domain::errors::CredentialError;
use shared_types::Creator;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const KEYSTORE_DIR: &str = "keystore";
pub const SIGNCERTS_DIR: &str = "signcerts";

/// Crypto material of one enrolled user.
#[derive(Clone)]
pub struct MspCredentials {
    pub msp_id: String,
    pub private_key_pem: String,
    pub certificate: Vec<u8>,
    pub key_path: PathBuf,
}

impl MspCredentials {
    /// Identity carried in proposals.
    pub fn creator(&self) -> Creator {
        Creator::new(self.msp_id.clone(), self.certificate.clone())
    }

    /// Parse the private key into a signer.
    pub fn signer(&self) -> Result<EcdsaSigner, CredentialError> {
        EcdsaSigner::from_pem(&self.private_key_pem)
    }
}

impl std::fmt::Debug for MspCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MspCredentials")
            .field("msp_id", &self.msp_id)
            .field("key_path", &self.key_path)
            .field("certificate_len", &self.certificate.len())
            .finish_non_exhaustive()
    }
}

/// Load key and certificate from an MSP directory.
pub fn load_msp_directory(
    msp_dir: &Path,
    msp_id: &str,
) -> Result<MspCredentials, CredentialError> {
    let keystore = msp_dir.join(KEYSTORE_DIR);
    let key_path = match list_files(&keystore)?.as_slice() {
        [] => return Err(CredentialError::MissingKey(keystore)),
        [single] => single.clone(),
        many => {
            return Err(CredentialError::AmbiguousKey {
                dir: keystore,
                count: many.len(),
            })
        }
    };
    debug!(path = %key_path.display(), "Found private key");

    let signcerts = msp_dir.join(SIGNCERTS_DIR);
    let cert_path = list_files(&signcerts)?
        .into_iter()
        .next()
        .ok_or_else(|| CredentialError::MissingCertificate(signcerts.clone()))?;

    let private_key_pem = read_to_string(&key_path)?;
    let certificate = fs::read(&cert_path).map_err(|source| CredentialError::Io {
        path: cert_path.clone(),
        source,
    })?;

    info!(
        msp_id,
        key = %key_path.display(),
        cert = %cert_path.display(),
        "Loaded MSP credentials"
    );

    Ok(MspCredentials {
        msp_id: msp_id.to_string(),
        private_key_pem,
        certificate,
        key_path,
    })
}

/// Regular, non-hidden files of `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, CredentialError> {
    let entries = fs::read_dir(dir).map_err(|source| CredentialError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CredentialError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_to_string(path: &Path) -> Result<String, CredentialError> {
    fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_path_buf(),
        source,
    })
}
