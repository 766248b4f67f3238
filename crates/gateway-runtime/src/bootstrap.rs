//! Startup wiring: identity, network session, submission service, gateway.
//!
//! ```text
//! RuntimeConfig
//!     │
//!     ├── identity ──→ MSP directory (or ephemeral key) ──→ Creator + signer
//!     ├── network  ──→ DevNetwork (peers, orderer, commit event hub)
//!     │                   │
//!     │                   └── NetworkSession (immutable, shared)
//!     ├── submission ──→ SubmissionService
//!     └── gateway ──→ ApiGatewayService (HTTP)
//! ```

use crate::config::{IdentityConfig, RuntimeConfig};
use dc_01_transaction_submission::{
    load_msp_directory, ConfigError as SubmissionConfigError, CredentialError, EcdsaSigner,
    NetworkSession, ProposalSigner, SessionError, SubmissionService, TransactionSubmissionApi,
};
use dc_02_ledger_sim::DevNetwork;
use dc_03_api_gateway::{ApiGatewayService, GatewayError};
use shared_types::Creator;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal startup and lifecycle failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load credentials: {0}")]
    Credentials(#[from] CredentialError),

    #[error("failed to build network session: {0}")]
    Session(#[from] SessionError),

    #[error("invalid submission settings: {0}")]
    Submission(#[from] SubmissionConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Submitting user: identity carried in proposals and its signing key.
#[derive(Clone)]
pub struct Identity {
    pub user_id: String,
    pub creator: Creator,
    pub signer: Arc<dyn ProposalSigner>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("msp_id", &self.creator.msp_id)
            .finish_non_exhaustive()
    }
}

/// Load the user's MSP directory, or generate a throwaway key when
/// `ephemeral` is set.
pub fn load_identity(config: &IdentityConfig) -> Result<Identity, CredentialError> {
    if config.ephemeral {
        let signer = EcdsaSigner::generate();
        warn!(
            msp_id = %config.msp_id,
            user = %config.user_id,
            "Using an ephemeral signing key"
        );
        return Ok(Identity {
            user_id: config.user_id.clone(),
            creator: Creator::new(config.msp_id.clone(), signer.public_key_bytes()),
            signer: Arc::new(signer),
        });
    }

    let credentials = load_msp_directory(&config.msp_path, &config.msp_id)?;
    let signer = credentials.signer()?;
    Ok(Identity {
        user_id: config.user_id.clone(),
        creator: credentials.creator(),
        signer: Arc::new(signer),
    })
}

/// Network and session shared by the gateway and the query tool.
pub struct Connection {
    pub network: DevNetwork,
    pub session: Arc<NetworkSession>,
}

pub fn connect(config: &RuntimeConfig, identity: Identity) -> Result<Connection, SessionError> {
    let network = DevNetwork::new(config.network.dev_network());
    let session = network.session(&identity.user_id, identity.creator, identity.signer)?;
    info!(
        user = %session.user_id(),
        msp_id = %session.creator().msp_id,
        channel = %session.channel_id(),
        chaincode = %session.chaincode_id(),
        "Network session ready"
    );
    Ok(Connection {
        network,
        session: Arc::new(session),
    })
}

/// The running gateway process.
pub struct GatewayRuntime {
    network: DevNetwork,
    submissions: Arc<SubmissionService>,
    gateway: ApiGatewayService,
}

impl GatewayRuntime {
    /// Load the identity named by `config` and wire every component.
    pub fn new(config: RuntimeConfig) -> Result<Self, BootstrapError> {
        let identity = load_identity(&config.identity)?;
        Self::with_identity(config, identity)
    }

    pub fn with_identity(
        mut config: RuntimeConfig,
        identity: Identity,
    ) -> Result<Self, BootstrapError> {
        config.align_request_timeout();
        let Connection { network, session } = connect(&config, identity)?;

        let submissions = Arc::new(SubmissionService::new(
            session,
            config.submission.submission_config(),
        )?);

        let gateway = ApiGatewayService::new(config.gateway.clone(), submissions.clone())?
            .with_events(network.hub().clone());

        Ok(Self {
            network,
            submissions,
            gateway,
        })
    }

    pub fn network(&self) -> &DevNetwork {
        &self.network
    }

    pub fn submissions(&self) -> &Arc<SubmissionService> {
        &self.submissions
    }

    pub fn gateway(&self) -> &ApiGatewayService {
        &self.gateway
    }

    /// Start serving HTTP. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr, BootstrapError> {
        info!("===========================================");
        info!("  Digital Contracts Gateway v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let addr = self.gateway.start().await?;
        info!(addr = %addr, "Gateway is ready");
        Ok(addr)
    }

    /// Stop accepting requests and wait for in-flight ones.
    pub async fn shutdown(&mut self) -> Result<(), BootstrapError> {
        info!("Shutting down gateway");
        self.gateway.shutdown().await?;
        let stats = self.submissions.stats();
        info!(
            committed = stats.committed,
            rejected = stats.rejected,
            "Gateway stopped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::pkcs8::{EncodePrivateKey, LineEnding};
    use p256::SecretKey;
    use std::fs;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn msp_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("keystore")).unwrap();
        fs::create_dir_all(dir.path().join("signcerts")).unwrap();
        let secret = SecretKey::random(&mut rand::rngs::OsRng);
        let pem = secret.to_pkcs8_pem(LineEnding::LF).unwrap();
        fs::write(dir.path().join("keystore/9f3a_sk"), pem.as_bytes()).unwrap();
        fs::write(dir.path().join("signcerts/Admin-cert.pem"), b"cert").unwrap();
        dir
    }

    fn local_config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.gateway.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.gateway.http.port = 0;
        config.network.block_delay = Duration::from_millis(5);
        config.identity.ephemeral = true;
        config
    }

    #[test]
    fn test_load_identity_from_msp() {
        let dir = msp_dir();
        let config = IdentityConfig {
            msp_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        let identity = load_identity(&config).unwrap();
        assert_eq!(identity.user_id, "BLOperator");
        assert_eq!(identity.creator.msp_id, "BlMSP");
        assert_eq!(identity.creator.certificate, b"cert");
    }

    #[test]
    fn test_missing_msp_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = local_config();
        config.identity.ephemeral = false;
        config.identity.msp_path = dir.path().join("absent");
        assert!(matches!(
            GatewayRuntime::new(config),
            Err(BootstrapError::Credentials(CredentialError::Io { .. }))
        ));
    }

    #[test]
    fn test_no_peers_is_fatal() {
        let mut config = local_config();
        config.network.peers.clear();
        assert!(matches!(
            GatewayRuntime::new(config),
            Err(BootstrapError::Session(SessionError::NoEndorsingPeers))
        ));
    }

    #[tokio::test]
    async fn test_runtime_wires_submission_path() {
        let runtime = GatewayRuntime::new(local_config()).unwrap();
        let receipt = runtime
            .submissions()
            .invoke("addContract", vec!["5".into(), "{}".into()])
            .await
            .unwrap();
        assert_eq!(receipt.block_number, 1);
        assert!(runtime.network().state().get("5").is_some());
    }

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let mut runtime = GatewayRuntime::new(local_config()).unwrap();
        let addr = runtime.start().await.unwrap();

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let body = r#"{"key":"12","value":{"client":"Montpellier"}}"#;
        let request = format!(
            "POST /addContract HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");

        runtime.shutdown().await.unwrap();
        assert_eq!(runtime.submissions().stats().committed, 1);
    }
}
