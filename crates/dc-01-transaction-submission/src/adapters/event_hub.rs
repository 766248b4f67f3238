//! Commit event hub as a `CommitEventSource`.

use crate::ports::outbound::CommitEventSource;
use async_trait::async_trait;
use shared_bus::{CommitEventHub, CommitListener};
use shared_types::{NetworkError, TransactionId};

#[async_trait]
impl CommitEventSource for CommitEventHub {
    async fn listen(&self, tx_id: &TransactionId) -> Result<CommitListener, NetworkError> {
        self.register(tx_id)
            .map_err(|e| NetworkError::Listener(e.to_string()))
    }
}
