//! Transaction management.
//!
//! Propagation runs only ever read the graph, so the interesting piece here
//! is [`ReadSnapshot`]: a scoped read transaction that is always released,
//! whether the run ends in success, an error, or an early return.

use serde::{Deserialize, Serialize};

use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Transaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Opaque transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub u64);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

/// Transaction trait that all backends must implement.
pub trait Transaction: Send + Sync {
    fn mode(&self) -> TxMode;
    fn id(&self) -> TxId;
}

// ============================================================================
// ReadSnapshot
// ============================================================================

/// A read-only transaction bound to its backend.
///
/// Call [`ReadSnapshot::end`] to commit (`success = true`) or roll back.
/// Dropping the guard without ending it releases the transaction through
/// [`StorageBackend::release_tx`].
pub struct ReadSnapshot<'b, B: StorageBackend> {
    backend: &'b B,
    tx: Option<B::Tx>,
}

impl<'b, B: StorageBackend> ReadSnapshot<'b, B> {
    /// Begin a read-only transaction. Backend failures surface as
    /// `Error::SnapshotError`.
    pub async fn open(backend: &'b B) -> Result<Self> {
        let tx = backend.begin_tx(TxMode::ReadOnly).await.map_err(|e| match e {
            Error::SnapshotError(_) => e,
            other => Error::SnapshotError(other.to_string()),
        })?;
        tracing::debug!(tx = %tx.id(), "read snapshot opened");
        Ok(Self { backend, tx: Some(tx) })
    }

    pub fn backend(&self) -> &'b B {
        self.backend
    }

    /// The underlying transaction.
    pub fn tx(&self) -> Result<&B::Tx> {
        self.tx.as_ref().ok_or_else(|| Error::TxError("snapshot already ended".into()))
    }

    /// End the snapshot: commit on success, roll back otherwise.
    pub async fn end(mut self, success: bool) -> Result<()> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        let id = tx.id();
        if success {
            self.backend.commit_tx(tx).await?;
        } else {
            self.backend.rollback_tx(tx).await?;
        }
        tracing::debug!(tx = %id, success, "read snapshot ended");
        Ok(())
    }
}

impl<B: StorageBackend> Drop for ReadSnapshot<'_, B> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::warn!(tx = %tx.id(), "read snapshot dropped without end; releasing");
            self.backend.release_tx(tx);
        }
    }
}
