use alloy_primitives::{Bytes, B256};

/// An instance of the trait can resolve validium batch commitments to the
/// transaction bytes they commit to. Implementations typically query a data
/// availability committee or an external storage layer.
#[async_trait::async_trait]
pub trait DataAvailabilityProvider: Send + Sync + std::fmt::Debug {
    /// Returns the transactions committed to by `commitment` for the given
    /// batch, using the data-availability message carried by the sequencing
    /// calldata.
    async fn batch_transactions(
        &self,
        batch_number: u64,
        commitment: B256,
        data_availability_msg: &Bytes,
    ) -> Result<Bytes, DataAvailabilityError>;
}

/// A failure to resolve a validium commitment.
#[derive(Debug, thiserror::Error)]
#[error("transactions for batch {batch_number} (commitment {commitment}) unavailable: {reason}")]
pub struct DataAvailabilityError {
    /// The batch whose transactions were requested.
    pub batch_number: u64,
    /// The on-chain commitment that could not be resolved.
    pub commitment: B256,
    /// A provider-specific description of the failure.
    pub reason: String,
}

impl DataAvailabilityError {
    /// Returns a new [`DataAvailabilityError`].
    pub const fn new(batch_number: u64, commitment: B256, reason: String) -> Self {
        Self { batch_number, commitment, reason }
    }
}
