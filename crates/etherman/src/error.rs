use crate::provider::L1RpcError;

use alloy_primitives::B256;
use zkevm_sync_l1::DecodeError;

/// A [`Result`] that uses [`EthermanError`] as the error type.
pub type EthermanResult<T> = Result<T, EthermanError>;

/// An error surfaced by the etherman client.
#[derive(Debug, thiserror::Error)]
pub enum EthermanError {
    /// The endpoint reports a different chain id than configured.
    #[error("l1 chain id mismatch: configured {expected}, reported {reported}")]
    ChainIdMismatch {
        /// The configured chain id.
        expected: u64,
        /// The chain id reported by the endpoint.
        reported: u64,
    },
    /// The requested object does not exist on the endpoint.
    #[error("not found")]
    NotFound,
    /// Validium mode is enabled but no data-availability provider was given.
    #[error("validium mode enabled without a data availability provider")]
    MissingDataAvailability,
    /// An Ethereum request failed.
    #[error(transparent)]
    Request(#[from] EthRequestError),
    /// A filtered log is malformed or inconsistent.
    #[error(transparent)]
    Logs(#[from] FilterLogError),
    /// Sequencing calldata could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A contract view call returned bytes outside the expected ABI.
    #[error("view call {method} returned malformed data: {source}")]
    CallDecode {
        /// The view method issued.
        method: &'static str,
        /// The underlying ABI error.
        source: alloy_sol_types::Error,
    },
    /// A log references a block older than the bucket tail.
    #[error("event for block {block_number} ({block_hash}) is older than the processed tail")]
    EventOrdering {
        /// The block number of the offending log.
        block_number: u64,
        /// The block hash of the offending log.
        block_hash: B256,
    },
    /// The configured genesis block contains no fork definition event.
    #[error("genesis block {0} contains no fork definition event")]
    GenesisNotFound(u64),
    /// The configured genesis block holds a fork event that is not initial.
    #[error("genesis block {block_number} fork event is not initial (batch {num_batch})")]
    GenesisNotInitial {
        /// The configured genesis block number.
        block_number: u64,
        /// The batch number carried by the fork event.
        num_batch: u64,
    },
    /// The L2 chain id resolved to zero.
    #[error("l2 chain id reported as zero")]
    ZeroL2ChainId,
}

impl From<L1RpcError> for EthermanError {
    fn from(value: L1RpcError) -> Self {
        Self::Request(EthRequestError::Rpc(value))
    }
}

/// An error from an Ethereum request issued by the client.
#[derive(Debug, thiserror::Error)]
pub enum EthRequestError {
    /// The underlying RPC transport failed.
    #[error("rpc error: {0}")]
    Rpc(#[from] L1RpcError),
    /// The endpoint returned no block for the hash.
    #[error("missing block {0}")]
    MissingBlock(B256),
    /// The endpoint returned no transaction at the log's index.
    #[error("missing transaction at index {tx_index} of block {block_hash}")]
    MissingTransaction {
        /// The block the transaction was expected in.
        block_hash: B256,
        /// The index of the expected transaction.
        tx_index: u64,
    },
}

/// An error raised by a malformed or inconsistent filtered log.
#[derive(Debug, thiserror::Error)]
pub enum FilterLogError {
    /// The log carries no block number.
    #[error("missing block number in log")]
    MissingBlockNumber,
    /// The log carries no block hash.
    #[error("missing block hash in log")]
    MissingBlockHash,
    /// The log carries no transaction hash.
    #[error("missing transaction hash in log")]
    MissingTransactionHash,
    /// The log carries no transaction index.
    #[error("missing transaction index in log")]
    MissingTransactionIndex,
    /// The log payload does not decode as the event its topic names.
    #[error("failed to decode log as {log_type}: {error}")]
    DecodeLogFailed {
        /// The event the topic resolved to.
        log_type: &'static str,
        /// The underlying ABI error.
        error: alloy_sol_types::Error,
    },
    /// The transaction at the log's index hashes differently than the log
    /// claims.
    #[error("transaction hash mismatch: log has {expected}, block has {actual}")]
    TransactionHashMismatch {
        /// The hash recorded in the log.
        expected: B256,
        /// The hash of the transaction found at the log's index.
        actual: B256,
    },
}
