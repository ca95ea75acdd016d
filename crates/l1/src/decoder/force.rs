use super::batch_number_at;
use crate::{abi::calls::etrog, DecodeError};

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use zkevm_sync_primitives::SequencedForceBatch;

/// Decodes `sequenceForceBatches` calldata into the group of forced batches
/// it settles. `timestamp` is the L1 timestamp of the containing block and is
/// stamped on every record.
pub fn decode_sequence_force_batches(
    data: &[u8],
    last_batch_number: u64,
    coinbase: Address,
    tx_hash: B256,
    nonce: u64,
    timestamp: u64,
) -> Result<Vec<SequencedForceBatch>, DecodeError> {
    let call = etrog::sequenceForceBatchesCall::abi_decode(data)
        .map_err(|source| DecodeError::abi("sequenceForceBatches", source))?;

    let len = call.batches.len();
    Ok(call
        .batches
        .into_iter()
        .enumerate()
        .map(|(i, batch)| SequencedForceBatch {
            batch_number: batch_number_at(last_batch_number, len, i),
            coinbase,
            tx_hash,
            timestamp,
            nonce,
            batch: batch.into(),
        })
        .collect())
}

/// Extracts the raw transactions argument from `forceBatch` calldata.
pub fn decode_force_batch_transactions(data: &[u8]) -> Result<Bytes, DecodeError> {
    let call = etrog::forceBatchCall::abi_decode(data)
        .map_err(|source| DecodeError::abi("forceBatch", source))?;
    Ok(call.transactions)
}
