use super::{batch_number_at, sequenced_batch, SequenceBatchesDecoder, SequenceMetadata};
use crate::{
    abi::calls::{elderberry_validium, validium},
    DataAvailabilityProvider, DecodeError,
};

use alloy_sol_types::SolCall;
use std::sync::Arc;
use zkevm_sync_primitives::{
    BatchData, ElderberrySequenceData, EtrogBatchData, SequencedBatch,
};

const METHOD_ETROG: &str = "sequenceBatchesValidiumEtrog";
const METHOD_ELDERBERRY: &str = "sequenceBatchesValidiumElderberry";

/// Decoder for the Etrog validium sequencing layout.
///
/// The calldata commits to each batch's transactions instead of inlining
/// them; the records carry the bytes resolved through the data-availability
/// provider.
#[derive(Debug)]
pub struct EtrogValidiumDecoder {
    da: Arc<dyn DataAvailabilityProvider>,
}

impl EtrogValidiumDecoder {
    /// Returns a new decoder resolving commitments through `da`.
    pub fn new(da: Arc<dyn DataAvailabilityProvider>) -> Self {
        Self { da }
    }
}

#[async_trait::async_trait]
impl SequenceBatchesDecoder for EtrogValidiumDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == validium::sequenceBatchesValidiumCall::SELECTOR
    }

    fn name(&self, selector: &[u8]) -> &'static str {
        if self.matches(selector) {
            METHOD_ETROG
        } else {
            ""
        }
    }

    async fn decode(
        &self,
        data: &[u8],
        meta: &SequenceMetadata,
    ) -> Result<Vec<SequencedBatch>, DecodeError> {
        let call = validium::sequenceBatchesValidiumCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD_ETROG, source))?;

        let len = call.batches.len();
        let mut records = Vec::with_capacity(len);
        for (i, batch) in call.batches.into_iter().enumerate() {
            let batch_number = batch_number_at(meta.last_batch_number, len, i);
            let transactions = self
                .da
                .batch_transactions(
                    batch_number,
                    batch.transactionsHash,
                    &call.dataAvailabilityMessage,
                )
                .await?;
            records.push(sequenced_batch(
                meta,
                call.l2Coinbase,
                batch_number,
                BatchData::Etrog(EtrogBatchData {
                    transactions,
                    forced_global_exit_root: batch.forcedGlobalExitRoot,
                    forced_timestamp: batch.forcedTimestamp,
                    forced_block_hash_l1: batch.forcedBlockHashL1,
                }),
            ));
        }
        Ok(records)
    }
}

/// Decoder for the Elderberry validium sequencing layout.
#[derive(Debug)]
pub struct ElderberryValidiumDecoder {
    da: Arc<dyn DataAvailabilityProvider>,
}

impl ElderberryValidiumDecoder {
    /// Returns a new decoder resolving commitments through `da`.
    pub fn new(da: Arc<dyn DataAvailabilityProvider>) -> Self {
        Self { da }
    }
}

#[async_trait::async_trait]
impl SequenceBatchesDecoder for ElderberryValidiumDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == elderberry_validium::sequenceBatchesValidiumCall::SELECTOR
    }

    fn name(&self, selector: &[u8]) -> &'static str {
        if self.matches(selector) {
            METHOD_ELDERBERRY
        } else {
            ""
        }
    }

    async fn decode(
        &self,
        data: &[u8],
        meta: &SequenceMetadata,
    ) -> Result<Vec<SequencedBatch>, DecodeError> {
        let call = elderberry_validium::sequenceBatchesValidiumCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD_ELDERBERRY, source))?;

        let elderberry_data = ElderberrySequenceData {
            max_sequence_timestamp: call.maxSequenceTimestamp,
            init_sequenced_batch_number: call.initSequencedBatch,
        };
        let len = call.batches.len();
        let mut records = Vec::with_capacity(len);
        for (i, batch) in call.batches.into_iter().enumerate() {
            let batch_number = batch_number_at(meta.last_batch_number, len, i);
            let transactions = self
                .da
                .batch_transactions(
                    batch_number,
                    batch.transactionsHash,
                    &call.dataAvailabilityMessage,
                )
                .await?;
            records.push(sequenced_batch(
                meta,
                call.l2Coinbase,
                batch_number,
                BatchData::Elderberry {
                    batch: EtrogBatchData {
                        transactions,
                        forced_global_exit_root: batch.forcedGlobalExitRoot,
                        forced_timestamp: batch.forcedTimestamp,
                        forced_block_hash_l1: batch.forcedBlockHashL1,
                    },
                    elderberry: elderberry_data,
                },
            ));
        }
        Ok(records)
    }
}
