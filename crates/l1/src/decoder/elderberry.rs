use super::{batch_number_at, sequenced_batch, SequenceBatchesDecoder, SequenceMetadata};
use crate::{abi::calls::elderberry, DecodeError};

use alloy_sol_types::SolCall;
use zkevm_sync_primitives::{BatchData, ElderberrySequenceData, SequencedBatch};

const METHOD: &str = "sequenceBatchesElderberry";

/// Decoder for the Elderberry `sequenceBatches` layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElderberryDecoder;

#[async_trait::async_trait]
impl SequenceBatchesDecoder for ElderberryDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == elderberry::sequenceBatchesCall::SELECTOR
    }

    fn name(&self, selector: &[u8]) -> &'static str {
        if self.matches(selector) {
            METHOD
        } else {
            ""
        }
    }

    async fn decode(
        &self,
        data: &[u8],
        meta: &SequenceMetadata,
    ) -> Result<Vec<SequencedBatch>, DecodeError> {
        let call = elderberry::sequenceBatchesCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD, source))?;

        let elderberry_data = ElderberrySequenceData {
            max_sequence_timestamp: call.maxSequenceTimestamp,
            init_sequenced_batch_number: call.initSequencedBatch,
        };
        let len = call.batches.len();
        Ok(call
            .batches
            .into_iter()
            .enumerate()
            .map(|(i, batch)| {
                sequenced_batch(
                    meta,
                    call.l2Coinbase,
                    batch_number_at(meta.last_batch_number, len, i),
                    BatchData::Elderberry { batch: batch.into(), elderberry: elderberry_data },
                )
            })
            .collect())
    }
}
