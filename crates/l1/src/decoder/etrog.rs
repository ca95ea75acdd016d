use super::{batch_number_at, sequenced_batch, SequenceBatchesDecoder, SequenceMetadata};
use crate::{abi::calls::etrog, DecodeError};

use alloy_sol_types::SolCall;
use zkevm_sync_primitives::{BatchData, SequencedBatch};

const METHOD: &str = "sequenceBatchesEtrog";

/// Decoder for the Etrog `sequenceBatches` layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct EtrogDecoder;

#[async_trait::async_trait]
impl SequenceBatchesDecoder for EtrogDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == etrog::sequenceBatchesCall::SELECTOR
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
        let call = etrog::sequenceBatchesCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD, source))?;

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
                    BatchData::Etrog(batch.into()),
                )
            })
            .collect())
    }
}
