use super::{batch_number_at, SequenceBatchesDecoder, SequenceMetadata};
use crate::{abi::calls::pre_etrog, DecodeError};

use alloy_sol_types::SolCall;
use zkevm_sync_primitives::{BatchData, SequencedBatch};

const METHOD: &str = "sequenceBatchesPreEtrog";

/// Decoder for the `sequenceBatches` layout used before the Etrog upgrade.
///
/// Pre-Etrog sequencing events carry no L1 info root, so the records leave it
/// unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreEtrogDecoder;

#[async_trait::async_trait]
impl SequenceBatchesDecoder for PreEtrogDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == pre_etrog::sequenceBatchesCall::SELECTOR
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
        let call = pre_etrog::sequenceBatchesCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD, source))?;

        let len = call.batches.len();
        Ok(call
            .batches
            .into_iter()
            .enumerate()
            .map(|(i, batch)| SequencedBatch {
                batch_number: batch_number_at(meta.last_batch_number, len, i),
                sequencer: meta.sequencer,
                tx_hash: meta.tx_hash,
                nonce: meta.nonce,
                coinbase: call.l2Coinbase,
                l1_info_root: None,
                data: Some(BatchData::PreEtrog(batch.into())),
            })
            .collect())
    }
}
