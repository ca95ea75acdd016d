use super::{batch_number_at, sequenced_batch, SequenceBatchesDecoder, SequenceMetadata};
use crate::{abi::calls::banana, DecodeError};

use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use zkevm_sync_primitives::{BananaSequenceData, BatchData, SequencedBatch};

const METHOD: &str = "sequenceBatchesBanana";

/// Decoder for the Banana `sequenceBatches` layout.
///
/// Besides the batch array, the calldata pins the L1 info tree leaf count and
/// the accumulated input hash the sequencer expects after the sequence; both
/// are surfaced on every record, together with the event-reported L1 info
/// root, so the consumer can verify the accumulated input hash chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct BananaDecoder;

#[async_trait::async_trait]
impl SequenceBatchesDecoder for BananaDecoder {
    fn matches(&self, selector: &[u8]) -> bool {
        selector == banana::sequenceBatchesCall::SELECTOR
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
        let call = banana::sequenceBatchesCall::abi_decode(data)
            .map_err(|source| DecodeError::abi(METHOD, source))?;

        let banana_data = BananaSequenceData {
            counter_l1_info_root: call.l1InfoTreeLeafCount,
            max_sequence_timestamp: call.maxSequenceTimestamp,
            expected_final_acc_input_hash: call.expectedFinalAccInputHash,
            data_availability_msg: Bytes::new(),
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
                    BatchData::Banana { batch: batch.into(), banana: banana_data.clone() },
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex, B256};

    // Calldata of a `sequenceBatchesBanana` transaction sequencing three
    // batches.
    const SEQUENCE_CALLDATA: &str = "b910e0f900000000000000000000000000000000000000000000000000000000000000a000000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000066c4b6531317f62f023ccd827099d9070ac5eb453040af849485827b42eb6ac92fe112530000000000000000000000005b06837a43bdc3dd9f114558daf4b26ed49842ed00000000000000000000000000000000000000000000000000000000000000030000000000000000000000000000000000000000000000000000000000000060000000000000000000000000000000000000000000000000000000000000012000000000000000000000000000000000000000000000000000000000000001e0000000000000000000000000000000000000000000000000000000000000008000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000120b0000007a000000000b00000006000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000008000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000120b00000006000000000b000000060000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000080000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001b0b00000006000000000b00000006000000000b00000006000000000000000000";

    fn meta() -> SequenceMetadata {
        SequenceMetadata {
            last_batch_number: 4,
            sequencer: address!("5b06837A43bdC3dD9F114558DAf4B26ed49842Ed"),
            tx_hash: b256!("2b3fa84d57739604e5fbbc921fca588842923c64e28e0636609ee7ba1bea8c64"),
            nonce: 1,
            l1_info_root: b256!(
                "a958fee09bf3c4d782ab6839f81c8f40316521e19ba088b9c1a580c9a1438506"
            ),
        }
    }

    #[tokio::test]
    async fn decodes_a_captured_banana_sequence() -> eyre::Result<()> {
        let data = hex::decode(SEQUENCE_CALLDATA)?;
        assert_eq!(&data[..4], hex!("b910e0f9"));

        let meta = meta();
        let decoded = BananaDecoder.decode(&data, &meta).await?;

        assert_eq!(decoded.len(), 3);
        assert_eq!(
            decoded.iter().map(|batch| batch.batch_number).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );

        for batch in &decoded {
            assert_eq!(batch.sequencer, meta.sequencer);
            assert_eq!(batch.coinbase, meta.sequencer);
            assert_eq!(batch.l1_info_root, Some(meta.l1_info_root));

            let Some(BatchData::Banana { banana, .. }) = &batch.data else {
                panic!("expected banana batch data");
            };
            assert_eq!(banana.counter_l1_info_root, 1);
            assert_eq!(banana.max_sequence_timestamp, 1724167763);
            assert_eq!(
                banana.expected_final_acc_input_hash,
                b256!("1317f62f023ccd827099d9070ac5eb453040af849485827b42eb6ac92fe11253")
            );
            assert!(banana.data_availability_msg.is_empty());
        }

        let Some(BatchData::Banana { batch, .. }) = &decoded[0].data else {
            panic!("expected banana batch data");
        };
        assert_eq!(
            batch.transactions.as_ref(),
            hex!("0b0000007a000000000b0000000600000000").as_slice()
        );
        assert_eq!(batch.forced_timestamp, 0);
        assert_eq!(batch.forced_global_exit_root, B256::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn corrupted_calldata_is_rejected() -> eyre::Result<()> {
        let mut data = hex::decode(SEQUENCE_CALLDATA)?;

        // corrupt the batch array length word.
        let len_word_end = 4 + 0xa0 + 31;
        data[len_word_end] = 0xff;

        let err = BananaDecoder.decode(&data, &meta()).await.unwrap_err();
        assert!(matches!(err, DecodeError::Abi { method: METHOD, .. }));

        Ok(())
    }

    #[test]
    fn matches_only_its_own_selector() {
        assert!(BananaDecoder.matches(&hex!("b910e0f9")));
        assert!(!BananaDecoder.matches(&hex!("def57e54")));
        assert_eq!(BananaDecoder.name(&hex!("b910e0f9")), METHOD);
        assert_eq!(BananaDecoder.name(&hex!("def57e54")), "");
    }
}
