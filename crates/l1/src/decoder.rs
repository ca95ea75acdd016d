//! Decoders for the `sequenceBatches` calldata layouts. Every protocol fork
//! changed the layout, so the set is probed in registration order by the
//! four-byte method selector; validium layouts join the set only when a
//! data-availability provider is configured.

pub use banana::BananaDecoder;
mod banana;

pub use elderberry::ElderberryDecoder;
mod elderberry;

pub use etrog::EtrogDecoder;
mod etrog;

pub use force::{decode_force_batch_transactions, decode_sequence_force_batches};
mod force;

pub use pre_etrog::PreEtrogDecoder;
mod pre_etrog;

pub use validium::{ElderberryValidiumDecoder, EtrogValidiumDecoder};
mod validium;

use crate::{DataAvailabilityProvider, DecodeError};

use alloy_primitives::{Address, Selector, B256};
use std::sync::Arc;
use zkevm_sync_primitives::{BatchData, SequencedBatch};

/// The event and transaction context a decoder receives alongside the raw
/// calldata.
#[derive(Debug, Clone, Copy)]
pub struct SequenceMetadata {
    /// The highest batch number reported by the sequencing event.
    pub last_batch_number: u64,
    /// The sender recovered from the sequencing transaction.
    pub sequencer: Address,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The nonce of the sequencing transaction.
    pub nonce: u64,
    /// The L1 info root reported by the sequencing event.
    pub l1_info_root: B256,
}

/// A decoder for one `sequenceBatches` calldata layout.
#[async_trait::async_trait]
pub trait SequenceBatchesDecoder: Send + Sync + std::fmt::Debug {
    /// Whether the four-byte selector belongs to this decoder.
    fn matches(&self, selector: &[u8]) -> bool;

    /// The method name when the selector matches, the empty string otherwise.
    fn name(&self, selector: &[u8]) -> &'static str;

    /// Decodes selector-prefixed calldata into the batch group it sequences.
    async fn decode(
        &self,
        data: &[u8],
        meta: &SequenceMetadata,
    ) -> Result<Vec<SequencedBatch>, DecodeError>;
}

/// Probes `decoders` in order and decodes `data` with the first match.
pub async fn decode_sequence_batches(
    decoders: &[Box<dyn SequenceBatchesDecoder>],
    data: &[u8],
    meta: &SequenceMetadata,
) -> Result<Vec<SequencedBatch>, DecodeError> {
    let selector = data.get(..4).ok_or(DecodeError::MissingSelector)?;
    for decoder in decoders {
        if decoder.matches(selector) {
            tracing::debug!(target: "zkevm::l1", method = decoder.name(selector), "decoding sequence calldata");
            return decoder.decode(data, meta).await;
        }
    }
    Err(DecodeError::UnknownSelector(
        Selector::try_from(selector).expect("selector is four bytes"),
    ))
}

/// The decoder set of a rollup-mode client.
pub fn rollup_decoders() -> Vec<Box<dyn SequenceBatchesDecoder>> {
    vec![
        Box::new(EtrogDecoder),
        Box::new(ElderberryDecoder),
        Box::new(BananaDecoder),
        Box::new(PreEtrogDecoder),
    ]
}

/// The decoder set of a validium-mode client: the rollup layouts plus the
/// validium layouts bound to the given data-availability provider.
pub fn validium_decoders(
    da: Arc<dyn DataAvailabilityProvider>,
) -> Vec<Box<dyn SequenceBatchesDecoder>> {
    let mut decoders = rollup_decoders();
    decoders.push(Box::new(EtrogValidiumDecoder::new(da.clone())));
    decoders.push(Box::new(ElderberryValidiumDecoder::new(da)));
    decoders
}

/// Numbers the `index`-th item of a group of `len` batches whose highest
/// number is `last`: batches are contiguous and end at `last`.
pub(crate) fn batch_number_at(last: u64, len: usize, index: usize) -> u64 {
    last - (len as u64 - 1 - index as u64)
}

/// Builds one sequenced batch record from the decoder context.
pub(crate) fn sequenced_batch(
    meta: &SequenceMetadata,
    coinbase: Address,
    batch_number: u64,
    data: BatchData,
) -> SequencedBatch {
    SequencedBatch {
        batch_number,
        sequencer: meta.sequencer,
        tx_hash: meta.tx_hash,
        nonce: meta.nonce,
        coinbase,
        l1_info_root: Some(meta.l1_info_root),
        data: Some(data),
    }
}
