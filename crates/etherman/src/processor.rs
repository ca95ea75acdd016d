//! Turns filtered logs into per-block event buckets with a replay order.

use crate::{
    error::{EthRequestError, EthermanError, EthermanResult, FilterLogError},
    provider::{L1RpcProvider, RpcTransaction},
    Etherman,
};

use alloy_consensus::Transaction as _;
use alloy_primitives::B256;
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use std::collections::HashMap;
use zkevm_sync_l1::{
    abi::logs::{exit_root, legacy, manager, rollup},
    decoder::{
        decode_force_batch_transactions, decode_sequence_batches, decode_sequence_force_batches,
        SequenceMetadata,
    },
    L1EventKind,
};
use zkevm_sync_primitives::{
    BatchData, EtrogBatchData, EventOrder, ForcedBatch, ForkId, GlobalExitRoot, Order, RollupBlock,
    SequencedBatch, UpdateEtrogSequence, VerifiedBatch,
};

/// The accumulated output of a block-range read: every block touched by a
/// rollup event, in first-appearance order, plus the per-block replay order.
#[derive(Debug, Default)]
pub struct RollupInfo {
    /// Blocks holding at least one rollup event, ordered by first appearance
    /// of their `(block_number, block_hash)` in the log stream.
    pub blocks: Vec<RollupBlock>,
    /// The order a consumer must apply the events of each block in, keyed by
    /// block hash.
    pub order: HashMap<B256, Vec<Order>>,
}

impl RollupInfo {
    fn tail_matches(&self, block_number: u64, block_hash: B256) -> bool {
        self.blocks.last().is_some_and(|block| block.matches(block_number, block_hash))
    }

    /// Appends an event to the tail block through `append`, which returns the
    /// ordering entry for the record it pushed.
    fn record_on_tail(&mut self, append: impl FnOnce(&mut RollupBlock) -> (EventOrder, usize)) {
        let block = self.blocks.last_mut().expect("bucket ensured before recording");
        let (kind, pos) = append(block);
        let block_hash = block.block_hash;
        self.order.entry(block_hash).or_default().push(Order::new(kind, pos));
    }
}

fn log_position(log: &Log) -> Result<(u64, B256), FilterLogError> {
    let block_number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
    let block_hash = log.block_hash.ok_or(FilterLogError::MissingBlockHash)?;
    Ok((block_number, block_hash))
}

fn decode_event<T: SolEvent>(log: &Log, log_type: &'static str) -> Result<T, FilterLogError> {
    Ok(T::decode_log(&log.inner)
        .map_err(|error| FilterLogError::DecodeLogFailed { log_type, error })?
        .data)
}

impl<P: L1RpcProvider> Etherman<P> {
    /// Processes one filtered log into `info`, consulting `prefetched` before
    /// fetching block headers on demand.
    pub(crate) async fn process_event(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let Some(topic) = log.topic0().copied() else {
            tracing::warn!(target: "zkevm::etherman", ?log, "log without topics, skipping");
            return Ok(());
        };
        let Some(kind) = L1EventKind::from_topic(topic) else {
            tracing::warn!(target: "zkevm::etherman", %topic, ?log, "event not registered, skipping");
            self.metrics.unknown_events.increment(1);
            return Ok(());
        };

        tracing::debug!(
            target: "zkevm::etherman",
            signature = kind.signature(),
            block_number = log.block_number,
            block_hash = ?log.block_hash,
            tx_hash = ?log.transaction_hash,
            "processing event"
        );

        match kind {
            L1EventKind::SequenceBatches => self.on_sequence_batches(log, info, prefetched).await,
            L1EventKind::SequenceBatchesPreEtrog => {
                self.on_sequence_batches_pre_etrog(log, info, prefetched).await
            }
            L1EventKind::SequenceForceBatches => {
                self.on_sequence_force_batches(log, info, prefetched).await
            }
            L1EventKind::ForceBatch => self.on_force_batch(log, info, prefetched).await,
            L1EventKind::InitialSequenceBatches => {
                self.on_initial_sequence_batches(log, info, prefetched).await
            }
            L1EventKind::UpdateEtrogSequence => {
                self.on_update_etrog_sequence(log, info, prefetched).await
            }
            L1EventKind::UpdateL1InfoTree => self.on_update_l1_info_tree(log, info, prefetched).await,
            L1EventKind::UpdateGlobalExitRoot => {
                self.on_update_global_exit_root(log, info, prefetched).await
            }
            L1EventKind::VerifyBatchesTrustedAggregatorLegacy => {
                self.on_verify_batches_trusted_aggregator(log, info, prefetched).await
            }
            L1EventKind::UpdateZkEvmVersion => self.on_update_zkevm_version(log, info, prefetched).await,
            L1EventKind::UpdateRollup => self.on_update_rollup(log, info, prefetched).await,
            L1EventKind::AddExistingRollup => self.on_add_existing_rollup(log, info, prefetched).await,
            L1EventKind::CreateNewRollup => self.on_create_new_rollup(log, info, prefetched).await,
            L1EventKind::Administrative(signature) => {
                tracing::debug!(target: "zkevm::etherman", signature, "administrative event, ignoring");
                self.metrics.events_ignored.increment(1);
                Ok(())
            }
        }
    }

    /// Reads the transaction the log originates from and verifies its hash
    /// against the one recorded in the log.
    async fn origin_transaction(&self, log: &Log) -> EthermanResult<RpcTransaction> {
        let block_hash = log.block_hash.ok_or(FilterLogError::MissingBlockHash)?;
        let tx_index = log.transaction_index.ok_or(FilterLogError::MissingTransactionIndex)?;
        let expected = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;

        let tx = self
            .provider
            .transaction_in_block(block_hash, tx_index)
            .await
            .map_err(EthRequestError::Rpc)?
            .ok_or(EthRequestError::MissingTransaction { block_hash, tx_index })?;

        let actual = *tx.inner.tx_hash();
        if actual != expected {
            return Err(FilterLogError::TransactionHashMismatch { expected, actual }.into());
        }
        Ok(tx)
    }

    /// Makes the tail of `info.blocks` the block the log belongs to,
    /// fetching its header unless the pre-fetch pass already did.
    async fn ensure_bucket(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let (block_number, block_hash) = log_position(log)?;
        if info.tail_matches(block_number, block_hash) {
            return Ok(());
        }
        if info.blocks.last().is_some_and(|block| block.block_number > block_number) {
            tracing::error!(
                target: "zkevm::etherman",
                block_number,
                %block_hash,
                "event references a block older than the processed tail"
            );
            return Err(EthermanError::EventOrdering { block_number, block_hash });
        }

        let block = match prefetched.get(&block_hash) {
            Some(block) => block.clone(),
            None => self.block_by_hash_with_retry(block_hash).await?,
        };
        info.blocks.push(block);
        Ok(())
    }

    async fn on_sequence_batches(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<rollup::SequenceBatches>(log, "SequenceBatches")?;
        let tx = self.origin_transaction(log).await?;
        let tx_hash = *tx.inner.tx_hash();
        let sequencer = tx.inner.signer();

        let sequences = if event.numBatch != 1 {
            let meta = SequenceMetadata {
                last_batch_number: event.numBatch,
                sequencer,
                tx_hash,
                nonce: tx.nonce(),
                l1_info_root: event.l1InfoRoot,
            };
            decode_sequence_batches(&self.decoders, tx.input(), &meta).await?
        } else {
            tracing::info!(target: "zkevm::etherman", %tx_hash, "initial sequence transaction");
            vec![SequencedBatch {
                batch_number: 1,
                sequencer,
                tx_hash,
                nonce: tx.nonce(),
                ..Default::default()
            }]
        };

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.sequenced_batches.push(sequences);
            (EventOrder::SequenceBatches, block.sequenced_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_sequence_batches_pre_etrog(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<legacy::SequenceBatches>(log, "SequenceBatches (pre-Etrog)")?;
        let tx = self.origin_transaction(log).await?;

        let meta = SequenceMetadata {
            last_batch_number: event.numBatch,
            sequencer: tx.inner.signer(),
            tx_hash: *tx.inner.tx_hash(),
            nonce: tx.nonce(),
            l1_info_root: B256::ZERO,
        };
        let sequences = decode_sequence_batches(&self.decoders, tx.input(), &meta).await?;

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.sequenced_batches.push(sequences);
            (EventOrder::SequenceBatches, block.sequenced_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_sequence_force_batches(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<rollup::SequenceForceBatches>(log, "SequenceForceBatches")?;
        let tx = self.origin_transaction(log).await?;

        self.ensure_bucket(log, info, prefetched).await?;
        let timestamp = info.blocks.last().expect("bucket ensured").received_at;
        let sequences = decode_sequence_force_batches(
            tx.input(),
            event.numBatch,
            tx.inner.signer(),
            *tx.inner.tx_hash(),
            tx.nonce(),
            timestamp,
        )?;

        info.record_on_tail(|block| {
            block.sequenced_force_batches.push(sequences);
            (EventOrder::SequenceForceBatches, block.sequenced_force_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_force_batch(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<rollup::ForceBatch>(log, "ForceBatch")?;
        let (block_number, _) = log_position(log)?;
        let tx = self.origin_transaction(log).await?;

        // The forcing transaction carries the raw transactions only when the
        // sequencer itself sent it; otherwise the event copy is authoritative.
        let raw_txs_data = if tx.inner.signer() == event.sequencer {
            decode_force_batch_transactions(tx.input())?
        } else {
            event.transactions
        };

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.forced_batches.push(ForcedBatch {
                block_number,
                forced_batch_number: event.forceBatchNum,
                sequencer: event.sequencer,
                global_exit_root: event.lastGlobalExitRoot,
                raw_txs_data,
                forced_at: block.received_at,
            });
            (EventOrder::ForcedBatches, block.forced_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_initial_sequence_batches(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<rollup::InitialSequenceBatches>(log, "InitialSequenceBatches")?;
        let tx = self.origin_transaction(log).await?;
        let tx_hash = *tx.inner.tx_hash();
        let nonce = tx.nonce();

        tracing::info!(target: "zkevm::etherman", %tx_hash, "initial sequence created at rollup genesis");
        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            let sequence = SequencedBatch {
                batch_number: 1,
                sequencer: event.sequencer,
                tx_hash,
                nonce,
                data: Some(BatchData::Etrog(EtrogBatchData {
                    transactions: event.transactions,
                    forced_global_exit_root: event.lastGlobalExitRoot,
                    forced_timestamp: block.received_at,
                    forced_block_hash_l1: block.parent_hash,
                })),
                ..Default::default()
            };
            block.sequenced_batches.push(vec![sequence]);
            (EventOrder::InitialSequenceBatches, block.sequenced_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_update_etrog_sequence(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<rollup::UpdateEtrogSequence>(log, "UpdateEtrogSequence")?;
        let tx = self.origin_transaction(log).await?;
        let tx_hash = *tx.inner.tx_hash();
        let nonce = tx.nonce();

        tracing::info!(target: "zkevm::etherman", %tx_hash, "sequence migrated onto the etrog layout");
        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.update_etrog_sequence = Some(UpdateEtrogSequence {
                batch_number: event.numBatch,
                sequencer: event.sequencer,
                tx_hash,
                nonce,
                batch: EtrogBatchData {
                    transactions: event.transactions,
                    forced_global_exit_root: event.lastGlobalExitRoot,
                    forced_timestamp: block.received_at,
                    forced_block_hash_l1: block.parent_hash,
                },
            });
            (EventOrder::UpdateEtrogSequence, 0)
        });
        Ok(())
    }

    async fn on_update_l1_info_tree(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<exit_root::UpdateL1InfoTree>(log, "UpdateL1InfoTree")?;
        let (block_number, _) = log_position(log)?;

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.l1_info_tree.push(exit_root_record(
                block,
                block_number,
                event.mainnetExitRoot,
                event.rollupExitRoot,
            ));
            (EventOrder::L1InfoTree, block.l1_info_tree.len() - 1)
        });
        Ok(())
    }

    async fn on_update_global_exit_root(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<exit_root::UpdateGlobalExitRoot>(log, "UpdateGlobalExitRoot")?;
        let (block_number, _) = log_position(log)?;

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.global_exit_roots.push(exit_root_record(
                block,
                block_number,
                event.mainnetExitRoot,
                event.rollupExitRoot,
            ));
            (EventOrder::GlobalExitRoots, block.global_exit_roots.len() - 1)
        });
        Ok(())
    }

    async fn on_verify_batches_trusted_aggregator(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<legacy::VerifyBatchesTrustedAggregator>(
            log,
            "VerifyBatchesTrustedAggregator",
        )?;
        let (block_number, _) = log_position(log)?;
        let tx_hash = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.verified_batches.push(VerifiedBatch {
                block_number,
                batch_number: event.numBatch,
                aggregator: event.aggregator,
                state_root: event.stateRoot,
                tx_hash,
            });
            (EventOrder::TrustedVerifyBatch, block.verified_batches.len() - 1)
        });
        Ok(())
    }

    async fn on_update_zkevm_version(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<legacy::UpdateZkEVMVersion>(log, "UpdateZkEVMVersion")?;
        self.apply_fork_id(
            log,
            info,
            prefetched,
            event.numBatch,
            event.forkID,
            event.version,
            self.rollup_id,
        )
        .await
    }

    async fn on_update_rollup(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<manager::UpdateRollup>(log, "UpdateRollup")?;
        let fork_id = self.rollup_type_fork_id(event.newRollupTypeID).await?;
        self.apply_fork_id(
            log,
            info,
            prefetched,
            event.lastVerifiedBatchBeforeUpgrade,
            fork_id,
            String::new(),
            event.rollupID,
        )
        .await
    }

    async fn on_add_existing_rollup(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<manager::AddExistingRollup>(log, "AddExistingRollup")?;
        self.apply_fork_id(
            log,
            info,
            prefetched,
            event.lastVerifiedBatchBeforeUpgrade,
            event.forkID,
            String::new(),
            event.rollupID,
        )
        .await
    }

    async fn on_create_new_rollup(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
    ) -> EthermanResult<()> {
        let event = decode_event::<manager::CreateNewRollup>(log, "CreateNewRollup")?;
        let fork_id = self.rollup_type_fork_id(event.rollupTypeID).await?;
        self.apply_fork_id(log, info, prefetched, 0, fork_id, String::new(), event.rollupID).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn apply_fork_id(
        &self,
        log: &Log,
        info: &mut RollupInfo,
        prefetched: &HashMap<B256, RollupBlock>,
        batch_number: u64,
        fork_id: u64,
        version: String,
        affected_rollup_id: u32,
    ) -> EthermanResult<()> {
        if affected_rollup_id != self.rollup_id {
            tracing::debug!(
                target: "zkevm::etherman",
                affected_rollup_id,
                rollup_id = self.rollup_id,
                "fork event for another rollup, ignoring"
            );
            return Ok(());
        }

        self.ensure_bucket(log, info, prefetched).await?;
        info.record_on_tail(|block| {
            block.fork_ids.push(ForkId { batch_number, fork_id, version });
            (EventOrder::ForkIds, block.fork_ids.len() - 1)
        });
        Ok(())
    }
}

fn exit_root_record(
    block: &RollupBlock,
    block_number: u64,
    mainnet_exit_root: B256,
    rollup_exit_root: B256,
) -> GlobalExitRoot {
    GlobalExitRoot {
        block_number,
        mainnet_exit_root,
        rollup_exit_root,
        global_exit_root: GlobalExitRoot::compute(mainnet_exit_root, rollup_exit_root),
        previous_block_hash: block.parent_hash,
        timestamp: block.received_at,
    }
}
