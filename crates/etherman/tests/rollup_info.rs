//! Block-range reads: bucketing, replay order and integrity checks.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use zkevm_sync_etherman::{
    test_utils::{block, event_log, transaction, MockL1Rpc},
    Etherman, EthermanConfig, EthermanError, FilterLogError, L1ContractAddresses,
};
use zkevm_sync_l1::abi::{
    calls::{etrog, views},
    logs::{exit_root, legacy, rollup},
};
use zkevm_sync_primitives::{EventOrder, GlobalExitRoot, Order};

const CHAIN_ID: u64 = 1337;
const ROLLUP_ID: u32 = 1;

fn contracts() -> L1ContractAddresses {
    L1ContractAddresses {
        zkevm: Address::with_last_byte(0xaa),
        rollup_manager: Address::with_last_byte(0xbb),
        global_exit_root_manager: Address::with_last_byte(0xcc),
    }
}

fn mock() -> MockL1Rpc {
    let mut mock = MockL1Rpc::new(CHAIN_ID);
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupAddressToIDCall::SELECTOR,
        ROLLUP_ID.abi_encode().into(),
    );
    mock
}

async fn client(mock: MockL1Rpc, parallel: bool) -> Etherman<MockL1Rpc> {
    let mut config = EthermanConfig::new("http://localhost:8545".into(), contracts());
    config.parallel_block_requests = parallel;
    Etherman::new(mock, config, None).await.expect("client construction")
}

/// One block with, in log order, an info tree update, a three-batch
/// sequence and a legacy trusted verification.
fn scripted_mock() -> (MockL1Rpc, B256) {
    let mut mock = mock();

    let block_hash = B256::with_last_byte(0x10);
    let parent_hash = B256::with_last_byte(0x0f);
    let blk = block(100, block_hash, parent_hash, 1_000);
    mock.add_block(blk.clone());

    // log 0: UpdateL1InfoTree.
    let info_tree = exit_root::UpdateL1InfoTree {
        mainnetExitRoot: B256::with_last_byte(1),
        rollupExitRoot: B256::with_last_byte(2),
    };
    mock.logs.push(event_log(
        contracts().global_exit_root_manager,
        info_tree.encode_log_data(),
        &blk,
        B256::with_last_byte(0x21),
        0,
        0,
    ));

    // log 1: SequenceBatches over three etrog batches.
    let sequencer = Address::with_last_byte(0x51);
    let seq_tx_hash = B256::with_last_byte(0x22);
    let calldata = etrog::sequenceBatchesCall {
        batches: vec![
            etrog::PolygonRollupBaseEtrogBatchData {
                transactions: Bytes::from_static(&[0x0b, 0x01]),
                ..Default::default()
            },
            etrog::PolygonRollupBaseEtrogBatchData::default(),
            etrog::PolygonRollupBaseEtrogBatchData::default(),
        ],
        l2Coinbase: sequencer,
    }
    .abi_encode();
    mock.add_transaction(
        block_hash,
        1,
        transaction(seq_tx_hash, sequencer, 7, calldata.into()),
    );
    let sequence = rollup::SequenceBatches { numBatch: 3, l1InfoRoot: B256::with_last_byte(9) };
    mock.logs.push(event_log(
        contracts().zkevm,
        sequence.encode_log_data(),
        &blk,
        seq_tx_hash,
        1,
        1,
    ));

    // log 2: legacy VerifyBatchesTrustedAggregator.
    let verify = legacy::VerifyBatchesTrustedAggregator {
        numBatch: 3,
        stateRoot: B256::with_last_byte(0x77),
        aggregator: Address::with_last_byte(0x61),
    };
    mock.logs.push(event_log(
        contracts().rollup_manager,
        verify.encode_log_data(),
        &blk,
        B256::with_last_byte(0x23),
        2,
        2,
    ));

    (mock, block_hash)
}

#[tokio::test]
async fn replay_order_follows_log_order() -> eyre::Result<()> {
    for parallel in [false, true] {
        let (mock, block_hash) = scripted_mock();
        let etherman = client(mock, parallel).await;

        let info = etherman.rollup_info_by_block_range(100, Some(100)).await?;

        assert_eq!(info.blocks.len(), 1);
        let block = &info.blocks[0];
        assert_eq!(block.block_number, 100);
        assert_eq!(block.block_hash, block_hash);
        assert_eq!(block.received_at, 1_000);

        assert_eq!(
            info.order[&block_hash],
            vec![
                Order::new(EventOrder::L1InfoTree, 0),
                Order::new(EventOrder::SequenceBatches, 0),
                Order::new(EventOrder::TrustedVerifyBatch, 0),
            ],
        );

        // ordering entries cover exactly the records attached to the block.
        assert_eq!(info.order[&block_hash].len(), block.event_count());

        let group = &block.sequenced_batches[0];
        assert_eq!(
            group.iter().map(|batch| batch.batch_number).collect::<Vec<_>>(),
            vec![1, 2, 3],
        );
        assert_eq!(group[0].nonce, 7);

        let leaf = &block.l1_info_tree[0];
        assert_eq!(leaf.previous_block_hash, block.parent_hash);
        assert_eq!(leaf.timestamp, 1_000);
        assert_eq!(
            leaf.global_exit_root,
            GlobalExitRoot::compute(B256::with_last_byte(1), B256::with_last_byte(2)),
        );

        assert_eq!(block.verified_batches[0].batch_number, 3);
        assert_eq!(block.verified_batches[0].aggregator, Address::with_last_byte(0x61));
    }
    Ok(())
}

#[tokio::test]
async fn rereading_a_range_is_idempotent() -> eyre::Result<()> {
    let (mock, _) = scripted_mock();
    let etherman = client(mock, false).await;

    let first = etherman.rollup_info_by_block_range(100, Some(100)).await?;
    let second = etherman.rollup_info_by_block_range(100, Some(100)).await?;

    assert_eq!(first.blocks, second.blocks);
    assert_eq!(first.order, second.order);
    Ok(())
}

#[tokio::test]
async fn events_of_distinct_blocks_open_distinct_buckets() -> eyre::Result<()> {
    let mut mock = mock();

    let first = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    let second = block(101, B256::with_last_byte(0x11), B256::with_last_byte(0x10), 1_012);
    mock.add_block(first.clone());
    mock.add_block(second.clone());

    let update = exit_root::UpdateL1InfoTree {
        mainnetExitRoot: B256::with_last_byte(1),
        rollupExitRoot: B256::with_last_byte(2),
    };
    for (i, blk) in [&first, &second, &second].into_iter().enumerate() {
        mock.logs.push(event_log(
            contracts().global_exit_root_manager,
            update.clone().encode_log_data(),
            blk,
            B256::with_last_byte(0x30 + i as u8),
            i as u64,
            i as u64,
        ));
    }

    let etherman = client(mock, false).await;
    let info = etherman.rollup_info_by_block_range(100, Some(101)).await?;

    assert_eq!(info.blocks.len(), 2);
    assert_eq!(info.blocks[0].l1_info_tree.len(), 1);
    assert_eq!(info.blocks[1].l1_info_tree.len(), 2);
    assert_eq!(
        info.order[&second.header.hash],
        vec![Order::new(EventOrder::L1InfoTree, 0), Order::new(EventOrder::L1InfoTree, 1)],
    );
    for block in &info.blocks {
        assert_eq!(info.order[&block.block_hash].len(), block.event_count());
    }
    Ok(())
}

#[tokio::test]
async fn an_event_older_than_the_tail_is_fatal() {
    let mut mock = mock();

    let newer = block(101, B256::with_last_byte(0x11), B256::with_last_byte(0x10), 1_012);
    let older = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    mock.add_block(newer.clone());
    mock.add_block(older.clone());

    let update = exit_root::UpdateL1InfoTree {
        mainnetExitRoot: B256::ZERO,
        rollupExitRoot: B256::ZERO,
    };
    mock.logs.push(event_log(
        contracts().global_exit_root_manager,
        update.clone().encode_log_data(),
        &newer,
        B256::with_last_byte(0x31),
        0,
        0,
    ));
    mock.logs.push(event_log(
        contracts().global_exit_root_manager,
        update.encode_log_data(),
        &older,
        B256::with_last_byte(0x32),
        0,
        1,
    ));

    let etherman = client(mock, false).await;
    let err = etherman.rollup_info_by_block_range(100, Some(101)).await.unwrap_err();
    assert!(matches!(err, EthermanError::EventOrdering { block_number: 100, .. }));
}

#[tokio::test]
async fn unregistered_topics_are_skipped() -> eyre::Result<()> {
    let mut mock = mock();
    let blk = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    mock.add_block(blk.clone());

    let foreign = alloy_primitives::LogData::new_unchecked(
        vec![B256::with_last_byte(0xfe)],
        Bytes::new(),
    );
    mock.logs.push(event_log(
        contracts().zkevm,
        foreign,
        &blk,
        B256::with_last_byte(0x21),
        0,
        0,
    ));

    let etherman = client(mock, false).await;
    let info = etherman.rollup_info_by_block_range(100, Some(100)).await?;

    assert!(info.blocks.is_empty());
    assert!(info.order.is_empty());
    Ok(())
}

#[tokio::test]
async fn forced_batch_data_comes_from_calldata_when_the_sequencer_sent_it() -> eyre::Result<()> {
    let sequencer = Address::with_last_byte(0x51);
    let calldata_txs = Bytes::from_static(&[0x0b, 0xaa, 0xbb]);
    let event_txs = Bytes::from_static(&[0x0b, 0x01]);

    for (sender, expected) in
        [(sequencer, calldata_txs.clone()), (Address::with_last_byte(0x52), event_txs.clone())]
    {
        let mut mock = mock();
        let blk = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
        mock.add_block(blk.clone());

        let tx_hash = B256::with_last_byte(0x21);
        let calldata = etrog::forceBatchCall {
            transactions: calldata_txs.clone(),
            polAmount: U256::from(1u64),
        }
        .abi_encode();
        mock.add_transaction(blk.header.hash, 0, transaction(tx_hash, sender, 1, calldata.into()));

        let force = rollup::ForceBatch {
            forceBatchNum: 8,
            lastGlobalExitRoot: B256::with_last_byte(5),
            sequencer,
            transactions: event_txs.clone(),
        };
        mock.logs.push(event_log(
            contracts().zkevm,
            force.encode_log_data(),
            &blk,
            tx_hash,
            0,
            0,
        ));

        let etherman = client(mock, false).await;
        let info = etherman.rollup_info_by_block_range(100, Some(100)).await?;

        let forced = &info.blocks[0].forced_batches[0];
        assert_eq!(forced.forced_batch_number, 8);
        assert_eq!(forced.raw_txs_data, expected);
        assert_eq!(forced.forced_at, 1_000);
        assert_eq!(
            info.order[&blk.header.hash],
            vec![Order::new(EventOrder::ForcedBatches, 0)],
        );
    }
    Ok(())
}

#[tokio::test]
async fn a_transaction_hash_mismatch_is_fatal() {
    let mut mock = mock();
    let blk = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    mock.add_block(blk.clone());

    let sequencer = Address::with_last_byte(0x51);
    let calldata = etrog::sequenceBatchesCall {
        batches: vec![etrog::PolygonRollupBaseEtrogBatchData::default()],
        l2Coinbase: sequencer,
    }
    .abi_encode();
    // the transaction at the log's index hashes differently than the log.
    mock.add_transaction(
        blk.header.hash,
        0,
        transaction(B256::with_last_byte(0x99), sequencer, 1, calldata.into()),
    );

    let sequence = rollup::SequenceBatches { numBatch: 2, l1InfoRoot: B256::ZERO };
    mock.logs.push(event_log(
        contracts().zkevm,
        sequence.encode_log_data(),
        &blk,
        B256::with_last_byte(0x22),
        0,
        0,
    ));

    let etherman = client(mock, false).await;
    let err = etherman.rollup_info_by_block_range(100, Some(100)).await.unwrap_err();
    assert!(matches!(
        err,
        EthermanError::Logs(FilterLogError::TransactionHashMismatch { .. }),
    ));
}

#[tokio::test]
async fn an_initial_sequence_event_skips_calldata_decoding() -> eyre::Result<()> {
    let mut mock = mock();
    let blk = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    mock.add_block(blk.clone());

    let sequencer = Address::with_last_byte(0x51);
    let tx_hash = B256::with_last_byte(0x21);
    // calldata deliberately not a sequencing method: it must not be decoded.
    mock.add_transaction(
        blk.header.hash,
        0,
        transaction(tx_hash, sequencer, 4, Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef])),
    );

    let sequence = rollup::SequenceBatches { numBatch: 1, l1InfoRoot: B256::ZERO };
    mock.logs.push(event_log(
        contracts().zkevm,
        sequence.encode_log_data(),
        &blk,
        tx_hash,
        0,
        0,
    ));

    let etherman = client(mock, false).await;
    let info = etherman.rollup_info_by_block_range(100, Some(100)).await?;

    let group = &info.blocks[0].sequenced_batches[0];
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].batch_number, 1);
    assert_eq!(group[0].sequencer, sequencer);
    assert_eq!(group[0].nonce, 4);
    assert!(group[0].data.is_none());
    Ok(())
}

/// Serves a fixed byte string for any commitment it is asked about.
#[derive(Debug)]
struct FixedDa(Bytes);

#[async_trait::async_trait]
impl zkevm_sync_l1::DataAvailabilityProvider for FixedDa {
    async fn batch_transactions(
        &self,
        _batch_number: u64,
        _commitment: B256,
        _data_availability_msg: &Bytes,
    ) -> Result<Bytes, zkevm_sync_l1::DataAvailabilityError> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn validium_sequences_carry_resolved_transactions() -> eyre::Result<()> {
    use zkevm_sync_l1::abi::calls::validium;
    use zkevm_sync_primitives::BatchData;

    let mut mock = mock();
    let blk = block(100, B256::with_last_byte(0x10), B256::with_last_byte(0x0f), 1_000);
    mock.add_block(blk.clone());

    let sequencer = Address::with_last_byte(0x51);
    let tx_hash = B256::with_last_byte(0x21);
    let calldata = validium::sequenceBatchesValidiumCall {
        batches: vec![validium::ValidiumBatchData {
            transactionsHash: B256::with_last_byte(0x71),
            forcedGlobalExitRoot: B256::ZERO,
            forcedTimestamp: 0,
            forcedBlockHashL1: B256::ZERO,
        }],
        l2Coinbase: sequencer,
        dataAvailabilityMessage: Bytes::new(),
    }
    .abi_encode();
    mock.add_transaction(blk.header.hash, 0, transaction(tx_hash, sequencer, 2, calldata.into()));

    let sequence = rollup::SequenceBatches { numBatch: 4, l1InfoRoot: B256::with_last_byte(9) };
    mock.logs.push(event_log(
        contracts().zkevm,
        sequence.encode_log_data(),
        &blk,
        tx_hash,
        0,
        0,
    ));

    let resolved = Bytes::from_static(&[0x0b, 0x42]);
    let mut config = EthermanConfig::new("http://localhost:8545".into(), contracts());
    config.validium_enabled = true;
    let etherman =
        Etherman::new(mock, config, Some(std::sync::Arc::new(FixedDa(resolved.clone()))))
            .await
            .expect("client construction");

    let info = etherman.rollup_info_by_block_range(100, Some(100)).await?;

    let group = &info.blocks[0].sequenced_batches[0];
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].batch_number, 4);
    let Some(BatchData::Etrog(batch)) = &group[0].data else {
        panic!("expected etrog batch data");
    };
    assert_eq!(batch.transactions, resolved);
    Ok(())
}

#[tokio::test]
async fn the_info_tree_bootstrap_filter_only_yields_leaf_updates() -> eyre::Result<()> {
    let (mock, block_hash) = scripted_mock();
    let etherman = client(mock, false).await;

    let info = etherman.rollup_info_previous_genesis(100, Some(100)).await?;

    assert_eq!(info.blocks.len(), 1);
    assert_eq!(info.blocks[0].l1_info_tree.len(), 1);
    assert!(info.blocks[0].sequenced_batches.is_empty());
    assert!(info.blocks[0].verified_batches.is_empty());
    assert_eq!(info.order[&block_hash], vec![Order::new(EventOrder::L1InfoTree, 0)]);
    Ok(())
}
