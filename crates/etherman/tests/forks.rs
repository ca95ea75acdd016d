//! Fork history reconstruction and genesis verification.

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use zkevm_sync_etherman::{
    test_utils::{block, event_log, MockL1Rpc},
    Etherman, EthermanConfig, EthermanError, L1ContractAddresses,
};
use zkevm_sync_l1::abi::{calls::views, logs::{legacy, manager}};

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

fn rollup_type_return(fork_id: u64) -> Bytes {
    (Address::ZERO, Address::ZERO, fork_id, 0u16, false, B256::ZERO).abi_encode().into()
}

async fn client(mock: MockL1Rpc, chunk_size: u64) -> Etherman<MockL1Rpc> {
    let mut config = EthermanConfig::new("http://localhost:8545".into(), contracts());
    config.fork_id_chunk_size = chunk_size;
    Etherman::new(mock, config, None).await.expect("client construction")
}

fn version_log(mock: &mut MockL1Rpc, block_number: u64, num_batch: u64, fork_id: u64) {
    let blk = block(
        block_number,
        B256::with_last_byte(block_number as u8),
        B256::with_last_byte(block_number as u8 - 1),
        1_000 + block_number,
    );
    let event = legacy::UpdateZkEVMVersion {
        numBatch: num_batch,
        forkID: fork_id,
        version: format!("v{fork_id}"),
    };
    mock.logs.push(event_log(
        contracts().zkevm,
        event.encode_log_data(),
        &blk,
        B256::with_last_byte(0x40 + block_number as u8),
        0,
        0,
    ));
}

#[tokio::test]
async fn fork_intervals_are_stitched_contiguously() -> eyre::Result<()> {
    let mut mock = mock();
    version_log(&mut mock, 3, 0, 6);
    version_log(&mut mock, 12, 100, 7);
    version_log(&mut mock, 25, 250, 8);

    // a chunk size smaller than the range forces several filter queries.
    let etherman = client(mock, 10).await;
    let intervals = etherman.fork_id_intervals(1, 30).await?;

    assert_eq!(intervals.len(), 3);

    assert_eq!(intervals[0].from_batch_number, 1);
    assert_eq!(intervals[0].to_batch_number, 100);
    assert_eq!(intervals[0].fork_id, 6);
    assert_eq!(intervals[0].version, "v6");
    assert_eq!(intervals[0].block_number, 3);

    assert_eq!(intervals[1].from_batch_number, 101);
    assert_eq!(intervals[1].to_batch_number, 250);
    assert_eq!(intervals[1].fork_id, 7);

    assert_eq!(intervals[2].from_batch_number, 251);
    assert_eq!(intervals[2].to_batch_number, u64::MAX);
    assert_eq!(intervals[2].fork_id, 8);

    for pair in intervals.windows(2) {
        assert_eq!(pair[0].to_batch_number + 1, pair[1].from_batch_number);
    }
    Ok(())
}

#[tokio::test]
async fn fork_events_of_other_rollups_are_skipped() -> eyre::Result<()> {
    let mut mock = mock();
    version_log(&mut mock, 3, 0, 6);

    let foreign_blk = block(5, B256::with_last_byte(5), B256::with_last_byte(4), 1_005);
    let foreign = manager::AddExistingRollup {
        rollupID: ROLLUP_ID + 1,
        forkID: 9,
        rollupAddress: Address::ZERO,
        chainID: 2,
        rollupCompatibilityID: 0,
        lastVerifiedBatchBeforeUpgrade: 40,
    };
    mock.logs.push(event_log(
        contracts().rollup_manager,
        foreign.encode_log_data(),
        &foreign_blk,
        B256::with_last_byte(0x45),
        0,
        0,
    ));

    let etherman = client(mock, 100).await;
    let intervals = etherman.fork_id_intervals(1, 10).await?;

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].fork_id, 6);
    assert_eq!(intervals[0].to_batch_number, u64::MAX);
    Ok(())
}

#[tokio::test]
async fn rollup_updates_resolve_the_fork_through_the_type_registry() -> eyre::Result<()> {
    let mut mock = mock();
    version_log(&mut mock, 3, 0, 6);

    let blk = block(7, B256::with_last_byte(7), B256::with_last_byte(6), 1_007);
    let update = manager::UpdateRollup {
        rollupID: ROLLUP_ID,
        newRollupTypeID: 4,
        lastVerifiedBatchBeforeUpgrade: 120,
    };
    mock.logs.push(event_log(
        contracts().rollup_manager,
        update.encode_log_data(),
        &blk,
        B256::with_last_byte(0x46),
        0,
        0,
    ));
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupTypeMapCall::SELECTOR,
        rollup_type_return(9),
    );

    let etherman = client(mock, 100).await;
    let intervals = etherman.fork_id_intervals(1, 10).await?;

    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].to_batch_number, 120);
    assert_eq!(intervals[1].from_batch_number, 121);
    assert_eq!(intervals[1].fork_id, 9);
    Ok(())
}

#[tokio::test]
async fn genesis_verification_requires_an_initial_fork_event() -> eyre::Result<()> {
    // no fork event at the genesis block.
    let etherman = client(mock(), 100).await;
    let err = etherman.verify_genesis_block_number(50).await.unwrap_err();
    assert!(matches!(err, EthermanError::GenesisNotFound(50)));

    // an initial fork definition passes.
    let mut scripted = mock();
    version_log(&mut scripted, 50, 0, 6);
    let etherman = client(scripted, 100).await;
    etherman.verify_genesis_block_number(50).await?;

    // a later fork definition does not.
    let mut scripted = mock();
    version_log(&mut scripted, 50, 77, 6);
    let etherman = client(scripted, 100).await;
    let err = etherman.verify_genesis_block_number(50).await.unwrap_err();
    assert!(matches!(
        err,
        EthermanError::GenesisNotInitial { block_number: 50, num_batch: 77 },
    ));
    Ok(())
}

#[tokio::test]
async fn genesis_verification_accepts_a_rollup_creation() -> eyre::Result<()> {
    let mut mock = mock();
    let blk = block(50, B256::with_last_byte(50), B256::with_last_byte(49), 1_050);
    let created = manager::CreateNewRollup {
        rollupID: ROLLUP_ID,
        rollupTypeID: 2,
        rollupAddress: contracts().zkevm,
        chainID: 2_442,
        gasTokenAddress: Address::ZERO,
    };
    mock.logs.push(event_log(
        contracts().rollup_manager,
        created.encode_log_data(),
        &blk,
        B256::with_last_byte(0x47),
        0,
        0,
    ));
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupTypeMapCall::SELECTOR,
        rollup_type_return(7),
    );

    let etherman = client(mock, 100).await;
    etherman.verify_genesis_block_number(50).await?;
    Ok(())
}

#[tokio::test]
async fn the_etrog_upgrade_block_is_the_first_version_two_initializer() -> eyre::Result<()> {
    let mut mock = mock();

    let first = block(5, B256::with_last_byte(5), B256::with_last_byte(4), 1_005);
    let second = block(9, B256::with_last_byte(9), B256::with_last_byte(8), 1_009);
    mock.logs.push(event_log(
        contracts().rollup_manager,
        manager::Initialized { version: 1 }.encode_log_data(),
        &first,
        B256::with_last_byte(0x48),
        0,
        0,
    ));
    mock.logs.push(event_log(
        contracts().rollup_manager,
        manager::Initialized { version: 2 }.encode_log_data(),
        &second,
        B256::with_last_byte(0x49),
        0,
        1,
    ));

    let etherman = client(mock, 100).await;
    assert_eq!(etherman.l1_block_of_etrog_upgrade(Some(20)).await?, 9);
    Ok(())
}

#[tokio::test]
async fn a_missing_etrog_initializer_is_not_found() {
    let etherman = client(mock(), 100).await;
    let err = etherman.l1_block_of_etrog_upgrade(Some(20)).await.unwrap_err();
    assert!(matches!(err, EthermanError::NotFound));
}
