//! Construction checks and scalar contract queries.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use zkevm_sync_etherman::{
    test_utils::{block, MockL1Rpc},
    Etherman, EthermanConfig, EthermanError, L1ContractAddresses,
};
use zkevm_sync_l1::abi::calls::views;

const CHAIN_ID: u64 = 1337;
const ROLLUP_ID: u32 = 3;

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

fn config() -> EthermanConfig {
    EthermanConfig::new("http://localhost:8545".into(), contracts())
}

/// Return tuple of `rollupIDToRollupData` with the given batch counters and
/// L2 chain id.
fn rollup_data_return(last_sequenced: u64, last_verified: u64, l2_chain_id: u64) -> Vec<u8> {
    (
        Address::ZERO,
        l2_chain_id,
        Address::ZERO,
        7u64,
        B256::ZERO,
        last_sequenced,
        last_verified,
        0u64,
        0u64,
        0u64,
        1u64,
        0u16,
    )
        .abi_encode()
}

#[tokio::test]
async fn construction_resolves_the_rollup_id_and_adopts_the_chain_id() -> eyre::Result<()> {
    let etherman = Etherman::new(mock(), config(), None).await?;
    assert_eq!(etherman.rollup_id(), ROLLUP_ID);
    assert_eq!(etherman.l1_chain_id(), CHAIN_ID);
    Ok(())
}

#[tokio::test]
async fn construction_rejects_a_chain_id_mismatch() {
    let mut config = config();
    config.l1_chain_id = 5;

    let err = Etherman::new(mock(), config, None).await.unwrap_err();
    assert!(matches!(
        err,
        EthermanError::ChainIdMismatch { expected: 5, reported: CHAIN_ID },
    ));
}

#[tokio::test]
async fn construction_accepts_a_matching_chain_id() -> eyre::Result<()> {
    let mut config = config();
    config.l1_chain_id = CHAIN_ID;
    Etherman::new(mock(), config, None).await?;
    Ok(())
}

#[tokio::test]
async fn validium_mode_requires_a_data_availability_provider() {
    let mut config = config();
    config.validium_enabled = true;

    let err = Etherman::new(mock(), config, None).await.unwrap_err();
    assert!(matches!(err, EthermanError::MissingDataAvailability));
}

#[tokio::test]
async fn batch_counters_come_from_the_rollup_record() -> eyre::Result<()> {
    let mut mock = mock();
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupIDToRollupDataCall::SELECTOR,
        rollup_data_return(42, 37, 2_442).into(),
    );

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.latest_batch_number().await?, 42);
    assert_eq!(etherman.latest_verified_batch_number().await?, 37);
    Ok(())
}

#[tokio::test]
async fn the_l2_chain_id_prefers_the_legacy_contract() -> eyre::Result<()> {
    let mut mock = mock();
    mock.set_call_return(
        contracts().zkevm,
        views::chainIDCall::SELECTOR,
        1_101u64.abi_encode().into(),
    );

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.l2_chain_id().await?, 1_101);
    Ok(())
}

#[tokio::test]
async fn the_l2_chain_id_falls_back_to_the_rollup_record() -> eyre::Result<()> {
    // the legacy query is not scripted and fails; the record answers.
    let mut mock = mock();
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupIDToRollupDataCall::SELECTOR,
        rollup_data_return(0, 0, 2_442).into(),
    );

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.l2_chain_id().await?, 2_442);
    Ok(())
}

#[tokio::test]
async fn a_zero_l2_chain_id_is_an_error() {
    let mut mock = mock();
    mock.set_call_return(
        contracts().rollup_manager,
        views::rollupIDToRollupDataCall::SELECTOR,
        rollup_data_return(0, 0, 0).into(),
    );

    let etherman = Etherman::new(mock, config(), None).await.unwrap();
    let err = etherman.l2_chain_id().await.unwrap_err();
    assert!(matches!(err, EthermanError::ZeroL2ChainId));
}

#[tokio::test]
async fn trusted_sequencer_queries_decode_their_returns() -> eyre::Result<()> {
    let sequencer = Address::with_last_byte(0x51);
    let mut mock = mock();
    mock.set_call_return(
        contracts().zkevm,
        views::trustedSequencerCall::SELECTOR,
        sequencer.abi_encode().into(),
    );
    mock.set_call_return(
        contracts().zkevm,
        views::trustedSequencerURLCall::SELECTOR,
        "https://sequencer.example".to_string().abi_encode().into(),
    );

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.trusted_sequencer().await?, sequencer);
    assert_eq!(etherman.trusted_sequencer_url().await?, "https://sequencer.example");
    Ok(())
}

#[tokio::test]
async fn block_tag_queries_read_the_tagged_headers() -> eyre::Result<()> {
    let mut mock = mock();
    mock.latest = Some(block(120, B256::with_last_byte(120), B256::with_last_byte(119), 2_400));
    mock.safe = Some(block(110, B256::with_last_byte(110), B256::with_last_byte(109), 2_200));
    mock.finalized =
        Some(block(100, B256::with_last_byte(100), B256::with_last_byte(99), 2_000));

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.latest_block_number().await?, 120);
    assert_eq!(etherman.safe_block_number().await?, 110);
    assert_eq!(etherman.finalized_block_number().await?, 100);
    assert_eq!(etherman.latest_block_timestamp().await?, 2_400);
    Ok(())
}

#[tokio::test]
async fn an_absent_block_is_not_found() -> eyre::Result<()> {
    let mut mock = mock();
    mock.add_block(block(100, B256::with_last_byte(100), B256::with_last_byte(99), 2_000));

    let etherman = Etherman::new(mock, config(), None).await?;

    let found = etherman.l1_block_by_number(100).await?;
    assert_eq!(found.block_hash, B256::with_last_byte(100));
    assert_eq!(found.received_at, 2_000);

    let err = etherman.l1_block_by_number(101).await.unwrap_err();
    assert!(matches!(err, EthermanError::NotFound));

    let err = etherman.latest_block_number().await.unwrap_err();
    assert!(matches!(err, EthermanError::NotFound));
    Ok(())
}

#[tokio::test]
async fn the_fee_query_multiplies_by_the_batch_count() -> eyre::Result<()> {
    let mut mock = mock();
    mock.set_call_return(
        contracts().rollup_manager,
        views::getBatchFeeCall::SELECTOR,
        U256::from(1_000u64).abi_encode().into(),
    );

    let etherman = Etherman::new(mock, config(), None).await?;
    assert_eq!(etherman.send_sequence_fee(5).await?, U256::from(5_000u64));
    Ok(())
}
