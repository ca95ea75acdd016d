//! Common test helpers: a scripted L1 RPC mock and builders for the blocks,
//! transactions and logs it serves.

use crate::provider::{L1RpcError, L1RpcProvider, RpcBlock, RpcTransaction};

use alloy_consensus::{transaction::Recovered, Signed, TxLegacy};
use alloy_eips::BlockNumberOrTag;
use alloy_json_rpc::RpcError;
use alloy_primitives::{Address, Bytes, LogData, Signature, TxKind, B256, U256};
use alloy_rpc_types_eth::{Filter, Header, Log, Transaction};
use alloy_transport::{HttpError, TransportErrorKind};
use std::{
    collections::HashMap,
    sync::Mutex,
};

/// A scripted implementation of [`L1RpcProvider`].
#[derive(Debug, Default)]
pub struct MockL1Rpc {
    /// The chain id the endpoint reports.
    pub chain_id: u64,
    /// The log store served by filter queries, filtered by block range,
    /// address set and first topic.
    pub logs: Vec<Log>,
    /// Blocks served by hash.
    pub blocks: HashMap<B256, RpcBlock>,
    /// Blocks served by number.
    pub blocks_by_number: HashMap<u64, RpcBlock>,
    /// The block served for the `latest` tag.
    pub latest: Option<RpcBlock>,
    /// The block served for the `safe` tag.
    pub safe: Option<RpcBlock>,
    /// The block served for the `finalized` tag.
    pub finalized: Option<RpcBlock>,
    /// Transactions served by `(block_hash, index)`.
    pub transactions: HashMap<(B256, u64), RpcTransaction>,
    /// Return data served to view calls, keyed by `(to, selector)`.
    pub call_returns: HashMap<(Address, [u8; 4]), Bytes>,
    /// Remaining HTTP 429 responses to serve per block hash.
    pub rate_limits: Mutex<HashMap<B256, usize>>,
}

impl MockL1Rpc {
    /// Returns an empty mock reporting the given chain id.
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, ..Default::default() }
    }

    /// Registers a block under its hash and number.
    pub fn add_block(&mut self, block: RpcBlock) {
        self.blocks_by_number.insert(block.header.number, block.clone());
        self.blocks.insert(block.header.hash, block);
    }

    /// Registers a transaction at the given position.
    pub fn add_transaction(&mut self, block_hash: B256, index: u64, tx: RpcTransaction) {
        self.transactions.insert((block_hash, index), tx);
    }

    /// Scripts the return data of a view call.
    pub fn set_call_return(&mut self, to: Address, selector: [u8; 4], data: Bytes) {
        self.call_returns.insert((to, selector), data);
    }

    /// Makes the next `failures` fetches of `hash` fail with HTTP 429.
    pub fn set_rate_limited(&mut self, hash: B256, failures: usize) {
        self.rate_limits.lock().unwrap().insert(hash, failures);
    }
}

fn rate_limit_error() -> L1RpcError {
    RpcError::Transport(TransportErrorKind::HttpError(HttpError {
        status: 429,
        body: String::new(),
    }))
}

#[async_trait::async_trait]
impl L1RpcProvider for MockL1Rpc {
    async fn chain_id(&self) -> Result<u64, L1RpcError> {
        Ok(self.chain_id)
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, L1RpcError> {
        let from = match filter.block_option.get_from_block() {
            Some(BlockNumberOrTag::Number(number)) => *number,
            _ => 0,
        };
        let to = match filter.block_option.get_to_block() {
            Some(BlockNumberOrTag::Number(number)) => *number,
            _ => u64::MAX,
        };
        Ok(self
            .logs
            .iter()
            .filter(|log| {
                let number = log.block_number.unwrap_or_default();
                let in_range = number >= from && number <= to;
                let address_matches =
                    filter.address.is_empty() || filter.address.matches(&log.address());
                let topic_matches = filter.topics[0].is_empty() ||
                    log.topic0().is_some_and(|topic| filter.topics[0].matches(topic));
                in_range && address_matches && topic_matches
            })
            .cloned()
            .collect())
    }

    async fn block_by_hash(&self, hash: B256) -> Result<Option<RpcBlock>, L1RpcError> {
        if let Some(remaining) = self.rate_limits.lock().unwrap().get_mut(&hash) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(rate_limit_error());
            }
        }
        Ok(self.blocks.get(&hash).cloned())
    }

    async fn block_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Option<RpcBlock>, L1RpcError> {
        Ok(match number {
            BlockNumberOrTag::Latest => self.latest.clone(),
            BlockNumberOrTag::Safe => self.safe.clone(),
            BlockNumberOrTag::Finalized => self.finalized.clone(),
            BlockNumberOrTag::Number(number) => self.blocks_by_number.get(&number).cloned(),
            _ => None,
        })
    }

    async fn transaction_in_block(
        &self,
        block_hash: B256,
        index: u64,
    ) -> Result<Option<RpcTransaction>, L1RpcError> {
        Ok(self.transactions.get(&(block_hash, index)).cloned())
    }

    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, L1RpcError> {
        let selector: [u8; 4] =
            data.get(..4).and_then(|bytes| bytes.try_into().ok()).unwrap_or_default();
        self.call_returns.get(&(to, selector)).cloned().ok_or(RpcError::NullResp)
    }
}

/// Returns a block whose header carries the given identity.
pub fn block(number: u64, hash: B256, parent_hash: B256, timestamp: u64) -> RpcBlock {
    RpcBlock {
        header: Header {
            hash,
            inner: alloy_consensus::Header {
                number,
                parent_hash,
                timestamp,
                ..Default::default()
            },
            total_difficulty: None,
            size: None,
        },
        ..Default::default()
    }
}

/// Returns a signed legacy transaction pinned to the given hash and sender.
pub fn transaction(hash: B256, signer: Address, nonce: u64, input: Bytes) -> RpcTransaction {
    let tx = TxLegacy {
        chain_id: None,
        nonce,
        gas_price: 0,
        gas_limit: 0,
        to: TxKind::Call(Address::ZERO),
        value: U256::ZERO,
        input,
    };
    let signature = Signature::new(U256::from(1), U256::from(1), false);
    let signed = Signed::new_unchecked(tx, signature, hash);
    Transaction {
        inner: Recovered::new_unchecked(signed.into(), signer),
        block_hash: None,
        block_number: None,
        transaction_index: None,
        effective_gas_price: None,
    }
}

/// Positions encoded event data as a log of the given block.
pub fn event_log(
    address: Address,
    data: LogData,
    block: &RpcBlock,
    tx_hash: B256,
    tx_index: u64,
    log_index: u64,
) -> Log {
    Log {
        inner: alloy_primitives::Log { address, data },
        block_hash: Some(block.header.hash),
        block_number: Some(block.header.number),
        block_timestamp: Some(block.header.timestamp),
        transaction_hash: Some(tx_hash),
        transaction_index: Some(tx_index),
        log_index: Some(log_index),
        removed: false,
    }
}
