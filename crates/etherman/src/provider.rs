use alloy_eips::BlockNumberOrTag;
use alloy_json_rpc::RpcError;
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Log, TransactionRequest};
use alloy_transport::TransportErrorKind;

/// The error type surfaced by [`L1RpcProvider`] calls.
pub type L1RpcError = RpcError<TransportErrorKind>;

/// The L1 block response type.
pub type RpcBlock = alloy_rpc_types_eth::Block;

/// The L1 transaction response type.
pub type RpcTransaction = alloy_rpc_types_eth::Transaction;

/// The Ethereum JSON-RPC surface the client consumes.
///
/// Implemented for every [`Provider`]; tests substitute a scripted mock.
/// Contract view calls go through [`L1RpcProvider::eth_call`] with
/// ABI-encoded calldata, keeping the bindings pure decoders over raw bytes.
#[async_trait::async_trait]
pub trait L1RpcProvider: Send + Sync {
    /// Returns the chain id reported by the endpoint.
    async fn chain_id(&self) -> Result<u64, L1RpcError>;

    /// Returns the logs matching the filter.
    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, L1RpcError>;

    /// Returns the block with the given hash.
    async fn block_by_hash(&self, hash: B256) -> Result<Option<RpcBlock>, L1RpcError>;

    /// Returns the block with the given number or tag.
    async fn block_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Option<RpcBlock>, L1RpcError>;

    /// Returns the transaction at the given index of the given block.
    async fn transaction_in_block(
        &self,
        block_hash: B256,
        index: u64,
    ) -> Result<Option<RpcTransaction>, L1RpcError>;

    /// Issues an `eth_call` against `to` and returns the raw return bytes.
    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, L1RpcError>;
}

#[async_trait::async_trait]
impl<P: Provider> L1RpcProvider for P {
    async fn chain_id(&self) -> Result<u64, L1RpcError> {
        Provider::get_chain_id(self).await
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, L1RpcError> {
        Provider::get_logs(self, filter).await
    }

    async fn block_by_hash(&self, hash: B256) -> Result<Option<RpcBlock>, L1RpcError> {
        Provider::get_block_by_hash(self, hash).await
    }

    async fn block_by_number(
        &self,
        number: BlockNumberOrTag,
    ) -> Result<Option<RpcBlock>, L1RpcError> {
        Provider::get_block_by_number(self, number).await
    }

    async fn transaction_in_block(
        &self,
        block_hash: B256,
        index: u64,
    ) -> Result<Option<RpcTransaction>, L1RpcError> {
        Provider::get_transaction_by_block_hash_and_index(self, block_hash, index as usize).await
    }

    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, L1RpcError> {
        let request = TransactionRequest::default().with_to(to).with_input(data);
        Provider::call(self, request).await
    }
}
