//! Block retrieval with rate-limit back-off.

use crate::{
    error::{EthRequestError, EthermanResult},
    provider::{L1RpcError, L1RpcProvider, RpcBlock},
    Etherman,
};

use alloy_json_rpc::RpcError;
use alloy_primitives::B256;
use alloy_transport::TransportErrorKind;
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};
use tokio::sync::Mutex;
use zkevm_sync_primitives::RollupBlock;

/// Attempts per block request before a rate-limit failure is surfaced.
const RATE_LIMIT_ATTEMPTS: usize = 5;

/// The delay schedule between rate-limited attempts, read cyclically.
const RATE_LIMIT_DELAYS: [Duration; 4] = [
    Duration::from_secs(30),
    Duration::from_secs(60),
    Duration::from_secs(120),
    Duration::from_secs(600),
];

/// Maps a block response onto the bucket type, dropping the body.
pub(crate) fn into_rollup_block(block: &RpcBlock) -> RollupBlock {
    RollupBlock::new(
        block.header.number,
        block.header.hash,
        block.header.parent_hash,
        block.header.timestamp,
    )
}

fn is_rate_limited(error: &L1RpcError) -> bool {
    matches!(error, RpcError::Transport(TransportErrorKind::HttpError(http)) if http.status == 429)
}

impl<P: L1RpcProvider> Etherman<P> {
    /// Fetches the block with the given hash. HTTP 429 responses are retried
    /// up to five attempts with delays of 30, 60, 120 and 600 seconds; any
    /// other error is surfaced immediately. Dropping the returned future
    /// between attempts aborts the retry loop.
    pub(crate) async fn block_by_hash_with_retry(
        &self,
        hash: B256,
    ) -> Result<RollupBlock, EthRequestError> {
        let mut remaining = RATE_LIMIT_ATTEMPTS;
        loop {
            remaining -= 1;
            match self.provider.block_by_hash(hash).await {
                Ok(Some(block)) => {
                    self.metrics.blocks_retrieved.increment(1);
                    return Ok(into_rollup_block(&block));
                }
                Ok(None) => return Err(EthRequestError::MissingBlock(hash)),
                Err(error) if is_rate_limited(&error) && remaining > 0 => {
                    let delay =
                        RATE_LIMIT_DELAYS[(RATE_LIMIT_ATTEMPTS - 1 - remaining) % RATE_LIMIT_DELAYS.len()];
                    tracing::error!(
                        target: "zkevm::etherman",
                        %hash,
                        remaining,
                        delay_secs = delay.as_secs(),
                        "rate limited while fetching block, backing off"
                    );
                    self.metrics.rate_limit_retries.increment(1);
                    tokio::time::sleep(delay).await;
                    tracing::info!(target: "zkevm::etherman", %hash, "retrying block fetch");
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Fetches every distinct block referenced by `hashes` concurrently. The
    /// result map and the error slot share one mutex; the last error observed
    /// wins, and any failure fails the whole batch.
    pub async fn blocks_in_parallel(
        &self,
        hashes: impl IntoIterator<Item = B256>,
    ) -> EthermanResult<HashMap<B256, RollupBlock>> {
        let distinct: HashSet<B256> = hashes.into_iter().collect();
        let outcome = Mutex::new((HashMap::with_capacity(distinct.len()), None));

        futures::future::join_all(distinct.into_iter().map(|hash| {
            let outcome = &outcome;
            async move {
                match self.block_by_hash_with_retry(hash).await {
                    Ok(block) => {
                        outcome.lock().await.0.insert(hash, block);
                    }
                    Err(error) => {
                        tracing::error!(target: "zkevm::etherman", %hash, %error, "failed to retrieve block");
                        outcome.lock().await.1 = Some(error);
                    }
                }
            }
        }))
        .await;

        let (blocks, error) = outcome.into_inner();
        match error {
            Some(error) => Err(error.into()),
            None => Ok(blocks),
        }
    }
}
