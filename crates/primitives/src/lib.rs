//! Primitive types for the zkEVM L1 synchronizer.

#![cfg_attr(not(feature = "std"), no_std)]
#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub use batch::{
    BananaSequenceData, BatchData, ElderberrySequenceData, EtrogBatchData, ForcedBatch,
    PreEtrogBatchData, SequencedBatch, SequencedForceBatch, UpdateEtrogSequence, VerifiedBatch,
};
mod batch;

pub use block::RollupBlock;
mod block;

pub use event::{EventOrder, Order};
mod event;

pub use exit_root::GlobalExitRoot;
mod exit_root;

pub use fork::{ForkId, ForkIdInterval};
mod fork;
