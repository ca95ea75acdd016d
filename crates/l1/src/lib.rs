//! The L1 contract surface of the zkEVM synchronizer: `sol!` event and call
//! declarations for the rollup contracts, topic classification, and the
//! decoder set for `sequenceBatches` calldata across protocol forks.

pub mod abi;

pub use da::{DataAvailabilityError, DataAvailabilityProvider};
mod da;

pub mod decoder;

pub use error::DecodeError;
mod error;

pub use event::L1EventKind;
mod event;
