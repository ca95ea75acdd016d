//! ABI declarations for the L1 rollup contracts.

pub mod calls;
pub mod logs;
