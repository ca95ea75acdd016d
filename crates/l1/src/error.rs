use crate::DataAvailabilityError;

use alloy_primitives::Selector;

/// An error produced while decoding sequencing calldata.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The calldata is shorter than a four-byte method selector.
    #[error("calldata shorter than a method selector")]
    MissingSelector,
    /// No registered decoder matches the selector.
    #[error("unknown sequencing method selector {0}")]
    UnknownSelector(Selector),
    /// The calldata does not conform to the matched method's ABI.
    #[error("abi decoding failed for {method}: {source}")]
    Abi {
        /// The method whose layout was expected.
        method: &'static str,
        /// The underlying ABI error.
        source: alloy_sol_types::Error,
    },
    /// A validium commitment could not be resolved to transaction bytes.
    #[error(transparent)]
    DataAvailability(#[from] DataAvailabilityError),
}

impl DecodeError {
    /// Returns an [`DecodeError::Abi`] error for the given method.
    pub const fn abi(method: &'static str, source: alloy_sol_types::Error) -> Self {
        Self::Abi { method, source }
    }
}
