use std::string::String;

/// A fork definition extracted from an L1 event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkId {
    /// The last batch sequenced under the previous fork, zero for the
    /// initial definition.
    pub batch_number: u64,
    /// The fork identifier.
    pub fork_id: u64,
    /// The human-readable version string, empty when the event carries none.
    pub version: String,
}

/// The batch-number range a fork applies to.
///
/// In a list returned by the fork history reader, intervals are contiguous:
/// each interval ends one batch before the next begins, and the last is open
/// ended at [`u64::MAX`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkIdInterval {
    /// The first batch number the fork applies to.
    pub from_batch_number: u64,
    /// The last batch number the fork applies to.
    pub to_batch_number: u64,
    /// The fork identifier.
    pub fork_id: u64,
    /// The human-readable version string.
    pub version: String,
    /// The L1 block number the fork definition was emitted at.
    pub block_number: u64,
}

impl core::fmt::Display for ForkIdInterval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ForkIdInterval {{ fork: {}, batches: [{}, {}], block: {} }}",
            self.fork_id, self.from_batch_number, self.to_batch_number, self.block_number
        )
    }
}
