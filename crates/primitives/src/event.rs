/// Identifies the sub-array of a [`crate::RollupBlock`] an ordering entry
/// points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum EventOrder {
    /// A legacy global exit root update.
    GlobalExitRoots,
    /// An L1 info tree leaf update.
    L1InfoTree,
    /// A batch group from a `sequenceBatches` transaction.
    SequenceBatches,
    /// The Etrog migration sequence.
    UpdateEtrogSequence,
    /// A batch forced on L1.
    ForcedBatches,
    /// A batch verified by the trusted aggregator.
    TrustedVerifyBatch,
    /// A batch verified by a permissionless aggregator.
    VerifyBatch,
    /// A batch group from a `sequenceForceBatches` transaction.
    SequenceForceBatches,
    /// A fork definition.
    ForkIds,
    /// The initial batch group created at rollup genesis.
    InitialSequenceBatches,
}

impl core::fmt::Display for EventOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::GlobalExitRoots => "GlobalExitRoots",
            Self::L1InfoTree => "L1InfoTree",
            Self::SequenceBatches => "SequenceBatches",
            Self::UpdateEtrogSequence => "UpdateEtrogSequence",
            Self::ForcedBatches => "ForcedBatches",
            Self::TrustedVerifyBatch => "TrustedVerifyBatch",
            Self::VerifyBatch => "VerifyBatch",
            Self::SequenceForceBatches => "SequenceForceBatches",
            Self::ForkIds => "ForkIds",
            Self::InitialSequenceBatches => "InitialSequenceBatches",
        };
        f.write_str(name)
    }
}

/// A single entry of the per-block replay order.
///
/// `pos` is the zero-based index into the sub-array selected by `kind`. A
/// consumer must apply the events of a block in the order of its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Order {
    /// The event kind the entry refers to.
    pub kind: EventOrder,
    /// The index within the sub-array of that kind.
    pub pos: usize,
}

impl Order {
    /// Returns a new [`Order`] entry.
    pub const fn new(kind: EventOrder, pos: usize) -> Self {
        Self { kind, pos }
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Order {{ kind: {}, pos: {} }}", self.kind, self.pos)
    }
}
