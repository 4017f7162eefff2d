//! Error types for `ndarray-label`.

use thiserror::Error;

/// Errors that can occur while labeling connected components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The input has a zero-length axis; there is nothing to scan.
    #[error("image not forged: input has a zero-length axis ({shape:?})")]
    ImageNotForged {
        /// The offending shape.
        shape: Vec<usize>,
    },

    /// `connectivity` is zero or exceeds the input's rank.
    #[error("connectivity {connectivity} out of range for rank {rank}")]
    ParameterOutOfRange {
        /// The connectivity the caller requested.
        connectivity: usize,
        /// The rank of the input image.
        rank: usize,
    },

    /// `boundary_condition` has more entries than the input has axes.
    #[error("boundary_condition has {given} entries, but the input only has {rank} axes")]
    BoundaryConditionLength {
        /// Number of entries the caller supplied.
        given: usize,
        /// The rank of the input image.
        rank: usize,
    },

    /// The chosen scan axis is shorter than 3 pixels and no specialized path applies.
    ///
    /// Reserved for API fidelity with the source specification. `label` itself never returns
    /// this variant: axes shorter than 3 pixels are handled by the brute-force fallback in
    /// [`crate::scan::tiny`] instead of being rejected.
    #[error("image too small: scan axis has length {length}, need at least 3")]
    ImageTooSmall {
        /// The offending axis length.
        length: usize,
    },

    /// Labeling this input would create more provisional labels than `LabelType` can represent.
    #[error("label overflow: more than {max} regions would be required")]
    LabelOverflow {
        /// The maximum representable label value.
        max: u32,
    },
}

/// Convenience alias for this crate's fallible results.
pub type Result<T> = std::result::Result<T, LabelError>;
