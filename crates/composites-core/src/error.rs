//! Error types for laminate mechanics operations.

/// Errors arising from invalid material, stacking or buckling inputs.
#[derive(Debug, thiserror::Error)]
pub enum CompositesError {
    /// A `laminaprop` tuple does not have one of the accepted lengths.
    #[error("invalid laminaprop: expected 2, 3, 6 or 9 entries, got {0}")]
    InvalidLaminaprop(usize),

    /// Neither the uniform value nor the per-ply list was supplied.
    #[error("{0} must be supplied")]
    MissingInput(&'static str),

    /// A per-ply list does not match the stacking sequence.
    #[error("{field} has {actual} entries but the stack has {expected} plies")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An operation requires at least one ply.
    #[error("laminate with 0 plies")]
    EmptyLaminate,

    /// Lamination parameters need a single material for all plies.
    #[error("plies with different materials (ply {ply})")]
    MixedMaterials { ply: usize },

    /// Forcing a laminate property is only meaningful about the mid-surface.
    #[error("laminates with offset cannot be made {0}")]
    OffsetNotSupported(&'static str),

    /// A stiffness matrix could not be inverted.
    #[error("singular {0} matrix")]
    SingularMatrix(&'static str),

    /// A lamination parameter lies outside its feasible interval.
    #[error("lamination parameter {name} = {value} outside [-1, 1]")]
    LaminationParameterOutOfRange { name: &'static str, value: f64 },

    /// The Newton-Raphson scheme for shear buckling did not converge.
    #[error("Newton-Raphson scheme did not converge after {0} iterations")]
    NotConverged(usize),

    /// A physical input is out of its valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CompositesError>;
