//! # Composites Core
//!
//! Classical and higher-order laminated plate mechanics: ply stiffness,
//! laminate constitutive matrices (A, B, D, E, F, H and the transverse
//! shear terms), lamination parameters and closed-form buckling estimates.
//!
//! Units are whatever the caller uses consistently; nothing here assumes SI.
//!
//! ## Architecture
//!
//! ```text
//! MatLamina              ← Engineering constants, reduced stiffness, invariants U1..U7
//!     │
//! Lamina                 ← One ply: thickness + angle, rotated Q
//!     │
//! Laminate               ← Through-thickness integration: ABD, E/F/H, Atrans/Dtrans/Ftrans
//!     │
//! LaminationParameters   ← ξA, ξB, ξD, ξE; Laminate ⇄ parameters
//!     │
//! plates                 ← laminated, isotropic, double-double and n-double plates
//!     │
//! kassapoglou            ← Buckling loads from the D matrix
//! ```

pub mod error;
pub mod kassapoglou;
pub mod lamina;
pub mod laminate;
pub mod lamination_parameters;
pub mod material;
pub mod matrix;
pub mod plates;

pub use error::{CompositesError, Result};
pub use kassapoglou::{BendingStiffness, NewtonOptions};
pub use lamina::Lamina;
pub use laminate::{EquivalentProperties, Laminate};
pub use lamination_parameters::{
    GradABD, LaminationParameters, LaminationParametersInput, laminate_from_lamination_parameters,
    laminate_from_lamination_parameters_values,
};
pub use material::{MatLamina, read_laminaprop};
pub use plates::{
    PlateInput, double_double_plate, isotropic_plate, laminated_plate, n_double_plate,
};
