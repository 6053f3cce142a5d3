pub mod buckling;
pub mod double_double;
pub mod from_lp;
pub mod isotropic;
pub mod lp;
pub mod plate;
