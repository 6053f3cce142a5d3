use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "composites",
    about = "Composites: laminated plate stiffness, lamination parameters and buckling",
    version
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Property forced on a laminate after it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LaminateForce {
    /// A16 = A26 = A45 = 0
    Balanced,
    /// All 16, 26 and 45 terms zero
    Orthotropic,
    /// B = E = 0
    Symmetric,
    /// Homogenized through the thickness
    Smeared,
}

/// Property forced on lamination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LpForce {
    /// xiA2 = xiA4 = xiE2 = 0
    Balanced,
    /// All sine terms zero
    Orthotropic,
    /// All xiB zero
    Symmetric,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a laminated plate from the [plate] table of a TOML file
    Plate {
        /// Path to the TOML input file
        input: String,

        /// Force a laminate property (can be repeated)
        #[arg(long, value_enum)]
        force: Vec<LaminateForce>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build an isotropic plate
    Isotropic {
        /// Plate thickness
        #[arg(long)]
        thickness: f64,

        /// Young's modulus
        #[arg(long)]
        e: f64,

        /// Poisson's ratio
        #[arg(long)]
        nu: f64,

        /// Mid-surface offset
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Density
        #[arg(long, default_value_t = 0.0)]
        rho: f64,

        /// Keep the default 5/6 shear correction factors
        #[arg(long)]
        no_scf: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Lamination parameters of the [plate] stacking sequence
    Lp {
        /// Path to the TOML input file
        input: String,

        /// Force a property on the parameters (can be repeated)
        #[arg(long, value_enum)]
        force: Vec<LpForce>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a laminate from the [lamination_parameters] table of a TOML file
    FromLp {
        /// Path to the TOML input file
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a homogenized double-double laminate [±phi, ±psi]
    DoubleDouble {
        /// Laminate thickness
        #[arg(long)]
        thickness: f64,

        /// First angle in degrees
        #[arg(long, allow_negative_numbers = true)]
        phi: f64,

        /// Second angle in degrees
        #[arg(long, allow_negative_numbers = true)]
        psi: f64,

        /// Ply properties, comma separated (E11,E22,nu12,G12,G13,G23)
        #[arg(long, value_delimiter = ',', required = true)]
        laminaprop: Vec<f64>,

        /// Density
        #[arg(long, default_value_t = 0.0)]
        rho: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Closed-form buckling loads of a simply supported panel
    Buckling {
        /// Path to the TOML input file ([plate] or [lamination_parameters], optional [panel])
        input: String,

        /// Panel length, overrides [panel].a
        #[arg(long)]
        a: Option<f64>,

        /// Panel width, overrides [panel].b
        #[arg(long)]
        b: Option<f64>,

        /// Load ratio Nxy/Nxx for combined loading, overrides [panel].k
        #[arg(long, allow_negative_numbers = true)]
        k: Option<f64>,

        /// Applied compressive force for the post-buckling effective width
        #[arg(long)]
        px: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
