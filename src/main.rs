//! Stripline - trace impedance calculator
//!
//! # Usage
//!
//! ```bash
//! stripline --height-mm 1.6 --eps-r 4.4 --thickness-um 35 --freq-ghz 1 impedance 0.7
//! stripline width 50
//! RUST_LOG=stripline_core=trace stripline width 75
//! ```

use clap::{Parser, Subcommand};
use stripline_core::{
    calculator::{calculate_impedance, calculate_width_with},
    error::Result,
    PhysicalParameters, SolverConfig,
};
use tracing_subscriber::EnvFilter;

/// Stripline characteristic impedance calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Distance between the ground planes (mm)
    #[arg(long, default_value_t = 1.6)]
    height_mm: f64,

    /// Relative permittivity of the dielectric (1 = air)
    #[arg(long, default_value_t = 4.4)]
    eps_r: f64,

    /// Copper thickness (µm)
    #[arg(long, default_value_t = 35.0)]
    thickness_um: f64,

    /// Operating frequency (GHz)
    #[arg(long, default_value_t = 1.0)]
    freq_ghz: f64,

    /// Maximum solver iterations
    #[arg(long, default_value_t = stripline_core::solver::MAX_ITERATIONS)]
    max_iterations: usize,

    /// Solver convergence tolerance
    #[arg(long, default_value_t = stripline_core::solver::CONVERGENCE_TOLERANCE)]
    tolerance: f64,

    /// Fraction of each Newton step taken
    #[arg(long, default_value_t = stripline_core::solver::DAMPING_FACTOR)]
    damping: f64,

    /// Log solver progress (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute Z0 for a trace width
    Impedance {
        /// Trace width (mm)
        width_mm: f64,
    },
    /// Solve for the trace width giving a target Z0
    Width {
        /// Target impedance (Ω)
        target_ohms: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let params =
        PhysicalParameters::from_board_units(args.height_mm, args.eps_r, args.thickness_um, args.freq_ghz);

    let calculation = match args.command {
        Command::Impedance { width_mm } => calculate_impedance(width_mm, &params)?,
        Command::Width { target_ohms } => {
            let config = SolverConfig::new()
                .with_max_iterations(args.max_iterations)
                .with_tolerance(args.tolerance)
                .with_damping(args.damping);
            calculate_width_with(target_ohms, &params, &config)?
        }
    };

    println!("{calculation}");

    Ok(())
}
