use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use halftone::dithering::threshold::bayer::ThresholdMatrix;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for halftone", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Bayer rank matrix of the given size
    GenerateMatrices {
        #[arg(default_value_t = 8)]
        size: usize,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateMatrices { size } => generate_matrices(size),
        Commands::Ci => ci(),
    }
}

fn generate_matrices(size: usize) -> Result<()> {
    let matrix = ThresholdMatrix::bayer(size)
        .with_context(|| format!("cannot generate a {size}x{size} matrix"))?;
    let width = (size * size).saturating_sub(1).to_string().len();
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|rank| format!("{rank:>width$}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("[{line}],");
    }
    Ok(())
}

/// Cargo invocations run in order by `ci`, stopping at the first failure.
const CI_STEPS: &[&[&str]] = &[
    &["fmt", "--all", "--check"],
    &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    &["test", "--workspace"],
    // benches are only compiled, running them takes minutes
    &["bench", "--no-run"],
];

fn ci() -> Result<()> {
    for args in CI_STEPS {
        cargo(args)?;
    }
    println!("ci: {} steps passed", CI_STEPS.len());
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    println!("ci: cargo {}", args.join(" "));
    let status = Command::new(&cargo)
        .args(args)
        .status()
        .with_context(|| format!("spawning {cargo}"))?;
    if !status.success() {
        bail!("cargo {} exited with {status}", args.join(" "));
    }
    Ok(())
}
