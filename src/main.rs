use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use distscan::config::BuildConfig;
use distscan::discover::{discover_packages, discover_scripts, read_requirements};
use distscan::manifest::BuildManifest;

#[derive(Parser)]
#[command(name = "distscan")]
#[command(version, about = "Deterministic build-metadata discovery for source distributions")]
struct Cli {
    /// Working directory containing the source tree
    #[arg(long = "dir", default_value = ".")]
    working_dir: PathBuf,

    /// Configuration file (defaults to distscan.json under the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print discovered dotted package paths, one per line
    Packages,
    /// Print discovered executable scripts, one per line
    Scripts,
    /// Print the combined requirement list, one per line
    Requirements,
    /// Print the release version string
    Version,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| BuildConfig::default_path(&cli.working_dir));
    let config = BuildConfig::load(&config_path)?;

    match cli.command {
        None => {
            let manifest = BuildManifest::assemble(&cli.working_dir, &config)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Some(Command::Packages) => {
            let packages =
                discover_packages(&cli.working_dir, &config.root_packages, &config.marker_file)?;
            for package in packages {
                println!("{package}");
            }
        }
        Some(Command::Scripts) => {
            for script in discover_scripts(&cli.working_dir, &config.scripts_dir)? {
                println!("{}", script.display());
            }
        }
        Some(Command::Requirements) => {
            let requirements = read_requirements(
                &cli.working_dir,
                &config.requirements_dir,
                &config.install_requirements,
            )?;
            for requirement in requirements {
                println!("{requirement}");
            }
        }
        Some(Command::Version) => println!("{}", config.version),
    }

    Ok(())
}
