use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::path::PathBuf;

use region_refactor::{apply_file, ApplyOptions, Outcome, RefactorConfig, Strategy};

fn main() -> Result<()> {
    let matches = Command::new("region_refactor")
        .version("0.1.0")
        .about("Extracts marked regions of a file into named units and replaces them with invocations")
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("File to refactor in place"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML file describing the regions, units and duplicate block"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .num_args(1)
                .value_parser(["offset", "exact"])
                .help("Override the substitution strategy from the config"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .help("Print the diff instead of writing the file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let file = matches
        .get_one::<PathBuf>("file")
        .context("missing file argument")?;
    let config_path = matches
        .get_one::<PathBuf>("config")
        .context("missing --config argument")?;

    let mut config = RefactorConfig::load(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = strategy
            .parse::<Strategy>()
            .map_err(anyhow::Error::msg)?;
    }
    let options = ApplyOptions {
        dry_run: matches.get_flag("dry_run"),
    };

    println!("--------------------------------------------------");
    println!("File: {}", file.display());
    println!("Regions: {}", config.regions.len());
    println!("--------------------------------------------------");

    let report = apply_file(file, &config, options)
        .with_context(|| format!("Failed to refactor {}", file.display()))?;

    match &report.outcome {
        Outcome::AlreadyApplied => {
            println!("Already applied: every unit is declared, nothing to do.");
        }
        Outcome::Transformed(transformation) => {
            for unit in &transformation.units {
                println!("Extracted {}({})", unit.name(), unit.parameters().join(", "));
            }
            if transformation.duplicate_removed.is_some() {
                println!("Removed duplicate block");
            } else if config.duplicate.is_some() {
                println!("Duplicate block not found, skipped");
            }
            if options.dry_run {
                if let Some(diff) = &report.diff {
                    println!("--------------------------------------------------");
                    print!("{}", diff);
                }
                println!("--------------------------------------------------");
                println!("Dry run: {} left unchanged.", file.display());
            }
        }
    }

    println!("Done");
    Ok(())
}
