mod input;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use trusscalc::{
    compute, eurotruss_fd34, load_catalog, BuildRequest, CalculatorConfig, JsonStockStore,
    PartDefinition, StockStore, Structure, StructureType,
};

use input::{load_config, parse_height, parse_length, parse_width};
use report::{render_json, render_summary, size_warning};

/// Bill-of-materials calculator for truss frames and arches.
#[derive(Parser)]
#[command(name = "trusscalc", version, about, long_about = None)]
struct Cli {
    /// JSON file holding the in-stock toggles.
    #[arg(long, global = true, default_value = "trusscalc-stock.json")]
    stock: PathBuf,

    /// JSON part list to use instead of the built-in FD34 catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log every decomposed span.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the parts needed for a structure.
    Calc {
        /// Structure to build.
        #[arg(value_enum)]
        structure: StructureArg,

        /// Length in metres (`,` or `.` as decimal separator).
        #[arg(long, value_parser = parse_length)]
        length: f64,

        /// Width in metres, self-supporting frames only.
        #[arg(long, value_parser = parse_width)]
        width: Option<f64>,

        /// Height in metres.
        #[arg(long, value_parser = parse_height)]
        height: f64,

        /// JSON file overriding the calculator settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change which parts are in stock.
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
}

#[derive(Subcommand)]
enum StockAction {
    /// List every catalog part with its stock state.
    List,
    /// Mark a part as in stock or out of stock.
    Set {
        /// Catalog name of the part.
        name: String,
        /// `true` when the part is in stock.
        #[arg(action = ArgAction::Set)]
        available: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StructureArg {
    /// Four-legged rectangular frame.
    SelfSupporting,
    /// Two-legged arch.
    Arch,
}

impl From<StructureArg> for StructureType {
    fn from(value: StructureArg) -> Self {
        match value {
            StructureArg::SelfSupporting => StructureType::SelfSupporting,
            StructureArg::Arch => StructureType::Arch,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => eurotruss_fd34(),
    };
    let store = JsonStockStore::new(&cli.stock);

    match cli.command {
        Command::Calc {
            structure,
            length,
            width,
            height,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => CalculatorConfig::default(),
            };
            let structure = Structure::from_parts(structure.into(), length, width, height)?;
            let warning = size_warning(&structure, config.size_warning_threshold);
            if let Some(warning) = &warning {
                tracing::warn!("{warning}");
            }
            let request = BuildRequest::new(structure).with_volume_margin(config.volume_margin)?;
            let availability = store.load_availability()?;
            let calculation = compute(&request, &catalog, &availability);

            if json {
                println!("{}", render_json(&calculation, warning.as_deref())?);
            } else {
                print!("{}", render_summary(&calculation, warning.as_deref()));
            }
        }
        Command::Stock { action } => match action {
            StockAction::List => {
                let availability = store.load_availability()?;
                for part in &catalog {
                    let state = if availability.is_available(&part.name) {
                        "in stock"
                    } else {
                        "out of stock"
                    };
                    println!("{:<32} {state}", part.name);
                }
            }
            StockAction::Set { name, available } => {
                ensure_known(&catalog, &name)?;
                let mut availability = store.load_availability()?;
                availability.set(name.clone(), available);
                store.save_availability(&availability)?;
                tracing::info!(part = %name, available, path = ?store.path(), "stock updated");
            }
        },
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reject stock toggles for parts the catalog does not contain.
fn ensure_known(catalog: &[PartDefinition], name: &str) -> Result<()> {
    if catalog.iter().any(|part| part.name == name) {
        Ok(())
    } else {
        bail!("unknown part {name:?}; run `trusscalc stock list` for valid names")
    }
}
