use std::path::{Path, PathBuf};

use clap::{Args, Command, FromArgMatches as _};
use log::info;

use crate::config::SimulationConfig;
use crate::disease::PresetLibrary;
use crate::error::EpigridError;
use crate::log::LogDirectives;
use crate::population::{GridPosition, Population};
use crate::report::{write_statistics_csv, ReportOptions};
use crate::simulation::Simulation;

/// Command line arguments of the `epigrid` runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Optional path for a JSON simulation config file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Replace the configured disease with a built-in preset (e.g. "COVID-19")
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Optional directory for the statistics report
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Prefix for report file names
    #[arg(long, default_value = "")]
    pub file_prefix: String,

    /// Log level, or comma separated `module=level` filters
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Number of people infected before the first day
    #[arg(short, long, default_value = "1")]
    pub seed_infections: usize,

    /// Overwrite an existing report
    #[arg(long)]
    pub overwrite: bool,
}

impl Default for BaseArgs {
    fn default() -> Self {
        BaseArgs {
            random_seed: 0,
            config: String::new(),
            preset: None,
            output_dir: String::new(),
            file_prefix: String::new(),
            log_level: None,
            seed_infections: 1,
            overwrite: false,
        }
    }
}

fn create_epigrid_cli() -> Command {
    let cli = Command::new("epigrid");
    BaseArgs::augment_args(cli)
}

/// Parses the process arguments and runs a simulation to completion.
///
/// # Errors
/// Returns an error if argument parsing, configuration, or report writing fails
pub fn run_with_args() -> Result<Simulation, Box<dyn std::error::Error>> {
    let matches = create_epigrid_cli().get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    Ok(run_with_args_internal(args)?)
}

/// Runs a simulation described by already parsed arguments and returns it after its last day.
///
/// # Errors
/// Returns an error if the log level, configuration or preset is invalid, or if the report
/// cannot be written
pub fn run_with_args_internal(args: BaseArgs) -> Result<Simulation, EpigridError> {
    if let Some(directives) = &args.log_level {
        directives.parse::<LogDirectives>()?.apply();
    }

    let mut config = if args.config.is_empty() {
        SimulationConfig::default()
    } else {
        SimulationConfig::from_json_file(Path::new(&args.config))?
    };
    if let Some(name) = &args.preset {
        let disease = PresetLibrary::new().require(name)?;
        config = config.with_disease(&disease);
    }
    config.validate()?;

    let mut simulation = Simulation::new(config, args.random_seed);
    let seeds = seed_indices(simulation.population(), args.seed_infections);
    for index in &seeds {
        simulation.seed_infection(*index);
    }
    info!("seeded {} initial infections", seeds.len());

    simulation.start();
    simulation.run();
    info!("{}", simulation.statistics().summary());

    // Optionally write the statistics report
    if !args.output_dir.is_empty() {
        let mut report_options = ReportOptions::new();
        report_options
            .directory(PathBuf::from(&args.output_dir))
            .file_prefix(args.file_prefix.clone())
            .overwrite(args.overwrite);
        write_statistics_csv(simulation.statistics(), &report_options, "statistics")?;
    }

    Ok(simulation)
}

/// `count` distinct, evenly spaced grid indices. A single seed goes to the centre cell.
fn seed_indices(population: &Population, count: usize) -> Vec<usize> {
    let len = population.len();
    let count = count.min(len);
    match count {
        0 => Vec::new(),
        1 => {
            let centre = GridPosition {
                row: population.rows() / 2,
                col: population.columns() / 2,
            };
            vec![population.index_of(centre).unwrap_or(len / 2)]
        }
        _ => (0..count).map(|i| i * len / count).collect(),
    }
}
