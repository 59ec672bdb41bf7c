//! A day-stepped simulation of disease spread through a population laid out on a grid
//!
//! The population is an ordered sequence of people placed row-major on an implicit grid whose
//! width is the ceiling of the square root of the population size. Every simulated day:
//! * a vaccination campaign may vaccinate a random share of the people still eligible,
//! * every contagious person exposes the susceptible people within two cells of them,
//! * every living person advances through their disease, possibly dying, and
//! * the number of people in each compartment is recorded.
//!
//! The central object is the [`Simulation`], built from a [`SimulationConfig`] and a base
//! random seed. All randomness is drawn from named, independently seeded streams (see
//! [`random`]), so a run is fully reproducible from its configuration and seed.
//!
//! ```rust
//! use epigrid::{SimulationConfig, Simulation};
//!
//! let config = SimulationConfig {
//!     population_size: 100,
//!     max_days: 30,
//!     ..SimulationConfig::default()
//! };
//! let mut simulation = Simulation::new(config, 42);
//! simulation.seed_infection(55);
//! simulation.run();
//! println!("{}", simulation.statistics().summary());
//! ```
pub mod config;
pub mod disease;
pub mod error;
pub mod hashing;
pub mod log;
pub mod person;
pub mod population;
pub mod random;
pub mod report;
pub mod runner;
pub mod simulation;
pub mod statistics;
pub mod vaccination;

// Re-exported for use in `define_rng!`.
pub use rand;

pub use config::SimulationConfig;
pub use disease::{DiseaseModel, DiseasePreset, PresetLibrary};
pub use error::EpigridError;
pub use person::{HealthStatus, Person, PersonId};
pub use population::{GridPosition, Population};
pub use random::RandomStreams;
pub use report::ReportOptions;
pub use simulation::Simulation;
pub use statistics::{DailyCounts, RunSummary, Statistics};
pub use vaccination::VaccinationCampaign;
