//! The daily step.
//!
//! One call to [`Simulation::step`] advances the world by exactly one day, in a fixed order:
//!
//! 1. vaccinate, if the campaign is due
//! 2. spread the disease
//! 3. progress every living person
//! 4. record the day's statistics
//! 5. advance the day counter
//!
//! A person vaccinated in step 1 is no longer SUSCEPTIBLE when step 2 takes its snapshot.
use log::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::disease::DiseaseModel;
use crate::population::Population;
use crate::random::RandomStreams;
use crate::statistics::Statistics;
use crate::vaccination::VaccinationCampaign;

pub struct Simulation {
    config: SimulationConfig,
    population: Population,
    disease: DiseaseModel,
    vaccination: VaccinationCampaign,
    statistics: Statistics,
    random: RandomStreams,
    current_day: u32,
    max_days: u32,
}

impl Simulation {
    /// Builds a simulation from `config` with every random stream derived from `base_seed`.
    #[must_use]
    pub fn new(config: SimulationConfig, base_seed: u64) -> Self {
        let mut simulation = Simulation {
            population: Population::new(0),
            disease: DiseaseModel::default(),
            vaccination: VaccinationCampaign::disabled(),
            statistics: Statistics::new(),
            random: RandomStreams::new(base_seed),
            current_day: 0,
            max_days: config.max_days,
            config: config.clone(),
        };
        simulation.apply_config(config);
        simulation
    }

    /// Reseeds every random stream.
    pub fn init_random(&mut self, base_seed: u64) {
        self.random.init(base_seed);
    }

    /// Rebuilds the population, disease, campaign and statistics from `config`, reseeds the
    /// random streams from the current base seed and rewinds to day 0.
    pub fn apply_config(&mut self, config: SimulationConfig) {
        info!(
            "applying configuration: {} people, {} for up to {} days",
            config.population_size, config.disease_name, config.max_days
        );
        self.population = Population::new(config.population_size);
        self.disease = config.disease();
        self.vaccination = config.vaccination();
        self.statistics.reset();
        self.random.init(self.random.base_seed());
        self.max_days = config.max_days;
        self.current_day = 0;
        self.config = config;
    }

    /// Rewinds the day counter and clears the statistics without rebuilding anything else.
    pub fn start(&mut self) {
        info!("starting simulation at day 0");
        self.current_day = 0;
        self.statistics.reset();
    }

    /// Infects the person at grid `index` if they are SUSCEPTIBLE. Returns whether they were.
    pub fn seed_infection(&mut self, index: usize) -> bool {
        let Some(person) = self.population.get_mut(index) else {
            return false;
        };
        let infected = self.disease.infect(person, &self.random);
        if infected {
            debug!("seeded infection at index {index}");
        }
        infected
    }

    /// Advances one day. Returns `false` once the last day has been simulated; calling it
    /// again after that is a no-op.
    pub fn step(&mut self) -> bool {
        if self.current_day >= self.max_days {
            trace!("simulation finished; step ignored");
            return false;
        }
        let day = self.current_day;
        trace!("day {day}: begin");

        if self.vaccination.is_due(day) {
            self.vaccination
                .apply_to(&mut self.population, &self.random);
        }
        self.disease.spread(&mut self.population, &self.random);
        self.population.progress_day(&self.disease, &self.random);
        let counts = self.statistics.record_day(&self.population);
        debug!("day {day}: {counts}");

        self.current_day += 1;
        self.current_day < self.max_days
    }

    /// Steps until the simulation halts and returns the number of days simulated.
    pub fn run(&mut self) -> u32 {
        let first_day = self.current_day;
        while self.step() {}
        let days = self.current_day - first_day;
        info!("simulation finished after {days} days");
        days
    }

    pub fn is_finished(&self) -> bool {
        self.current_day >= self.max_days
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// The applied configuration, carrying the parameters of the active disease.
    pub fn config(&self) -> SimulationConfig {
        self.config.clone().with_disease(&self.disease)
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn disease(&self) -> &DiseaseModel {
        &self.disease
    }

    /// The active disease. Edits apply from the next step and never reach stored presets.
    pub fn disease_mut(&mut self) -> &mut DiseaseModel {
        &mut self.disease
    }

    pub fn set_disease(&mut self, disease: DiseaseModel) {
        info!("switching disease to {}", disease.name());
        self.disease = disease;
    }

    pub fn vaccination(&self) -> &VaccinationCampaign {
        &self.vaccination
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn base_seed(&self) -> u64 {
        self.random.base_seed()
    }
}
