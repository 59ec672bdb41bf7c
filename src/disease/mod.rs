//! Disease parameters and the neighborhood spread algorithm.
//!
//! Spread is simultaneous: the day's infections are decided against a snapshot of every
//! person's status taken before any of them are applied, so a person infected today cannot
//! transmit until tomorrow. Transmission is local to a 5x5 block (Chebyshev radius 2) around
//! each contagious person. A susceptible person next to several contagious persons receives
//! one independent trial per neighbor, so their chance of infection compounds.
mod presets;

use std::ops::RangeInclusive;

use log::{debug, trace};

pub use presets::{DiseasePreset, PresetLibrary};

use crate::define_rng;
use crate::person::{clamp_unit, HealthStatus, Person};
use crate::population::Population;
use crate::rand::Rng;
use crate::random::RandomStreams;

define_rng!(TransmissionRng);
define_rng!(DurationRng);

/// Chebyshev radius of the transmission neighborhood.
pub const NEIGHBORHOOD_RADIUS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseModel {
    name: String,
    infection_rate: f64,
    mortality_rate: f64,
    min_recovery_days: u32,
    max_recovery_days: u32,
    min_contagious_days: u32,
    max_contagious_days: u32,
}

impl DiseaseModel {
    /// Rates are clamped into `[0, 1]` and inverted day ranges are reordered.
    pub fn new(
        name: impl Into<String>,
        infection_rate: f64,
        mortality_rate: f64,
        recovery_days: (u32, u32),
        contagious_days: (u32, u32),
    ) -> Self {
        let mut disease = DiseaseModel {
            name: name.into(),
            infection_rate: 0.0,
            mortality_rate: 0.0,
            min_recovery_days: 0,
            max_recovery_days: 0,
            min_contagious_days: 0,
            max_contagious_days: 0,
        };
        disease.set_infection_rate(infection_rate);
        disease.set_mortality_rate(mortality_rate);
        disease.set_recovery_days(recovery_days.0, recovery_days.1);
        disease.set_contagious_days(contagious_days.0, contagious_days.1);
        disease
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn infection_rate(&self) -> f64 {
        self.infection_rate
    }

    pub fn mortality_rate(&self) -> f64 {
        self.mortality_rate
    }

    pub fn recovery_days(&self) -> RangeInclusive<u32> {
        self.min_recovery_days..=self.max_recovery_days
    }

    pub fn contagious_days(&self) -> RangeInclusive<u32> {
        self.min_contagious_days..=self.max_contagious_days
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_infection_rate(&mut self, rate: f64) {
        self.infection_rate = clamp_unit(rate);
    }

    pub fn set_mortality_rate(&mut self, rate: f64) {
        self.mortality_rate = clamp_unit(rate);
    }

    pub fn set_recovery_days(&mut self, min: u32, max: u32) {
        (self.min_recovery_days, self.max_recovery_days) = ordered(min, max);
    }

    pub fn set_contagious_days(&mut self, min: u32, max: u32) {
        (self.min_contagious_days, self.max_contagious_days) = ordered(min, max);
    }

    /// Draws a recovery duration uniformly from the configured inclusive range.
    pub fn random_recovery_days<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.recovery_days())
    }

    /// Draws a contagious duration uniformly from the configured inclusive range.
    pub fn random_contagious_days<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.contagious_days())
    }

    /// Infects `person` if SUSCEPTIBLE, drawing its durations from the duration stream.
    pub fn infect(&self, person: &mut Person, random: &RandomStreams) -> bool {
        random.sample(DurationRng, |rng| person.infect(self, rng))
    }

    /// Runs one day of transmission over `population` and returns the number of new
    /// infections.
    pub fn spread(&self, population: &mut Population, random: &RandomStreams) -> usize {
        if population.is_empty() {
            return 0;
        }

        let snapshot = population.statuses();
        let mut next_state = snapshot.clone();

        for (source, status) in snapshot.iter().enumerate() {
            if !status.is_contagious() {
                continue;
            }
            for target in population.neighbors(source, NEIGHBORHOOD_RADIUS) {
                if snapshot[target] != HealthStatus::Susceptible {
                    continue;
                }
                if random.sample_bool(TransmissionRng, self.infection_rate) {
                    trace!("person {source} exposed person {target}");
                    next_state[target] = HealthStatus::Infected;
                }
            }
        }

        let mut new_infections = 0;
        for (index, status) in next_state.iter().enumerate() {
            if *status != HealthStatus::Infected || snapshot[index] != HealthStatus::Susceptible {
                continue;
            }
            if let Some(person) = population.get_mut(index) {
                if self.infect(person, random) {
                    new_infections += 1;
                }
            }
        }
        debug!("{} spread to {new_infections} new people", self.name);
        new_infections
    }
}

impl Default for DiseaseModel {
    fn default() -> Self {
        DiseasePreset::generic().into()
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
