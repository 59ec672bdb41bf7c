//! Per-day aggregate counts.
//!
//! Each recorded day classifies every person into exactly one [`Compartment`], so the five
//! counts of a day always sum to the population size.
use std::fmt::{self, Display};

use serde::Serialize;

use crate::person::HealthStatus;
use crate::population::Population;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Compartment {
    Susceptible,
    Infected,
    Contagious,
    /// Recovered or vaccinated.
    Safe,
    Dead,
}

impl From<HealthStatus> for Compartment {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Susceptible => Compartment::Susceptible,
            HealthStatus::Infected => Compartment::Infected,
            HealthStatus::Contagious => Compartment::Contagious,
            HealthStatus::Recovered | HealthStatus::Vaccinated => Compartment::Safe,
            HealthStatus::Dead => Compartment::Dead,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DailyCounts {
    pub susceptible: usize,
    pub infected: usize,
    pub contagious: usize,
    pub safe: usize,
    pub dead: usize,
}

impl DailyCounts {
    #[must_use]
    pub fn from_population(population: &Population) -> Self {
        let mut counts = DailyCounts::default();
        for person in population.people() {
            *counts.get_mut(person.health_status().into()) += 1;
        }
        counts
    }

    pub fn get(&self, compartment: Compartment) -> usize {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Infected => self.infected,
            Compartment::Contagious => self.contagious,
            Compartment::Safe => self.safe,
            Compartment::Dead => self.dead,
        }
    }

    fn get_mut(&mut self, compartment: Compartment) -> &mut usize {
        match compartment {
            Compartment::Susceptible => &mut self.susceptible,
            Compartment::Infected => &mut self.infected,
            Compartment::Contagious => &mut self.contagious,
            Compartment::Safe => &mut self.safe,
            Compartment::Dead => &mut self.dead,
        }
    }

    /// Infected plus contagious.
    pub fn active(&self) -> usize {
        self.infected + self.contagious
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.contagious + self.safe + self.dead
    }
}

impl Display for DailyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "susceptible={} infected={} contagious={} safe={} dead={}",
            self.susceptible, self.infected, self.contagious, self.safe, self.dead
        )
    }
}

/// Append-only daily history, one sequence per compartment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    susceptible: Vec<usize>,
    infected: Vec<usize>,
    contagious: Vec<usize>,
    safe: Vec<usize>,
    dead: Vec<usize>,
}

impl Statistics {
    #[must_use]
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Classifies every person and appends one count per compartment.
    pub fn record_day(&mut self, population: &Population) -> DailyCounts {
        let counts = DailyCounts::from_population(population);
        self.susceptible.push(counts.susceptible);
        self.infected.push(counts.infected);
        self.contagious.push(counts.contagious);
        self.safe.push(counts.safe);
        self.dead.push(counts.dead);
        counts
    }

    pub fn reset(&mut self) {
        self.susceptible.clear();
        self.infected.clear();
        self.contagious.clear();
        self.safe.clear();
        self.dead.clear();
    }

    pub fn days_recorded(&self) -> usize {
        self.susceptible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.susceptible.is_empty()
    }

    /// Counts recorded for the zero-based `day`.
    pub fn day(&self, day: usize) -> Option<DailyCounts> {
        Some(DailyCounts {
            susceptible: *self.susceptible.get(day)?,
            infected: *self.infected.get(day)?,
            contagious: *self.contagious.get(day)?,
            safe: *self.safe.get(day)?,
            dead: *self.dead.get(day)?,
        })
    }

    pub fn latest(&self) -> Option<DailyCounts> {
        self.days_recorded()
            .checked_sub(1)
            .and_then(|day| self.day(day))
    }

    pub fn history(&self, compartment: Compartment) -> &[usize] {
        match compartment {
            Compartment::Susceptible => &self.susceptible,
            Compartment::Infected => &self.infected,
            Compartment::Contagious => &self.contagious,
            Compartment::Safe => &self.safe,
            Compartment::Dead => &self.dead,
        }
    }

    pub fn daily_susceptible(&self) -> &[usize] {
        &self.susceptible
    }

    pub fn daily_infected(&self) -> &[usize] {
        &self.infected
    }

    pub fn daily_contagious(&self) -> &[usize] {
        &self.contagious
    }

    pub fn daily_safe(&self) -> &[usize] {
        &self.safe
    }

    pub fn daily_deaths(&self) -> &[usize] {
        &self.dead
    }

    pub fn iter(&self) -> impl Iterator<Item = DailyCounts> + '_ {
        (0..self.days_recorded()).filter_map(|day| self.day(day))
    }

    pub fn summary(&self) -> RunSummary {
        let peak = self
            .iter()
            .enumerate()
            .max_by(|(day_a, a), (day_b, b)| a.active().cmp(&b.active()).then(day_b.cmp(day_a)));
        RunSummary {
            days_recorded: self.days_recorded(),
            peak_active: peak.map_or(0, |(_, counts)| counts.active()),
            peak_day: peak.map(|(day, _)| day),
            final_counts: self.latest(),
        }
    }
}

/// A short digest of a run's history.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub days_recorded: usize,
    /// Highest infected + contagious count on any day.
    pub peak_active: usize,
    /// First zero-based day on which the peak was reached.
    pub peak_day: Option<usize>,
    pub final_counts: Option<DailyCounts>,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "days simulated: {}", self.days_recorded)?;
        match self.peak_day {
            Some(day) => writeln!(f, "peak active cases: {} (day {})", self.peak_active, day + 1)?,
            None => writeln!(f, "peak active cases: 0")?,
        }
        match self.final_counts {
            Some(counts) => write!(f, "final counts: {counts}"),
            None => write!(f, "final counts: none recorded"),
        }
    }
}
