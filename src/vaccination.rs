//! Daily vaccination campaign.
//!
//! The campaign keeps no per-person bookkeeping: each day it recomputes the eligible set
//! (alive and not yet vaccinated) from the population, draws the day's fraction, and
//! vaccinates that share of a random permutation of the eligible set.
use log::{debug, trace};

use crate::define_rng;
use crate::person::clamp_unit;
use crate::population::Population;
use crate::random::RandomStreams;

define_rng!(VaccinationRng);

#[derive(Clone, Debug, PartialEq)]
pub struct VaccinationCampaign {
    enabled: bool,
    start_day: u32,
    daily_min_fraction: f64,
    daily_max_fraction: f64,
    efficacy: f64,
}

impl VaccinationCampaign {
    /// An enabled campaign. Fractions are clamped into `[0, 1]` and reordered if inverted.
    #[must_use]
    pub fn new(start_day: u32, daily_min_fraction: f64, daily_max_fraction: f64) -> Self {
        let mut campaign = VaccinationCampaign {
            enabled: true,
            start_day,
            daily_min_fraction: 0.0,
            daily_max_fraction: 0.0,
            efficacy: 1.0,
        };
        campaign.set_daily_fractions(daily_min_fraction, daily_max_fraction);
        campaign
    }

    #[must_use]
    pub fn disabled() -> Self {
        VaccinationCampaign {
            enabled: false,
            ..VaccinationCampaign::new(0, 0.0, 0.0)
        }
    }

    #[must_use]
    pub fn with_efficacy(mut self, efficacy: f64) -> Self {
        self.set_efficacy(efficacy);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    pub fn daily_min_fraction(&self) -> f64 {
        self.daily_min_fraction
    }

    pub fn daily_max_fraction(&self) -> f64 {
        self.daily_max_fraction
    }

    pub fn efficacy(&self) -> f64 {
        self.efficacy
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_start_day(&mut self, start_day: u32) {
        self.start_day = start_day;
    }

    pub fn set_daily_fractions(&mut self, min: f64, max: f64) {
        let (min, max) = (clamp_unit(min), clamp_unit(max));
        if min <= max {
            (self.daily_min_fraction, self.daily_max_fraction) = (min, max);
        } else {
            (self.daily_min_fraction, self.daily_max_fraction) = (max, min);
        }
    }

    pub fn set_efficacy(&mut self, efficacy: f64) {
        self.efficacy = clamp_unit(efficacy);
    }

    /// Whether the campaign should run on `day`.
    pub fn is_due(&self, day: u32) -> bool {
        self.enabled
            && day >= self.start_day
            && (self.daily_min_fraction > 0.0 || self.daily_max_fraction > 0.0)
    }

    /// Vaccinates today's quota of eligible people and returns how many were vaccinated.
    /// Does not check [`VaccinationCampaign::is_due`].
    pub fn apply_to(&self, population: &mut Population, random: &RandomStreams) -> usize {
        let mut eligible: Vec<usize> = population
            .people()
            .iter()
            .enumerate()
            .filter(|(_, person)| person.is_alive() && !person.is_vaccinated())
            .map(|(index, _)| index)
            .collect();
        if eligible.is_empty() {
            trace!("no one left to vaccinate");
            return 0;
        }

        let fraction = if self.daily_min_fraction < self.daily_max_fraction {
            random.sample_range(
                VaccinationRng,
                self.daily_min_fraction..=self.daily_max_fraction,
            )
        } else {
            self.daily_min_fraction
        };
        let quota = daily_quota(eligible.len(), fraction);

        random.shuffle(VaccinationRng, &mut eligible);
        let mut vaccinated = 0;
        for index in eligible.into_iter().take(quota) {
            if let Some(person) = population.get_mut(index) {
                if person.vaccinate_with_efficacy(self.efficacy) {
                    vaccinated += 1;
                }
            }
        }
        debug!("vaccinated {vaccinated} people (fraction {fraction:.3})");
        vaccinated
    }
}

impl Default for VaccinationCampaign {
    fn default() -> Self {
        VaccinationCampaign::disabled()
    }
}

/// `round(eligible * fraction)`, but at least one while anyone is eligible.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn daily_quota(eligible: usize, fraction: f64) -> usize {
    if eligible == 0 {
        return 0;
    }
    let quota = (eligible as f64 * fraction).round() as usize;
    quota.clamp(1, eligible)
}
