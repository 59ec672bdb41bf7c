//! The configuration value object the engine is built from.
//!
//! The engine trusts a `SimulationConfig` as given and only clamps or reorders where its
//! setters do. Configurations coming from outside (files, the command line) should be checked
//! with [`SimulationConfig::validate`] first.
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::disease::DiseaseModel;
use crate::error::EpigridError;
use crate::vaccination::VaccinationCampaign;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub disease_name: String,
    pub population_size: usize,
    pub infection_rate: f64,
    pub mortality_rate: f64,
    pub min_recovery_days: u32,
    pub max_recovery_days: u32,
    pub min_contagious_days: u32,
    pub max_contagious_days: u32,
    pub vaccination_enabled: bool,
    pub vaccination_start_day: u32,
    pub daily_vaccination_min_fraction: f64,
    pub daily_vaccination_max_fraction: f64,
    pub vaccination_efficacy: f64,
    pub max_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            disease_name: "Custom".to_string(),
            population_size: 300,
            infection_rate: 0.2,
            mortality_rate: 0.0,
            min_recovery_days: 3,
            max_recovery_days: 5,
            min_contagious_days: 2,
            max_contagious_days: 4,
            vaccination_enabled: false,
            vaccination_start_day: 0,
            daily_vaccination_min_fraction: 0.0,
            daily_vaccination_max_fraction: 0.0,
            vaccination_efficacy: 1.0,
            max_days: 50,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON configuration. Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self, EpigridError> {
        info!("loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Writes this configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: &Path) -> Result<(), EpigridError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Checks every range constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), EpigridError> {
        if self.population_size == 0 {
            return Err(EpigridError::ConfigError(
                "populationSize must be greater than 0".to_string(),
            ));
        }
        if self.max_days == 0 {
            return Err(EpigridError::ConfigError(
                "maxDays must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("infectionRate", self.infection_rate),
            ("mortalityRate", self.mortality_rate),
            (
                "dailyVaccinationMinFraction",
                self.daily_vaccination_min_fraction,
            ),
            (
                "dailyVaccinationMaxFraction",
                self.daily_vaccination_max_fraction,
            ),
            ("vaccinationEfficacy", self.vaccination_efficacy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EpigridError::ConfigError(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.min_recovery_days > self.max_recovery_days {
            return Err(EpigridError::ConfigError(format!(
                "minRecoveryDays ({}) exceeds maxRecoveryDays ({})",
                self.min_recovery_days, self.max_recovery_days
            )));
        }
        if self.min_contagious_days > self.max_contagious_days {
            return Err(EpigridError::ConfigError(format!(
                "minContagiousDays ({}) exceeds maxContagiousDays ({})",
                self.min_contagious_days, self.max_contagious_days
            )));
        }
        if self.daily_vaccination_min_fraction > self.daily_vaccination_max_fraction {
            return Err(EpigridError::ConfigError(format!(
                "dailyVaccinationMinFraction ({}) exceeds dailyVaccinationMaxFraction ({})",
                self.daily_vaccination_min_fraction, self.daily_vaccination_max_fraction
            )));
        }
        Ok(())
    }

    /// Copies the name, rates and day ranges of `disease` into this configuration.
    #[must_use]
    pub fn with_disease(mut self, disease: &DiseaseModel) -> Self {
        self.disease_name = disease.name().to_string();
        self.infection_rate = disease.infection_rate();
        self.mortality_rate = disease.mortality_rate();
        self.min_recovery_days = *disease.recovery_days().start();
        self.max_recovery_days = *disease.recovery_days().end();
        self.min_contagious_days = *disease.contagious_days().start();
        self.max_contagious_days = *disease.contagious_days().end();
        self
    }

    pub fn disease(&self) -> DiseaseModel {
        DiseaseModel::new(
            self.disease_name.clone(),
            self.infection_rate,
            self.mortality_rate,
            (self.min_recovery_days, self.max_recovery_days),
            (self.min_contagious_days, self.max_contagious_days),
        )
    }

    pub fn vaccination(&self) -> VaccinationCampaign {
        let mut campaign = VaccinationCampaign::new(
            self.vaccination_start_day,
            self.daily_vaccination_min_fraction,
            self.daily_vaccination_max_fraction,
        )
        .with_efficacy(self.vaccination_efficacy);
        campaign.set_enabled(self.vaccination_enabled);
        campaign
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population_size, 300);
        assert_eq!(config.max_days, 50);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "populationSize": 100, "infectionRate": 0.5, "vaccinationEnabled": true }}"#
        )
        .unwrap();

        let config = SimulationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.population_size, 100);
        assert!((config.infection_rate - 0.5).abs() < f64::EPSILON);
        assert!(config.vaccination_enabled);
        assert_eq!(config.max_days, 50);
    }

    #[test]
    fn json_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let config = SimulationConfig {
            population_size: 64,
            ..SimulationConfig::default()
        };
        config.to_json_file(file.path()).unwrap();
        assert_eq!(SimulationConfig::from_json_file(file.path()).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ populationSize: ").unwrap();
        assert!(matches!(
            SimulationConfig::from_json_file(file.path()),
            Err(EpigridError::JsonError(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationConfig::from_json_file(Path::new("/nonexistent/epigrid.json"));
        assert!(matches!(result, Err(EpigridError::IoError(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let bad = [
            SimulationConfig {
                population_size: 0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                max_days: 0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                infection_rate: 1.5,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                min_recovery_days: 9,
                max_recovery_days: 2,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                daily_vaccination_min_fraction: 0.6,
                daily_vaccination_max_fraction: 0.2,
                ..SimulationConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(EpigridError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn builds_disease_and_campaign() {
        let config = SimulationConfig {
            vaccination_enabled: true,
            vaccination_start_day: 4,
            daily_vaccination_min_fraction: 0.1,
            daily_vaccination_max_fraction: 0.2,
            vaccination_efficacy: 0.9,
            ..SimulationConfig::default()
        };
        let disease = config.disease();
        assert_eq!(disease.recovery_days(), 3..=5);
        assert_eq!(disease.contagious_days(), 2..=4);

        let campaign = config.vaccination();
        assert!(campaign.is_enabled());
        assert_eq!(campaign.start_day(), 4);
        assert!(!campaign.is_due(3));
        assert!(campaign.is_due(4));
    }

    #[test]
    fn with_disease_copies_parameters() {
        let plague = DiseaseModel::new("Black Plague", 0.6, 0.3, (5, 10), (2, 5));
        let config = SimulationConfig::default().with_disease(&plague);
        assert_eq!(config.disease(), plague);
    }
}
