//! Named disease parameter sets.
//!
//! A [`DiseasePreset`] is the plain interchange record a preset store reads and writes. The
//! [`PresetLibrary`] keeps an in-memory, name-keyed collection seeded with the built-in presets
//! and only ever hands out independent copies.
use serde::{Deserialize, Serialize};

use crate::disease::DiseaseModel;
use crate::error::EpigridError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseasePreset {
    pub name: String,
    pub infection_rate: f64,
    pub mortality_rate: f64,
    pub min_recovery_days: u32,
    pub max_recovery_days: u32,
    pub min_contagious_days: u32,
    pub max_contagious_days: u32,
}

impl DiseasePreset {
    #[must_use]
    pub fn generic() -> Self {
        DiseasePreset {
            name: "Generic".to_string(),
            infection_rate: 0.3,
            mortality_rate: 0.0,
            min_recovery_days: 5,
            max_recovery_days: 10,
            min_contagious_days: 3,
            max_contagious_days: 7,
        }
    }

    #[must_use]
    pub fn covid_19() -> Self {
        DiseasePreset {
            name: "COVID-19".to_string(),
            infection_rate: 0.35,
            mortality_rate: 0.01,
            min_recovery_days: 7,
            max_recovery_days: 14,
            min_contagious_days: 3,
            max_contagious_days: 10,
        }
    }

    #[must_use]
    pub fn black_plague() -> Self {
        DiseasePreset {
            name: "Black Plague".to_string(),
            infection_rate: 0.6,
            mortality_rate: 0.3,
            min_recovery_days: 5,
            max_recovery_days: 10,
            min_contagious_days: 2,
            max_contagious_days: 5,
        }
    }

    #[must_use]
    pub fn built_in() -> Vec<DiseasePreset> {
        vec![
            DiseasePreset::generic(),
            DiseasePreset::covid_19(),
            DiseasePreset::black_plague(),
        ]
    }
}

impl From<&DiseasePreset> for DiseaseModel {
    fn from(preset: &DiseasePreset) -> Self {
        DiseaseModel::new(
            preset.name.clone(),
            preset.infection_rate,
            preset.mortality_rate,
            (preset.min_recovery_days, preset.max_recovery_days),
            (preset.min_contagious_days, preset.max_contagious_days),
        )
    }
}

impl From<DiseasePreset> for DiseaseModel {
    fn from(preset: DiseasePreset) -> Self {
        DiseaseModel::from(&preset)
    }
}

impl From<&DiseaseModel> for DiseasePreset {
    fn from(disease: &DiseaseModel) -> Self {
        DiseasePreset {
            name: disease.name().to_string(),
            infection_rate: disease.infection_rate(),
            mortality_rate: disease.mortality_rate(),
            min_recovery_days: *disease.recovery_days().start(),
            max_recovery_days: *disease.recovery_days().end(),
            min_contagious_days: *disease.contagious_days().start(),
            max_contagious_days: *disease.contagious_days().end(),
        }
    }
}

impl DiseaseModel {
    /// Builds a disease from a preset record, clamping and reordering as the setters do.
    #[must_use]
    pub fn from_preset(preset: &DiseasePreset) -> Self {
        preset.into()
    }

    pub fn to_preset(&self) -> DiseasePreset {
        self.into()
    }
}

/// An ordered, in-memory collection of presets keyed by name.
#[derive(Clone, Debug)]
pub struct PresetLibrary {
    presets: Vec<DiseaseModel>,
}

impl PresetLibrary {
    /// A library holding the built-in presets.
    #[must_use]
    pub fn new() -> Self {
        PresetLibrary {
            presets: DiseasePreset::built_in()
                .iter()
                .map(DiseaseModel::from_preset)
                .collect(),
        }
    }

    pub fn presets(&self) -> &[DiseaseModel] {
        &self.presets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(DiseaseModel::name)
    }

    /// Returns an independent copy of the preset called `name`.
    pub fn get(&self, name: &str) -> Option<DiseaseModel> {
        self.presets
            .iter()
            .find(|preset| preset.name() == name)
            .cloned()
    }

    /// Like [`PresetLibrary::get`], but a missing preset is an error.
    pub fn require(&self, name: &str) -> Result<DiseaseModel, EpigridError> {
        self.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            EpigridError::PresetError(format!(
                "no preset named {name:?} (known presets: {})",
                known.join(", ")
            ))
        })
    }

    /// Stores a copy of `disease`, replacing any preset with the same name.
    pub fn add(&mut self, disease: &DiseaseModel) {
        match self
            .presets
            .iter_mut()
            .find(|preset| preset.name() == disease.name())
        {
            Some(existing) => *existing = disease.clone(),
            None => self.presets.push(disease.clone()),
        }
    }

    /// Removes the preset called `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|preset| preset.name() != name);
        self.presets.len() != before
    }
}

impl Default for PresetLibrary {
    fn default() -> Self {
        PresetLibrary::new()
    }
}
