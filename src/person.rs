//! The per-person health state machine.
//!
//! Every legal change of a person's [`HealthStatus`] goes through [`Person::apply`], which
//! matches on the current status and the requested [`Transition`]. Callers never assign a
//! status directly; they ask for a transition and the state machine decides whether it applies.
//!
//! ```text
//! SUSCEPTIBLE --infect--> INFECTED --days_infected >= recovery_duration--> CONTAGIOUS
//!      |                     |                                               |
//!      +--vaccinate--> VACCINATED   +--mortality--> DEAD <--mortality--------+
//!                                                                            |
//!                                   RECOVERED <--days_contagious >= contagious_duration
//! ```
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::disease::DiseaseModel;
use crate::rand::Rng;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct PersonId(pub(crate) usize);

impl PersonId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Never infected; can still be infected or vaccinated.
    Susceptible,
    /// Newly infected, still incubating. Already transmits.
    Infected,
    /// Past incubation, counting down to recovery.
    Contagious,
    Recovered,
    Vaccinated,
    Dead,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 6] = [
        HealthStatus::Susceptible,
        HealthStatus::Infected,
        HealthStatus::Contagious,
        HealthStatus::Recovered,
        HealthStatus::Vaccinated,
        HealthStatus::Dead,
    ];

    /// Whether a person in this status can transmit the disease.
    pub fn is_contagious(self) -> bool {
        matches!(self, HealthStatus::Infected | HealthStatus::Contagious)
    }

    pub fn is_alive(self) -> bool {
        self != HealthStatus::Dead
    }
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthStatus::Susceptible => "SUSCEPTIBLE",
            HealthStatus::Infected => "INFECTED",
            HealthStatus::Contagious => "CONTAGIOUS",
            HealthStatus::Recovered => "RECOVERED",
            HealthStatus::Vaccinated => "VACCINATED",
            HealthStatus::Dead => "DEAD",
        };
        f.write_str(name)
    }
}

/// A request to move a person through the state machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transition {
    /// Start an infection episode with the given durations (in days).
    Infect {
        recovery_duration: u32,
        contagious_duration: u32,
    },
    Vaccinate { efficacy: f64 },
    Die,
    /// One day of disease progression without death.
    Advance,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    id: PersonId,
    health_status: HealthStatus,
    vaccinated: bool,
    vaccine_efficacy: f64,
    days_infected: u32,
    days_contagious: u32,
    recovery_duration: u32,
    contagious_duration: u32,
}

impl Person {
    #[must_use]
    pub fn new(id: PersonId) -> Self {
        Person {
            id,
            health_status: HealthStatus::Susceptible,
            vaccinated: false,
            vaccine_efficacy: 0.0,
            days_infected: 0,
            days_contagious: 0,
            recovery_duration: 0,
            contagious_duration: 0,
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    pub fn is_vaccinated(&self) -> bool {
        self.vaccinated
    }

    pub fn vaccine_efficacy(&self) -> f64 {
        self.vaccine_efficacy
    }

    pub fn days_infected(&self) -> u32 {
        self.days_infected
    }

    pub fn days_contagious(&self) -> u32 {
        self.days_contagious
    }

    /// Days to spend INFECTED before becoming CONTAGIOUS in the current episode.
    pub fn recovery_duration(&self) -> u32 {
        self.recovery_duration
    }

    /// Days to spend CONTAGIOUS before recovering in the current episode.
    pub fn contagious_duration(&self) -> u32 {
        self.contagious_duration
    }

    pub fn is_contagious(&self) -> bool {
        self.health_status.is_contagious()
    }

    pub fn is_alive(&self) -> bool {
        self.health_status.is_alive()
    }

    /// Applies `transition` if it is legal from the current status and returns whether it
    /// was applied. Illegal transitions leave the person untouched.
    pub fn apply(&mut self, transition: Transition) -> bool {
        use HealthStatus::{Contagious, Dead, Infected, Recovered, Susceptible, Vaccinated};

        let next = match (self.health_status, transition) {
            (
                Susceptible,
                Transition::Infect {
                    recovery_duration,
                    contagious_duration,
                },
            ) => {
                self.recovery_duration = recovery_duration;
                self.contagious_duration = contagious_duration;
                self.days_infected = 0;
                self.days_contagious = 0;
                Infected
            }
            (Dead, Transition::Vaccinate { .. }) => return false,
            (status, Transition::Vaccinate { efficacy }) => {
                if self.vaccinated {
                    return false;
                }
                self.vaccinated = true;
                self.vaccine_efficacy = clamp_unit(efficacy);
                // Vaccinating an already-infected person only records the flag.
                if status == Susceptible {
                    Vaccinated
                } else {
                    status
                }
            }
            (Infected | Contagious, Transition::Die) => Dead,
            (Infected, Transition::Advance) => {
                self.days_infected += 1;
                if self.days_infected >= self.recovery_duration {
                    self.days_contagious = 0;
                    Contagious
                } else {
                    Infected
                }
            }
            (Contagious, Transition::Advance) => {
                self.days_contagious += 1;
                if self.days_contagious >= self.contagious_duration {
                    Recovered
                } else {
                    Contagious
                }
            }
            _ => return false,
        };
        self.health_status = next;
        true
    }

    /// Starts an infection episode if the person is SUSCEPTIBLE, drawing the recovery and
    /// contagious durations from `disease`. Returns whether the person was infected.
    pub fn infect<R: Rng>(&mut self, disease: &DiseaseModel, rng: &mut R) -> bool {
        if self.health_status != HealthStatus::Susceptible {
            return false;
        }
        let recovery_duration = disease.random_recovery_days(rng);
        let contagious_duration = disease.random_contagious_days(rng);
        self.apply(Transition::Infect {
            recovery_duration,
            contagious_duration,
        })
    }

    /// Advances an ongoing infection by one day. Mortality is rolled first; a death ends the
    /// call. Must be invoked exactly once per person per simulated day.
    pub fn progress_day<R: Rng>(&mut self, disease: &DiseaseModel, rng: &mut R) {
        if !self.is_contagious() {
            return;
        }
        if rng.random_bool(disease.mortality_rate()) {
            self.apply(Transition::Die);
        } else {
            self.apply(Transition::Advance);
        }
    }

    /// Marks the person as vaccinated with full efficacy. See [`Person::vaccinate_with_efficacy`].
    pub fn vaccinate(&mut self) -> bool {
        self.vaccinate_with_efficacy(1.0)
    }

    /// Records the vaccination flag and efficacy. Only a SUSCEPTIBLE person changes status.
    /// Repeated calls, and calls on a dead person, have no effect.
    pub fn vaccinate_with_efficacy(&mut self, efficacy: f64) -> bool {
        self.apply(Transition::Vaccinate { efficacy })
    }
}

/// Clamps into `[0, 1]`, mapping NaN to zero.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::rngs::SmallRng;
    use crate::rand::SeedableRng;

    fn disease(mortality_rate: f64, recovery: (u32, u32), contagious: (u32, u32)) -> DiseaseModel {
        DiseaseModel::new("Test", 0.5, mortality_rate, recovery, contagious)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn new_person_is_susceptible() {
        let person = Person::new(PersonId(3));
        assert_eq!(person.id(), PersonId(3));
        assert_eq!(person.health_status(), HealthStatus::Susceptible);
        assert!(!person.is_vaccinated());
        assert!(!person.is_contagious());
    }

    #[test]
    fn infect_draws_durations_within_range() {
        let disease = disease(0.0, (3, 5), (2, 4));
        let mut rng = rng();
        for i in 0..200 {
            let mut person = Person::new(PersonId(i));
            assert!(person.infect(&disease, &mut rng));
            assert_eq!(person.health_status(), HealthStatus::Infected);
            assert!((3..=5).contains(&person.recovery_duration()));
            assert!((2..=4).contains(&person.contagious_duration()));
            assert_eq!(person.days_infected(), 0);
            assert_eq!(person.days_contagious(), 0);
        }
    }

    #[test]
    fn infect_is_noop_unless_susceptible() {
        let disease = disease(0.0, (1, 1), (1, 1));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.vaccinate();
        assert!(!person.infect(&disease, &mut rng));
        assert_eq!(person.health_status(), HealthStatus::Vaccinated);

        let mut infected = Person::new(PersonId(1));
        infected.infect(&disease, &mut rng);
        infected.progress_day(&disease, &mut rng);
        let before = infected.clone();
        assert!(!infected.infect(&disease, &mut rng));
        assert_eq!(infected, before);
    }

    #[test]
    fn full_course_without_mortality_recovers() {
        let disease = disease(0.0, (2, 2), (3, 3));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.infect(&disease, &mut rng);

        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Infected);
        assert_eq!(person.days_infected(), 1);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Contagious);
        assert_eq!(person.days_contagious(), 0);

        person.progress_day(&disease, &mut rng);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Contagious);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Recovered);
        assert!(!person.is_contagious());
    }

    #[test]
    fn zero_durations_transition_on_the_next_call() {
        let disease = disease(0.0, (0, 0), (0, 0));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.infect(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Infected);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Contagious);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Recovered);
    }

    #[test]
    fn certain_mortality_kills_before_progression() {
        let disease = disease(1.0, (1, 1), (1, 1));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.infect(&disease, &mut rng);
        person.progress_day(&disease, &mut rng);
        assert_eq!(person.health_status(), HealthStatus::Dead);
        assert_eq!(person.days_infected(), 0);
    }

    #[test]
    fn dead_is_absorbing() {
        let disease = disease(1.0, (1, 1), (1, 1));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.infect(&disease, &mut rng);
        person.progress_day(&disease, &mut rng);
        let frozen = person.clone();

        for _ in 0..10 {
            person.progress_day(&disease, &mut rng);
        }
        assert!(!person.infect(&disease, &mut rng));
        assert!(!person.vaccinate());
        assert!(!person.apply(Transition::Advance));
        assert_eq!(person, frozen);
    }

    #[test]
    fn vaccinate_is_idempotent() {
        let mut person = Person::new(PersonId(0));
        assert!(person.vaccinate_with_efficacy(0.8));
        let once = person.clone();
        assert!(!person.vaccinate_with_efficacy(0.1));
        assert_eq!(person, once);
        assert_eq!(person.health_status(), HealthStatus::Vaccinated);
        assert!(person.is_vaccinated());
        assert!((person.vaccine_efficacy() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn vaccinating_infected_person_keeps_status() {
        let disease = disease(0.0, (3, 3), (3, 3));
        let mut rng = rng();
        let mut person = Person::new(PersonId(0));
        person.infect(&disease, &mut rng);
        assert!(person.vaccinate());
        assert!(person.is_vaccinated());
        assert_eq!(person.health_status(), HealthStatus::Infected);
    }

    #[test]
    fn efficacy_is_clamped() {
        let mut person = Person::new(PersonId(0));
        person.vaccinate_with_efficacy(3.0);
        assert!((person.vaccine_efficacy() - 1.0).abs() < f64::EPSILON);

        let mut other = Person::new(PersonId(1));
        other.vaccinate_with_efficacy(f64::NAN);
        assert!(other.vaccine_efficacy().abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_noop_for_non_infected_states() {
        let disease = disease(1.0, (1, 1), (1, 1));
        let mut rng = rng();
        let mut susceptible = Person::new(PersonId(0));
        susceptible.progress_day(&disease, &mut rng);
        assert_eq!(susceptible.health_status(), HealthStatus::Susceptible);

        let mut vaccinated = Person::new(PersonId(1));
        vaccinated.vaccinate();
        vaccinated.progress_day(&disease, &mut rng);
        assert_eq!(vaccinated.health_status(), HealthStatus::Vaccinated);
    }

    #[test]
    fn status_predicates() {
        assert!(HealthStatus::Infected.is_contagious());
        assert!(HealthStatus::Contagious.is_contagious());
        assert!(!HealthStatus::Recovered.is_contagious());
        assert!(!HealthStatus::Dead.is_alive());
        assert_eq!(HealthStatus::Contagious.to_string(), "CONTAGIOUS");
    }
}
