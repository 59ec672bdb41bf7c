//! The ordered population and the implicit grid it is laid out on.
//!
//! Person `i` sits at `row = i / columns`, `col = i % columns`, where
//! `columns = ceil(sqrt(len))` and `rows = ceil(len / columns)`. The last row may be partial.
use log::trace;

use crate::define_rng;
use crate::disease::DiseaseModel;
use crate::person::{HealthStatus, Person, PersonId};
use crate::random::RandomStreams;

define_rng!(ProgressionRng);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// Sole owner of the person sequence. Components borrow it for the duration of one operation.
#[derive(Clone, Debug)]
pub struct Population {
    people: Vec<Person>,
    columns: usize,
    rows: usize,
}

impl Population {
    /// Creates `size` fresh, SUSCEPTIBLE persons with ids `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        trace!("creating population of {size}");
        let people = (0..size).map(|i| Person::new(PersonId(i))).collect();
        let columns = ceil_sqrt(size);
        let rows = if columns == 0 {
            0
        } else {
            size.div_ceil(columns)
        };
        Population {
            people,
            columns,
            rows,
        }
    }

    /// Discards every person and rebuilds the population at `size`.
    pub fn resize(&mut self, size: usize) {
        *self = Population::new(size);
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get(&self, index: usize) -> Option<&Person> {
        self.people.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Person> {
        self.people.get_mut(index)
    }

    /// The health status of every person, in order.
    pub fn statuses(&self) -> Vec<HealthStatus> {
        self.people.iter().map(Person::health_status).collect()
    }

    pub fn count(&self, status: HealthStatus) -> usize {
        self.people
            .iter()
            .filter(|person| person.health_status() == status)
            .count()
    }

    pub fn position(&self, index: usize) -> Option<GridPosition> {
        if index >= self.len() {
            return None;
        }
        Some(GridPosition {
            row: index / self.columns,
            col: index % self.columns,
        })
    }

    /// The linear index of a grid cell, or `None` if the cell is outside the grid or past the
    /// end of a partial last row.
    pub fn index_of(&self, position: GridPosition) -> Option<usize> {
        if position.row >= self.rows || position.col >= self.columns {
            return None;
        }
        let index = position.row * self.columns + position.col;
        (index < self.len()).then_some(index)
    }

    /// Indices of every cell within Chebyshev distance `radius` of `index`, excluding `index`
    /// itself, clipped to the grid and the population length.
    pub fn neighbors(&self, index: usize, radius: usize) -> impl Iterator<Item = usize> + '_ {
        let center = self.position(index);
        let radius = radius as isize;
        center.into_iter().flat_map(move |center| {
            (-radius..=radius).flat_map(move |dr| {
                (-radius..=radius).filter_map(move |dc| {
                    if dr == 0 && dc == 0 {
                        return None;
                    }
                    let row = center.row.checked_add_signed(dr)?;
                    let col = center.col.checked_add_signed(dc)?;
                    self.index_of(GridPosition { row, col })
                })
            })
        })
    }

    /// Runs one day of disease progression for every living person.
    pub fn progress_day(&mut self, disease: &DiseaseModel, random: &RandomStreams) {
        random.sample(ProgressionRng, |rng| {
            for person in self.people.iter_mut().filter(|person| person.is_alive()) {
                person.progress_day(disease, rng);
            }
        });
    }
}

fn ceil_sqrt(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut root = n.isqrt();
    if root * root < n {
        root += 1;
    }
    root
}
