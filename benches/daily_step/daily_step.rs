use criterion::{criterion_group, criterion_main, Criterion};
use epigrid::config::SimulationConfig;
use epigrid::disease::{DiseaseModel, DiseasePreset};
use epigrid::simulation::Simulation;

static POPULATION: usize = 2500;
static SEED: u64 = 123;
static MAX_DAYS: u32 = 100;

fn covid_run() -> Simulation {
    let config = SimulationConfig {
        population_size: POPULATION,
        max_days: MAX_DAYS,
        vaccination_enabled: true,
        vaccination_start_day: 10,
        daily_vaccination_min_fraction: 0.01,
        daily_vaccination_max_fraction: 0.03,
        ..SimulationConfig::default()
    }
    .with_disease(&DiseaseModel::from_preset(&DiseasePreset::covid_19()));

    let mut simulation = Simulation::new(config, SEED);
    simulation.seed_infection(POPULATION / 2);
    simulation.run();
    simulation
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("covid-19 run", |bencher| {
        bencher.iter_with_large_drop(covid_run)
    });
}

criterion_group!(daily_step_benches, criterion_benchmark);
criterion_main!(daily_step_benches);
