use epigrid::report::{write_statistics_csv, ReportOptions};
use epigrid::{Simulation, SimulationConfig};
use tempfile::tempdir;

fn outbreak() -> SimulationConfig {
    SimulationConfig {
        population_size: 225,
        infection_rate: 0.3,
        mortality_rate: 0.02,
        vaccination_enabled: true,
        vaccination_start_day: 4,
        daily_vaccination_min_fraction: 0.05,
        daily_vaccination_max_fraction: 0.15,
        max_days: 40,
        ..SimulationConfig::default()
    }
}

fn seeded_run(simulation: &mut Simulation) {
    simulation.seed_infection(112);
    simulation.seed_infection(3);
    simulation.run();
}

#[test]
fn same_seed_same_history() {
    let mut first = Simulation::new(outbreak(), 99);
    let mut second = Simulation::new(outbreak(), 99);
    seeded_run(&mut first);
    seeded_run(&mut second);
    assert_eq!(first.statistics(), second.statistics());
    assert_eq!(first.population().statuses(), second.population().statuses());
}

#[test]
fn reseeding_matches_a_fresh_simulation() {
    let mut fresh = Simulation::new(outbreak(), 99);
    let mut reseeded = Simulation::new(outbreak(), 1);
    reseeded.init_random(99);
    assert_eq!(reseeded.base_seed(), 99);

    seeded_run(&mut fresh);
    seeded_run(&mut reseeded);
    assert_eq!(fresh.statistics(), reseeded.statistics());
}

#[test]
fn reapplying_the_config_replays_the_run() {
    let mut simulation = Simulation::new(outbreak(), 17);
    seeded_run(&mut simulation);
    let history = simulation.statistics().clone();

    simulation.apply_config(outbreak());
    assert!(simulation.statistics().is_empty());
    seeded_run(&mut simulation);
    assert_eq!(simulation.statistics(), &history);
}

#[test]
fn different_seeds_diverge() {
    let histories: Vec<_> = (0..5)
        .map(|seed| {
            let mut simulation = Simulation::new(outbreak(), seed);
            seeded_run(&mut simulation);
            simulation.statistics().clone()
        })
        .collect();
    assert!(histories.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn report_matches_recorded_history() {
    let mut simulation = Simulation::new(outbreak(), 5);
    seeded_run(&mut simulation);

    let temp_dir = tempdir().unwrap();
    let mut options = ReportOptions::new();
    options.directory(temp_dir.path().to_path_buf());
    let path = write_statistics_csv(simulation.statistics(), &options, "statistics").unwrap();

    let mut reader = csv::Reader::from_path(path).unwrap();
    let rows: Vec<Vec<usize>> = reader
        .records()
        .map(|record| {
            record
                .unwrap()
                .iter()
                .map(|field| field.parse().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(rows.len(), 40);
    for (day, (row, counts)) in rows.iter().zip(simulation.statistics().iter()).enumerate() {
        assert_eq!(
            row,
            &vec![
                day + 1,
                counts.susceptible,
                counts.infected,
                counts.contagious,
                counts.safe,
                counts.dead
            ]
        );
    }
}
