use epigrid::runner::run_with_args;

fn main() {
    match run_with_args() {
        Ok(simulation) => println!("{}", simulation.statistics().summary()),
        Err(error) => {
            eprintln!("epigrid: {error}");
            std::process::exit(1);
        }
    }
}
