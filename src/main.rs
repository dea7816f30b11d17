use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::env;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use route_solver::input_parsers;
use route_solver::logging::init_logger;
use route_solver::query::{Usage, UserQuery};
use route_solver::random_tsp::RandomTSPGenerator;
use route_solver::{Points, Result, RouteSolver, SolverOptions};

fn parse_file(filename: &str) -> Result<Points> {
    let mut file = File::open(filename)?;
    let mut data = String::new();
    file.read_to_string(&mut data)?;
    Ok(serde_json::from_str(&data)?)
}

fn load_options(query: &UserQuery) -> Result<SolverOptions> {
    let mut options = match &query.config {
        Some(path) => SolverOptions::from_file(Path::new(path))?,
        None => SolverOptions::default(),
    };
    if let Some(attempts) = query.attempts {
        options.attempts = attempts;
    }
    if query.seed.is_some() {
        options.seed = query.seed;
    }
    if query.sequential {
        options.parallel = false;
    }
    Ok(options)
}

fn generate(query: &UserQuery) -> Result<()> {
    let generator = RandomTSPGenerator::new(800.0, 600.0);
    let points = generator.generate(query.points, &mut StdRng::from_entropy());
    RandomTSPGenerator::write_to_file(&points, Path::new(&query.filename))
}

fn solve(query: &UserQuery, options: &SolverOptions) -> Result<()> {
    let points = parse_file(&query.filename)?;

    let start = Instant::now();
    let mut solver = RouteSolver::new(points.points)?.with_options(options);
    info!("Distances are mapped: {:?}", start.elapsed());

    let solution = solver.solve_with(options);
    info!(
        "Solution is found: length {:.2} over {} points in {:?}",
        solution.distance,
        solution.len(),
        start.elapsed()
    );

    let output = format!("{}.solution.json", query.filename.trim_end_matches(".json"));
    let mut file = File::create(&output)?;
    file.write_all(serde_json::to_string_pretty(&solution)?.as_bytes())?;
    info!("wrote {output}");
    Ok(())
}

fn run(query: &UserQuery) -> Result<()> {
    let options = load_options(query)?;
    init_logger(options.level_filter()?)?;

    match query.usage {
        Usage::Generate => generate(query),
        Usage::Solve => solve(query, &options),
        Usage::Help => {
            input_parsers::print_help();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let query = match input_parsers::parse_args(&args) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{e}");
            input_parsers::print_help();
            return ExitCode::FAILURE;
        }
    };

    match run(&query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
