use crate::error::{Error, Result};
use crate::query::{Usage, UserQuery};

fn print_generate_options() {
    println!("Options for 'generate':");
    print!("<number>             ");
    println!("Number of points to generate, the first one is the depot");
    print!("[file]               ");
    println!("Output .json file (default points.json)");
    print!("                     ");
    println!("Example: ./route_solver generate 10 points10.json");
    println!();
}

fn print_solve_options() {
    println!("Options for 'solve':");
    print!("<file>               ");
    println!("Path to the .json file containing the points to solve");
    print!("[attempts]           ");
    println!("Number of multi-start attempts (default 10)");
    print!("--seed <n>           ");
    println!("Seed the shuffle source for a reproducible run");
    print!("--config <file>      ");
    println!("Load solver options from a .json file");
    print!("--sequential         ");
    println!("Run attempts on one thread");
    print!("                     ");
    println!("Example: ./route_solver solve points10.json 20 --seed 7");
    println!();
}

fn print_usage() {
    println!("Usage: ./route_solver <command> [options]");
    println!();
    println!("Commands:");
    print!("generate             ");
    println!("Generate a random point set");
    print!("solve                ");
    println!("Find a short closed tour from the depot");
    println!();
}

fn print_general_options() {
    println!("General Options:");
    print!("-h, --help, h, help  ");
    println!("Show this help message and exit.");
}

pub fn print_help() {
    print_usage();
    print_generate_options();
    print_solve_options();
    print_general_options();
}

pub fn get_usage(args: &[String]) -> Result<Usage> {
    let Some(command) = args.get(1) else {
        return Ok(Usage::Help);
    };
    match command.to_lowercase().as_str() {
        "generate" | "generate_problem" => Ok(Usage::Generate),
        "solve" | "solve_local" => Ok(Usage::Solve),
        "-h" | "--help" | "h" | "help" => Ok(Usage::Help),
        other => Err(Error::invalid_input(format!("unknown command '{other}'"))),
    }
}

fn with_json_extension(file_name: &str) -> String {
    if file_name.ends_with(".json") {
        file_name.to_string()
    } else {
        format!("{file_name}.json")
    }
}

pub fn parse_generate(query: &mut UserQuery, args: &[String]) -> Result<()> {
    let count = args
        .get(2)
        .ok_or_else(|| Error::invalid_input("generate needs a point count"))?;
    match count.trim().parse::<u32>() {
        Ok(num) if num > 0 && num < query.max_points => query.points = num,
        _ => {
            return Err(Error::invalid_input(format!(
                "point count must be between 1 and {}",
                query.max_points - 1
            )))
        }
    }
    if let Some(file_name) = args.get(3) {
        query.filename = with_json_extension(file_name);
    }
    Ok(())
}

fn parse_flag_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    value
        .and_then(|v| v.parse::<T>().ok())
        .ok_or_else(|| Error::invalid_input(format!("{flag} needs a numeric value")))
}

pub fn parse_solve(query: &mut UserQuery, args: &[String]) -> Result<()> {
    let file_name = args
        .get(2)
        .ok_or_else(|| Error::invalid_input("solve needs a points file"))?;
    query.filename = with_json_extension(file_name);

    let mut rest = args.iter().skip(3);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--seed" => query.seed = Some(parse_flag_value("--seed", rest.next())?),
            "--config" => {
                let path = rest
                    .next()
                    .ok_or_else(|| Error::invalid_input("--config needs a file"))?;
                query.config = Some(path.clone());
            }
            "--sequential" => query.sequential = true,
            attempts => match attempts.parse::<usize>() {
                Ok(n) if n > 0 => query.attempts = Some(n),
                _ => return Err(Error::invalid_input(format!("unexpected argument '{attempts}'"))),
            },
        }
    }
    Ok(())
}

pub fn parse_args(args: &[String]) -> Result<UserQuery> {
    let mut query = UserQuery::new();
    query.usage = get_usage(args)?;
    match query.usage {
        Usage::Generate => parse_generate(&mut query, args)?,
        Usage::Solve => parse_solve(&mut query, args)?,
        Usage::Help => {}
    }
    Ok(query)
}
