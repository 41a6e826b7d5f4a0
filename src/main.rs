use std::env;
use std::fmt::Display;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};

use sokoban_planner::config::{Budget, HeuristicKind, Method, SolverConfig};
use sokoban_planner::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-planner")
        .author("martin-t")
        .version("0.1")
        .about("Push-optimal sokoban solver")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .default_value("a-star")
                .help("a-star, weighted-a-star, ida-star, rbfs or hill-climbing"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .help("greedy or assignment (default depends on the method)"),
        )
        .arg(
            Arg::with_name("weight")
                .short("w")
                .long("weight")
                .takes_value(true)
                .help("heuristic weight, at least 1 (ignored by a-star)"),
        )
        .arg(
            Arg::with_name("sideways")
                .long("sideways")
                .takes_value(true)
                .help("consecutive moves without improvement allowed in hill climbing"),
        )
        .arg(
            Arg::with_name("max-steps")
                .long("max-steps")
                .takes_value(true)
                .help("maximum pushes of hill climbing"),
        )
        .arg(
            Arg::with_name("max-expansions")
                .long("max-expansions")
                .takes_value(true)
                .help("give up after expanding this many states"),
        )
        .arg(
            Arg::with_name("time-limit")
                .long("time-limit")
                .takes_value(true)
                .help("give up after this many milliseconds"),
        )
        .arg(
            Arg::with_name("level")
                .short("l")
                .long("level")
                .takes_value(true)
                .help("which level of a collection to solve, starting at 1"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the state after every step instead of every push"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let config = parse_config(&matches);
    let path = matches.value_of("file").unwrap();

    let levels = path.load_levels().unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!(
            "Can't load file {} in {}: {}",
            path,
            current_dir.display(),
            err
        );
        process::exit(1);
    });
    let index = parse_arg::<usize>(&matches, "level").unwrap_or(1);
    if index == 0 || index > levels.len() {
        println!(
            "Level {} doesn't exist, {} contains {} level(s)",
            index,
            path,
            levels.len()
        );
        process::exit(1);
    }
    let level = &levels[index - 1];

    if levels.len() > 1 {
        println!("Solving level {} of {} using {}...", index, path, config.method);
    } else {
        println!("Solving {} using {}...", path, config.method);
    }
    let outcome = level.solve(&config).unwrap_or_else(|err| {
        println!("Can't solve level: {}", err);
        process::exit(1);
    });

    println!("Status: {}", outcome.status());
    print!("{}", outcome);
    if let Some(moves) = outcome.moves() {
        println!();
        print!("{}", level.xsb_solution(moves, matches.is_present("steps")));
        println!("{}", moves);
        println!("Moves: {}", moves.move_cnt());
        println!("Pushes: {}", moves.push_cnt());
    }
}

fn parse_config(matches: &ArgMatches<'_>) -> SolverConfig {
    let method: Method = parse_arg(matches, "method").unwrap_or(Method::AStar);
    let mut config = SolverConfig::new(method);
    if let Some(heuristic) = parse_arg::<HeuristicKind>(matches, "heuristic") {
        config = config.with_heuristic(heuristic);
    }
    if let Some(weight) = parse_arg(matches, "weight") {
        config = config.with_weight(weight);
    }
    if let Some(sideways) = parse_arg(matches, "sideways") {
        config = config.with_sideways_limit(sideways);
    }
    if let Some(max_steps) = parse_arg(matches, "max-steps") {
        config = config.with_max_steps(max_steps);
    }

    let budget = Budget {
        max_expansions: parse_arg(matches, "max-expansions"),
        time_limit: parse_arg(matches, "time-limit").map(Duration::from_millis),
    };
    config.with_budget(budget)
}

fn parse_arg<T>(matches: &ArgMatches<'_>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    matches.value_of(name).map(|value| {
        value.parse().unwrap_or_else(|err| {
            println!("Invalid value for --{}: {}", name, err);
            process::exit(1);
        })
    })
}
