use std::{process, sync::Arc};

use clap::{App, Arg, SubCommand};
use couloir::{
    config, run_pair, workload, BoundedBuffer, CouloirError, Exclusion, LockExclusion, Result,
    SemaphoreExclusion,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("couloir: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = App::new("couloir")
        .version(couloir::VERSION)
        .about("Bounded buffer producer/consumer runner")
        .subcommand(
            SubCommand::with_name("run")
                .about("Run one producer and one consumer over a shared buffer")
                .arg(
                    Arg::with_name("capacity")
                        .short("c")
                        .long("capacity")
                        .value_name("SLOTS")
                        .help("Buffer capacity in slots")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("items")
                        .short("n")
                        .long("items")
                        .value_name("COUNT")
                        .help("Number of items to produce and consume")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("exclusion")
                        .short("x")
                        .long("exclusion")
                        .value_name("BACKEND")
                        .help("Mutual-exclusion backend: mutex or semaphore")
                        .possible_values(&["mutex", "semaphore"])
                        .default_value("mutex")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("run", Some(run_matches)) => {
            let capacity = parse_arg(run_matches.value_of("capacity"), "capacity", config::DEFAULT_CAPACITY)?;
            let items = parse_arg(run_matches.value_of("items"), "items", config::DEFAULT_ITEMS)?;

            let report = match run_matches.value_of("exclusion") {
                Some("semaphore") => {
                    run_with_backend::<SemaphoreExclusion>(capacity, items)?
                }
                _ => run_with_backend::<LockExclusion>(capacity, items)?,
            };

            println!(
                "Completed: produced {} items, consumed {} items (capacity {})",
                report.produced, report.consumed, capacity
            );
            Ok(())
        }
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn parse_arg(value: Option<&str>, name: &str, default: usize) -> Result<usize> {
    match value {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| CouloirError::invalid_parameter(name, "expected a positive integer")),
        None => Ok(default),
    }
}

fn run_with_backend<X>(capacity: usize, items: usize) -> Result<couloir::PairReport>
where
    X: Exclusion + Default + 'static,
{
    let buffer = Arc::new(BoundedBuffer::with_exclusion(capacity, X::default())?);
    run_pair(buffer, items, workload::factorial)
}
