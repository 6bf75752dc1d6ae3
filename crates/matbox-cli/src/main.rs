mod cli;
mod commands;

use std::process::ExitCode;

use log::LevelFilter;

use cli::{DumpParams, HashesParams, LayoutParams, LookupParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let output = match matches.subcommand() {
        Some(("dump", m)) => commands::dump::run(DumpParams::from_matches(m).into()),
        Some(("hashes", m)) => commands::hashes::run(HashesParams::from_matches(m).into()),
        Some(("lookup", m)) => commands::lookup::run(LookupParams::from_matches(m).into()),
        Some(("layout", m)) => commands::layout::run(LayoutParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}
