use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};

use parking_registry::{Config, Session, USAGE, VERSION};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Config::from_args(env::args().skip(1))?;
    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    info!("Starting parking-registry v{}", VERSION);

    let mut session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open command file: {:?}", path))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut out)?;
        }
    }

    info!(
        "Session finished: {} commands, {} spots",
        session.processed(),
        session.registry().len()
    );

    if config.dump_snapshot {
        eprintln!("{}", session.registry().snapshot_json()?);
    }

    Ok(())
}
