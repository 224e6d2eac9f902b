mod backend;
mod catalog;
mod commit;
mod config;
mod console;
mod error;
mod flow;
mod model;
mod session;
#[cfg(test)]
mod testing;

use crate::backend::{bcdedit::Bcdedit, bitlocker::ManageBde, restart::CommandRestarter};
use crate::commit::{Collaborators, RestartOutcome, Suspension};
use crate::config::load_config;
use crate::console::Terminal;
use crate::error::FatalError;
use crate::flow::{Options, Outcome};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Boot another installed OS on the next restart only", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the bootable entries and exit
    #[arg(short, long)]
    list: bool,

    /// With --list, print the entries as JSON
    #[arg(long, requires = "list")]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // 2. Platform backends
    let store = Bcdedit::new(config.backend.bcdedit.clone());
    let encryption = ManageBde::new(config.backend.manage_bde.clone());
    let restarter = CommandRestarter::new(config.backend.restart.clone());
    let backends = Collaborators {
        store: &store,
        encryption: &encryption,
        restarter: &restarter,
    };
    let options = Options {
        list: args.list,
        json: args.json,
    };

    // 3. Catalog -> selection -> commit
    match flow::run(options, &config, &backends, &mut Terminal) {
        Ok(outcome) => {
            report(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_fatal(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(outcome: &Outcome) {
    let Outcome::Committed(result) = outcome else {
        return;
    };
    if result.restart == RestartOutcome::Declined {
        println!("Done. The selected system starts on the next restart.");
        if let Suspension::Failed(reason) = &result.suspension {
            println!("Note: encryption was not suspended ({}); you may be asked for the recovery key.", reason);
        }
    }
}

fn print_fatal(e: &FatalError) {
    eprintln!("\nError: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    if let Some(output) = e.backend_output() {
        let output = output.trim();
        if !output.is_empty() {
            eprintln!("\n{}", output);
        }
    }
    eprintln!("\nLikely causes:");
    for remedy in e.remedies() {
        eprintln!("  - {}", remedy);
    }
}
