//! Sheetmind - spreadsheet formula engine, command mode

mod cli;
mod error;
mod logging;

use anyhow::{Context, Result};
use log::debug;
use std::env;

use sheetmind_core::{Document, Settings};
use sheetmind_engine::engine::{RANGE_BUILTINS, parse_range, render};

fn main() {
    let options = match cli::parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        cli::print_usage();
        return;
    }

    if let Err(e) = run(&options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: &cli::Options) -> Result<()> {
    let settings = match &options.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("cannot load settings from {}", path.display()))?,
        None if options.no_config => Settings::default(),
        None => Settings::load_default().context("cannot load default settings")?,
    };
    logging::init(logging::level_for(options.verbosity, settings.level_filter()));
    debug!("Settings: {:?}", settings);

    if options.list_functions {
        for builtin in RANGE_BUILTINS {
            println!("{}\t{}", builtin.sheet_name, builtin.description);
        }
    }

    let mut doc = Document::with_settings(settings);
    for (address, content) in &options.cells {
        doc.set_cell_a1(address, content)
            .with_context(|| format!("cannot set {}", address))?;
    }

    if let Some(formula) = &options.command {
        println!("{}", render(formula, &doc.snapshot()));
    }

    if let Some(range) = &options.render {
        let range = parse_range(range).with_context(|| format!("invalid range {}", range))?;
        let rows = doc
            .render(&range)
            .with_context(|| format!("cannot render {}", range))?;
        for row in rows {
            println!("{}", row.join("\t"));
        }
    }

    Ok(())
}
