//! CLI entrypoint for solvent.

mod cli;
mod config;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use solvent::{Category, Outcome, Solver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ConfigLoader;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };
    debug!(?config, "configuration loaded");

    let solver = Solver::new(config);
    let category = Category::from(cli.problem_type);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(problem) = &cli.problem {
        let outcome = solver.solve_detailed(problem, category);
        return print(&mut out, &outcome, cli.json);
    }

    info!("reading problems from stdin");
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = solver.solve_detailed(&line, category);
        print(&mut out, &outcome, cli.json)?;
    }
    Ok(())
}

fn print(out: &mut impl Write, outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", outcome.text())?;
    }
    Ok(())
}
