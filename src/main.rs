//! vunit - Vim plugin unit test runner
//!
//! Runs each Vim test file in its own non-interactive editor process, reads
//! the result document the bundled runner script writes, and fails the build
//! when the process fails or, if asked to, when a test fails.
//!
//! ## Usage
//!
//! ```bash
//! # Run two test files from ./test, writing results to build/results
//! vunit run --todir build/results --basedir test plugin/foo.vim util.vim
//!
//! # Stop at the first failing file and record the failure in a property
//! vunit run --config vunit.yaml --halt-on-failure --failure-property tests.failed
//!
//! # Write an example configuration
//! vunit config init
//! ```

use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing::{debug, error, info, warn};

mod cli;
mod config;
mod executor;
mod models;
mod output;
mod resources;
mod results;
mod utils;
mod vim;

use cli::{Args, ConfigAction, RunArgs};
use config::{EnvConfig, RunConfig};
use executor::{BatchRunner, Properties};
use output::{OutputFormat, ReportFormatter};
use utils::logger::{init_logger, LogLevel};
use vim::VimRunner;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        args.log_level
            .as_deref()
            .or(env.log_level.as_deref())
            .and_then(LogLevel::from_str)
            .unwrap_or(LogLevel::Info)
    };
    init_logger(level);

    match args.command {
        cli::Command::Run(run_args) => {
            run_tests(run_args, &env).await?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args.action, &env)?;
        }
    }

    Ok(())
}

/// Resolve file, environment and command line configuration, in that order
fn resolve_config(args: &RunArgs, env: &EnvConfig) -> Result<RunConfig> {
    let path = args.config.as_deref().or(env.config_file.as_deref());
    let mut config = RunConfig::load_or_default(path)?;
    if env.has_any() {
        debug!("Applying VUNIT_* environment overrides");
    }
    env.apply_to(&mut config);
    args.apply_to(&mut config)?;
    Ok(config)
}

async fn run_tests(args: RunArgs, env: &EnvConfig) -> Result<()> {
    let format = args
        .report
        .as_deref()
        .map(|f| OutputFormat::from_str(f).ok_or_else(|| anyhow!("Unknown report format: {f}")))
        .transpose()?;

    let config = resolve_config(&args, env)?;
    let mut properties = Properties::from(config.properties.clone());

    let vim = VimRunner::default();
    let kill_switch = vim.kill_switch();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, terminating running test");
            kill_switch.kill();
        }
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let runner = BatchRunner::new(config, vim);
    let outcome = runner.run(&mut properties).await;

    if let Some(path) = &args.properties_out {
        properties.write_to(path)?;
        debug!("Wrote {} properties to {}", properties.len(), path.display());
    }

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            if e.is_configuration() {
                error!("Invalid configuration, no tests were run");
            }
            return Err(e.into());
        }
    };

    if report.failed {
        info!(
            "{} of {} test file(s) failed",
            report.failed_files().count(),
            report.files()
        );
    }

    if let Some(format) = format {
        let mut formatter = ReportFormatter::new(format);
        if !std::io::stdout().is_terminal() {
            formatter = formatter.no_color();
        }
        println!("{}", formatter.format_report(&report));
    }

    Ok(())
}

fn manage_config(action: ConfigAction, env: &EnvConfig) -> Result<()> {
    match action {
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                );
            }
            config::example().save(&path)?;
            println!("✓ Wrote example configuration to {}", path.display());
        }

        ConfigAction::Show { config } => {
            let path = config.as_deref().or(env.config_file.as_deref());
            let mut resolved = RunConfig::load_or_default(path)?;
            env.apply_to(&mut resolved);

            let rendered = if path.map(config::is_yaml_file).unwrap_or(true) {
                serde_yaml::to_string(&resolved)?
            } else {
                serde_json::to_string_pretty(&resolved)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}
