use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use htmljson::cli::{self, Args, CliConfig, CliUtils};
use htmljson::conversion::ConversionEngine;
use htmljson::error::ConversionError;
use htmljson::shell::{IntroAnimation, Session};

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<ConversionError>() {
            Some(conversion_error) => {
                cli::handle_error(conversion_error);
                ExitCode::from(conversion_error.exit_code())
            }
            None => {
                CliUtils::show_error(&format!("{:#}", error));
                ExitCode::FAILURE
            }
        },
    }
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_args(args)?;

    if config.args.interactive {
        run_interactive(&config)
    } else {
        run_once(&config)
    }
}

fn run_once(config: &CliConfig) -> Result<()> {
    let raw = match &config.args.input {
        Some(input) if !config.args.stdin => input.clone(),
        _ => cli::read_stdin().context("failed to read standard input")?,
    };
    debug!(source = config.input_description(), bytes = raw.len(), "read input");

    let engine = ConversionEngine::new(config.conversion_config.clone());
    let output = engine.generate(&raw)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.json)?;
    stdout.flush()?;

    if config.want_stats() {
        cli::output_statistics(&output.metadata, &mut io::stderr().lock())?;
    }
    Ok(())
}

fn run_interactive(config: &CliConfig) -> Result<()> {
    let styled = CliUtils::should_use_color();
    let mut stdout = io::stdout().lock();

    if !config.args.no_intro && !config.is_quiet() {
        cli::play_intro(&IntroAnimation::default(), &mut stdout, styled, std::thread::sleep)?;
    }
    info!("interactive session started");

    let mut session = Session::new(config.conversion_config.clone());
    cli::run_interactive(&mut session, io::stdin().lock(), &mut stdout, styled)?;
    Ok(())
}
