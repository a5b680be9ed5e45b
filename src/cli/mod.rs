//! Command-line interface module

use std::io::{self, BufRead, Read, Write};
use std::time::Duration;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::conversion::{ConversionConfig, ConversionMetadata};
use crate::error::{ConfigError, ConversionError};
use crate::shell::{Frame, IntroAnimation, Session, INPUT_LABEL, OUTPUT_LABEL};

/// Main CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "htmljson")]
#[command(about = "Convert pasted text or HTML into a JSON document")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Text or HTML to convert (reads standard input when omitted)
    #[arg()]
    pub input: Option<String>,

    /// Read input from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Spaces per indentation level (0-8, default: 2)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Render single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Escape non-ASCII characters as \uXXXX
    #[arg(long)]
    pub ascii: bool,

    /// Print conversion statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Line-mode session: :generate converts, :clear clears, :quit exits
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip the intro banner in interactive mode
    #[arg(long)]
    pub no_intro: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> Result<ConversionConfig, ConfigError> {
        let config = ConversionConfig {
            indent_size: args.indent.unwrap_or(2),
            pretty: !args.compact,
            ensure_ascii: args.ascii,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats && !self.args.quiet
    }

    pub fn reads_stdin(&self) -> bool {
        self.args.stdin || self.args.input.is_none()
    }

    /// Get input source description
    pub fn input_description(&self) -> &'static str {
        if self.reads_stdin() {
            "standard input"
        } else {
            "command-line argument"
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "htmljson=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read all of standard input
pub fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Type the intro banner out, then return once the handoff time is reached
pub fn play_intro<W: Write>(
    intro: &IntroAnimation,
    out: &mut W,
    styled: bool,
    mut sleep: impl FnMut(Duration),
) -> io::Result<()> {
    let step = if intro.tick().is_zero() {
        intro.handoff()
    } else {
        intro.tick()
    };

    let mut elapsed = Duration::ZERO;
    let mut shown = 0;
    while let Frame::Intro(visible) = intro.frame_at(elapsed) {
        if visible.len() > shown {
            let fresh = &visible[shown..];
            if styled {
                write!(out, "{}", style(fresh).green().bold())?;
            } else {
                write!(out, "{}", fresh)?;
            }
            out.flush()?;
            shown = visible.len();
        }
        if step.is_zero() {
            break;
        }
        sleep(step);
        elapsed += step;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Drive a [`Session`] from line input.
///
/// Every other line, blank ones included, is appended to the input region.
/// `:generate` converts it, `:clear` empties both regions, `:quit` or end of
/// input exits. Pending input is generated before exiting at end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    styled: bool,
) -> io::Result<()> {
    writeln!(out, "{}", INPUT_LABEL)?;
    write_status(session, out, styled)?;

    let mut pending = false;
    for line in input.lines() {
        let line = line?;
        match line.trim_end_matches('\r') {
            ":quit" => return Ok(()),
            ":clear" => {
                session.clear();
                pending = false;
                write_status(session, out, styled)?;
            }
            ":generate" => {
                generate_and_render(session, out, styled)?;
                pending = false;
            }
            text => {
                session.push_input(text);
                pending = true;
            }
        }
    }

    if pending {
        generate_and_render(session, out, styled)?;
    }
    Ok(())
}

fn generate_and_render<W: Write>(session: &mut Session, out: &mut W, styled: bool) -> io::Result<()> {
    match session.generate() {
        Ok(()) => {
            writeln!(out, "{}", OUTPUT_LABEL)?;
            writeln!(out, "{}", session.output())?;
        }
        Err(notification) => CliUtils::show_notification(out, &notification.to_string(), styled)?,
    }
    write_status(session, out, styled)
}

fn write_status<W: Write>(session: &Session, out: &mut W, styled: bool) -> io::Result<()> {
    let status = session.status().to_string();
    if styled {
        writeln!(out, "{}", style(status).green())
    } else {
        writeln!(out, "{}", status)
    }
}

/// Write conversion statistics
pub fn output_statistics<W: Write>(metadata: &ConversionMetadata, out: &mut W) -> io::Result<()> {
    writeln!(out, "Conversion Statistics:")?;
    writeln!(out, "Detected input: {}", metadata.kind)?;
    writeln!(out, "Input length: {} characters", metadata.input_chars)?;
    writeln!(out, "Elements: {}", metadata.element_count)?;
    writeln!(
        out,
        "Output size: {}",
        CliUtils::format_file_size(metadata.output_size)
    )?;
    writeln!(
        out,
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(metadata.processing_time_ms))
    )
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a byte count in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    fn show_notification<W: Write>(out: &mut W, message: &str, styled: bool) -> io::Result<()> {
        if styled {
            writeln!(out, "{} {}", style("✗").red().bold(), message)
        } else {
            writeln!(out, "✗ {}", message)
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        console::Term::stdout().is_term()
            && console::colors_enabled()
            && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Handle conversion errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    if matches!(error, ConversionError::EmptyInput) {
        eprintln!("\nTip: pass the text as an argument, or pipe it in with --stdin");
    }

    eprintln!("\nTry 'htmljson --help' for usage information.");
}
