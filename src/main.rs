use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use spec_console::{replay, ConsoleReporter, EventDispatcher, ReporterConfig};

#[derive(Parser)]
#[command(name = "spec-console")]
#[command(version)]
#[command(about = "Render test run events as console progress and results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a recorded run (newline-delimited JSON events)
    Replay {
        /// Path to the event stream, or `-` for stdin
        path: Option<PathBuf>,

        /// Disable ANSI colors
        #[arg(long, default_value = "false")]
        no_color: bool,

        /// Compact, mostly single-line output
        #[arg(long, default_value = "false", conflicts_with = "verbose")]
        succinct: bool,

        /// Announce every spec before it runs and show captured output
        #[arg(short, long, default_value = "false")]
        verbose: bool,

        /// Print full blocks for pending specs
        #[arg(long, default_value = "false")]
        noisy_pendings: bool,

        /// Passing specs slower than this many seconds are reported as slow
        #[arg(long, default_value = "5.0")]
        slow_spec_threshold: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            path,
            no_color,
            succinct,
            verbose,
            noisy_pendings,
            slow_spec_threshold,
        } => {
            let slow_spec_threshold = Duration::try_from_secs_f64(slow_spec_threshold)
                .context("Invalid slow spec threshold")?;
            let config = ReporterConfig {
                color: !no_color,
                succinct,
                verbose,
                noisy_pendings,
                slow_spec_threshold,
            };
            log::debug!("replay config: {:?}", config);

            let reporter = ConsoleReporter::stdout(config.color);
            let mut dispatcher = EventDispatcher::new(reporter, config);

            let outcome = match path.filter(|p| p.as_os_str() != "-") {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    replay(BufReader::new(file), &mut dispatcher)
                }
                None => replay(io::stdin().lock(), &mut dispatcher),
            }
            .context("Failed to replay test run")?;

            if outcome == Some(false) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
