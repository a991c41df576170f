use anyhow::{Context, Result};
use clap::Parser;
use opgram::cli::{Cli, OutputFormat};
use opgram::config::NgramConfig;
use opgram::sequence::NgramTracer;
use opgram::{output, replay};
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the tracer config: file first, then CLI flags on top
///
/// `--order` replaces the file's order and policy together; `--policy`
/// overrides whatever policy is left.
fn resolve_config(args: &Cli) -> Result<NgramConfig> {
    let config = match &args.config {
        Some(path) => NgramConfig::from_file(path)?,
        None => NgramConfig::default(),
    };

    let config = match args.order {
        Some(order) => NgramConfig::new(order).context("Invalid value for --order")?,
        None => config,
    };

    Ok(match args.policy {
        Some(policy) => config.with_policy(policy),
        None => config,
    })
}

fn open_input(args: &Cli) -> Result<Box<dyn BufRead>> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open struct-log {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = resolve_config(&args)?;
    let reader = open_input(&args)?;

    let mut tracer = NgramTracer::new(config);
    replay::replay(reader, &mut tracer)?;

    match args.format {
        OutputFormat::Json => println!("{}", output::to_json(tracer.on_result())?),
        OutputFormat::Text => print!("{}", output::to_text(tracer.on_result(), config, args.top)),
    }

    Ok(())
}
