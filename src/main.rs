use anyhow::{Context, Result};
use clap::Parser;
use seo_manifest::{Manifest, validator};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

mod args;
use args::{Args, BuildArgs, Command, ValidateArgs, build_config};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let outcome = match args.command {
        Command::Build(build) => run_build(build).await,
        Command::Validate(validate) => run_validate(validate),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            ::log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_build(args: BuildArgs) -> Result<ExitCode> {
    let config = build_config(&args)?;
    let start_time = std::time::Instant::now();

    let writer = open_output(args.output.as_deref())?;
    let written = Manifest::with_config(config)
        .write_to(writer)
        .await
        .context("Failed to build manifest")?;

    ::log::info!(
        "Manifest complete - wrote {} records in {:.2} seconds",
        written,
        start_time.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let report = validator::validate_file(&args.manifest)
        .with_context(|| format!("Failed to validate {}", args.manifest.display()))?;

    let mut writer = open_output(args.output.as_deref())?;
    writeln!(writer, "{}", report.to_pretty_json()?)?;
    writer.flush()?;

    if args.strict && report.has_errors() {
        ::log::warn!(
            "Strict mode: {} issues are errors",
            report.error_count
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}
