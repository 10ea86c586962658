// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// papercrop — command line front end.
//
// Entry point. Initialises logging, loads the pipeline configuration and runs
// one of the detect / crop / enhance / config commands on image files.

mod io;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use papercrop_core::ScanConfig;
use papercrop_core::error::Result;
use papercrop_document::DocumentScanner;

#[derive(Parser)]
#[command(name = "papercrop")]
#[command(about = "Detect a sheet of paper in a photo and produce a deskewed crop")]
struct Cli {
    /// JSON pipeline configuration (defaults are used for missing fields)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the detected paper corners as JSON
    Detect {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
    /// Detect the paper and write the rectified crop
    Crop {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
        /// Output image path
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,
        /// Apply the black-and-white document filter to the crop
        #[arg(long)]
        enhance: bool,
    },
    /// Apply the document filter to a whole image
    Enhance {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,
    },
    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "papercrop failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };

    match cli.command {
        Command::Detect { image } => {
            let scanner = DocumentScanner::new(config)?;
            let frame = io::load_image(&image)?;
            match scanner.detect(&frame)? {
                Some(corners) => {
                    println!("{}", serde_json::to_string_pretty(&corners)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    tracing::warn!("no paper found");
                    Ok(ExitCode::from(2))
                }
            }
        }
        Command::Crop {
            image,
            output,
            enhance,
        } => {
            let scanner = DocumentScanner::new(ScanConfig {
                enhance_output: config.enhance_output || enhance,
                ..config
            })?;
            let frame = io::load_image(&image)?;
            let Some(outcome) = scanner.scan(&frame)? else {
                tracing::warn!("no paper found");
                return Ok(ExitCode::from(2));
            };
            tracing::info!(
                top_left = %outcome.quad.top_left(),
                bottom_right = %outcome.quad.bottom_right(),
                "Paper cropped"
            );
            io::save_image(&outcome.image, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Enhance { image, output } => {
            let scanner = DocumentScanner::new(config)?;
            let source = io::load_image(&image)?;
            io::save_image(&scanner.enhance(&source)?, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { output } => {
            config.validate()?;
            match output {
                Some(path) => config.save(path)?,
                None => println!("{}", serde_json::to_string_pretty(&config)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
