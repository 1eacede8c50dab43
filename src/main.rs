//! `aircheck` - command-line entry point
//!
//! With a city argument runs one query cycle; without one reads a city per
//! line from stdin, reusing the same client and chart slot for the session.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use aircheck::{
    AirCheckConfig, AirQualityClient, AirQualitySource, HttpAirQualitySource, TerminalView, View,
    cities, logging,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Command-line arguments for aircheck
#[derive(Parser, Debug)]
#[command(name = "aircheck")]
#[command(about = "Air quality lookup for a city: pollutant bands, advice and a bar chart")]
#[command(version)]
struct Args {
    /// City to look up; omit to enter interactive mode
    city: Vec<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Air quality endpoint, overrides the configuration
    #[arg(long)]
    base_url: Option<String>,

    /// Print the known city names and exit
    #[arg(long)]
    list_cities: bool,

    /// Print known city names starting with PREFIX and exit
    #[arg(long, value_name = "PREFIX")]
    suggest: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.list_cities {
        print_cities(cities::KNOWN_CITIES);
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(prefix) = &args.suggest {
        print_cities(&cities::suggest(prefix));
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(path) = &args.config {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let mut config = AirCheckConfig::load_from_path(args.config.clone())
        .context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    logging::init(&config.logging, args.verbose)?;
    info!("Using air quality endpoint {}", config.api.base_url);
    debug!("Configuration: {:?}", config);

    let source = HttpAirQualitySource::new(&config.api)?;
    let client = AirQualityClient::new(source, TerminalView::new(io::stdout()))
        .with_chart_size(config.chart.width, config.chart.height);

    if args.city.is_empty() {
        interactive(&client).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = client.query(&args.city.join(" ")).await;
    Ok(if outcome.is_displayed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_cities(names: &[&str]) {
    for name in names {
        println!("{name}");
    }
}

async fn interactive<S: AirQualitySource, V: View>(client: &AirQualityClient<S, V>) -> Result<()> {
    println!("Cidades sugeridas: {}", cities::KNOWN_CITIES.join(", "));
    println!("Digite uma cidade (ou 'sair' para terminar).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            break;
        };
        if matches!(line.trim(), "sair" | "exit") {
            break;
        }

        client.query(&line).await;
        println!();
    }

    info!("Interactive session ended");
    Ok(())
}
