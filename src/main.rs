/*
 *  main.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Fetch, lay out and push one frame, then exit. Meant to be run from a
 *  timer (cron/systemd); nothing persists between runs.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

mod canvas;
mod compose;
mod constants;
mod fetch;
mod panel;
mod render;
mod todos;

use std::fs::File;
use std::path::PathBuf;

use chrono::Local;
use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::{error, info};
use thiserror::Error;

use crate::constants::{GPIOCHIP_DEV, SPI_DEV};
use crate::fetch::FetchError;
use crate::panel::{Epd3in7, PanelError};

/// Stand-in quote for offline `--test` runs.
const SAMPLE_QUOTE: &str = "The secret of getting ahead is getting started.";

/// Everything that can abort one refresh run. Parse failures are not here:
/// a malformed to-do payload degrades to an empty list inside the pipeline.
#[derive(Debug, Error)]
enum RefreshError {
    #[error("network: {0}")]
    Network(#[from] FetchError),
    #[error("panel: {0}")]
    Panel(#[from] PanelError),
    #[error("could not write raster to {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}

struct RunOptions {
    test_mode: bool,
    out_path: Option<PathBuf>,
    spi_path: String,
    gpiochip_path: String,
}

/// One strict fetch -> parse -> render -> transfer pass.
async fn refresh(opts: &RunOptions) -> Result<(), RefreshError> {
    let today = Local::now().date_naive();

    let (body, quote) = if opts.test_mode {
        let sample = format!(
            r#"{{"{}": [{{"name": "wani kani", "doneDate": null}}]}}"#,
            today.format("%Y-%m-%d")
        );
        (sample, SAMPLE_QUOTE.to_string())
    } else {
        let client = fetch::build_client()?;
        let body = fetch::fetch_todos(&client).await?;
        let quote = fetch::fetch_quote(&client).await?;
        (body, quote)
    };

    let todos = todos::parse_todos(&body);
    if todos.is_empty() {
        info!("No to-dos to draw; frame will carry the quote only");
    }

    let frame = compose::compose(&todos, today, &quote);

    match &opts.out_path {
        Some(path) => {
            let display = path.display().to_string();
            let mut file = File::create(path).map_err(|source| RefreshError::Output {
                path: display.clone(),
                source,
            })?;
            frame
                .write_pbm(&mut file)
                .map_err(|source| RefreshError::Output { path: display.clone(), source })?;
            info!("Raster written to {}", display);
        }
        None => {
            let mut epd = Epd3in7::open(&opts.spi_path, &opts.gpiochip_path)?;
            panel::show(&frame, &mut epd)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::new("debug")
            .action(ArgAction::SetTrue)
            .long("debug")
            .short('v')
            .alias("verbose")
            .help("Enable debug log level")
            .required(false))
        .arg(Arg::new("test")
            .action(ArgAction::SetTrue)
            .long("test")
            .help("Render a canned sample list instead of fetching")
            .required(false))
        .arg(Arg::new("out")
            .short('o')
            .long("out")
            .help("Write the frame to a PBM file instead of driving the panel")
            .required(false))
        .arg(Arg::new("spi")
            .long("spi")
            .default_value(SPI_DEV)
            .help("SPI device path for the panel")
            .required(false))
        .arg(Arg::new("gpiochip")
            .long("gpiochip")
            .default_value(GPIOCHIP_DEV)
            .help("GPIO character device for the panel control lines")
            .required(false))
        .get_matches();

    let debug_enabled = matches.get_flag("debug");
    env_logger::Builder::from_env(
        Env::default().default_filter_or(if debug_enabled { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let opts = RunOptions {
        test_mode: matches.get_flag("test"),
        out_path: matches.get_one::<String>("out").map(PathBuf::from),
        spi_path: matches
            .get_one::<String>("spi")
            .map(String::clone)
            .unwrap_or_else(|| SPI_DEV.to_string()),
        gpiochip_path: matches
            .get_one::<String>("gpiochip")
            .map(String::clone)
            .unwrap_or_else(|| GPIOCHIP_DEV.to_string()),
    };

    // The run either completed or it didn't; either way the process exits
    // normally and the next timer tick starts from scratch.
    match refresh(&opts).await {
        Ok(()) => info!("Display refreshed"),
        Err(RefreshError::Network(e)) => {
            error!("Fetch failed, panel left untouched: {}", e)
        }
        Err(RefreshError::Panel(e)) => error!("Panel refresh failed: {}", e),
        Err(RefreshError::Output { path, source }) => {
            error!("Could not write {}: {}", path, source)
        }
    }
}
