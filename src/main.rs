use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::process::exit;
use anyhow::{Context, Result};
use log::{error, info};
use crate::archive::Archive;
use crate::initialization::init;
use crate::manager_bom::Bom;
use crate::predictor::Predictor;

mod archive;
mod config;
mod errors;
mod initialization;
mod manager_bom;
mod models;
mod predictor;
mod rounding;
mod similarity;
mod variation;
mod windows;

/// Name of the file predictions are written to within the output directory
const OUTPUT_FILE_NAME: &str = "output.txt";

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Downloads the observation history for the configured station, builds the
/// archive and runs the five day prediction over it
fn run() -> Result<()> {
    let (config, station) = init()?;

    // Print version
    println!("analogcast version: {}", env!("CARGO_PKG_VERSION"));
    info!("forecasting for {}", station.name);

    let bom = Bom::new(station);
    let history = bom.download_history()?;
    info!("loaded {} historical records", history.len());

    let mut archive = Archive::new();
    for observation in history {
        archive.add(observation);
    }
    info!("archive holds {} dates", archive.len());

    fs::create_dir_all(&config.files.output_dir)
        .with_context(|| format!("creating output directory {}", config.files.output_dir))?;
    let output_path = format!("{}/{}", config.files.output_dir, OUTPUT_FILE_NAME);
    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path))?;
    let mut out = BufWriter::new(file);
    info!("predicted output is written to {}", output_path);

    let mut predictor = Predictor::new(archive);
    predictor.predict_five_days(&mut out)?;

    Ok(())
}
