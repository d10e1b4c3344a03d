//! Persisted sample stream and checkpoint restore.
//!
//! The stream is an append-only comma-separated text file: one `#`-prefixed
//! header of species formulas written only for a run starting at time zero,
//! then one row per emitted sample (densities of species `1..=NO_SPECIES`,
//! simulation time, step number, 6 significant digits). A restarted run
//! appends to the existing stream and seeds its state from the last
//! complete row.

use super::model::{GlobalModel, ModelError};
use crate::Chemistry::species::{NO_SPECIES, Species};
use log::{info, warn};
use nalgebra::DVector;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Lines at or below this length are headers or fragments, never samples.
pub const MIN_CHECKPOINT_LINE_LEN: usize = 50;

/// One emitted sample, as forwarded to an in-process monitor.
#[derive(Debug, Clone)]
pub struct SampleRow {
    /// Densities of species `1..=NO_SPECIES`, in index order.
    pub densities: DVector<f64>,
    pub simulation_time: f64,
    pub step_no: u64,
}

/// Append-only writer over the sample stream.
pub struct SampleWriter {
    file: BufWriter<File>,
}

impl SampleWriter {
    pub fn open_append(path: &Path) -> Result<Self, ModelError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    pub fn write_header(&mut self, species: &[Species]) -> Result<(), ModelError> {
        let mut columns: Vec<String> = (1..=NO_SPECIES)
            .map(|i| format!("#{}", species[i].formula))
            .collect();
        columns.push("Time(s)".to_string());
        columns.push("StepNo".to_string());
        writeln!(self.file, "{}", columns.join(","))?;
        self.file.flush()?;
        Ok(())
    }

    /// Write one sample row and flush, so a file-polling front end sees the
    /// row as soon as the step that produced it is complete.
    pub fn write_row(&mut self, row: &SampleRow) -> Result<(), ModelError> {
        let mut columns: Vec<String> = row.densities.iter().map(|&d| format_density(d)).collect();
        columns.push(format_density(row.simulation_time));
        columns.push(row.step_no.to_string());
        writeln!(self.file, "{}", columns.join(","))?;
        self.file.flush()?;
        Ok(())
    }
}

impl GlobalModel {
    /// Snapshot of the current densities for persistence/monitoring.
    pub fn sample_row(&self) -> SampleRow {
        SampleRow {
            densities: DVector::from_iterator(
                NO_SPECIES,
                self.species[1..=NO_SPECIES].iter().map(|s| s.density),
            ),
            simulation_time: self.simulation_time,
            step_no: self.step_count,
        }
    }

    /// Seed the model from the last complete row of a previous sample
    /// stream. Any problem (missing file, short file, non-numeric tokens)
    /// is non-fatal: the model keeps its built-in defaults and zero time.
    /// Returns whether a checkpoint was applied.
    pub fn read_species_density_data_file(&mut self, path: &Path) -> bool {
        if !path.exists() {
            warn!("problem opening <{}> file", path.display());
            info!("program will default to initial species density values");
            return false;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("problem reading <{}>: {}", path.display(), e);
                info!("program will default to initial species density values");
                return false;
            }
        };

        let mut data_line = "";
        for line in content.lines() {
            let line = line.trim();
            if line.len() > MIN_CHECKPOINT_LINE_LEN {
                data_line = line;
            }
        }
        if data_line.is_empty() {
            info!("no checkpoint row in <{}>, starting from defaults", path.display());
            return false;
        }

        let mut values: Vec<f64> = Vec::new();
        for token in data_line.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    info!("checkpoint row is not numeric, starting from defaults");
                    return false;
                }
            }
            if values.len() >= NO_SPECIES + 2 {
                break;
            }
        }
        if values.len() < NO_SPECIES + 2 {
            info!("checkpoint row too short, starting from defaults");
            return false;
        }

        info!("<{}> file read... {} values", path.display(), values.len());

        let mut density_of_species_m = 0.0;
        for i in 1..=NO_SPECIES {
            density_of_species_m += values[i - 1];
            self.species[i].set_density(values[i - 1]);
        }
        self.species[0].set_density(density_of_species_m);
        self.simulation_time = values[NO_SPECIES];
        self.last_saved_simulation_time = self.simulation_time;
        self.step_count = values[NO_SPECIES + 1] as u64;
        true
    }
}

/// `%g`-style formatting with 6 significant digits, matching the stream
/// format of the solver output.
pub fn format_density(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= 6 {
        let formatted = format!("{:.5e}", value);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        format!("{mantissa}e{exp}")
    } else {
        let decimals = (5 - exponent).max(0) as usize;
        let formatted = format!("{value:.decimals$}");
        if formatted.contains('.') {
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            formatted
        }
    }
}
