//! Loader for tabulated electron-impact rate coefficients.
//!
//! Reads the CSV produced offline from a Boltzmann solver run (the
//! conversion tool itself is not part of this crate): a header line
//! `Te(eV),R<no>,R<no>,...` mapping columns to mechanism reaction numbers,
//! followed by rows of electron temperature and rate coefficients in m3/s.
//! Each recognized column becomes a `TabulatedTe` law in the rate library.

use super::rate_laws::{RateLaw, RateLibrary, TabulatedTeRate};
use crate::GlobalModel::model::ModelError;
use log::{info, warn};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Parse a rate table file and attach every `R<no>` column whose reaction
/// number exists in the library. Unknown columns are reported and skipped.
pub fn load_rate_table(path: &Path, library: &mut RateLibrary) -> Result<usize, ModelError> {
    let content = fs::read_to_string(path)?;
    let loaded = parse_rate_table(&content, library)?;
    info!(
        "rate table <{}> loaded, {} tabulated reactions",
        path.display(),
        loaded
    );
    Ok(loaded)
}

pub fn parse_rate_table(content: &str, library: &mut RateLibrary) -> Result<usize, ModelError> {
    let column_tag = Regex::new(r"^R(\d+)$").expect("valid regex literal");

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| ModelError::MalformedRateTable("empty rate table".to_string()))?;

    // header: Te(eV),R625,R626,...
    let mut columns: Vec<Option<usize>> = Vec::new();
    for (position, token) in header.split(',').map(str::trim).enumerate() {
        if position == 0 {
            continue; // Te column
        }
        match column_tag.captures(token) {
            Some(caps) => {
                let reaction_no: usize = caps[1]
                    .parse()
                    .map_err(|_| ModelError::MalformedRateTable(format!("bad column {token}")))?;
                if reaction_no >= 1 && reaction_no <= library.no_reactions() {
                    columns.push(Some(reaction_no));
                } else {
                    warn!("rate table column {token} outside the mechanism, skipped");
                    columns.push(None);
                }
            }
            None => {
                warn!("rate table column <{token}> not recognized, skipped");
                columns.push(None);
            }
        }
    }

    let mut te_ev: Vec<f64> = Vec::new();
    let mut rates: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for line in lines {
        let mut tokens = line.split(',').map(str::trim);
        let te: f64 = tokens
            .next()
            .unwrap_or("")
            .parse()
            .map_err(|_| ModelError::MalformedRateTable(format!("bad Te row <{line}>")))?;
        te_ev.push(te);
        for (column, values) in rates.iter_mut().enumerate() {
            let rate: f64 = tokens
                .next()
                .ok_or_else(|| {
                    ModelError::MalformedRateTable(format!("row too short for column {column}"))
                })?
                .parse()
                .map_err(|_| ModelError::MalformedRateTable(format!("bad rate row <{line}>")))?;
            values.push(rate);
        }
    }
    if te_ev.len() < 2 {
        return Err(ModelError::MalformedRateTable(
            "rate table needs at least two Te points".to_string(),
        ));
    }

    let mut loaded = 0;
    for (column, reaction_no) in columns.iter().enumerate() {
        if let Some(reaction_no) = reaction_no {
            library.set_law(
                *reaction_no,
                RateLaw::TabulatedTe(TabulatedTeRate {
                    te_ev: te_ev.clone(),
                    rate: rates[column].clone(),
                }),
            );
            loaded += 1;
        }
    }
    Ok(loaded)
}
