//! Loading of reactor tasks from text files.
//!
//! A file is either a bare JSON document or a task document with named sections, each header
//! on its own line followed by a JSON body:
//!
//! ```text
//! REACTOR
//! { "P": 101325.0, "T0": 600.0, ... }
//! MECHANISM
//! { "gas_species": [...], ... }
//! ```
//!
//! A section ends at the next all-uppercase line or at the end of the file.
use crate::ChemistryService::ideal_gas_mechanism::{IdealGasMechanism, MechanismData};
use crate::ReactorsPh1D::reactor_config::ReactorConfiguration;
use crate::ReactorsPh1D::reactor_errors::ConfigurationError;
use log::{error, info};
use serde::de::DeserializeOwned;
use std::fs;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_reactor_configuration(&self) -> Result<ReactorConfiguration, ConfigurationError> {
        load_reactor_configuration(&self.file_name)
    }
    pub fn load_mechanism(&self) -> Result<IdealGasMechanism, ConfigurationError> {
        load_mechanism(&self.file_name)
    }
}

/// Reads a reactor configuration from the `REACTOR` section, or from the whole file if it has
/// no such header.
pub fn load_reactor_configuration(file_name: &str) -> Result<ReactorConfiguration, ConfigurationError> {
    let config: ReactorConfiguration = load_section(file_name, &["REACTOR", "REACTOR CONFIGURATION"])?;
    info!("reactor configuration loaded from '{}'", file_name);
    Ok(config)
}

/// Reads and compiles a mechanism from the `MECHANISM` section, or from the whole file if it
/// has no such header.
pub fn load_mechanism(file_name: &str) -> Result<IdealGasMechanism, ConfigurationError> {
    let data: MechanismData = load_section(file_name, &["MECHANISM", "CHEMISTRY"])?;
    let mechanism = IdealGasMechanism::new(data)?;
    info!("mechanism loaded from '{}'", file_name);
    Ok(mechanism)
}

fn load_section<T: DeserializeOwned>(
    file_name: &str,
    headers: &[&str],
) -> Result<T, ConfigurationError> {
    let content = fs::read_to_string(file_name)?;
    let lines: Vec<&str> = content.lines().collect();
    let (start_index, end_index) = find_section(&lines, headers).unwrap_or((0, lines.len()));
    let section = lines[start_index..end_index].join("\n");

    serde_json::from_str(&section).map_err(|e| {
        // line of the error in the file, not in the section
        let actual_line = start_index + e.line().saturating_sub(1);
        error!(
            "error parsing '{}' at line {}, column {}: {}",
            file_name,
            actual_line + 1,
            e.column(),
            e
        );
        if let Some(problem_line) = lines.get(actual_line) {
            error!("problematic line: {}", problem_line);
            if e.column() >= 1 && e.column() <= problem_line.len() {
                error!("{}^", " ".repeat(e.column() - 1));
            }
        }
        ConfigurationError::Json(e)
    })
}

/// (first line after the header, line of the next header or end of file)
fn find_section(lines: &[&str], headers: &[&str]) -> Option<(usize, usize)> {
    let start_index = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim().to_uppercase();
            headers.iter().any(|h| trimmed == *h)
        })?
        + 1;
    let end_index = lines[start_index..]
        .iter()
        .position(|line| is_header(line))
        .map_or(lines.len(), |i| start_index + i);
    Some((start_index, end_index))
}

fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed
            .chars()
            .all(|c| c.is_uppercase() || c == '_' || c == ' ')
}
