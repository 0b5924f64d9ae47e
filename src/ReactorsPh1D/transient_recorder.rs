//! Solution history appended by `store` at every accepted solver step.
use super::reactor_config::ResolutionMode;
use prettytable::{Cell, Row, Table};
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransientHistory {
    // steady profile
    length: Vec<f64>,
    pressure: Vec<f64>,
    temperature: Vec<f64>,
    species: Vec<Vec<f64>>,
    sites: Vec<Vec<f64>>,
    // transient
    time: Vec<f64>,
    temperature_transient: Vec<f64>,
    species_transient: Vec<Vec<f64>>,
    sites_transient: Vec<Vec<f64>>,
}

impl TransientHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        mode: ResolutionMode,
        t: f64,
        P: f64,
        T: f64,
        mass_fractions: &[f64],
        site_fractions: &[f64],
    ) {
        match mode {
            ResolutionMode::SteadyProfile => {
                self.length.push(t);
                self.pressure.push(P);
                self.temperature.push(T);
                self.species.push(mass_fractions.to_vec());
                self.sites.push(site_fractions.to_vec());
            }
            ResolutionMode::Transient => {
                self.time.push(t);
                self.temperature_transient.push(T);
                self.species_transient.push(mass_fractions.to_vec());
                self.sites_transient.push(site_fractions.to_vec());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length.is_empty() && self.time.is_empty()
    }

    pub fn get_length(&self) -> Vec<f64> {
        self.length.clone()
    }
    pub fn get_pressure(&self) -> Vec<f64> {
        self.pressure.clone()
    }
    pub fn get_temperature(&self) -> Vec<f64> {
        self.temperature.clone()
    }
    pub fn get_specie(&self) -> Vec<Vec<f64>> {
        self.species.clone()
    }
    pub fn get_site(&self) -> Vec<Vec<f64>> {
        self.sites.clone()
    }
    pub fn get_time(&self) -> Vec<f64> {
        self.time.clone()
    }
    pub fn get_temperature_transient(&self) -> Vec<f64> {
        self.temperature_transient.clone()
    }
    pub fn get_specie_transient(&self) -> Vec<Vec<f64>> {
        self.species_transient.clone()
    }
    pub fn get_site_transient(&self) -> Vec<Vec<f64>> {
        self.sites_transient.clone()
    }

    fn columns(&self, mode: ResolutionMode) -> (&[f64], &[f64], &[Vec<f64>], &[Vec<f64>]) {
        match mode {
            ResolutionMode::SteadyProfile => {
                (&self.length, &self.temperature, &self.species, &self.sites)
            }
            ResolutionMode::Transient => (
                &self.time,
                &self.temperature_transient,
                &self.species_transient,
                &self.sites_transient,
            ),
        }
    }

    fn header(mode: ResolutionMode, species_names: &[String], site_names: &[String]) -> Vec<String> {
        let arg = match mode {
            ResolutionMode::SteadyProfile => "z [m]",
            ResolutionMode::Transient => "t [s]",
        };
        let mut header = vec![arg.to_string(), "T [K]".to_string()];
        header.extend(species_names.iter().cloned());
        header.extend(site_names.iter().cloned());
        header
    }

    ////////////////////////////////////////////////I/O/////////////////////////////////////////////////////
    /// table of the stored points, one row per point
    pub fn pretty_print(&self, mode: ResolutionMode, species_names: &[String], site_names: &[String]) {
        let (arg, T, omega, theta) = self.columns(mode);
        let mut table = Table::new();
        table.add_row(Row::new(
            Self::header(mode, species_names, site_names)
                .iter()
                .map(|h| Cell::new(h))
                .collect(),
        ));
        for i in 0..arg.len() {
            let mut cells = vec![
                Cell::new(&format!("{:.5}", arg[i])),
                Cell::new(&format!("{:.2}", T[i])),
            ];
            cells.extend(omega[i].iter().map(|w| Cell::new(&format!("{:.5e}", w))));
            cells.extend(theta[i].iter().map(|s| Cell::new(&format!("{:.5e}", s))));
            table.add_row(Row::new(cells));
        }
        table.printstd();
    }

    pub fn save_to_csv(
        &self,
        mode: ResolutionMode,
        species_names: &[String],
        site_names: &[String],
        filename: &str,
    ) -> Result<(), std::io::Error> {
        let (arg, T, omega, theta) = self.columns(mode);
        let mut writer = BufWriter::new(File::create(filename)?);
        writeln!(writer, "{}", Self::header(mode, species_names, site_names).join(","))?;
        for i in 0..arg.len() {
            let mut row = vec![arg[i].to_string(), T[i].to_string()];
            row.extend(omega[i].iter().map(|w| w.to_string()));
            row.extend(theta[i].iter().map(|s| s.to_string()));
            writeln!(writer, "{}", row.join(","))?;
        }
        writer.flush()
    }
}
