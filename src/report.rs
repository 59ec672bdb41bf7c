//! CSV export of a run's daily statistics.
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use log::{info, trace};
use serde::Serialize;

use crate::error::EpigridError;
use crate::statistics::Statistics;

/// Where and how report files are written.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub overwrite: bool,
}

impl ReportOptions {
    /// Reports go to the current working directory, without a prefix, and existing files
    /// are not overwritten.
    #[must_use]
    pub fn new() -> Self {
        ReportOptions {
            directory: PathBuf::from("."),
            file_prefix: String::new(),
            overwrite: false,
        }
    }

    pub fn directory(&mut self, directory: PathBuf) -> &mut Self {
        self.directory = directory;
        self
    }

    pub fn file_prefix(&mut self, file_prefix: String) -> &mut Self {
        self.file_prefix = file_prefix;
        self
    }

    pub fn overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.overwrite = overwrite;
        self
    }

    /// `<directory>/<prefix><short_name>.csv`
    pub fn path_for(&self, short_name: &str) -> PathBuf {
        self.directory
            .join(format!("{}{}.csv", self.file_prefix, short_name))
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions::new()
    }
}

/// One row of the statistics report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyReportItem {
    pub day: usize,
    pub susceptible: usize,
    pub infected: usize,
    pub contagious: usize,
    pub safe: usize,
    pub dead: usize,
}

// Creates the file and all parent directories if they do not exist. Refuses to clobber an
// existing file unless the options allow it.
fn create_report_file(path: &Path, overwrite: bool) -> Result<File, EpigridError> {
    if path.exists() && !overwrite {
        return Err(EpigridError::ReportError(format!(
            "file already exists: {}. Please set `overwrite` to true to overwrite existing files",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Writes one row per recorded day to `<directory>/<prefix><short_name>.csv` and returns the
/// path written.
pub fn write_statistics_csv(
    statistics: &Statistics,
    options: &ReportOptions,
    short_name: &str,
) -> Result<PathBuf, EpigridError> {
    let path = options.path_for(short_name);
    trace!("writing statistics report to {}", path.display());
    let file = create_report_file(&path, options.overwrite)?;
    let mut writer = Writer::from_writer(file);
    for (day, counts) in statistics.iter().enumerate() {
        writer.serialize(DailyReportItem {
            day: day + 1,
            susceptible: counts.susceptible,
            infected: counts.infected,
            contagious: counts.contagious,
            safe: counts.safe,
            dead: counts.dead,
        })?;
    }
    writer.flush()?;
    info!(
        "wrote {} days of statistics to {}",
        statistics.days_recorded(),
        path.display()
    );
    Ok(path)
}
