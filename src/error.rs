use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpigridError` and maps to other errors to
/// convert to an `EpigridError`.
///
/// Only the edges of the crate are fallible (loading configuration, looking up presets,
/// writing reports). Advancing the simulation itself never fails.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpigridError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    ConfigError(String),
    PresetError(String),
    ReportError(String),
    EpigridError(String),
}

impl From<io::Error> for EpigridError {
    fn from(error: io::Error) -> Self {
        EpigridError::IoError(error)
    }
}

impl From<serde_json::Error> for EpigridError {
    fn from(error: serde_json::Error) -> Self {
        EpigridError::JsonError(error)
    }
}

impl From<csv::Error> for EpigridError {
    fn from(error: csv::Error) -> Self {
        EpigridError::CsvError(error)
    }
}

impl From<String> for EpigridError {
    fn from(error: String) -> Self {
        EpigridError::EpigridError(error)
    }
}

impl From<&str> for EpigridError {
    fn from(error: &str) -> Self {
        EpigridError::EpigridError(error.to_string())
    }
}

impl std::error::Error for EpigridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EpigridError::IoError(error) => Some(error),
            EpigridError::JsonError(error) => Some(error),
            EpigridError::CsvError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for EpigridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpigridError::IoError(error) => write!(f, "I/O error: {error}"),
            EpigridError::JsonError(error) => write!(f, "invalid JSON: {error}"),
            EpigridError::CsvError(error) => write!(f, "CSV error: {error}"),
            EpigridError::ConfigError(msg) => write!(f, "invalid configuration: {msg}"),
            EpigridError::PresetError(msg) => write!(f, "preset error: {msg}"),
            EpigridError::ReportError(msg) => write!(f, "report error: {msg}"),
            EpigridError::EpigridError(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_strings() {
        let error: EpigridError = "something broke".into();
        assert!(matches!(error, EpigridError::EpigridError(ref msg) if msg == "something broke"));
        assert_eq!(error.to_string(), "something broke");
    }

    #[test]
    fn wraps_io_errors_as_source() {
        let error: EpigridError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(error, EpigridError::IoError(_)));
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("gone"));
    }

    #[test]
    fn config_errors_display_their_message() {
        let error = EpigridError::ConfigError("populationSize must be positive".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: populationSize must be positive"
        );
        assert!(std::error::Error::source(&error).is_none());
    }
}
