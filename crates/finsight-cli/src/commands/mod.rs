//! CLI command implementations.

pub mod config;
pub mod deposit;
pub mod health;
pub mod loan;
pub mod payoff;
pub mod trend;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use deposit::{InstrumentArgs, RdArgs};
pub use health::HealthArgs;
pub use loan::LoanArgs;
pub use payoff::PayoffArgs;
pub use trend::SnapshotArgs;

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

use finsight_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Reads a list of records from a `.json` array or a `.csv` file with a header row.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    let invalid = |message: String| CliError::InvalidInput {
        path: path.display().to_string(),
        message,
    };

    match extension(path).as_deref() {
        Some("json") => {
            let file = File::open(path)?;
            serde_json::from_reader(file).map_err(|e| invalid(e.to_string()))
        }
        Some("csv") => {
            let mut reader = csv::Reader::from_path(path).map_err(|e| invalid(e.to_string()))?;
            reader
                .deserialize()
                .collect::<Result<Vec<T>, _>>()
                .map_err(|e| invalid(e.to_string()))
        }
        _ => Err(CliError::UnsupportedInput(path.display().to_string())),
    }
}

/// Reads a single JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let file = File::open(path)?;
    serde_json::from_reader(file).map_err(|e| CliError::InvalidInput {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
