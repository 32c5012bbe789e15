//! Files carry a `source,base,effective` header and one observation per row.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use ljpw_core::errors::{ErrorInfo, LjpwError};
use serde::{Deserialize, Serialize};

use crate::fit::DomainObservations;

#[derive(Debug, Serialize, Deserialize)]
struct ObservationRow {
    source: f64,
    base: f64,
    effective: f64,
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> LjpwError {
    LjpwError::Serde(
        ErrorInfo::new(code, "observation CSV failure")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}

/// Reads observations from `path`.
pub fn read_observations_csv(path: &Path) -> Result<DomainObservations, LjpwError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| wrap_csv("observations-read", path, err))?;
    let mut observations = DomainObservations::default();
    for row in reader.deserialize::<ObservationRow>() {
        let row = row.map_err(|err| wrap_csv("observations-record", path, err))?;
        observations.push(row.source, row.base, row.effective);
    }
    Ok(observations)
}

/// Writes observations to `path`, creating parent directories.
pub fn write_observations_csv(
    path: &Path,
    observations: &DomainObservations,
) -> Result<(), LjpwError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            LjpwError::Serde(
                ErrorInfo::new("observations-create", "failed to create output directory")
                    .with_context("path", parent.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| wrap_csv("observations-write", path, err))?;
    for ((&source, &base), &effective) in observations
        .source
        .iter()
        .zip(&observations.base)
        .zip(&observations.effective)
    {
        writer
            .serialize(ObservationRow {
                source,
                base,
                effective,
            })
            .map_err(|err| wrap_csv("observations-record", path, err))?;
    }
    writer.flush().map_err(|err| {
        LjpwError::Serde(
            ErrorInfo::new("observations-flush", "failed to flush observation CSV")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    Ok(())
}
