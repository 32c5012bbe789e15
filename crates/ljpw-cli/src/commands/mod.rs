pub mod calibrate;
pub mod diagnose;
pub mod simulate;
pub mod synth;
pub mod validate;

use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;

use ljpw_core::serde::{from_json_slice, from_yaml_slice, to_canonical_json_pretty};
use ljpw_core::Axis;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads a YAML or JSON document, picking the format from the extension.
pub fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(from_json_slice(&bytes)?)
    } else {
        Ok(from_yaml_slice(&bytes)?)
    }
}

/// Writes canonical JSON to `out`, or to stdout when absent.
pub fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut text = to_canonical_json_pretty(value)?;
    text.push('\n');
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, text)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

/// Parses `L`, `love`, `Love` and so on.
pub fn parse_axis(value: &str) -> Result<Axis, String> {
    let value = value.trim();
    Axis::ALL
        .into_iter()
        .find(|axis| {
            axis.label().eq_ignore_ascii_case(value) || axis.name().eq_ignore_ascii_case(value)
        })
        .ok_or_else(|| format!("unknown axis `{value}` (expected one of L, J, P, W)"))
}
