use std::collections::BTreeMap;
use std::path::Path;

use nativis_core::{AppConfig, Directory};

use crate::open_directory;

/// Load the directory file and report what it contains. Validation errors
/// surface as the command's error.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub(crate) fn run_validate(config: &AppConfig, path: Option<&Path>) -> anyhow::Result<()> {
    let directory = open_directory(config, path)?;
    for line in summary_lines(&directory) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn summary_lines(directory: &Directory) -> Vec<String> {
    let mut by_country: BTreeMap<&str, usize> = BTreeMap::new();
    for location in directory.locations() {
        *by_country.entry(location.country.label()).or_default() += 1;
    }

    let brands = directory
        .brands()
        .iter()
        .map(|b| b.id.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!(
            "ok: {} locations, {} brands",
            directory.len(),
            directory.brands().len()
        ),
        format!("brands: {brands}"),
    ];
    for (country, count) in by_country {
        lines.push(format!("  {country:<12}{count}"));
    }
    lines
}
