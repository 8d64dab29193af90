use std::fs;

use anyhow::{Context, Result};

use super::document::parse_series_document;
use super::series::SeriesTable;

pub fn load_series_table(path: &str) -> Result<SeriesTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read series document {path}"))?;

    let (columns, selection) =
        parse_series_document(&raw).with_context(|| format!("failed to parse {path}"))?;

    let point_count = columns
        .iter()
        .map(|column| column.samples.len())
        .max()
        .unwrap_or(0);

    let selection = selection.map(|mut selection| {
        let before = selection.len();
        selection.retain(|&index| index < point_count);
        selection.sort_unstable();
        selection.dedup();
        if selection.len() != before {
            log::warn!(
                "dropped {} duplicate or out-of-range selection indices",
                before - selection.len()
            );
        }
        selection
    });

    log::info!(
        "loaded {} series with {point_count} points from {path}",
        columns.len()
    );

    Ok(SeriesTable {
        source: path.to_owned(),
        columns,
        point_count,
        selection,
    })
}
