use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::series::SeriesColumn;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawSeriesEntry {
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) label: Option<String>,
    #[serde(default, rename = "shortLabel")]
    pub(super) short_label: Option<String>,
    #[serde(default)]
    pub(super) samples: Vec<f64>,
    #[serde(default, rename = "errorSamples")]
    pub(super) error_samples: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawSeriesDocument {
    #[serde(default)]
    pub(super) series: Vec<RawSeriesEntry>,
    #[serde(default)]
    pub(super) selection: Option<Vec<usize>>,
}

pub(super) fn parse_series_document(raw: &str) -> Result<(Vec<SeriesColumn>, Option<Vec<usize>>)> {
    let document: RawSeriesDocument =
        serde_json::from_str(raw).context("invalid JSON in series document")?;

    let mut columns = Vec::with_capacity(document.series.len());
    for entry in document.series {
        let Some(id) = entry.id.filter(|id| !id.is_empty()) else {
            log::warn!("skipping series entry without an id");
            continue;
        };

        if columns.iter().any(|column: &SeriesColumn| column.id == id) {
            log::warn!("skipping duplicate series id {id}");
            continue;
        }

        let label = entry
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| id.clone());

        columns.push(SeriesColumn {
            id,
            label,
            short_label: entry.short_label.filter(|label| !label.is_empty()),
            samples: entry.samples,
            error_samples: entry.error_samples,
        });
    }

    if columns.is_empty() {
        Err(anyhow!("series document contains no usable series entries"))
    } else {
        Ok((columns, document.selection))
    }
}
