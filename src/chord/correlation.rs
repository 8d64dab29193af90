use std::collections::HashMap;

use thiserror::Error;

use crate::data::SeriesColumn;
use crate::util::short_label;

use super::model::{RawModel, SeriesDatum};

#[derive(Debug, Error)]
pub enum CorrelationError {
    #[error("need at least two series with usable samples, found {usable}")]
    InsufficientSeries { usable: usize },
}

/// Builds the whole raw model atomically: per-series magnitudes plus the full
/// pairwise Pearson matrix. Rows are index-coupled to the input order, one
/// entry per series including the zero self-entry.
pub fn build_raw_model(
    columns: &[SeriesColumn],
    revision: u64,
) -> Result<RawModel, CorrelationError> {
    let count = columns.len();

    let reference_len = columns
        .iter()
        .map(|column| column.samples.len())
        .find(|&len| len > 0)
        .unwrap_or(0);

    let errors = columns
        .iter()
        .map(|column| {
            if column.samples.is_empty() {
                Some(format!("series {} returned no samples", column.id))
            } else if column.samples.len() != reference_len {
                Some(format!(
                    "series {} has {} samples, expected {}",
                    column.id,
                    column.samples.len(),
                    reference_len
                ))
            } else {
                None
            }
        })
        .collect::<Vec<_>>();

    let usable = errors.iter().filter(|error| error.is_none()).count();
    if usable < 2 {
        return Err(CorrelationError::InsufficientSeries { usable });
    }

    let magnitudes = columns
        .iter()
        .zip(errors.iter())
        .map(|(column, error)| {
            if error.is_none() {
                column.samples.iter().map(|sample| sample.abs()).sum()
            } else {
                0.0f64
            }
        })
        .collect::<Vec<_>>();
    let total_magnitude: f64 = magnitudes.iter().sum();

    let mut rows = vec![vec![0.0f64; count]; count];
    for i in 0..count {
        if errors[i].is_some() {
            continue;
        }
        for j in (i + 1)..count {
            if errors[j].is_some() {
                continue;
            }
            let r = pearson(&columns[i].samples, &columns[j].samples);
            rows[i][j] = r;
            rows[j][i] = r;
        }
    }

    let mut series = Vec::with_capacity(count);
    let mut index_by_id = HashMap::with_capacity(count);
    for (index, column) in columns.iter().enumerate() {
        let sample_count = column.samples.len();
        let value = if errors[index].is_none() && total_magnitude > 0.0 {
            magnitudes[index] / total_magnitude
        } else {
            0.0
        };
        let display_value = if sample_count > 0 {
            value / sample_count as f64
        } else {
            0.0
        };
        let error_value = column
            .error_samples
            .as_ref()
            .filter(|samples| !samples.is_empty())
            .map(|samples| samples.iter().sum::<f64>() / samples.len() as f64)
            .unwrap_or(0.0);

        index_by_id.insert(column.id.clone(), index);
        series.push(SeriesDatum {
            id: column.id.clone(),
            label: column.label.clone(),
            short_label: column
                .short_label
                .clone()
                .unwrap_or_else(|| short_label(&column.label).to_owned()),
            value,
            display_value,
            error_value,
            error_message: errors[index].clone(),
            chords: std::mem::take(&mut rows[index]),
        });
    }

    Ok(RawModel {
        series,
        index_by_id,
        revision,
    })
}

/// Pearson correlation over two aligned sample columns. Zero variance on
/// either side resolves to 0 rather than NaN; output is clamped to [-1, 1].
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let count = xs.len().min(ys.len());
    if count == 0 {
        return 0.0;
    }

    let mean_x = xs[..count].iter().sum::<f64>() / count as f64;
    let mean_y = ys[..count].iter().sum::<f64>() / count as f64;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for index in 0..count {
        let dx = xs[index] - mean_x;
        let dy = ys[index] - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (covariance / denominator).clamp(-1.0, 1.0)
}
