#[derive(Clone, Debug)]
pub struct SeriesColumn {
    pub id: String,
    pub label: String,
    pub short_label: Option<String>,
    pub samples: Vec<f64>,
    pub error_samples: Option<Vec<f64>>,
}

impl SeriesColumn {
    /// Restricts the column to the given point indices, preserving their
    /// order. Indices outside the sample range are ignored.
    pub fn masked(&self, selection: &[usize]) -> SeriesColumn {
        let pick = |samples: &Vec<f64>| {
            selection
                .iter()
                .filter_map(|&index| samples.get(index).copied())
                .collect::<Vec<_>>()
        };

        SeriesColumn {
            id: self.id.clone(),
            label: self.label.clone(),
            short_label: self.short_label.clone(),
            samples: pick(&self.samples),
            error_samples: self.error_samples.as_ref().map(pick),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SeriesTable {
    pub source: String,
    pub columns: Vec<SeriesColumn>,
    pub point_count: usize,
    pub selection: Option<Vec<usize>>,
}

impl SeriesTable {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn selected_point_count(&self) -> usize {
        self.selection
            .as_ref()
            .map(|selection| selection.len())
            .unwrap_or(self.point_count)
    }

    /// The columns handed to the correlation core: optionally restricted to
    /// the document's point selection, minus any series the caller excludes.
    /// Which series are shown is decided here, never inside the core.
    pub fn correlation_columns(
        &self,
        show_only_selection: bool,
        include: impl Fn(&SeriesColumn) -> bool,
    ) -> Vec<SeriesColumn> {
        let selection = if show_only_selection {
            self.selection.as_deref()
        } else {
            None
        };

        self.columns
            .iter()
            .filter(|column| include(column))
            .map(|column| match selection {
                Some(selection) => column.masked(selection),
                None => column.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SeriesTable {
        SeriesTable {
            source: "test.json".to_owned(),
            columns: vec![
                SeriesColumn {
                    id: "a".to_owned(),
                    label: "A".to_owned(),
                    short_label: None,
                    samples: vec![1.0, 2.0, 3.0, 4.0],
                    error_samples: Some(vec![0.1, 0.2, 0.3, 0.4]),
                },
                SeriesColumn {
                    id: "b".to_owned(),
                    label: "B".to_owned(),
                    short_label: None,
                    samples: vec![4.0, 3.0, 2.0, 1.0],
                    error_samples: None,
                },
            ],
            point_count: 4,
            selection: Some(vec![1, 3]),
        }
    }

    #[test]
    fn masked_column_keeps_selected_points_in_order() {
        let table = table();
        let masked = table.columns[0].masked(&[3, 1]);
        assert_eq!(masked.samples, vec![4.0, 2.0]);
        assert_eq!(masked.error_samples, Some(vec![0.4, 0.2]));
    }

    #[test]
    fn correlation_columns_apply_selection_only_when_asked() {
        let table = table();

        let full = table.correlation_columns(false, |_| true);
        assert_eq!(full[0].samples.len(), 4);

        let selected = table.correlation_columns(true, |_| true);
        assert_eq!(selected[0].samples, vec![2.0, 4.0]);
        assert_eq!(selected[1].samples, vec![3.0, 1.0]);
    }

    #[test]
    fn correlation_columns_honor_the_include_filter() {
        let table = table();
        let only_b = table.correlation_columns(false, |column| column.id == "b");
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].id, "b");
    }
}
