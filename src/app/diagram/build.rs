use std::collections::HashSet;
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::chord::build_raw_model;

use super::super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// Replaces the whole raw model. Correlation rows and the series list are
    /// always rebuilt together so their index coupling can never go stale.
    pub(in crate::app) fn rebuild_raw_model(&mut self) {
        self.model_revision = self.model_revision.wrapping_add(1);
        self.search_match_cache = None;

        let hidden = &self.hidden;
        let columns = self
            .table
            .correlation_columns(self.show_only_selection, |column| {
                !hidden.contains(&column.id)
            });

        match build_raw_model(&columns, self.model_revision) {
            Ok(raw) => {
                log::info!(
                    "rebuilt correlation model: {} series, revision {}",
                    raw.series_count(),
                    raw.revision
                );
                self.raw = Some(raw);
                self.raw_error = None;
            }
            Err(error) => {
                log::warn!("correlation model unavailable: {error}");
                self.raw = None;
                self.raw_error = Some(error.to_string());
                self.draw_cache.clear();
            }
        }

        let selected = self
            .selected_id
            .as_deref()
            .and_then(|id| self.raw.as_ref().and_then(|raw| raw.index_of(id)));
        if selected.is_none() {
            self.selected_id = None;
        }
        self.interaction.reset();
        self.interaction.select(selected);

        self.model_dirty = false;
    }

    pub(in crate::app) fn set_selected(&mut self, selected_id: Option<String>) {
        if self.selected_id == selected_id {
            return;
        }

        let index = selected_id
            .as_deref()
            .and_then(|id| self.raw.as_ref().and_then(|raw| raw.index_of(id)));
        self.selected_id = if index.is_some() { selected_id } else { None };
        self.interaction.select(index);
    }

    pub(in crate::app) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        if self.selected_id.is_some() {
            return None;
        }

        let search_query = self.search.trim();
        if search_query.is_empty() {
            return None;
        }

        let raw = self.raw.as_ref()?;
        if let Some(cached) = &self.search_match_cache
            && cached.revision == raw.revision
            && cached.query == search_query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = raw
            .series
            .iter()
            .enumerate()
            .filter_map(|(index, datum)| {
                let hit = fuzzy_match_score(&matcher, &datum.label, search_query).is_some()
                    || fuzzy_match_score(&matcher, &datum.short_label, search_query).is_some();
                hit.then_some(index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: search_query.to_owned(),
            revision: raw.revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}
