//! Tab and search filtering of the candidate lists.

use crate::model::candidate::CandidateRecord;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Coarse list selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTab {
    #[default]
    All,
    Favorites,
}

/// Tab and search text currently selected by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayQuery {
    pub active_tab: DisplayTab,
    pub search_text: String,
}

/// One change to any of the three filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayInput {
    AllRecords(Vec<CandidateRecord>),
    FavoriteRecords(Vec<CandidateRecord>),
    Tab(DisplayTab),
    SearchText(String),
}

/// Builds the displayed list.
///
/// The base list is picked by tab and keeps its own order. A non-blank search
/// keeps only records whose first or last name contains the trimmed search
/// text, compared case-insensitively.
pub fn derive_displayed(
    all: &[CandidateRecord],
    favorites: &[CandidateRecord],
    query: &DisplayQuery,
) -> Vec<CandidateRecord> {
    let base = match query.active_tab {
        DisplayTab::All => all,
        DisplayTab::Favorites => favorites,
    };

    let needle = query.search_text.trim().to_lowercase();
    if needle.is_empty() {
        return base.to_vec();
    }

    base.iter()
        .filter(|record| record.name_contains(&needle))
        .cloned()
        .collect()
}

/// Holds the latest value of every input and publishes the derived list.
///
/// Callers observe results through [`Self::subscribe`].
pub struct DisplayFilter {
    all: Vec<CandidateRecord>,
    favorites: Vec<CandidateRecord>,
    query: DisplayQuery,
    output: watch::Sender<Vec<CandidateRecord>>,
}

impl Default for DisplayFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayFilter {
    pub fn new() -> Self {
        let (output, _) = watch::channel(Vec::new());
        Self {
            all: Vec::new(),
            favorites: Vec::new(),
            query: DisplayQuery::default(),
            output,
        }
    }

    /// Receiver for every list this filter publishes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CandidateRecord>> {
        self.output.subscribe()
    }

    /// Records one input change, re-derives, publishes, and returns the new list.
    pub fn apply(&mut self, input: DisplayInput) -> Vec<CandidateRecord> {
        match input {
            DisplayInput::AllRecords(records) => self.all = records,
            DisplayInput::FavoriteRecords(records) => self.favorites = records,
            DisplayInput::Tab(tab) => self.query.active_tab = tab,
            DisplayInput::SearchText(text) => self.query.search_text = text,
        }

        let displayed = derive_displayed(&self.all, &self.favorites, &self.query);
        self.output.send_replace(displayed.clone());
        displayed
    }

    pub fn query(&self) -> &DisplayQuery {
        &self.query
    }

    /// Latest published list.
    pub fn current(&self) -> Vec<CandidateRecord> {
        self.output.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayFilter, DisplayInput, DisplayTab};
    use crate::model::candidate::{CandidateDraft, CandidateRecord};

    fn record(id: i64, first: &str, last: &str, is_favorite: bool) -> CandidateRecord {
        CandidateDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: "0102030405".to_string(),
            email: "x@y.fr".to_string(),
            date_of_birth: "01/02/1990".to_string(),
            expected_salary: 0.0,
            notes: String::new(),
            profile_photo_ref: None,
            is_favorite,
        }
        .into_record(id)
    }

    #[test]
    fn every_input_kind_triggers_republish() {
        let jean = record(1, "Jean", "Dupont", false);
        let marie = record(2, "Marie", "Martin", true);
        let mut filter = DisplayFilter::new();
        let mut rx = filter.subscribe();

        filter.apply(DisplayInput::AllRecords(vec![jean.clone(), marie.clone()]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), vec![jean.clone(), marie.clone()]);

        filter.apply(DisplayInput::FavoriteRecords(vec![marie.clone()]));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        filter.apply(DisplayInput::Tab(DisplayTab::Favorites));
        assert_eq!(*rx.borrow_and_update(), vec![marie.clone()]);

        filter.apply(DisplayInput::SearchText("dup".to_string()));
        assert!(rx.borrow_and_update().is_empty());

        filter.apply(DisplayInput::Tab(DisplayTab::All));
        assert_eq!(*rx.borrow_and_update(), vec![jean]);
    }

    #[test]
    fn record_update_is_reflected_under_active_search() {
        let mut filter = DisplayFilter::new();
        filter.apply(DisplayInput::SearchText("mar".to_string()));
        assert!(filter.current().is_empty());

        let marie = record(2, "Marie", "Martin", false);
        let displayed = filter.apply(DisplayInput::AllRecords(vec![marie.clone()]));
        assert_eq!(displayed, vec![marie]);
        assert_eq!(filter.query().search_text, "mar");
    }
}
