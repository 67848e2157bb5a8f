use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::quizzes::defaults::{item_weight, parse_flag};
use crate::quizzes::domain::NormalizedItem;

/// Column positions of one quiz's source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub id: usize,
    pub title: usize,
    pub outcome: usize,
    pub reverse: usize,
    pub weight: usize,
    pub enabled: usize,
    pub description: Option<usize>,
    /// Free-text option label columns; empty for Likert quizzes.
    pub options: Range<usize>,
    pub reverse_default: bool,
    pub enabled_default: bool,
}

impl ColumnLayout {
    /// `id, title, outcome, reverse, weight, enabled`
    pub const fn likert() -> Self {
        Self {
            id: 0,
            title: 1,
            outcome: 2,
            reverse: 3,
            weight: 4,
            enabled: 5,
            description: None,
            options: 6..6,
            reverse_default: false,
            enabled_default: true,
        }
    }

    /// `id, title, outcome, reverse, weight, enabled, option_1..option_n`
    pub const fn with_options(option_count: usize) -> Self {
        Self {
            options: 6..6 + option_count,
            ..Self::likert()
        }
    }

    pub fn with_description(mut self, column: usize) -> Self {
        self.description = Some(column);
        self
    }

    /// Rows shorter than this are dropped.
    pub fn required_columns(&self) -> usize {
        [
            self.id,
            self.title,
            self.outcome,
            self.reverse,
            self.weight,
            self.enabled,
        ]
        .into_iter()
        .max()
        .map(|last| last + 1)
        .unwrap_or(0)
        .max(self.options.end)
    }
}

/// Outcome keys a quiz accepts, in declared group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSet {
    keys: Vec<String>,
}

impl OutcomeSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .map(|key| normalize_outcome(key.as_ref()))
            .filter(|key| !key.is_empty() && seen.insert(key.clone()))
            .collect();
        Self { keys }
    }

    /// Normalized form of `raw` when it is an allowed key.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let normalized = normalize_outcome(raw);
        self.keys
            .iter()
            .find(|key| **key == normalized)
            .map(String::as_str)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn normalize_outcome(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Why a row did not make it into the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    TooFewColumns,
    MissingIdentity,
    UnknownOutcome,
    Duplicate,
    Disabled,
}

/// Validates and de-duplicates parsed rows. The first row to claim an id or
/// title wins; output keeps input order.
pub fn normalize_rows(
    rows: &[Vec<String>],
    layout: &ColumnLayout,
    outcomes: &OutcomeSet,
) -> Vec<NormalizedItem> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, layout, outcomes, &seen_ids, &seen_titles) {
            Ok(item) => {
                seen_ids.insert(item.id.clone());
                seen_titles.insert(item.title.clone());
                items.push(item);
            }
            Err(reason) => debug!(row = index, ?reason, "row excluded from bank"),
        }
    }

    items
}

fn normalize_row(
    row: &[String],
    layout: &ColumnLayout,
    outcomes: &OutcomeSet,
    seen_ids: &HashSet<String>,
    seen_titles: &HashSet<String>,
) -> Result<NormalizedItem, Rejection> {
    if row.len() < layout.required_columns() {
        return Err(Rejection::TooFewColumns);
    }

    let cell = |column: usize| row.get(column).map(|value| value.trim());

    let id = cell(layout.id).unwrap_or_default();
    let title = cell(layout.title).unwrap_or_default();
    if id.is_empty() || title.is_empty() {
        return Err(Rejection::MissingIdentity);
    }

    let outcome = outcomes
        .resolve(cell(layout.outcome).unwrap_or_default())
        .ok_or(Rejection::UnknownOutcome)?;

    if seen_ids.contains(id) || seen_titles.contains(title) {
        return Err(Rejection::Duplicate);
    }

    if !parse_flag(cell(layout.enabled), layout.enabled_default) {
        return Err(Rejection::Disabled);
    }

    let option_labels = layout
        .options
        .clone()
        .filter_map(cell)
        .map(str::to_string)
        .collect();

    Ok(NormalizedItem {
        id: id.to_string(),
        title: title.to_string(),
        description: layout
            .description
            .and_then(cell)
            .unwrap_or_default()
            .to_string(),
        outcome: outcome.to_string(),
        reverse: parse_flag(cell(layout.reverse), layout.reverse_default),
        weight: item_weight(cell(layout.weight)),
        option_labels,
    })
}

/// Renders an item back into a row of `layout`, the inverse of
/// [`normalize_rows`] for accepted items.
pub fn to_row(item: &NormalizedItem, layout: &ColumnLayout) -> Vec<String> {
    let width = layout
        .required_columns()
        .max(layout.description.map(|column| column + 1).unwrap_or(0));
    let mut row = vec![String::new(); width];

    row[layout.id] = item.id.clone();
    row[layout.title] = item.title.clone();
    row[layout.outcome] = item.outcome.clone();
    row[layout.reverse] = item.reverse.to_string();
    row[layout.weight] = item.weight.to_string();
    row[layout.enabled] = "true".to_string();
    if let Some(column) = layout.description {
        row[column] = item.description.clone();
    }
    for (column, label) in layout.options.clone().zip(&item.option_labels) {
        row[column] = label.clone();
    }

    row
}
