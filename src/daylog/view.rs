//! Pure view computation: filtering, cumulative pagination, tag vocabulary.
//!
//! Nothing here mutates or persists; everything is a function of the current
//! sequence plus caller-supplied criteria, so the same inputs always produce
//! the same view.

use crate::model::{Mood, Record};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The query constraints narrowing the visible subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match over title, content and tags.
    pub query: String,
    /// Exact date match.
    pub date: Option<NaiveDate>,
    /// Exact mood match.
    pub mood: Option<Mood>,
    /// Required tags; a record must contain every one (exact, case-sensitive).
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.date.is_none()
            && self.mood.is_none()
            && self.tags.is_empty()
    }
}

/// Order-preserving subsequence of `records` matching `criteria`.
pub fn filter_records<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    let query = criteria.query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, criteria, &query))
        .collect()
}

fn matches(record: &Record, criteria: &FilterCriteria, query: &str) -> bool {
    if criteria.date.is_some_and(|d| record.date != d) {
        return false;
    }
    if criteria.mood.is_some_and(|m| record.mood != m) {
        return false;
    }
    if !criteria.tags.iter().all(|t| record.tags.iter().any(|rt| rt == t)) {
        return false;
    }
    if !query.is_empty() {
        let haystack = format!(
            "{} {} {}",
            record.title,
            record.content,
            record.tags.join(",")
        )
        .to_lowercase();
        return haystack.contains(query);
    }
    true
}

/// Cumulative "load more" window: the prefix of length
/// `min(page * page_size, len)`. Page `n+1` always begins with page `n`.
pub fn paginate<'a>(filtered: &[&'a Record], page: usize, page_size: usize) -> Vec<&'a Record> {
    let end = (page * page_size).min(filtered.len());
    filtered[..end].to_vec()
}

/// Sorted distinct union of tags across the whole (unfiltered) store.
pub fn tag_vocabulary(records: &[Record]) -> Vec<String> {
    let set: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.tags.iter().map(String::as_str))
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// The pagination cursor: resets to page 1 whenever criteria change,
/// advances by one on an explicit "load more".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Whether the filtered sequence extends past the visible prefix.
    pub fn has_more(&self, filtered_len: usize) -> bool {
        filtered_len > self.page * self.page_size
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
