//! # API facade
//!
//! [`DaylogApi`] is the single entry point a front end needs: it owns the
//! journal, the action log, the active filter criteria and the pagination
//! cursor, and wires them together so callers never have to. It returns
//! structured types and typed errors: no I/O, no formatting, no terminal
//! assumptions. All user-visible messaging is the calling layer's job.
//!
//! Generic over [`StorageGateway`]: production runs on
//! [`crate::store::fs::FileGateway`], tests on
//! [`crate::store::memory::MemoryGateway`].

use crate::error::Result;
use crate::events::{ChangeEvent, EventBus};
use crate::history::ActionLog;
use crate::journal::Journal;
use crate::model::{Mood, Record, RecordDraft};
use crate::normalize;
use crate::store::{self, SizeEstimate, StorageGateway};
use crate::transfer::{self, ExportFormat, ImportReport};
use crate::view::{self, FilterCriteria, Pager};
use chrono::NaiveDate;

pub struct DaylogApi<G: StorageGateway> {
    journal: Journal<G>,
    log: ActionLog,
    criteria: FilterCriteria,
    pager: Pager,
    events: EventBus,
}

impl<G: StorageGateway> DaylogApi<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_page_size(gateway, view::DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(gateway: G, page_size: usize) -> Self {
        Self {
            journal: Journal::open(gateway),
            log: ActionLog::new(),
            criteria: FilterCriteria::default(),
            pager: Pager::new(page_size),
            events: EventBus::new(),
        }
    }

    /// Register for change notifications (list/menu/chart refreshes).
    pub fn subscribe(&mut self, subscriber: impl Fn(ChangeEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    // --- Mutations (strict submission policy) ---

    /// Create a record from an explicit user submission. Missing date or
    /// title is a validation error the caller should re-prompt on.
    pub fn submit_new(&mut self, draft: RecordDraft) -> Result<Record> {
        let record = normalize::validate_submission(&draft)?;
        let delta = self.journal.create(record.clone())?;
        self.log.record(delta);
        self.events.emit(ChangeEvent::SequenceChanged);
        Ok(record)
    }

    /// Full-replace the record `id` from an explicit user submission.
    pub fn submit_update(&mut self, id: &str, draft: RecordDraft) -> Result<Record> {
        let mut record = normalize::validate_submission(&draft)?;
        record.id = id.to_string();
        let delta = self.journal.replace(id, record.clone())?;
        self.log.record(delta);
        self.events.emit(ChangeEvent::SequenceChanged);
        Ok(record)
    }

    /// Remove a record, returning what was removed.
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        let delta = self.journal.remove(id)?;
        let removed = match &delta {
            crate::history::Delta::Delete { before } => before.clone(),
            _ => unreachable!("remove always yields a delete delta"),
        };
        self.log.record(delta);
        self.events.emit(ChangeEvent::SequenceChanged);
        Ok(removed)
    }

    // --- Reads ---

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.journal.find(id)
    }

    pub fn all(&self) -> &[Record] {
        self.journal.all()
    }

    pub fn len(&self) -> usize {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    // --- Filtering & pagination ---

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.criteria_changed();
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        self.criteria.date = date;
        self.criteria_changed();
    }

    pub fn set_mood_filter(&mut self, mood: Option<Mood>) {
        self.criteria.mood = mood;
        self.criteria_changed();
    }

    /// Add or remove a required tag.
    pub fn toggle_tag_filter(&mut self, tag: &str) {
        if !self.criteria.tags.remove(tag) {
            self.criteria.tags.insert(tag.to_string());
        }
        self.criteria_changed();
    }

    pub fn clear_tag_filter(&mut self) {
        self.criteria.tags.clear();
        self.criteria_changed();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.criteria_changed();
    }

    /// The currently visible prefix: filter, then cumulative pagination.
    pub fn visible(&self) -> Vec<&Record> {
        let filtered = view::filter_records(self.journal.all(), &self.criteria);
        view::paginate(&filtered, self.pager.page, self.pager.page_size)
    }

    /// Whether "load more" would reveal anything.
    pub fn has_more(&self) -> bool {
        let filtered = view::filter_records(self.journal.all(), &self.criteria);
        self.pager.has_more(filtered.len())
    }

    pub fn load_more(&mut self) {
        self.pager.advance();
    }

    pub fn page(&self) -> usize {
        self.pager.page
    }

    /// Tag-filter candidates: every tag in the store, filtered or not.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        view::tag_vocabulary(self.journal.all())
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<()> {
        self.log.undo(&mut self.journal)?;
        self.events.emit(ChangeEvent::SequenceChanged);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.log.redo(&mut self.journal)?;
        self.events.emit(ChangeEvent::SequenceChanged);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// The current action log, for callers that persist history between
    /// short-lived processes.
    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub fn set_action_log(&mut self, log: ActionLog) {
        self.log = log;
    }

    // --- Bulk & bookkeeping ---

    pub fn import_json(&mut self, text: &str) -> Result<ImportReport> {
        let report = transfer::import_json(&mut self.journal, text)?;
        if report.added > 0 {
            self.events.emit(ChangeEvent::SequenceChanged);
        }
        Ok(report)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        transfer::export(self.journal.all(), format)
    }

    pub fn estimate_size(&self) -> Result<SizeEstimate> {
        store::estimate_size(self.journal.all())
    }

    fn criteria_changed(&mut self) {
        self.pager.reset();
        self.events.emit(ChangeEvent::CriteriaChanged);
    }
}
