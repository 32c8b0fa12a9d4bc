//! Application State
//!
//! The change reducer that keeps a local table copy in sync with realtime
//! events, plus the dashboard's UI store (reactive_stores, field-level
//! reactivity).

use chrono::NaiveDate;
use leptos::prelude::*;
use reactive_stores::Store;
use serde::de::DeserializeOwned;
use supabase_lite::{ChangeKind, RawChange, ServiceError};

use crate::models::{MailCategory, Project};

/// A row type that lives in one remote table.
pub trait Record: Clone + DeserializeOwned + Send + Sync + 'static {
    const TABLE: &'static str;
    fn id(&self) -> &str;
}

/// A decoded change event.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Insert(T),
    Update(T),
    Delete(String),
}

impl<T: Record> Change<T> {
    pub fn from_raw(raw: &RawChange) -> Result<Self, ServiceError> {
        let decode = |value: &serde_json::Value| {
            serde_json::from_value::<T>(value.clone()).map_err(ServiceError::from)
        };
        match raw.kind {
            ChangeKind::Insert => decode(&raw.record).map(Change::Insert),
            ChangeKind::Update => decode(&raw.record).map(Change::Update),
            ChangeKind::Delete => raw
                .id()
                .map(Change::Delete)
                .ok_or_else(|| ServiceError::Decode("delete event without id".to_string())),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Insert(_) => ChangeKind::Insert,
            Change::Update(_) => ChangeKind::Update,
            Change::Delete(_) => ChangeKind::Delete,
        }
    }
}

/// Decode a raw event, logging and dropping anything that does not fit `T`.
pub fn decode_change<T: Record>(raw: &RawChange) -> Option<Change<T>> {
    match Change::from_raw(raw) {
        Ok(change) => Some(change),
        Err(e) => {
            log::warn!("dropping {} event on {}: {}", T::TABLE, raw.table, e);
            None
        }
    }
}

// ========================
// Id helpers
// ========================

/// Replace the row with the same id. Returns false if absent.
pub fn replace_by_id<T: Record>(rows: &mut [T], updated: T) -> bool {
    match rows.iter_mut().find(|row| row.id() == updated.id()) {
        Some(row) => {
            *row = updated;
            true
        }
        None => false,
    }
}

/// Remove the row with `id`, if any.
pub fn remove_by_id<T: Record>(rows: &mut Vec<T>, id: &str) {
    rows.retain(|row| row.id() != id);
}

/// Merge one event into the list.
///
/// Insert prepends, or replaces in place when the id is already present.
/// Update and delete of an unknown id are no-ops.
pub fn apply_change<T: Record>(rows: &mut Vec<T>, change: Change<T>) {
    match change {
        Change::Insert(row) => {
            if !replace_by_id(rows, row.clone()) {
                rows.insert(0, row);
            }
        }
        Change::Update(row) => {
            replace_by_id(rows, row);
        }
        Change::Delete(id) => remove_by_id(rows, &id),
    }
}

/// Local copy of one table query.
///
/// Changes that arrive while the snapshot is loading are held in `pending`
/// and replayed over it once it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<T> {
    pub rows: Vec<T>,
    pub loading: bool,
    pending: Vec<Change<T>>,
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), loading: true, pending: Vec::new() }
    }
}

impl<T: Record> TableState<T> {
    /// Reset for a new scope.
    pub fn begin(&mut self) {
        self.rows.clear();
        self.pending.clear();
        self.loading = true;
    }

    /// Settle the initial load. The list stays empty on failure.
    pub fn finish_load(&mut self, result: Result<Vec<T>, ServiceError>) -> Option<ServiceError> {
        self.loading = false;
        let pending = std::mem::take(&mut self.pending);
        match result {
            Ok(rows) => {
                self.rows = rows;
                for change in pending {
                    apply_change(&mut self.rows, change);
                }
                None
            }
            Err(e) => {
                self.rows.clear();
                Some(e)
            }
        }
    }

    pub fn apply(&mut self, change: Change<T>) {
        if self.loading {
            self.pending.push(change);
        } else {
            apply_change(&mut self.rows, change);
        }
    }
}

// ========================
// Dashboard UI store
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Mail,
    Projects,
    Personal,
    Activities,
    Reminders,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Mail,
        Section::Projects,
        Section::Personal,
        Section::Activities,
        Section::Reminders,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Mail => "Mail",
            Section::Projects => "Projects",
            Section::Personal => "Personal Info",
            Section::Activities => "Daily Activities",
            Section::Reminders => "Reminders",
        }
    }
}

/// What the dashboard is showing
#[derive(Clone, Debug, Store)]
pub struct DashboardState {
    pub section: Section,
    /// Project form open
    pub show_project_form: bool,
    /// Project being edited (None = new project)
    pub editing_project: Option<Project>,
    pub mail_tab: MailCategory,
    /// Scope of the activities planner
    pub activity_date: NaiveDate,
}

impl DashboardState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            section: Section::default(),
            show_project_form: false,
            editing_project: None,
            mail_tab: MailCategory::Inbox,
            activity_date: today,
        }
    }
}

pub type DashboardStore = Store<DashboardState>;

pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

/// Open the project form, for a new project or an existing one.
pub fn store_open_project_form(store: &DashboardStore, project: Option<Project>) {
    store.editing_project().set(project);
    store.show_project_form().set(true);
}

pub fn store_close_project_form(store: &DashboardStore) {
    store.show_project_form().set(false);
    store.editing_project().set(None);
}
