//! Live Tables
//!
//! `use_live_table` loads a snapshot for a scope, subscribes to the matching
//! change feed and merges events through the reducer. When the scope changes
//! the old channel is closed before the new one is opened; when the owner is
//! disposed the channel is closed for good.

use futures::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use supabase_lite::{ChangeKind, ChannelHandle, Query, TableFilter};

use crate::commands::fetch;
use crate::context::use_app_context;
use crate::store::{decode_change, Record, TableState};

/// One query plus the feed that keeps it current.
#[derive(Debug, Clone, PartialEq)]
pub struct TableScope {
    pub query: Query,
    pub feed: TableFilter,
}

impl TableScope {
    pub fn new(query: Query, feed: TableFilter) -> Self {
        Self { query, feed }
    }

    /// Feed for the whole table.
    pub fn whole<T: Record>(query: Query) -> Self {
        Self { query, feed: TableFilter::table(T::TABLE) }
    }
}

/// Toast text announced when events arrive.
#[derive(Debug, Clone, Copy)]
pub struct ChangeNotices {
    pub inserted: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

impl ChangeNotices {
    pub fn message(&self, kind: ChangeKind) -> &'static str {
        match kind {
            ChangeKind::Insert => self.inserted,
            ChangeKind::Update => self.updated,
            ChangeKind::Delete => self.deleted,
        }
    }
}

pub struct LiveTable<T: Send + Sync + 'static> {
    state: RwSignal<TableState<T>>,
}

impl<T: Send + Sync + 'static> Clone for LiveTable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for LiveTable<T> {}

impl<T: Record> LiveTable<T> {
    pub fn rows(&self) -> Vec<T> {
        self.state.with(|s| s.rows.clone())
    }

    pub fn first(&self) -> Option<T> {
        self.state.with(|s| s.rows.first().cloned())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn len(&self) -> usize {
        self.state.with(|s| s.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something the slot closes when its scope ends.
pub trait Release {
    fn release(&mut self);
}

impl Release for ChannelHandle {
    fn release(&mut self) {
        self.close();
    }
}

/// Identifies one scope of a [`ScopeSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeToken(u64);

/// Holds the channel of the current scope.
///
/// Starting a scope releases the previous handle before the new one is
/// opened, and invalidates every token handed out for earlier scopes.
pub struct ScopeSlot<H: Release> {
    generation: u64,
    handle: Option<H>,
}

impl<H: Release> Default for ScopeSlot<H> {
    fn default() -> Self {
        Self { generation: 0, handle: None }
    }
}

impl<H: Release> ScopeSlot<H> {
    pub fn begin(&mut self, open: impl FnOnce() -> H) -> ScopeToken {
        self.release();
        self.handle = Some(open());
        ScopeToken(self.generation)
    }

    pub fn is_current(&self, token: ScopeToken) -> bool {
        self.handle.is_some() && token.0 == self.generation
    }

    /// End the current scope, if any.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
        }
        self.generation += 1;
    }
}

/// Keep a local copy of `scope()` in sync with the remote table.
///
/// `scope` is re-read reactively; `load_error` is the toast shown when the
/// snapshot fails.
pub fn use_live_table<T: Record>(
    scope: impl Fn() -> TableScope + 'static,
    load_error: &'static str,
    notices: Option<ChangeNotices>,
) -> LiveTable<T> {
    let ctx = use_app_context();
    let state = RwSignal::new(TableState::<T>::default());
    let slot = StoredValue::new_local(ScopeSlot::<ChannelHandle>::default());

    Effect::new(move |_| {
        let TableScope { query, feed } = scope();
        state.update(TableState::begin);

        let client = ctx.client();
        let mut receiver = None;
        let token = slot.try_update_value(|s| {
            s.begin(|| {
                let (handle, events) = client.realtime().subscribe(T::TABLE, feed);
                receiver = Some(events);
                handle
            })
        });
        let (Some(token), Some(mut events)) = (token, receiver) else { return };

        let is_current = move || slot.try_with_value(|s| s.is_current(token)).unwrap_or(false);

        spawn_local({
            let client = client.clone();
            async move {
                let result = fetch::<T, _>(&client, &query).await;
                if !is_current() {
                    log::debug!("discarding stale {} snapshot", T::TABLE);
                    return;
                }
                if let Some(Some(err)) = state.try_update(|s| s.finish_load(result)) {
                    ctx.report(load_error, err);
                }
            }
        });

        spawn_local(async move {
            while let Some(raw) = events.next().await {
                if !is_current() {
                    break;
                }
                let Some(change) = decode_change::<T>(&raw) else { continue };
                let kind = change.kind();
                if state.try_update(|s| s.apply(change)).is_none() {
                    break;
                }
                if let Some(notices) = notices {
                    ctx.toasts.success(notices.message(kind));
                }
            }
        });
    });

    on_cleanup(move || {
        slot.try_update_value(ScopeSlot::release);
    });

    LiveTable { state }
}
