//! Optimistic todo store.
//!
//! # Design
//! `TodoStore` owns the local list and mutates it before the server has
//! answered. Every mutating call hands back a `Command`: an `HttpRequest`
//! tagged with a `Ticket`. The host executes the request however it likes
//! (blocking, on a thread pool, in a test) and reports the outcome through
//! `complete`, which either confirms the local change or reverts it.
//!
//! - Add rollback is keyed by id, so any number of concurrent adds and
//!   deletes can be in flight without undoing each other.
//! - Delete recovery is configurable (`DeleteRecovery`): reload the whole
//!   list, or restore the single item.
//! - A list response is reconciled before it replaces local state. Items
//!   with a pending delete stay hidden and items with a pending create stay
//!   visible. Creates and deletes confirmed while the list was being fetched
//!   are re-applied too, since the server may have answered the GET before
//!   it saw them.
//! - Failures are logged and also surfaced as a `Notice` so the UI can tell
//!   the user what happened.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::{ClientConfig, DeleteRecovery};
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};
use crate::ids::IdGenerator;
use crate::types::TodoItem;

/// The list as the user sees it, plus the loading flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    items: Vec<TodoItem>,
    loading: bool,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn append(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    /// Drop every item with `id`. Returns the first match and where it was.
    pub fn remove(&mut self, id: &str) -> Option<(usize, TodoItem)> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.items.retain(|item| item.id != id);
        Some((index, removed))
    }

    /// Insert at `index`, or at the end if the list has since shrunk.
    pub fn insert_at(&mut self, index: usize, item: TodoItem) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn replace(&mut self, items: Vec<TodoItem>) {
        self.items = items;
    }
}

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A request the host must execute, then report back via `TodoStore::complete`.
#[derive(Debug, Clone)]
pub struct Command {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// User-facing report of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The list could not be fetched; the previous list is still shown.
    LoadFailed { error: NetworkError },
    /// Creating `item` failed and it was removed again.
    AddRolledBack { item: TodoItem, error: NetworkError },
    /// Deleting `id` failed; `recovery` says how the list is being repaired.
    DeleteFailed {
        id: String,
        recovery: DeleteRecovery,
        error: NetworkError,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed { error } => write!(f, "could not load todos: {error}"),
            Notice::AddRolledBack { item, error } => {
                write!(f, "could not add \"{}\": {error}", item.text)
            }
            Notice::DeleteFailed {
                id,
                recovery: DeleteRecovery::Reload,
                error,
            } => write!(f, "could not delete todo {id}: {error}; reloading"),
            Notice::DeleteFailed {
                id,
                recovery: DeleteRecovery::Restore,
                error,
            } => write!(f, "could not delete todo {id}: {error}; restored"),
        }
    }
}

/// What processing a response produced.
#[derive(Debug, Default)]
pub struct Completion {
    pub notice: Option<Notice>,
    /// A request triggered by the response, e.g. the reload after a failed delete.
    pub follow_up: Option<Command>,
}

/// A mutation the server confirmed while a load was in flight.
#[derive(Debug)]
enum Confirmed {
    Created(Ticket, TodoItem),
    Deleted(String),
}

#[derive(Debug)]
enum InFlight {
    Load,
    Create(TodoItem),
    Delete {
        id: String,
        removed: Option<(usize, TodoItem)>,
    },
}

#[derive(Debug)]
pub struct TodoStore {
    client: TodoClient,
    recovery: DeleteRecovery,
    ids: IdGenerator,
    state: TodoState,
    draft: String,
    in_flight: BTreeMap<Ticket, InFlight>,
    confirmed_during_load: Vec<Confirmed>,
    next_ticket: u64,
}

impl TodoStore {
    pub fn new(client: TodoClient, recovery: DeleteRecovery) -> Self {
        Self {
            client,
            recovery,
            ids: IdGenerator::new(),
            state: TodoState::new(),
            draft: String::new(),
            in_flight: BTreeMap::new(),
            confirmed_during_load: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoClient::new(&config.base_url), config.delete_recovery)
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn items(&self) -> &[TodoItem] {
        self.state.items()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Fetch the full list. Returns `None` while a load is already running.
    pub fn load(&mut self) -> Option<Command> {
        if self.state.is_loading() {
            debug!("load already in flight");
            return None;
        }
        self.state.set_loading(true);
        let request = self.client.build_list();
        Some(self.issue(InFlight::Load, request))
    }

    /// Append `text` immediately and ask the server to create it.
    ///
    /// Blank text is rejected without touching any state.
    pub fn add(&mut self, text: &str) -> Option<Command> {
        if text.trim().is_empty() {
            return None;
        }
        let item = TodoItem::new(self.ids.next_id(), text);
        let request = match self.client.build_create(&item) {
            Ok(request) => request,
            Err(error) => {
                warn!(id = %item.id, %error, "adding todo failed, keeping draft");
                return None;
            }
        };

        debug!(id = %item.id, "adding todo");
        self.state.append(item.clone());
        self.draft.clear();
        Some(self.issue(InFlight::Create(item), request))
    }

    /// Submit the form: add whatever is in the draft.
    pub fn submit(&mut self) -> Option<Command> {
        let text = self.draft.clone();
        self.add(&text)
    }

    /// Remove `id` immediately and ask the server to delete it.
    ///
    /// The request is issued even if the id is not in the local list.
    pub fn delete(&mut self, id: &str) -> Command {
        let removed = self.state.remove(id);
        debug!(id, present = removed.is_some(), "deleting todo");
        let request = self.client.build_remove(id);
        self.issue(
            InFlight::Delete {
                id: id.to_string(),
                removed,
            },
            request,
        )
    }

    /// Apply the outcome of a command's request.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, NetworkError>,
    ) -> Completion {
        let Some(op) = self.in_flight.remove(&ticket) else {
            debug!(?ticket, "ignoring completion for unknown ticket");
            return Completion::default();
        };

        match op {
            InFlight::Load => {
                self.state.set_loading(false);
                let confirmed = std::mem::take(&mut self.confirmed_during_load);
                match result.and_then(|response| self.client.parse_list(response)) {
                    Ok(items) => {
                        let items = self.reconcile(items, &confirmed);
                        debug!(count = items.len(), "loaded todos");
                        self.state.replace(items);
                        Completion::default()
                    }
                    Err(error) => {
                        warn!(%error, "fetching todos failed");
                        notice(Notice::LoadFailed { error })
                    }
                }
            }
            InFlight::Create(item) => {
                match result.and_then(|response| self.client.parse_create(response)) {
                    Ok(()) => {
                        if self.state.is_loading() {
                            self.confirmed_during_load.push(Confirmed::Created(ticket, item));
                        }
                        Completion::default()
                    }
                    Err(error) => {
                        warn!(id = %item.id, %error, "adding todo failed, rolling back");
                        self.state.remove(&item.id);
                        notice(Notice::AddRolledBack { item, error })
                    }
                }
            }
            InFlight::Delete { id, removed } => {
                let error = match result.and_then(|response| self.client.parse_remove(response)) {
                    Ok(()) => {
                        if self.state.is_loading() {
                            self.confirmed_during_load.push(Confirmed::Deleted(id));
                        }
                        return Completion::default();
                    }
                    Err(error) => error,
                };
                warn!(%id, %error, recovery = ?self.recovery, "deleting todo failed");
                let follow_up = match self.recovery {
                    DeleteRecovery::Reload => self.load(),
                    DeleteRecovery::Restore => {
                        if let Some((index, item)) = removed {
                            if !self.state.contains(&item.id) {
                                self.state.insert_at(index, item);
                            }
                        }
                        None
                    }
                };
                Completion {
                    notice: Some(Notice::DeleteFailed {
                        id,
                        recovery: self.recovery,
                        error,
                    }),
                    follow_up,
                }
            }
        }
    }

    fn issue(&mut self, op: InFlight, request: HttpRequest) -> Command {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.insert(ticket, op);
        Command { ticket, request }
    }

    /// Server list, minus pending or confirmed deletes, plus pending or
    /// confirmed creates it lacks (in issue order).
    fn reconcile(&self, server: Vec<TodoItem>, confirmed: &[Confirmed]) -> Vec<TodoItem> {
        let mut deleting: HashSet<&str> = HashSet::new();
        let mut creating: Vec<(Ticket, &TodoItem)> = Vec::new();

        for (ticket, op) in &self.in_flight {
            match op {
                InFlight::Delete { id, .. } => {
                    deleting.insert(id.as_str());
                }
                InFlight::Create(item) => creating.push((*ticket, item)),
                InFlight::Load => {}
            }
        }
        for change in confirmed {
            match change {
                Confirmed::Deleted(id) => {
                    deleting.insert(id.as_str());
                }
                Confirmed::Created(ticket, item) => creating.push((*ticket, item)),
            }
        }
        creating.sort_by_key(|(ticket, _)| *ticket);

        let mut items: Vec<TodoItem> = server
            .into_iter()
            .filter(|item| !deleting.contains(item.id.as_str()))
            .collect();

        for (_, pending) in creating {
            let known = items.iter().any(|item| item.id == pending.id);
            if !known && !deleting.contains(pending.id.as_str()) {
                items.push(pending.clone());
            }
        }
        items
    }
}

fn notice(notice: Notice) -> Completion {
    Completion {
        notice: Some(notice),
        follow_up: None,
    }
}
