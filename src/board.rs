//! Board state management.
//!
//! `BoardState` owns the ordered task list and mirrors it into one slot of a
//! [`KeyValueStore`] after every mutation. Reads are pure projections over the
//! list; observers registered with [`BoardState::subscribe`] receive the new
//! snapshot whenever it changes.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{KanbanError, Result};
use crate::fields::Status;
use crate::store::KeyValueStore;
use crate::task::{self, Task, DEFAULT_TAG};
use crate::util::short_id;

/// Slot holding the encoded board.
pub const STORAGE_KEY: &str = "kanbanTasks";

/// Handle returned by [`BoardState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&[Task])>;

/// Result of decoding the persisted slot.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    Restored(Vec<Task>),
    Absent,
    Corrupt(String),
}

impl LoadOutcome {
    /// The tasks to start with; anything but a clean restore is an empty board.
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            LoadOutcome::Restored(tasks) => tasks,
            LoadOutcome::Absent | LoadOutcome::Corrupt(_) => Vec::new(),
        }
    }
}

/// Decode the raw slot contents into a board.
pub fn decode_board(raw: Option<&str>) -> LoadOutcome {
    let Some(raw) = raw else {
        return LoadOutcome::Absent;
    };
    let tasks: Vec<Task> = match serde_json::from_str(raw) {
        Ok(tasks) => tasks,
        Err(e) => return LoadOutcome::Corrupt(e.to_string()),
    };
    let mut seen = HashSet::new();
    if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id.as_str())) {
        return LoadOutcome::Corrupt(format!("duplicate task id {}", dup.id));
    }
    LoadOutcome::Restored(tasks)
}

/// Encode the whole board for storage.
pub fn encode_board(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Text-substring and tag-equality filter, both case-insensitive.
/// Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub text: String,
    pub tag: String,
}

impl TaskFilter {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tag.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let text_ok = self.text.is_empty()
            || task.text.to_lowercase().contains(&self.text.to_lowercase());
        let tag_ok = self.tag.is_empty() || task.tag.to_lowercase() == self.tag.to_lowercase();
        text_ok && tag_ok
    }
}

/// Per-column cardinalities of a filtered board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Done => self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

/// Authoritative in-memory board mirrored to a store slot.
pub struct BoardState<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> BoardState<S> {
    /// Restore the board from `store`, or start empty when the slot is
    /// missing, unreadable or corrupt.
    pub fn initialize(store: S) -> Self {
        let raw = match store.get(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "could not read board slot, starting empty");
                None
            }
        };
        let outcome = decode_board(raw.as_deref());
        match &outcome {
            LoadOutcome::Restored(tasks) => tracing::debug!(count = tasks.len(), "board restored"),
            LoadOutcome::Absent => tracing::debug!("no saved board, starting empty"),
            LoadOutcome::Corrupt(reason) => {
                tracing::warn!(%reason, "saved board is corrupt, starting empty")
            }
        }
        Self {
            store,
            tasks: outcome.into_tasks(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a new `Todo` task. Blank text is ignored and yields `Ok(None)`;
    /// a blank tag becomes `"General"`.
    pub fn add_task(
        &mut self,
        text: &str,
        tag: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring task with empty text");
            return Ok(None);
        }
        let tag = tag
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TAG);
        let id = self.fresh_id();
        self.tasks.push(Task {
            id: id.clone(),
            text: text.to_string(),
            tag: tag.to_string(),
            due_date,
            status: Status::Todo,
        });
        tracing::debug!(id = %id, tag, "task added");
        self.commit()?;
        Ok(Some(id))
    }

    /// Set the status of task `id`. Unknown ids change nothing; the board is
    /// written either way. Returns whether a task was updated.
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<bool> {
        let changed = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        };
        tracing::debug!(id, %status, changed, "status update");
        self.commit()?;
        Ok(changed)
    }

    /// Remove task `id` if present. Returns whether a task was removed.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        tracing::debug!(id, removed, "task delete");
        self.commit()?;
        Ok(removed)
    }

    /// Tasks in `status` matching both filters, in insertion order.
    pub fn query_by_status(&self, status: Status, text_filter: &str, tag_filter: &str) -> Vec<&Task> {
        self.query(status, &TaskFilter::new(text_filter, tag_filter))
    }

    pub fn query(&self, status: Status, filter: &TaskFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == status && filter.matches(t))
            .collect()
    }

    /// Column sizes of the filtered board.
    pub fn counts(&self, text_filter: &str, tag_filter: &str) -> StatusCounts {
        let filter = TaskFilter::new(text_filter, tag_filter);
        let mut counts = StatusCounts::default();
        for t in self.tasks.iter().filter(|t| filter.matches(t)) {
            match t.status {
                Status::Todo => counts.todo += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Done => counts.done += 1,
            }
        }
        counts
    }

    pub fn is_overdue(&self, task: &Task, now: DateTime<Utc>) -> bool {
        task::is_overdue(task, now)
    }

    /// Distinct tags (case-insensitive) with their task counts, sorted.
    pub fn tags(&self) -> Vec<(String, usize)> {
        let mut by_key: BTreeMap<String, (String, usize)> = BTreeMap::new();
        for t in &self.tasks {
            by_key
                .entry(t.tag.to_lowercase())
                .or_insert_with(|| (t.tag.clone(), 0))
                .1 += 1;
        }
        by_key.into_values().collect()
    }

    /// Resolve a user-typed identifier: an exact id wins outright, otherwise
    /// id prefixes and case-insensitive exact text must agree on one task.
    pub fn resolve(&self, identifier: &str) -> Result<&Task> {
        let ident = identifier.trim();
        if let Some(t) = self.get(ident) {
            return Ok(t);
        }
        let not_found = || KanbanError::TaskNotFound {
            identifier: ident.to_string(),
        };
        if ident.is_empty() {
            return Err(not_found());
        }

        // A prefix hit and a text hit on different tasks is ambiguous.
        let lowered = ident.to_lowercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.starts_with(ident) || t.text.to_lowercase() == lowered)
            .collect();

        match matches.as_slice() {
            [] => Err(not_found()),
            [only] => Ok(*only),
            many => Err(KanbanError::AmbiguousTask {
                identifier: ident.to_string(),
                candidates: many
                    .iter()
                    .map(|t| format!("{} ({})", short_id(&t.id), t.text))
                    .collect(),
            }),
        }
    }

    /// Register an observer called with the board after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Task]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Write the whole board, then notify observers. Observers see the new
    /// state even when the write fails.
    fn commit(&mut self) -> Result<()> {
        let written = encode_board(&self.tasks).and_then(|data| self.store.set(STORAGE_KEY, &data));
        if let Err(e) = &written {
            tracing::warn!(error = %e, "failed to persist board");
        }
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.tasks);
        }
        written
    }
}
