//! Read-modify-write operations over the stored idea collection and the
//! local voted-id set.
//!
//! Every mutating call reads the slot, changes it in memory and writes the
//! whole slot back. Nothing is cached between calls, and two processes
//! interleaving calls against the same storage can lose an update; callers
//! that need serialization must provide it (the CLI holds a
//! [`DataDirLock`](crate::io::lock::DataDirLock) around each write command).

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::io::kv_store::{IDEAS_KEY, KeyValueStore, StorageError, VOTED_IDS_KEY};
use crate::model::idea::{Idea, IdeaDraft, IdeaField, SortKey};
use crate::ops::rating::{RatingSource, feedback_for};

/// Error type for idea operations
#[derive(Debug, thiserror::Error)]
pub enum IdeaError {
    #[error("please fill all fields (missing: {})", join_fields(.missing))]
    Validation { missing: Vec<IdeaField> },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_fields(fields: &[IdeaField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of an upvote that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was counted; carries the updated collection in stored order.
    Recorded(Vec<Idea>),
    /// This installation already voted for the idea. Nothing changed.
    AlreadyVoted,
    /// No idea has that id. Nothing changed; carries the collection as stored.
    UnknownIdea(Vec<Idea>),
}

/// Idea collection and voted-id set over an injected key-value store.
#[derive(Debug)]
pub struct IdeaStore<S> {
    storage: S,
}

impl<S: KeyValueStore> IdeaStore<S> {
    pub fn new(storage: S) -> Self {
        IdeaStore { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// All stored ideas in the requested order. Unreadable storage is
    /// logged and treated as empty.
    pub fn list_ideas(&self, sort: SortKey) -> Vec<Idea> {
        let mut ideas = self.load_ideas_or_empty();
        sort_ideas(&mut ideas, sort);
        ideas
    }

    /// The `n` most-voted ideas; ties keep stored order.
    pub fn top_voted(&self, n: usize) -> Vec<Idea> {
        let mut ideas = self.list_ideas(SortKey::Votes);
        ideas.truncate(n);
        ideas
    }

    pub fn get_idea(&self, id: &str) -> Option<Idea> {
        self.load_ideas_or_empty().into_iter().find(|i| i.id == id)
    }

    /// Ids this installation has voted for. Unreadable storage is logged
    /// and treated as empty.
    pub fn voted_ids(&self) -> Vec<String> {
        match read_slot::<Vec<String>>(&self.storage, VOTED_IDS_KEY) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "could not load voted ids");
                Vec::new()
            }
        }
    }

    /// Validate, rate and append a new idea. Returns the stored record.
    pub fn create_idea<R: RatingSource + ?Sized>(
        &mut self,
        draft: &IdeaDraft,
        ratings: &mut R,
    ) -> Result<Idea, IdeaError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(IdeaError::Validation { missing });
        }

        let mut ideas = read_slot::<Vec<Idea>>(&self.storage, IDEAS_KEY)?;
        let rating = ratings.draw_rating();
        let idea = Idea {
            id: next_id(&ideas, chrono::Utc::now().timestamp_millis()),
            startup_name: draft.startup_name.clone(),
            tagline: draft.tagline.clone(),
            description: draft.description.clone(),
            rating,
            feedback: feedback_for(rating).to_string(),
            votes: 0,
        };
        ideas.push(idea.clone());
        self.write_logged(IDEAS_KEY, &ideas)?;
        debug!(id = %idea.id, rating, "created idea");
        Ok(idea)
    }

    /// Count one vote from this installation for `id`.
    pub fn upvote_idea(&mut self, id: &str) -> Result<VoteOutcome, IdeaError> {
        let mut voted = read_slot::<Vec<String>>(&self.storage, VOTED_IDS_KEY)?;
        if voted.iter().any(|v| v == id) {
            return Ok(VoteOutcome::AlreadyVoted);
        }

        let mut ideas = read_slot::<Vec<Idea>>(&self.storage, IDEAS_KEY)?;
        let Some(pos) = ideas.iter().position(|i| i.id == id) else {
            debug!(id, "upvote for unknown idea ignored");
            return Ok(VoteOutcome::UnknownIdea(ideas));
        };
        ideas[pos].votes = ideas[pos].votes.saturating_add(1);

        self.write_logged(IDEAS_KEY, &ideas)?;
        voted.push(id.to_string());
        self.write_logged(VOTED_IDS_KEY, &voted)?;
        Ok(VoteOutcome::Recorded(ideas))
    }

    /// Remove the idea with `id` if present and return what remains.
    /// The voted-id set is left alone.
    pub fn delete_idea(&mut self, id: &str) -> Result<Vec<Idea>, IdeaError> {
        let mut ideas = read_slot::<Vec<Idea>>(&self.storage, IDEAS_KEY)?;
        let before = ideas.len();
        ideas.retain(|i| i.id != id);
        if ideas.len() == before {
            debug!(id, "delete for unknown idea");
        }
        self.write_logged(IDEAS_KEY, &ideas)?;
        Ok(ideas)
    }

    fn load_ideas_or_empty(&self) -> Vec<Idea> {
        match read_slot::<Vec<Idea>>(&self.storage, IDEAS_KEY) {
            Ok(ideas) => ideas,
            Err(e) => {
                warn!(error = %e, "could not load ideas");
                Vec::new()
            }
        }
    }

    fn write_logged<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        write_slot(&mut self.storage, key, value).inspect_err(|e| {
            warn!(key, error = %e, "write failed");
        })
    }
}

/// Stable descending sort by the chosen key.
pub fn sort_ideas(ideas: &mut [Idea], sort: SortKey) {
    match sort {
        SortKey::Rating => ideas.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Votes => ideas.sort_by(|a, b| b.votes.cmp(&a.votes)),
    }
}

/// Millisecond timestamp id, bumped past any id already taken.
fn next_id(ideas: &[Idea], now_millis: i64) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !ideas.iter().any(|i| i.id == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Decode a JSON slot. An absent slot is the type's default.
pub(crate) fn read_slot<T: DeserializeOwned + Default>(
    storage: &impl KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    match storage.get(key)? {
        Some(text) => serde_json::from_str(&text).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            source: e,
        }),
        None => Ok(T::default()),
    }
}

pub(crate) fn write_slot<T: Serialize + ?Sized>(
    storage: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        source: e,
    })?;
    storage.set(key, &text)
}
