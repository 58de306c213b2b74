//! Sharded in-memory user store
//!
//! [`InMemoryUserStore`] spreads records over a fixed number of shards, each
//! a `HashMap` behind its own `RwLock`. The shard for an email is chosen by
//! hashing the email with a `RandomState` fixed at construction, so every
//! operation on one email goes through the same lock. That lock is what
//! makes same-key operations linearizable; operations on emails in
//! different shards never contend.
//!
//! Data is lost when the store is dropped.

use std::collections::hash_map::{Entry, HashMap, RandomState};
use std::hash::BuildHasher;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::UserStore;
use crate::models::User;

/// Default number of shards
pub const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<HashMap<String, User>>;

/// An in-memory implementation of [`UserStore`]
#[derive(Debug)]
pub struct InMemoryUserStore {
    shards: Box<[Shard]>,
    hasher: RandomState,
}

impl InMemoryUserStore {
    /// Creates an empty store with [`DEFAULT_SHARDS`] shards
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Creates an empty store with `shards` shards
    ///
    /// A shard count of zero is treated as one.
    pub fn with_shards(shards: usize) -> Self {
        let shards = shards.max(1);
        debug!(shards, "Creating in-memory user store");

        Self {
            shards: (0..shards).map(|_| RwLock::new(HashMap::new())).collect(),
            hasher: RandomState::new(),
        }
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, email: &str) -> &Shard {
        let index = (self.hasher.hash_one(email) % self.shards.len() as u64) as usize;
        &self.shards[index]
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(err.to_string())
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> StoreResult<User> {
        let mut shard = self.shard(&user.email).write().map_err(poisoned)?;

        match shard.entry(user.email.clone()) {
            Entry::Occupied(entry) => Err(StoreError::conflict(entry.key())),
            Entry::Vacant(entry) => Ok(entry.insert(user).clone()),
        }
    }

    fn get(&self, email: &str) -> StoreResult<User> {
        let shard = self.shard(email).read().map_err(poisoned)?;
        shard
            .get(email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(email))
    }

    fn replace(&self, email: &str, user: User) -> StoreResult<User> {
        let mut shard = self.shard(email).write().map_err(poisoned)?;

        match shard.get_mut(email) {
            Some(current) => {
                *current = user;
                Ok(current.clone())
            }
            None => Err(StoreError::not_found(email)),
        }
    }

    fn remove(&self, email: &str) -> StoreResult<User> {
        let mut shard = self.shard(email).write().map_err(poisoned)?;
        shard.remove(email).ok_or_else(|| StoreError::not_found(email))
    }

    fn len(&self) -> StoreResult<usize> {
        let mut total = 0;
        for shard in self.shards.iter() {
            total += shard.read().map_err(poisoned)?.len();
        }
        Ok(total)
    }
}
