//! User store
//!
//! The store is the single owner of all user records. Callers get clones
//! back, so mutating a returned [`User`] never changes what is stored.
//!
//! Every implementation must make operations on the same email linearizable:
//! two concurrent `insert`s of one email never both succeed, and two
//! concurrent `remove`s never both return the record.
//!
//! # Example
//!
//! ```
//! use userbook_shared::models::User;
//! use userbook_shared::store::{InMemoryUserStore, StoreError, UserStore};
//!
//! let store = InMemoryUserStore::new();
//! store.insert(User::new("a@x.com", Some("A"))).unwrap();
//!
//! let dup = store.insert(User::new("a@x.com", Some("Other")));
//! assert!(matches!(dup, Err(StoreError::Conflict { .. })));
//! assert_eq!(store.get("a@x.com").unwrap().name.as_deref(), Some("A"));
//! ```

pub mod error;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryUserStore;

use crate::models::User;

/// Storage backend for user records, keyed by email
pub trait UserStore: Send + Sync {
    /// Stores `user` under `user.email` if no record exists for that email
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if the email is taken. The stored record is
    /// left untouched.
    fn insert(&self, user: User) -> StoreResult<User>;

    /// Returns the record stored under `email`
    fn get(&self, email: &str) -> StoreResult<User>;

    /// Replaces the record stored under `email` with `user`
    ///
    /// The record stays keyed by `email` even if `user.email` differs.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if nothing is stored under `email`. Nothing is
    /// inserted in that case.
    fn replace(&self, email: &str, user: User) -> StoreResult<User>;

    /// Removes and returns the record stored under `email`
    fn remove(&self, email: &str) -> StoreResult<User>;

    /// Number of stored records
    ///
    /// Not a consistent snapshot while writers are active.
    fn len(&self) -> StoreResult<usize>;

    /// Whether no records are stored
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
