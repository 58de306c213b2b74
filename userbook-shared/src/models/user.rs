//! User model
//!
//! A user is identified by its email address. Everything else about a user
//! is profile data that the store keeps as-is: the optional display `name`
//! plus any extra JSON attributes the client sends, which are collected into
//! `profile` and serialized back at the top level.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "email": "jane@example.com",
//!   "name": "Jane Doe",
//!   "team": "platform"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use userbook_shared::models::user::User;
//! use validator::Validate;
//!
//! let user = User::new("jane@example.com", Some("Jane Doe"));
//! assert!(user.validate().is_ok());
//! assert_eq!(user.email, "jane@example.com");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Email address, the unique key of the record
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    /// Optional display name, stored as given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Additional profile attributes, opaque to the service
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    /// Creates a user with no extra profile attributes
    pub fn new(email: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            email: email.into(),
            name: name.map(str::to_string),
            profile: Map::new(),
        }
    }

    /// Adds a profile attribute, replacing any previous value under `key`
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }

    /// Returns true if the record's own email matches `key`
    pub fn is_keyed_by(&self, key: &str) -> bool {
        self.email == key
    }
}
