//! Identifiers for columns and tasks
//!
//! ID Format:
//! - Hashed column IDs: `c-{7-char-hash}` (e.g., `c-7f2b4c1`)
//! - Hashed task IDs: `t-{7-char-hash}` (e.g., `t-9d3e5f2`)
//! - Sequential IDs: `c1`, `c2`, ... and `t1`, `t2`, ...
//!
//! Column and task IDs never share a prefix, so a drag target can be compared
//! against the active entity without knowing its kind first.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("ID must not be empty")]
    Empty,

    #[error("ID must not contain whitespace, got '{0}'")]
    Whitespace(String),
}

/// The two kinds of entity that live on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Column,
    Task,
}

impl EntityKind {
    /// Short prefix used when rendering generated IDs
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Column => "c",
            EntityKind::Task => "t",
        }
    }
}

/// Opaque, comparable identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(IdError::Whitespace(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Id {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Id {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Source of fresh identifiers, called exactly once per new column or task
pub trait IdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> Id;
}

/// Generates a 7-character hash from kind, sequence and timestamp
fn generate_hash(kind: EntityKind, sequence: u64, timestamp: DateTime<Utc>) -> String {
    let input = format!(
        "{}:{}:{}",
        kind.prefix(),
        sequence,
        timestamp.timestamp_nanos_opt().unwrap_or(0)
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Hash-based generator producing `c-{hash}` / `t-{hash}` IDs
///
/// Every issued ID is remembered; a collision bumps the sequence and hashes again.
#[derive(Debug, Default)]
pub struct HashIdGenerator {
    sequence: u64,
    issued: HashSet<Id>,
}

impl HashIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for HashIdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> Id {
        loop {
            self.sequence += 1;
            let hash = generate_hash(kind, self.sequence, Utc::now());
            let id = Id(format!("{}-{}", kind.prefix(), hash));
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Deterministic generator producing `c1, c2, ...` and `t1, t2, ...`
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    columns: u64,
    tasks: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> Id {
        let n = match kind {
            EntityKind::Column => {
                self.columns += 1;
                self.columns
            }
            EntityKind::Task => {
                self.tasks += 1;
                self.tasks
            }
        };
        Id(format!("{}{}", kind.prefix(), n))
    }
}
