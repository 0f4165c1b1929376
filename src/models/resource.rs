//! Teachers and labs.
//!
//! Teachers are the people who take sessions; each teaches a set of
//! subjects to both divisions. Labs are rooms with capacity one batch
//! per slot.

use serde::{Deserialize, Serialize};

/// A teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Names of subjects this teacher claims.
    pub subjects: Vec<String>,
}

impl Teacher {
    /// Creates a teacher with no subjects.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: Vec::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a taught subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Whether this teacher claims `subject`.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Display form `"Name (ID)"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// A practical lab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lab {
    /// Unique lab name.
    pub name: String,
}

impl Lab {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
