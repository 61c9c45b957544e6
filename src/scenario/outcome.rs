use std::fmt;

use crate::filesystem::Stat;

/// What a successful [`Operation`](super::Operation) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(String),
    Written(String),
    Content(String),
    Entries(Vec<String>),
    Stat(Stat),
    Removed(String),
    Moved { from: String, to: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created(path) => write!(f, "created {path}"),
            Outcome::Written(path) => write!(f, "wrote {path}"),
            Outcome::Content(content) => write!(f, "{content:?}"),
            Outcome::Entries(entries) => write!(f, "[{}]", entries.join(", ")),
            Outcome::Stat(stat) if stat.is_directory() => write!(f, "directory"),
            Outcome::Stat(_) => write!(f, "file"),
            Outcome::Removed(path) => write!(f, "removed {path}"),
            Outcome::Moved { from, to } => write!(f, "moved {from} -> {to}"),
        }
    }
}
