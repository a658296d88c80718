//! Error types for question bank loading.

use crate::models::Section;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BankError.
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors raised while reading or validating a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{section:?}: duplicate question id {id}")]
    DuplicateId { section: Section, id: u32 },

    #[error("{section:?} question {id}: empty expected answer")]
    EmptyAnswer { section: Section, id: u32 },

    #[error("{section:?} question {id}: {parts} text segments for {answers} answers")]
    SegmentMismatch {
        section: Section,
        id: u32,
        parts: usize,
        answers: usize,
    },

    #[error("{section:?} question {id}: expected exactly one blank marker, found {found}")]
    BlankMarker { section: Section, id: u32, found: usize },

    #[error("{section:?} question {id}: answer {answer:?} is not one of the options")]
    UnknownOption {
        section: Section,
        id: u32,
        answer: String,
    },

    #[error("verb row {id} hides no fields")]
    NoHiddenFields { id: u32 },

    #[error("story line {id}: {hints} hints for {blanks} blanks")]
    TooManyHints { id: u32, hints: usize, blanks: usize },
}
