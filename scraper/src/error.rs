use std::num::ParseIntError;

use reqwest::StatusCode;
use thiserror::Error;

use crate::date::DateError;

/// Failures that abort a whole listing pass.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid archive source url `{url}`: {source}")]
    InvalidSource {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("http GET request failed: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("unexpected http status {status}")]
    UpstreamStatus { status: StatusCode },

    #[error("failed to read html: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Problems local to a single archive entry. The entry is dropped, except for
/// `InvalidImage` where only the artwork is.
#[derive(Debug, Error)]
pub enum EntryWarning {
    #[error("text not found in article element at position {position}")]
    MissingName { position: usize },

    #[error("href not found on link at position {position} with name `{name}`")]
    MissingHref { position: usize, name: String },

    #[error("href `{href}` at position {position} with name `{name}` is not a valid url")]
    InvalidHref {
        position: usize,
        name: String,
        href: String,
    },

    #[error("failed to parse date for `{name}` at position {position}: {source}")]
    InvalidDate {
        position: usize,
        name: String,
        #[source]
        source: DateError,
    },

    #[error("dropped image for `{name}` at position {position}: {problem}")]
    InvalidImage {
        position: usize,
        name: String,
        problem: ImageProblem,
    },
}

impl EntryWarning {
    /// Document position of the article the warning is about.
    pub fn position(&self) -> usize {
        match self {
            EntryWarning::MissingName { position }
            | EntryWarning::MissingHref { position, .. }
            | EntryWarning::InvalidHref { position, .. }
            | EntryWarning::InvalidDate { position, .. }
            | EntryWarning::InvalidImage { position, .. } => *position,
        }
    }

    /// Whether the entry itself was skipped.
    pub fn skips_entry(&self) -> bool {
        !matches!(self, EntryWarning::InvalidImage { .. })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ImageProblem {
    #[error("missing `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("`{attribute}` value `{value}` is not an integer: {source}")]
    InvalidDimension {
        attribute: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("`{0}` must be greater than zero")]
    ZeroDimension(&'static str),
}
