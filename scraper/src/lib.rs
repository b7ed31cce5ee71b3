pub mod archive;
pub mod date;
pub mod episode;
pub mod error;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::{extract_episodes, Archive, Extraction, DEFAULT_ARCHIVE_URL};
pub use crate::date::{parse_flexible_date, DateError, DateFormat};
pub use crate::episode::{Episode, Image};
pub use crate::error::{ArchiveError, EntryWarning, ImageProblem};
