use async_trait::async_trait;

use crate::error::Result;
use crate::models::Entry;

/// Source of candidate entries for a search
/// The directory data layer implements this; the search handler only reads from it
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Entries that may match a search asserting `object_class`
    ///
    /// `object_class` is lowercase, or empty when the filter names none; an empty
    /// value means every entry is a candidate.
    async fn candidates(&self, object_class: &str) -> Result<Vec<Entry>>;
}
