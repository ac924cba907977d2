//! The [`Resource`] trait: what the generic list/get/create/update/delete
//! contract needs to know about an entity type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;
use warehouse_core::types::DbId;

/// A persisted entity served through the generic resource contract.
///
/// Implementors supply the key accessor and the search predicate; everything
/// else about list/get/create/update/delete is shared.
pub trait Resource:
    Clone + Serialize + DeserializeOwned + Validate + Send + Sync + Unpin + 'static
{
    /// Entity name used in errors and log events (e.g. `"Category"`).
    const NAME: &'static str;

    /// Collection segment under `/api` (e.g. `"categories"`).
    const COLLECTION: &'static str;

    /// Columns scanned by the list `search` filter.
    const SEARCH_COLUMNS: &'static [&'static str];

    /// The surrogate key.
    fn id(&self) -> DbId;

    /// Overwrite the key; used by stores that assign ids themselves.
    fn set_id(&mut self, id: DbId);

    /// Field values the `search` filter is matched against, in the same order
    /// as [`Resource::SEARCH_COLUMNS`].
    fn search_fields(&self) -> Vec<&str>;

    /// Literal, case-sensitive substring match over [`Resource::search_fields`].
    /// An empty needle matches everything.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.search_fields().iter().any(|f| f.contains(needle))
    }
}

/// Normalize a raw `search` query value: absent and empty both mean "no filter".
pub fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_is_no_filter() {
        assert_eq!(search_term(None), None);
        assert_eq!(search_term(Some("")), None);
        assert_eq!(search_term(Some("cola")), Some("cola"));
    }
}
