use uuid::Uuid;

use crate::tasks::dto::TaskQuery;
use crate::tasks::repo::{Category, Status};

/// Predicate selecting the tasks a listing should return. Owner scoping is
/// always present; the remaining arms are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFilter {
    pub owner: Uuid,
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<Status>,
}

impl TaskFilter {
    /// Build the predicate from query parameters. Absent, blank, or
    /// unrecognized parameters add no constraint; `category=all` is the
    /// client's way of asking for every category.
    pub fn from_query(owner: Uuid, query: &TaskQuery) -> Self {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let category = query
            .category
            .as_deref()
            .filter(|c| *c != "all")
            .and_then(Category::parse);
        let status = query.status.as_deref().and_then(Status::parse);
        Self {
            owner,
            search,
            category,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: Option<&str>, category: Option<&str>, status: Option<&str>) -> TaskQuery {
        TaskQuery {
            search: search.map(String::from),
            category: category.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn empty_query_scopes_by_owner_only() {
        let owner = Uuid::new_v4();
        let filter = TaskFilter::from_query(owner, &query(None, None, None));
        assert_eq!(filter.owner, owner);
        assert_eq!(filter.search, None);
        assert_eq!(filter.category, None);
        assert_eq!(filter.status, None);
    }

    #[test]
    fn present_parameters_constrain() {
        let filter = TaskFilter::from_query(
            Uuid::new_v4(),
            &query(Some("milk"), Some("shopping"), Some("pending")),
        );
        assert_eq!(filter.search.as_deref(), Some("milk"));
        assert_eq!(filter.category, Some(Category::Shopping));
        assert_eq!(filter.status, Some(Status::Pending));
    }

    #[test]
    fn category_all_means_no_constraint() {
        let filter = TaskFilter::from_query(Uuid::new_v4(), &query(None, Some("all"), None));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn unrecognized_values_are_dropped() {
        let filter = TaskFilter::from_query(
            Uuid::new_v4(),
            &query(None, Some("groceries"), Some("done")),
        );
        assert_eq!(filter.category, None);
        assert_eq!(filter.status, None);
    }

    #[test]
    fn blank_search_is_omitted_and_trimmed() {
        let filter = TaskFilter::from_query(Uuid::new_v4(), &query(Some("   "), None, None));
        assert_eq!(filter.search, None);

        let filter = TaskFilter::from_query(Uuid::new_v4(), &query(Some("  milk "), None, None));
        assert_eq!(filter.search.as_deref(), Some("milk"));
    }
}
