use crate::database::models::Resource;
use crate::filter::{FilterOrder, SortParams, Sortable};
use crate::services::error::{ServiceError, ServiceResult};

/// What a list request was narrowed by; names the empty-result message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    User,
    Ware,
    Filters,
}

impl ListScope {
    fn noun(self) -> &'static str {
        match self {
            ListScope::User => "user",
            ListScope::Ware => "ware",
            ListScope::Filters => "filters",
        }
    }
}

/// `"There are no deposits for such ware"`
pub fn empty_message<T: Resource>(scope: ListScope) -> String {
    format!("There are no {} for such {}", T::PLURAL, scope.noun())
}

/// Turns a repository result into a list response.
///
/// An empty result is `NotFound` regardless of the sort parameters; only a
/// non-empty result has its `sortBy` / `order` validated and applied.
pub fn sorted_or_not_found<T>(items: Vec<T>, scope: ListScope, params: &SortParams) -> ServiceResult<Vec<T>>
where
    T: Resource + Sortable,
{
    if items.is_empty() {
        return Err(ServiceError::NotFound(empty_message::<T>(scope)));
    }

    Ok(FilterOrder::sort(items, params.sort_by(), params.order())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Deposit, Ware, Withdraw};

    #[test]
    fn empty_messages_per_scope() {
        assert_eq!(empty_message::<Ware>(ListScope::User), "There are no wares for such user");
        assert_eq!(empty_message::<Deposit>(ListScope::Ware), "There are no deposits for such ware");
        assert_eq!(empty_message::<Withdraw>(ListScope::Filters), "There are no withdraws for such filters");
    }

    #[test]
    fn empty_list_wins_over_bad_params() {
        let params = SortParams::new("bogus", "sideways");
        let err = sorted_or_not_found(Vec::<Ware>::new(), ListScope::User, &params).unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "There are no wares for such user"));
    }
}
