use super::error::FilterError;
use super::types::{SortDirection, SortKey};

/// An entity that can be ordered by one of a fixed set of external labels.
pub trait Sortable {
    /// Labels accepted in the `sortBy` parameter, in the order they are reported.
    const SORT_LABELS: &'static [&'static str];

    /// Key for `label`. Only called with a member of `SORT_LABELS`.
    fn sort_key(&self, label: &str) -> Option<SortKey>;
}

/// Validated `sortBy` + `order` pair for entity type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub label: &'static str,
    pub direction: SortDirection,
}

pub struct FilterOrder;

impl FilterOrder {
    /// The order token is checked before the label, so a bad order is reported
    /// whatever the label.
    pub fn validate_and_parse<T: Sortable>(sort_by: &str, order: &str) -> Result<FilterOrderInfo, FilterError> {
        let direction: SortDirection = order.parse()?;
        let label = T::SORT_LABELS
            .iter()
            .copied()
            .find(|label| *label == sort_by)
            .ok_or(FilterError::InvalidSortField { allowed: T::SORT_LABELS })?;

        Ok(FilterOrderInfo { label, direction })
    }

    /// Stable sort: entities with equal keys keep their input order in both directions.
    pub fn apply<T: Sortable>(items: Vec<T>, info: FilterOrderInfo) -> Vec<T> {
        let mut keyed: Vec<(Option<SortKey>, T)> = items
            .into_iter()
            .map(|item| (item.sort_key(info.label), item))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| info.direction.apply(a.cmp(b)));
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    pub fn sort<T: Sortable>(items: Vec<T>, sort_by: &str, order: &str) -> Result<Vec<T>, FilterError> {
        let info = Self::validate_and_parse::<T>(sort_by, order)?;
        Ok(Self::apply(items, info))
    }
}
