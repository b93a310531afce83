use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::error::FilterError;

pub const DEFAULT_SORT_BY: &str = "timestamp";
pub const DEFAULT_ORDER: &str = "asc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Only the exact lowercase tokens are accepted.
impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(FilterError::InvalidOrder),
        }
    }
}

/// Raw `sortBy` / `order` query parameters of a list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl SortParams {
    pub fn new(sort_by: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            sort_by: Some(sort_by.into()),
            order: Some(order.into()),
        }
    }

    pub fn sort_by(&self) -> &str {
        self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY)
    }

    pub fn order(&self) -> &str {
        self.order.as_deref().unwrap_or(DEFAULT_ORDER)
    }
}

/// Comparable value extracted from an entity for one sort label.
#[derive(Debug, Clone)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Id(Uuid),
    Time(DateTime<Utc>),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Text(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Id(_) => 2,
            SortKey::Time(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Id(a), SortKey::Id(b)) => a.cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Repository-side filter for ware listings. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WareFilter {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub brand: Option<String>,
}

impl WareFilter {
    pub fn by_user(user_id: Uuid) -> Self {
        Self { user_id: Some(user_id), ..Default::default() }
    }
}

/// Repository-side filter for deposit and withdraw listings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementFilter {
    pub user_id: Option<Uuid>,
    pub ware_id: Option<Uuid>,
}

impl MovementFilter {
    pub fn by_user(user_id: Uuid) -> Self {
        Self { user_id: Some(user_id), ware_id: None }
    }

    pub fn by_ware(ware_id: Uuid) -> Self {
        Self { user_id: None, ware_id: Some(ware_id) }
    }
}
