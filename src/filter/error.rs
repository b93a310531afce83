use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Order should be: [asc, desc]")]
    InvalidOrder,

    #[error("Sorting should be: [{}]", .allowed.join(", "))]
    InvalidSortField { allowed: &'static [&'static str] },
}
