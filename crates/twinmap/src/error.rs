use thiserror::Error;

/// Returned by the checked pair accessors when the queried key is absent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no entry exists")]
pub struct KeyNotFound;
