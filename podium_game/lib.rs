pub mod models;
pub mod pagination;
pub mod ranking;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
