pub mod domain;
pub mod error;
pub mod export;
pub mod format;
pub mod sort;

pub use domain::*;
pub use error::CoreError;
