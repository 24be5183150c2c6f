//! crediflow-common — Shared types and errors used across all Crediflow crates.

pub mod error;
pub mod record;

// Re-export commonly used types
pub use error::{CrediflowError, Result};
pub use record::{
    Education, Family, LoanApplication, AGE_RANGE, EXPERIENCE_RANGE, FEATURE_COUNT, FEATURE_NAMES,
};
