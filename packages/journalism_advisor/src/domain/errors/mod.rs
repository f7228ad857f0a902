pub mod advisor_error;

pub use advisor_error::{AdvisorError, AdvisorResult};
