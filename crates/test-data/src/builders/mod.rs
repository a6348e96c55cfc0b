//! Fluent builder APIs for test scenarios.
//!
//! The [`ScenarioBuilder`] provides a convenient way to run the full
//! generation pipeline (users, sheets, tasks, signups) in one call.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioResult};
