//! Entity generators for test data.
//!
//! This module provides generators for creating test records through a host:
//! - [`UserGenerator`]: Create test accounts across the volunteer roles
//! - [`SheetGenerator`]: Create sign-up sheets with tasks from preset scenarios
//! - [`SignupGenerator`]: Fill tasks on tracked sheets with signups

pub mod sheet;
pub mod signup;
pub mod user;

pub use sheet::{CreatedSheet, Operator, SheetBatch, SheetGenerator};
pub use signup::{SignupBatch, SignupGenerator};
pub use user::{CreatedAccount, TEST_PASSWORD, UserBatch, UserGenerator};
