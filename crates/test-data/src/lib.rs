//! Test data generation for the volunteer sign-up service.
//!
//! This crate creates realistic accounts, sign-up sheets, tasks, and signups
//! through an injected host, and keeps a ledger of everything it made so the
//! whole batch can be inspected or deleted later.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let host = MemoryHost::new();
//! let mut rng = rand::thread_rng();
//!
//! let result = ScenarioBuilder::new()
//!     .with_sheets(SheetOptions {
//!         preset: "carnival".into(),
//!         count: 2,
//!         ..Default::default()
//!     })
//!     .run(&host, &mut rng)
//!     .await;
//! ```

pub mod builders;
pub mod config;
pub mod data;
pub mod generators;
pub mod tracker;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioResult};
    pub use crate::config::{SheetOptions, SignupOptions, UserCounts};
    pub use crate::generators::{
        Operator, SheetGenerator, SignupGenerator, TEST_PASSWORD, UserGenerator,
    };
    pub use crate::tracker::{TrackedSummary, Tracker};
    pub use signups::{HttpHost, MemoryHost, OptionStore, SheetType, SignupHost};
}
