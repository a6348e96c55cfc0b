//! Contract layer for the volunteer sign-up service.
//!
//! The seeding tool never touches the service's storage directly. Everything
//! goes through the record-creation API modeled here: typed request structs,
//! the [`SignupHost`] and [`OptionStore`] traits, and two host implementations
//! ([`MemoryHost`] for tests and dry runs, [`HttpHost`] for a running
//! companion service).

pub mod errors;
pub mod host;
pub mod http;
pub mod memory;
pub mod requests;
pub mod types;

pub use errors::HostError;
pub use host::{OptionStore, SignupHost};
pub use http::HttpHost;
pub use memory::MemoryHost;
pub use requests::{AccountRequest, SheetRequest, SignupRequest, TaskRequest};
pub use types::{Account, NO_DATE, Role, SheetType, Signup, Task, format_date};
