//! Host-facing traits.
//!
//! [`SignupHost`] is the record-creation contract the seeding tool drives;
//! [`OptionStore`] is the platform's generic key-value store, used for the
//! tracker's single persisted record. Both are object-safe so generators can
//! run against any host implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::HostError;
use crate::requests::{AccountRequest, SheetRequest, SignupRequest, TaskRequest};
use crate::types::{Account, Role, Signup, Task};

/// Record-creation and query API of the sign-up service.
#[async_trait]
pub trait SignupHost: Send + Sync {
    // Accounts ---------------------------------------------------------------

    async fn add_account(&self, req: &AccountRequest) -> Result<u64, HostError>;

    async fn username_exists(&self, username: &str) -> Result<bool, HostError>;

    async fn email_exists(&self, email: &str) -> Result<bool, HostError>;

    async fn account(&self, id: u64) -> Result<Option<Account>, HostError>;

    /// Accounts holding `role`, restricted to the given ids.
    async fn accounts_with_role(&self, role: Role, within: &[u64])
    -> Result<Vec<Account>, HostError>;

    /// Returns whether the account existed. Cascades host-side.
    async fn delete_account(&self, id: u64) -> Result<bool, HostError>;

    // Sheets and tasks -------------------------------------------------------

    async fn add_sheet(&self, req: &SheetRequest) -> Result<u64, HostError>;

    /// Returns whether the sheet existed. Deleting a sheet removes its tasks
    /// and their signups on the host.
    async fn delete_sheet(&self, id: u64) -> Result<bool, HostError>;

    async fn add_task(&self, req: &TaskRequest, sheet_id: u64) -> Result<u64, HostError>;

    async fn tasks_for_sheet(&self, sheet_id: u64) -> Result<Vec<Task>, HostError>;

    // Signups ----------------------------------------------------------------

    async fn add_signup(&self, req: &SignupRequest, task_id: u64) -> Result<u64, HostError>;

    async fn signups_for_task(&self, task_id: u64) -> Result<Vec<Signup>, HostError>;
}

/// Process-wide key-value store for small JSON records.
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get_option(&self, key: &str) -> Result<Option<Value>, HostError>;

    async fn set_option(&self, key: &str, value: Value) -> Result<(), HostError>;

    async fn delete_option(&self, key: &str) -> Result<(), HostError>;
}
