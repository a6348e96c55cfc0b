//! Ledger of generated record ids.
//!
//! Every user and sheet this tool creates is appended to a single JSON
//! record in the platform's option store, keyed by [`OPTION_KEY`]:
//!
//! ```json
//! { "users": [1, 2], "sheets": [7, 9] }
//! ```
//!
//! Membership in that record is the sole criterion for "this tool created
//! it", and thus for eligibility in signup generation and bulk deletion.
//! The tracker is a handle over an injected store so tests can run against
//! an isolated in-memory ledger.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use signups::{HostError, OptionStore, SignupHost};

/// Option-store key holding the tracked-data record.
pub const OPTION_KEY: &str = "generated_test_data";

/// The persisted ledger record. Created lazily on first write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedData {
    #[serde(default)]
    pub users: Vec<u64>,
    #[serde(default)]
    pub sheets: Vec<u64>,
}

/// Counts of everything reachable from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedSummary {
    pub users: usize,
    pub sheets: usize,
    pub tasks: usize,
    pub signups: usize,
}

/// How many records a delete pass actually removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteCounts {
    pub users: usize,
    pub sheets: usize,
}

/// Repository handle over the persisted ledger.
pub struct Tracker<'a> {
    store: &'a dyn OptionStore,
}

impl<'a> Tracker<'a> {
    pub fn new(store: &'a dyn OptionStore) -> Self {
        Self { store }
    }

    async fn data(&self) -> Result<TrackedData, HostError> {
        let value = self.store.get_option(OPTION_KEY).await?;
        // A missing or malformed record reads as the empty ledger.
        Ok(value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default())
    }

    async fn save(&self, data: &TrackedData) -> Result<(), HostError> {
        let value: Value = serde_json::to_value(data).expect("ledger record serializes");
        self.store.set_option(OPTION_KEY, value).await
    }

    /// Records a created user id. No-op for zero or already-tracked ids.
    pub async fn record_user(&self, id: u64) -> Result<(), HostError> {
        if id == 0 {
            return Ok(());
        }
        let mut data = self.data().await?;
        if !data.users.contains(&id) {
            data.users.push(id);
            self.save(&data).await?;
        }
        Ok(())
    }

    /// Records a created sheet id. No-op for zero or already-tracked ids.
    pub async fn record_sheet(&self, id: u64) -> Result<(), HostError> {
        if id == 0 {
            return Ok(());
        }
        let mut data = self.data().await?;
        if !data.sheets.contains(&id) {
            data.sheets.push(id);
            self.save(&data).await?;
        }
        Ok(())
    }

    pub async fn user_ids(&self) -> Result<Vec<u64>, HostError> {
        Ok(self.data().await?.users)
    }

    pub async fn sheet_ids(&self) -> Result<Vec<u64>, HostError> {
        Ok(self.data().await?.sheets)
    }

    /// Counts tracked users and sheets, plus tasks and signups reachable from
    /// tracked sheets via host queries.
    pub async fn summary(&self, host: &dyn SignupHost) -> Result<TrackedSummary, HostError> {
        let data = self.data().await?;
        let mut summary = TrackedSummary {
            users: data.users.len(),
            sheets: data.sheets.len(),
            ..Default::default()
        };

        for sheet_id in &data.sheets {
            let Ok(tasks) = host.tasks_for_sheet(*sheet_id).await else {
                continue;
            };
            summary.tasks += tasks.len();
            for task in &tasks {
                if let Ok(signups) = host.signups_for_task(task.id).await {
                    summary.signups += signups.len();
                }
            }
        }

        Ok(summary)
    }

    /// Deletes every tracked user from the host. The tracked set is cleared
    /// even when individual deletions fail; only successful deletions count.
    pub async fn delete_users(&self, host: &dyn SignupHost) -> Result<usize, HostError> {
        let mut data = self.data().await?;
        let mut deleted = 0;
        for user_id in &data.users {
            if host.delete_account(*user_id).await.unwrap_or(false) {
                deleted += 1;
            }
        }
        data.users.clear();
        self.save(&data).await?;
        info!("Deleted {} tracked users", deleted);
        Ok(deleted)
    }

    /// Deletes every tracked sheet from the host (cascading to tasks and
    /// signups host-side). Same clearing semantics as [`Self::delete_users`].
    pub async fn delete_sheets(&self, host: &dyn SignupHost) -> Result<usize, HostError> {
        let mut data = self.data().await?;
        let mut deleted = 0;
        for sheet_id in &data.sheets {
            if host.delete_sheet(*sheet_id).await.unwrap_or(false) {
                deleted += 1;
            }
        }
        data.sheets.clear();
        self.save(&data).await?;
        info!("Deleted {} tracked sheets", deleted);
        Ok(deleted)
    }

    /// Deletes everything tracked and removes the ledger record itself,
    /// returning the tracker to its empty initial state.
    pub async fn delete_all(&self, host: &dyn SignupHost) -> Result<DeleteCounts, HostError> {
        let users = self.delete_users(host).await?;
        let sheets = self.delete_sheets(host).await?;
        self.clear().await?;
        Ok(DeleteCounts { users, sheets })
    }

    /// Removes the ledger record entirely.
    pub async fn clear(&self) -> Result<(), HostError> {
        self.store.delete_option(OPTION_KEY).await
    }
}
