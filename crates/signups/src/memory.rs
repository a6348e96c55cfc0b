//! Reference in-memory host.
//!
//! Backs the test suite and dry runs. Honors the parts of the host contract
//! the generators depend on: sequential ids, username/email uniqueness,
//! per-date task capacity, and cascading sheet deletion.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::HostError;
use crate::host::{OptionStore, SignupHost};
use crate::requests::{AccountRequest, SheetRequest, SignupRequest, TaskRequest};
use crate::types::{Account, Role, Signup, Task};

#[derive(Debug, Clone)]
struct StoredSheet {
    #[allow(dead_code)]
    title: String,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    accounts: BTreeMap<u64, Account>,
    sheets: BTreeMap<u64, StoredSheet>,
    tasks: BTreeMap<u64, Task>,
    signups: BTreeMap<u64, Signup>,
    options: HashMap<String, Value>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of [`SignupHost`] and [`OptionStore`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<State>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("host state poisoned")
    }

    /// Seeds an account directly, bypassing uniqueness checks. Test helper
    /// for setting up pre-existing users.
    pub fn insert_account(&self, account: Account) {
        let mut state = self.state();
        state.next_id = state.next_id.max(account.id);
        state.accounts.insert(account.id, account);
    }
}

#[async_trait]
impl SignupHost for MemoryHost {
    async fn add_account(&self, req: &AccountRequest) -> Result<u64, HostError> {
        req.validate()?;
        let mut state = self.state();
        if state.accounts.values().any(|a| a.username == req.username) {
            return Err(HostError::AlreadyExists(req.username.clone()));
        }
        if state.accounts.values().any(|a| a.email == req.email) {
            return Err(HostError::AlreadyExists(req.email.clone()));
        }
        let id = state.next_id();
        state.accounts.insert(
            id,
            Account {
                id,
                username: req.username.clone(),
                email: req.email.clone(),
                display_name: req.display_name.clone(),
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                role: req.role,
            },
        );
        Ok(id)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, HostError> {
        Ok(self
            .state()
            .accounts
            .values()
            .any(|a| a.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, HostError> {
        Ok(self.state().accounts.values().any(|a| a.email == email))
    }

    async fn account(&self, id: u64) -> Result<Option<Account>, HostError> {
        Ok(self.state().accounts.get(&id).cloned())
    }

    async fn accounts_with_role(
        &self,
        role: Role,
        within: &[u64],
    ) -> Result<Vec<Account>, HostError> {
        Ok(self
            .state()
            .accounts
            .values()
            .filter(|a| a.role == role && within.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn delete_account(&self, id: u64) -> Result<bool, HostError> {
        Ok(self.state().accounts.remove(&id).is_some())
    }

    async fn add_sheet(&self, req: &SheetRequest) -> Result<u64, HostError> {
        req.validate()?;
        let mut state = self.state();
        let id = state.next_id();
        state.sheets.insert(
            id,
            StoredSheet {
                title: req.title.clone(),
            },
        );
        Ok(id)
    }

    async fn delete_sheet(&self, id: u64) -> Result<bool, HostError> {
        let mut state = self.state();
        if state.sheets.remove(&id).is_none() {
            return Ok(false);
        }
        let task_ids: Vec<u64> = state
            .tasks
            .values()
            .filter(|t| t.sheet_id == id)
            .map(|t| t.id)
            .collect();
        state.tasks.retain(|_, t| t.sheet_id != id);
        state.signups.retain(|_, s| !task_ids.contains(&s.task_id));
        Ok(true)
    }

    async fn add_task(&self, req: &TaskRequest, sheet_id: u64) -> Result<u64, HostError> {
        req.validate()?;
        let mut state = self.state();
        if !state.sheets.contains_key(&sheet_id) {
            return Err(HostError::NotFound);
        }
        let id = state.next_id();
        state.tasks.insert(
            id,
            Task {
                id,
                sheet_id,
                title: req.title.clone(),
                dates: req.dates.clone(),
                qty: req.qty,
                time_start: req.time_start.clone(),
                time_end: req.time_end.clone(),
                need_details: req.need_details,
                details_text: req.details_text.clone(),
            },
        );
        Ok(id)
    }

    async fn tasks_for_sheet(&self, sheet_id: u64) -> Result<Vec<Task>, HostError> {
        Ok(self
            .state()
            .tasks
            .values()
            .filter(|t| t.sheet_id == sheet_id)
            .cloned()
            .collect())
    }

    async fn add_signup(&self, req: &SignupRequest, task_id: u64) -> Result<u64, HostError> {
        req.validate()?;
        let mut state = self.state();
        let Some(task) = state.tasks.get(&task_id) else {
            return Err(HostError::NotFound);
        };
        let qty = task.qty as usize;
        let taken = state
            .signups
            .values()
            .filter(|s| s.task_id == task_id && s.date == req.date)
            .count();
        if taken >= qty {
            return Err(HostError::SlotFull);
        }
        let id = state.next_id();
        state.signups.insert(
            id,
            Signup {
                id,
                task_id,
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                email: req.email.clone(),
                phone: req.phone.clone(),
                date: req.date.clone(),
                user_id: req.user_id,
                validated: req.validated,
            },
        );
        Ok(id)
    }

    async fn signups_for_task(&self, task_id: u64) -> Result<Vec<Signup>, HostError> {
        Ok(self
            .state()
            .signups
            .values()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OptionStore for MemoryHost {
    async fn get_option(&self, key: &str) -> Result<Option<Value>, HostError> {
        Ok(self.state().options.get(key).cloned())
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), HostError> {
        self.state().options.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_option(&self, key: &str) -> Result<(), HostError> {
        self.state().options.remove(key);
        Ok(())
    }
}
