//! HTTP client for a running sign-up service.
//!
//! Drives the same record-creation contract as [`crate::MemoryHost`], but
//! over the companion service's REST endpoints. Every create call goes
//! through the production validation path on the host side.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::HostError;
use crate::host::{OptionStore, SignupHost};
use crate::requests::{AccountRequest, SheetRequest, SignupRequest, TaskRequest};
use crate::types::{Account, NO_DATE, Role, Signup, Task, format_date};

use async_trait::async_trait;

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ExistsResponse {
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct DeletedResponse {
    deleted: bool,
}

/// [`SignupHost`] over HTTP.
pub struct HttpHost {
    client: Client,
    base_url: String,
}

impl HttpHost {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Checks that the service answers its health endpoint.
    pub async fn check_health(&self) -> Result<(), HostError> {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(HostError::Unreachable(format!(
                "{} (status {})",
                self.base_url,
                resp.status()
            ))),
            Err(_) => Err(HostError::Unreachable(self.base_url.clone())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to the matching [`HostError`] variant.
    async fn rejection(resp: reqwest::Response) -> HostError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        match status {
            StatusCode::BAD_REQUEST => HostError::Invalid(body),
            StatusCode::NOT_FOUND => HostError::NotFound,
            StatusCode::CONFLICT => {
                if body.contains("full") {
                    HostError::SlotFull
                } else {
                    HostError::AlreadyExists(body)
                }
            }
            _ => HostError::Rejected(format!("status {status}: {body}")),
        }
    }

    async fn post_for_id(&self, path: &str, payload: &Value) -> Result<u64, HostError> {
        debug!("POST {}", path);
        let resp = self.client.post(self.url(path)).json(payload).send().await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        let created: IdResponse = resp.json().await?;
        Ok(created.id)
    }

    async fn check_exists(&self, path: &str, field: &str, value: &str) -> Result<bool, HostError> {
        let resp = self
            .client
            .get(self.url(path))
            .query(&[(field, value)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        let found: ExistsResponse = resp.json().await?;
        Ok(found.exists)
    }

    async fn delete_for_flag(&self, path: &str) -> Result<bool, HostError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        let deleted: DeletedResponse = resp.json().await?;
        Ok(deleted.deleted)
    }
}

#[async_trait]
impl SignupHost for HttpHost {
    async fn add_account(&self, req: &AccountRequest) -> Result<u64, HostError> {
        req.validate()?;
        self.post_for_id("/accounts", &json!(req)).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, HostError> {
        self.check_exists("/accounts/exists", "username", username)
            .await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, HostError> {
        self.check_exists("/accounts/exists", "email", email).await
    }

    async fn account(&self, id: u64) -> Result<Option<Account>, HostError> {
        let resp = self
            .client
            .get(self.url(&format!("/accounts/{id}")))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(Some(resp.json().await?))
    }

    async fn accounts_with_role(
        &self,
        role: Role,
        within: &[u64],
    ) -> Result<Vec<Account>, HostError> {
        let include = within
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let resp = self
            .client
            .get(self.url("/accounts"))
            .query(&[("role", role.as_str()), ("include", include.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn delete_account(&self, id: u64) -> Result<bool, HostError> {
        self.delete_for_flag(&format!("/accounts/{id}")).await
    }

    async fn add_sheet(&self, req: &SheetRequest) -> Result<u64, HostError> {
        req.validate()?;
        // Dates go over the wire in the host's own format, sentinel included.
        let payload = json!({
            "title": req.title,
            "sheet_type": req.sheet_type.as_str(),
            "first_date": req.first_date.map(format_date).unwrap_or_else(|| NO_DATE.to_string()),
            "last_date": req.last_date.map(format_date).unwrap_or_else(|| NO_DATE.to_string()),
            "details": req.details,
            "visible": req.visible,
            "author_id": req.author_id,
            "author_email": req.author_email,
            "reminder1_days": req.reminder1_days,
            "reminder2_days": req.reminder2_days,
            "chair_names": req.chair_names,
            "chair_emails": req.chair_emails,
        });
        self.post_for_id("/sheets", &payload).await
    }

    async fn delete_sheet(&self, id: u64) -> Result<bool, HostError> {
        self.delete_for_flag(&format!("/sheets/{id}")).await
    }

    async fn add_task(&self, req: &TaskRequest, sheet_id: u64) -> Result<u64, HostError> {
        req.validate()?;
        self.post_for_id(&format!("/sheets/{sheet_id}/tasks"), &json!(req))
            .await
    }

    async fn tasks_for_sheet(&self, sheet_id: u64) -> Result<Vec<Task>, HostError> {
        let resp = self
            .client
            .get(self.url(&format!("/sheets/{sheet_id}/tasks")))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn add_signup(&self, req: &SignupRequest, task_id: u64) -> Result<u64, HostError> {
        req.validate()?;
        self.post_for_id(&format!("/tasks/{task_id}/signups"), &json!(req))
            .await
    }

    async fn signups_for_task(&self, task_id: u64) -> Result<Vec<Signup>, HostError> {
        let resp = self
            .client
            .get(self.url(&format!("/tasks/{task_id}/signups")))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl OptionStore for HttpHost {
    async fn get_option(&self, key: &str) -> Result<Option<Value>, HostError> {
        let resp = self
            .client
            .get(self.url(&format!("/options/{key}")))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(Some(resp.json().await?))
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), HostError> {
        let resp = self
            .client
            .put(self.url(&format!("/options/{key}")))
            .json(&value)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(())
    }

    async fn delete_option(&self, key: &str) -> Result<(), HostError> {
        let resp = self
            .client
            .delete(self.url(&format!("/options/{key}")))
            .send()
            .await?;
        if !resp.status().is_success() && resp.status() != StatusCode::NOT_FOUND {
            return Err(Self::rejection(resp).await);
        }
        Ok(())
    }
}
