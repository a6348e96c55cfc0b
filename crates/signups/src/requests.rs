//! Typed request structs for the host's record-creation API.
//!
//! Each request validates its own field invariants before a host sees it, so
//! a malformed request fails the same way against every host implementation.

use serde::Serialize;
use time::Date;

use crate::errors::HostError;
use crate::types::{Role, SheetType};

fn require(ok: bool, msg: &str) -> Result<(), HostError> {
    if ok {
        Ok(())
    } else {
        Err(HostError::Invalid(msg.to_string()))
    }
}

fn looks_like_email(value: &str) -> bool {
    value.contains('@') && !value.starts_with('@') && !value.ends_with('@')
}

/// Request to create a user account.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRequest {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
}

impl AccountRequest {
    pub fn validate(&self) -> Result<(), HostError> {
        require(!self.username.is_empty(), "username must not be empty")?;
        require(looks_like_email(&self.email), "email must be well-formed")?;
        require(
            !self.display_name.is_empty(),
            "display name must not be empty",
        )?;
        require(!self.password.is_empty(), "password must not be empty")
    }
}

/// Request to create a sign-up sheet.
///
/// `first_date`/`last_date` are `None` only for open-ended ("Ongoing")
/// sheets; the host renders them with the no-date sentinel.
#[derive(Debug, Clone)]
pub struct SheetRequest {
    pub title: String,
    pub sheet_type: SheetType,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
    pub details: String,
    pub visible: bool,
    pub author_id: u64,
    pub author_email: String,
    pub reminder1_days: u32,
    pub reminder2_days: u32,
    /// Comma-joined chair names, parallel to `chair_emails`.
    pub chair_names: String,
    pub chair_emails: String,
}

impl SheetRequest {
    pub fn validate(&self) -> Result<(), HostError> {
        require(!self.title.is_empty(), "sheet title must not be empty")?;
        require(
            looks_like_email(&self.author_email),
            "author email must be well-formed",
        )?;

        let names = self.chair_names.split(',').count();
        let emails = self.chair_emails.split(',').count();
        require(
            names == emails,
            "chair names and emails must have the same count",
        )?;

        match self.sheet_type {
            SheetType::Ongoing => require(
                self.first_date.is_none() && self.last_date.is_none(),
                "ongoing sheets carry no dates",
            ),
            _ => {
                let (Some(first), Some(last)) = (self.first_date, self.last_date) else {
                    return Err(HostError::Invalid(
                        "dated sheets need first and last dates".to_string(),
                    ));
                };
                require(first <= last, "first date must not be after last date")
            }
        }
    }
}

/// Request to create a task on a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRequest {
    pub title: String,
    /// Wire string: one date, a comma-joined list, or the no-date sentinel.
    pub dates: String,
    pub qty: u32,
    pub time_start: String,
    pub time_end: String,
    pub need_details: bool,
    pub details_text: String,
    pub allow_duplicates: bool,
}

impl TaskRequest {
    pub fn validate(&self) -> Result<(), HostError> {
        require(!self.title.is_empty(), "task title must not be empty")?;
        require(!self.dates.is_empty(), "task dates must not be empty")?;
        require(self.qty >= 1, "task quantity must be at least 1")?;
        require(
            !self.time_start.is_empty() && !self.time_end.is_empty(),
            "task time window must not be empty",
        )
    }
}

/// Request to claim one spot on a task date.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    /// Host account id, or 0 for guest signups.
    pub user_id: u64,
    pub validated: bool,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), HostError> {
        require(!self.first_name.is_empty(), "first name must not be empty")?;
        require(!self.last_name.is_empty(), "last name must not be empty")?;
        require(looks_like_email(&self.email), "email must be well-formed")?;
        require(!self.date.is_empty(), "signup date must not be empty")
    }
}
