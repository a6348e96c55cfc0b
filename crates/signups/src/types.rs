//! Domain types shared with the sign-up service.
//!
//! Field shapes follow the host's own records: numeric ids assigned by the
//! host, task dates carried as a wire string (single date, comma-joined list,
//! or the [`NO_DATE`] sentinel), and 12-hour time-of-day strings.

use serde::{Deserialize, Serialize};
use time::Date;

/// Sentinel date the host uses for open-ended ("Ongoing") sheets and tasks.
pub const NO_DATE: &str = "0000-00-00";

/// Renders a date in the host's `YYYY-MM-DD` wire format.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Sheet scheduling type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetType {
    Single,
    #[serde(rename = "Multi-Day")]
    MultiDay,
    Recurring,
    Ongoing,
}

impl SheetType {
    /// All concrete types, in the order the host lists them.
    pub const ALL: [SheetType; 4] = [
        SheetType::Single,
        SheetType::MultiDay,
        SheetType::Recurring,
        SheetType::Ongoing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetType::Single => "Single",
            SheetType::MultiDay => "Multi-Day",
            SheetType::Recurring => "Recurring",
            SheetType::Ongoing => "Ongoing",
        }
    }

    /// Parses the host's wire name. Returns `None` for anything unknown.
    pub fn parse(value: &str) -> Option<SheetType> {
        SheetType::ALL.iter().copied().find(|t| t.as_str() == value)
    }
}

impl std::fmt::Display for SheetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account roles the sign-up service registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "signup_sheet_manager")]
    SheetManager,
    #[serde(rename = "signup_sheet_author")]
    SheetAuthor,
    #[serde(rename = "subscriber")]
    Subscriber,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SheetManager => "signup_sheet_manager",
            Role::SheetAuthor => "signup_sheet_author",
            Role::Subscriber => "subscriber",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account as the host reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// A task (volunteer slot) on a sheet, as the host reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub sheet_id: u64,
    pub title: String,
    /// Wire string: one date, a comma-joined list, or [`NO_DATE`].
    pub dates: String,
    /// Capacity: how many signups this task accepts per date.
    pub qty: u32,
    pub time_start: String,
    pub time_end: String,
    pub need_details: bool,
    pub details_text: String,
}

impl Task {
    /// Returns the concrete dates in the wire string, excluding the
    /// open-ended sentinel. Ongoing tasks yield an empty list.
    pub fn dates_list(&self) -> Vec<String> {
        self.dates
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != NO_DATE)
            .map(str::to_string)
            .collect()
    }
}

/// A claimed spot on a task date, as the host reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub id: u64,
    pub task_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    /// Host account id, or 0 for guest signups.
    pub user_id: u64,
    pub validated: bool,
}
