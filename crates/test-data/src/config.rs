//! Configuration types for generation runs.
//!
//! Defaults match the tool's stock request values. Inputs are sanitized at
//! the accessor, not at construction, so deserialized configs can carry
//! whatever the operator typed.

use serde::{Deserialize, Serialize};
use signups::SheetType;

/// How many accounts to create per role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserCounts {
    pub managers: u32,
    pub authors: u32,
    pub subscribers: u32,
}

impl UserCounts {
    pub fn total(&self) -> u32 {
        self.managers + self.authors + self.subscribers
    }
}

impl Default for UserCounts {
    fn default() -> Self {
        Self {
            managers: 2,
            authors: 3,
            subscribers: 10,
        }
    }
}

/// Options for sheet/task generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetOptions {
    /// Preset key; unknown keys fall back to the randomized preset.
    pub preset: String,
    /// Number of sheets to create.
    pub count: u32,
    /// Minimum tasks per sheet.
    pub tasks_min: u32,
    /// Maximum tasks per sheet (clamped to at least `tasks_min` at use).
    pub tasks_max: u32,
    /// Weeks from today before the first possible date.
    pub start_weeks: u32,
    /// Width of the date range in weeks.
    pub span_weeks: u32,
    /// Forced sheet type; honored only when the preset's own type is random.
    pub type_override: Option<SheetType>,
}

impl SheetOptions {
    /// The effective tasks-per-sheet range.
    pub fn tasks_range(&self) -> (u32, u32) {
        (self.tasks_min, self.tasks_max.max(self.tasks_min))
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            preset: "random".to_string(),
            count: 3,
            tasks_min: 2,
            tasks_max: 5,
            start_weeks: 1,
            span_weeks: 4,
            type_override: None,
        }
    }
}

/// Options for signup generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignupOptions {
    /// Fraction of each task occurrence's capacity to fill.
    pub fill_rate: f64,
    /// Percentage of signups attributed to tracked test users; the rest are
    /// synthesized guests.
    pub user_pct: u32,
}

impl SignupOptions {
    pub fn fill_rate(&self) -> f64 {
        self.fill_rate.clamp(0.0, 1.0)
    }

    pub fn user_pct(&self) -> u32 {
        self.user_pct.min(100)
    }
}

impl Default for SignupOptions {
    fn default() -> Self {
        Self {
            fill_rate: 0.6,
            user_pct: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_range_clamps_max() {
        let opts = SheetOptions {
            tasks_min: 5,
            tasks_max: 2,
            ..Default::default()
        };
        assert_eq!(opts.tasks_range(), (5, 5));
    }

    #[test]
    fn test_signup_options_sanitized() {
        let opts = SignupOptions {
            fill_rate: 1.8,
            user_pct: 250,
        };
        assert_eq!(opts.fill_rate(), 1.0);
        assert_eq!(opts.user_pct(), 100);

        let opts = SignupOptions {
            fill_rate: -0.2,
            user_pct: 0,
        };
        assert_eq!(opts.fill_rate(), 0.0);
    }

    #[test]
    fn test_defaults_match_stock_form() {
        let users = UserCounts::default();
        assert_eq!(
            (users.managers, users.authors, users.subscribers),
            (2, 3, 10)
        );
        assert_eq!(users.total(), 15);

        let sheets = SheetOptions::default();
        assert_eq!(sheets.preset, "random");
        assert_eq!(sheets.count, 3);
        assert_eq!(sheets.tasks_range(), (2, 5));
        assert_eq!((sheets.start_weeks, sheets.span_weeks), (1, 4));
        assert!(sheets.type_override.is_none());
    }
}
