//! Fluent builder for constructing test scenarios.

use rand::Rng;
use time::Date;
use tracing::info;

use signups::{OptionStore, SignupHost};

use crate::config::{SheetOptions, SignupOptions, UserCounts};
use crate::generators::{
    Operator, SheetBatch, SheetGenerator, SignupBatch, SignupGenerator, UserBatch, UserGenerator,
};
use crate::tracker::{TrackedSummary, Tracker};

/// Result of running a scenario. Stages the builder skipped are `None`.
#[derive(Debug, Default)]
pub struct ScenarioResult {
    pub users: Option<UserBatch>,
    pub sheets: Option<SheetBatch>,
    pub signups: Option<SignupBatch>,
    /// Tracked counts after the run.
    pub summary: TrackedSummary,
}

impl ScenarioResult {
    /// All stage errors in run order.
    pub fn errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if let Some(users) = &self.users {
            errors.extend(users.errors.iter().map(String::as_str));
        }
        if let Some(sheets) = &self.sheets {
            errors.extend(sheets.errors.iter().map(String::as_str));
        }
        if let Some(signups) = &self.signups {
            errors.extend(signups.errors.iter().map(String::as_str));
        }
        errors
    }
}

/// Builder for running complete generation scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_users(UserCounts::default())
///     .with_sheets(SheetOptions {
///         preset: "carnival".into(),
///         count: 2,
///         ..Default::default()
///     })
///     .with_signups(SignupOptions::default())
///     .run(&host, &mut rng)
///     .await;
/// ```
pub struct ScenarioBuilder {
    users: Option<UserCounts>,
    sheets: Option<SheetOptions>,
    signups: Option<SignupOptions>,
    operator: Operator,
    base_date: Option<Date>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a builder that runs all three stages with stock options.
    pub fn new() -> Self {
        Self {
            users: Some(UserCounts::default()),
            sheets: Some(SheetOptions::default()),
            signups: Some(SignupOptions::default()),
            operator: Operator {
                id: 1,
                email: "admin@example.test".to_string(),
            },
            base_date: None,
        }
    }

    /// Sets the account counts for the user stage.
    pub fn with_users(mut self, counts: UserCounts) -> Self {
        self.users = Some(counts);
        self
    }

    /// Skips account creation. Sheets fall back to the operator as author
    /// and signups are all guests unless users were tracked by an earlier
    /// run.
    pub fn skip_users(mut self) -> Self {
        self.users = None;
        self
    }

    /// Sets the options for the sheet stage.
    pub fn with_sheets(mut self, opts: SheetOptions) -> Self {
        self.sheets = Some(opts);
        self
    }

    /// Skips sheet creation.
    pub fn skip_sheets(mut self) -> Self {
        self.sheets = None;
        self
    }

    /// Sets the options for the signup stage.
    pub fn with_signups(mut self, opts: SignupOptions) -> Self {
        self.signups = Some(opts);
        self
    }

    /// Skips signup creation.
    pub fn skip_signups(mut self) -> Self {
        self.signups = None;
        self
    }

    /// Sets the acting operator used as the fallback sheet author.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Pins "today" for sheet date ranges.
    pub fn with_base_date(mut self, base_date: Date) -> Self {
        self.base_date = Some(base_date);
        self
    }

    /// Runs the configured stages in dependency order.
    pub async fn run<H, R>(&self, host: &H, rng: &mut R) -> ScenarioResult
    where
        H: SignupHost + OptionStore,
        R: Rng,
    {
        let tracker = Tracker::new(host);
        let mut result = ScenarioResult::default();

        if let Some(counts) = &self.users {
            result.users = Some(
                UserGenerator::new()
                    .generate(counts, host, &tracker, rng)
                    .await,
            );
        }

        if let Some(opts) = &self.sheets {
            let mut generator = SheetGenerator::new(self.operator.clone());
            if let Some(base_date) = self.base_date {
                generator = generator.with_base_date(base_date);
            }
            result.sheets = Some(generator.generate(opts, host, &tracker, rng).await);
        }

        if let Some(opts) = &self.signups {
            result.signups = Some(
                SignupGenerator::new()
                    .generate(opts, host, &tracker, rng)
                    .await,
            );
        }

        result.summary = tracker.summary(host).await.unwrap_or_default();
        info!(
            "Scenario complete: {} users, {} sheets, {} tasks, {} signups tracked",
            result.summary.users, result.summary.sheets, result.summary.tasks, result.summary.signups
        );
        result
    }
}

/// Preset scenarios for common testing needs.
impl ScenarioBuilder {
    /// Creates a small bake-sale demo.
    ///
    /// - A handful of accounts in each role
    /// - 2 single-day sheets from the bake-sale preset
    /// - Roughly half of every task's capacity filled
    pub fn bake_sale_demo() -> Self {
        Self::new()
            .with_users(UserCounts {
                managers: 1,
                authors: 2,
                subscribers: 5,
            })
            .with_sheets(SheetOptions {
                preset: "bake_sale".to_string(),
                count: 2,
                ..Default::default()
            })
            .with_signups(SignupOptions {
                fill_rate: 0.5,
                user_pct: 50,
            })
    }

    /// Creates a busy-season scenario across randomized sheet types.
    ///
    /// - Stock account counts
    /// - 8 randomized sheets spread over twelve weeks
    /// - Most capacity filled, mostly by tracked accounts
    pub fn busy_season() -> Self {
        Self::new()
            .with_sheets(SheetOptions {
                count: 8,
                span_weeks: 12,
                ..Default::default()
            })
            .with_signups(SignupOptions {
                fill_rate: 0.8,
                user_pct: 75,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signups::MemoryHost;
    use time::Month;

    fn base_date() -> Date {
        Date::from_calendar_date(2026, Month::May, 4).unwrap()
    }

    #[tokio::test]
    async fn test_full_run_tracks_every_stage() {
        let host = MemoryHost::new();
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::bake_sale_demo()
            .with_base_date(base_date())
            .run(&host, &mut rng)
            .await;

        let users = result.users.as_ref().unwrap();
        assert_eq!(users.created.len(), 8);

        let sheets = result.sheets.as_ref().unwrap();
        assert_eq!(sheets.sheets.len(), 2);

        let signups = result.signups.as_ref().unwrap();
        assert!(signups.total > 0);

        assert_eq!(result.summary.users, 8);
        assert_eq!(result.summary.sheets, 2);
        assert!(result.summary.tasks >= 4);
        assert_eq!(result.summary.signups, signups.total);
        assert!(result.errors().is_empty());
    }

    #[tokio::test]
    async fn test_skipped_stages_stay_none() {
        let host = MemoryHost::new();
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .skip_users()
            .skip_signups()
            .with_base_date(base_date())
            .run(&host, &mut rng)
            .await;

        assert!(result.users.is_none());
        assert!(result.sheets.is_some());
        assert!(result.signups.is_none());
        assert_eq!(result.summary.users, 0);
        assert_eq!(result.summary.signups, 0);
    }

    #[tokio::test]
    async fn test_signups_without_sheets_is_a_no_op() {
        let host = MemoryHost::new();
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .skip_users()
            .skip_sheets()
            .run(&host, &mut rng)
            .await;

        let signups = result.signups.as_ref().unwrap();
        assert_eq!(signups.total, 0);
        assert_eq!(signups.skipped, 0);
        assert!(signups.by_sheet.is_empty());
    }
}
