//! Signup generation for tracked sheets.
//!
//! Fills a fraction of every task occurrence's capacity, attributing part
//! of the signups to tracked test accounts and synthesizing guests for the
//! rest. Rejected signups (full slots, duplicates) are counted as skipped
//! rather than reported; the host's capacity rules stay authoritative.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info};

use signups::{SignupHost, SignupRequest};

use crate::config::SignupOptions;
use crate::data::names;
use crate::tracker::Tracker;

/// Outcome of one generation call.
#[derive(Debug, Default)]
pub struct SignupBatch {
    /// Signups the host accepted.
    pub total: usize,
    /// Attempts the host rejected.
    pub skipped: usize,
    /// Accepted signups per tracked sheet.
    pub by_sheet: BTreeMap<u64, usize>,
    pub errors: Vec<String>,
}

/// Fills tasks on tracked sheets with randomized signups.
pub struct SignupGenerator;

impl SignupGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Attempts `floor(qty * fill_rate)` signups per task occurrence across
    /// every tracked sheet.
    pub async fn generate<R: Rng>(
        &self,
        opts: &SignupOptions,
        host: &dyn SignupHost,
        tracker: &Tracker<'_>,
        rng: &mut R,
    ) -> SignupBatch {
        let mut batch = SignupBatch::default();

        let sheet_ids = match tracker.sheet_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                batch.errors.push(format!("Error reading tracked sheets: {e}"));
                return batch;
            }
        };
        let user_ids = tracker.user_ids().await.unwrap_or_default();

        let fill_rate = opts.fill_rate();
        let user_pct = opts.user_pct();
        info!(
            "Generating signups for {} sheets (fill rate {:.0}%)...",
            sheet_ids.len(),
            fill_rate * 100.0
        );

        for sheet_id in sheet_ids {
            batch.by_sheet.insert(sheet_id, 0);

            let tasks = match host.tasks_for_sheet(sheet_id).await {
                Ok(tasks) => tasks,
                Err(e) => {
                    batch
                        .errors
                        .push(format!("Error reading tasks for sheet {sheet_id}: {e}"));
                    continue;
                }
            };

            for task in &tasks {
                let mut dates = task.dates_list();
                if dates.is_empty() {
                    // Undated tasks still sign up against their stored
                    // date string (the no-date sentinel).
                    dates.push(task.dates.clone());
                }

                for date in &dates {
                    let spots = (f64::from(task.qty) * fill_rate).floor() as usize;
                    for _ in 0..spots {
                        let req = self.build_request(&user_ids, user_pct, date, host, rng).await;
                        match host.add_signup(&req, task.id).await {
                            Ok(_) => {
                                batch.total += 1;
                                *batch.by_sheet.entry(sheet_id).or_default() += 1;
                            }
                            Err(_) => batch.skipped += 1,
                        }
                    }
                }
            }

            debug!(
                "Sheet {}: {} signups",
                sheet_id,
                batch.by_sheet.get(&sheet_id).copied().unwrap_or(0)
            );
        }

        info!(
            "Created {} signups ({} skipped, {} errors)",
            batch.total,
            batch.skipped,
            batch.errors.len()
        );
        batch
    }

    /// Rolls tracked-user vs guest attribution and builds the request.
    async fn build_request<R: Rng>(
        &self,
        user_ids: &[u64],
        user_pct: u32,
        date: &str,
        host: &dyn SignupHost,
        rng: &mut R,
    ) -> SignupRequest {
        let use_test_user = !user_ids.is_empty() && rng.gen_range(0..100) < user_pct;

        let (first, last, email, user_id) = if use_test_user {
            let id = user_ids[rng.gen_range(0..user_ids.len())];
            match host.account(id).await.ok().flatten() {
                Some(account) => (account.first_name, account.last_name, account.email, id),
                // Tracked id the host no longer knows; keep the attribution.
                None => (
                    "Test".to_string(),
                    "User".to_string(),
                    format!("testuser.{id}@example.test"),
                    id,
                ),
            }
        } else {
            let (first, last) = names::random_name_pair(rng);
            let email = names::guest_email(first, last, rng);
            (first.to_string(), last.to_string(), email, 0)
        };

        SignupRequest {
            first_name: first,
            last_name: last,
            email,
            phone: random_phone(rng),
            date: date.to_string(),
            user_id,
            validated: true,
        }
    }
}

impl Default for SignupGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn random_phone(rng: &mut impl Rng) -> String {
    format!(
        "({}) {}-{}",
        rng.gen_range(200..=999),
        rng.gen_range(200..=999),
        rng.gen_range(1000..=9999)
    )
}
