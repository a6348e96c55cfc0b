//! Test account generation with the service's volunteer roles.

use rand::Rng;
use tracing::{debug, info};

use signups::{AccountRequest, Role, SignupHost};

use crate::config::UserCounts;
use crate::data::names;
use crate::tracker::Tracker;

/// Every generated account gets the same throwaway password.
pub const TEST_PASSWORD: &str = "TestPass123!";

/// Short username slug for each role, paired with the host role it maps to.
const ROLE_SLUGS: [(&str, Role); 3] = [
    ("manager", Role::SheetManager),
    ("author", Role::SheetAuthor),
    ("subscriber", Role::Subscriber),
];

/// A successfully created account.
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

/// Outcome of one generation call. Partial success is the norm: skipped or
/// failed slots land in `errors` and the batch keeps going.
#[derive(Debug, Default)]
pub struct UserBatch {
    pub created: Vec<CreatedAccount>,
    pub errors: Vec<String>,
}

/// Creates test accounts per role, recording each into the tracker.
pub struct UserGenerator;

impl UserGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates up to the requested number of accounts per role.
    ///
    /// Usernames are `testuser_<slug>_<n>` with `n` probed from 1 on every
    /// call; a collision on the probed username or its matching email skips
    /// that slot without retrying, so fewer accounts than requested may be
    /// created.
    pub async fn generate<R: Rng>(
        &self,
        counts: &UserCounts,
        host: &dyn SignupHost,
        tracker: &Tracker<'_>,
        rng: &mut R,
    ) -> UserBatch {
        let mut batch = UserBatch::default();
        info!("Generating {} test accounts...", counts.total());

        for (slug, role) in ROLE_SLUGS {
            let count = match role {
                Role::SheetManager => counts.managers,
                Role::SheetAuthor => counts.authors,
                Role::Subscriber => counts.subscribers,
            };

            for _ in 0..count {
                let suffix = match next_suffix(host, slug).await {
                    Ok(suffix) => suffix,
                    Err(e) => {
                        batch.errors.push(format!("Error probing usernames: {e}"));
                        continue;
                    }
                };
                let username = format!("testuser_{slug}_{suffix}");
                let email = format!("testuser.{slug}.{suffix}@example.test");

                match already_exists(host, &username, &email).await {
                    Ok(true) => {
                        batch
                            .errors
                            .push(format!("Skipped: {username} already exists."));
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        batch.errors.push(format!("Error probing usernames: {e}"));
                        continue;
                    }
                }

                let (first, last) = names::random_name_pair(rng);
                let display_name = format!("{first} {last}");

                let req = AccountRequest {
                    username: username.clone(),
                    email: email.clone(),
                    display_name: display_name.clone(),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    password: TEST_PASSWORD.to_string(),
                    role,
                };

                match host.add_account(&req).await {
                    Ok(id) => {
                        if let Err(e) = tracker.record_user(id).await {
                            batch.errors.push(format!("Error tracking {username}: {e}"));
                        }
                        debug!("Created account {} ({})", username, role);
                        batch.created.push(CreatedAccount {
                            id,
                            username,
                            email,
                            display_name,
                            role,
                        });
                    }
                    Err(e) => {
                        batch.errors.push(format!("Error creating {username}: {e}"));
                    }
                }
            }
        }

        info!(
            "Created {} accounts ({} errors)",
            batch.created.len(),
            batch.errors.len()
        );
        batch
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the smallest free numeric suffix for a slug. Probed fresh on every
/// call; nothing is persisted between runs.
async fn next_suffix(host: &dyn SignupHost, slug: &str) -> Result<u32, signups::HostError> {
    let mut i = 1;
    while host
        .username_exists(&format!("testuser_{slug}_{i}"))
        .await?
    {
        i += 1;
    }
    Ok(i)
}

async fn already_exists(
    host: &dyn SignupHost,
    username: &str,
    email: &str,
) -> Result<bool, signups::HostError> {
    Ok(host.username_exists(username).await? || host.email_exists(email).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signups::MemoryHost;

    fn counts(managers: u32, authors: u32, subscribers: u32) -> UserCounts {
        UserCounts {
            managers,
            authors,
            subscribers,
        }
    }

    #[tokio::test]
    async fn test_generates_requested_counts() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let batch = UserGenerator::new()
            .generate(&counts(2, 3, 10), &host, &tracker, &mut rng)
            .await;

        assert_eq!(batch.created.len(), 15);
        assert!(batch.errors.is_empty());

        let managers: Vec<_> = batch
            .created
            .iter()
            .filter(|a| a.role == Role::SheetManager)
            .collect();
        assert_eq!(managers.len(), 2);
        assert_eq!(managers[0].username, "testuser_manager_1");
        assert_eq!(managers[1].username, "testuser_manager_2");
        assert_eq!(managers[0].email, "testuser.manager.1@example.test");

        // Every created id landed in the tracker exactly once.
        let tracked = tracker.user_ids().await.unwrap();
        assert_eq!(tracked.len(), 15);
        for account in &batch.created {
            assert_eq!(tracked.iter().filter(|id| **id == account.id).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_rerun_probes_past_existing_suffixes() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();
        let generator = UserGenerator::new();

        generator
            .generate(&counts(0, 2, 0), &host, &tracker, &mut rng)
            .await;
        let batch = generator
            .generate(&counts(0, 2, 0), &host, &tracker, &mut rng)
            .await;

        assert_eq!(batch.created.len(), 2);
        assert_eq!(batch.created[0].username, "testuser_author_3");
        assert_eq!(batch.created[1].username, "testuser_author_4");
    }

    #[tokio::test]
    async fn test_email_collision_skips_slot() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        // Occupy the probed email without taking the probed username.
        host.add_account(&AccountRequest {
            username: "someone_else".into(),
            email: "testuser.manager.1@example.test".into(),
            display_name: "Olivia King".into(),
            first_name: "Olivia".into(),
            last_name: "King".into(),
            password: TEST_PASSWORD.into(),
            role: Role::Subscriber,
        })
        .await
        .unwrap();

        let batch = UserGenerator::new()
            .generate(&counts(1, 0, 0), &host, &tracker, &mut rng)
            .await;

        assert!(batch.created.is_empty());
        assert_eq!(batch.errors.len(), 1);
        assert!(batch.errors[0].contains("already exists"));
        assert!(tracker.user_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_display_names_come_from_pools() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let batch = UserGenerator::new()
            .generate(&counts(0, 0, 5), &host, &tracker, &mut rng)
            .await;

        for account in &batch.created {
            let mut parts = account.display_name.split(' ');
            let first = parts.next().unwrap();
            let last = parts.next().unwrap();
            assert!(crate::data::FIRST_NAMES.contains(&first));
            assert!(crate::data::LAST_NAMES.contains(&last));
        }
    }

    #[tokio::test]
    async fn test_zero_counts_create_nothing() {
        let host = MemoryHost::new();
        let tracker = Tracker::new(&host);
        let mut rng = rand::thread_rng();

        let batch = UserGenerator::new()
            .generate(&counts(0, 0, 0), &host, &tracker, &mut rng)
            .await;

        assert!(batch.created.is_empty());
        assert!(batch.errors.is_empty());
    }
}
