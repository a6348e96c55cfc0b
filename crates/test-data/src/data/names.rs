//! Name pools for synthesizing realistic-looking identities.
//!
//! All synthesized emails use the `.test` TLD to prevent accidental real
//! delivery.

use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Elijah", "Sophia", "James", "Isabella", "Oliver",
    "Mia", "William", "Charlotte", "Benjamin", "Amelia", "Lucas", "Harper", "Henry", "Evelyn",
    "Alexander", "Abigail", "Mason", "Emily", "Ethan", "Elizabeth", "Daniel", "Mila", "Michael",
    "Ella", "Logan", "Avery", "Jackson", "Sofia", "Sebastian",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King",
];

/// Draws an independent first/last name pair.
pub fn random_name_pair(rng: &mut impl Rng) -> (&'static str, &'static str) {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    (first, last)
}

/// Draws a `"First Last"` display name.
pub fn random_full_name(rng: &mut impl Rng) -> String {
    let (first, last) = random_name_pair(rng);
    format!("{first} {last}")
}

/// Synthesizes a guest email for a name pair, with a numeric disambiguator.
pub fn guest_email(first: &str, last: &str, rng: &mut impl Rng) -> String {
    format!(
        "{}.{}.{}@example.test",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(10..=99)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_email_shape() {
        let mut rng = rand::thread_rng();
        let email = guest_email("Emma", "Smith", &mut rng);
        assert!(email.starts_with("emma.smith."));
        assert!(email.ends_with("@example.test"));
    }

    #[test]
    fn test_name_pair_comes_from_pools() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let (first, last) = random_name_pair(&mut rng);
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }
}
