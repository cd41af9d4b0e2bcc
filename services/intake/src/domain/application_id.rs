//! Application identifier minting.

use rand::RngExt;

/// Year tag stamped into every minted application id.
pub const APPLICATION_ID_YEAR: &str = "2025";

/// Source of application identifiers, shaped `PAS-<year>-<5 digits>`.
///
/// Implementations draw without checking the store; uniqueness is enforced by
/// the `applications.application_id` constraint and the submit usecase's
/// bounded re-mint on conflict.
pub trait ApplicationIdGenerator: Send + Sync {
    fn mint(&self) -> String;
}

/// Production generator: five digits drawn uniformly from [10000, 99999].
#[derive(Clone, Default)]
pub struct RandomApplicationIdGenerator;

impl ApplicationIdGenerator for RandomApplicationIdGenerator {
    fn mint(&self) -> String {
        let mut rng = rand::rng();
        let number: u32 = rng.random_range(10000..=99999);
        format!("PAS-{APPLICATION_ID_YEAR}-{number}")
    }
}
