//! Shared test utilities for domain crates
//!
//! - `TestDatabase`: disposable PostgreSQL container with the schema migrated (feature: "postgres")
//! - `TestDataBuilder`: deterministic titles and codes per test
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let title = builder.title("main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data keyed by a seed
///
/// Tests sharing a database use distinct seeds so that their rows can be
/// told apart by title or code.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `"test-process-<seed>-<suffix>"`
    pub fn title(&self, suffix: &str) -> String {
        format!("test-process-{}-{}", self.seed, suffix)
    }

    /// Short upper-case code unique to this seed and suffix
    pub fn code(&self, suffix: &str) -> String {
        format!("P{:X}-{}", self.seed % 0xFFFF, suffix.to_uppercase())
    }

    /// Prefix shared by every title this builder produces
    pub fn title_prefix(&self) -> String {
        format!("test-process-{}-", self.seed)
    }
}
