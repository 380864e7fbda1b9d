//! # ANS Dashboard Testing
//!
//! Testing utilities for the dashboard client.
//!
//! This crate provides:
//! - A scripted [`MockOperadorasApi`] that records every request
//! - A deterministic [`FixedClock`]
//! - Sample records in [`fixtures`]
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use ans_dashboard_testing::{fixtures, test_clock, MockOperadorasApi};
//! use ans_dashboard_runtime::Store;
//!
//! #[tokio::test]
//! async fn loads_statistics() {
//!     let api = MockOperadorasApi::new();
//!     api.push_estatisticas(Ok(fixtures::estatisticas()));
//!
//!     let env = OperadorasEnvironment::new(Arc::new(api), Arc::new(test_clock()), Locale::PtBr);
//!     let store = Store::new(OperadorasState::default(), OperadorasReducer::new(), env);
//!
//!     let mut handle = store.send(OperadorasAction::FetchEstatisticas).await;
//!     handle.wait().await;
//!
//!     assert!(store.state(|s| s.estatisticas.is_some()).await);
//! }
//! ```

use ans_dashboard_core::environment::Clock;
use chrono::{DateTime, Utc};

mod api_mocks;
pub mod fixtures;

pub use api_mocks::{MockOperadorasApi, RecordedRequest};
pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ans_dashboard_testing::mocks::FixedClock;
    /// use ans_dashboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
