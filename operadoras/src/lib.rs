//! Operadoras store for the ANS dashboard.
//!
//! Holds everything the views render: the paginated operator list with its
//! filters, the operator on the detail view with its expenses, and the
//! statistics snapshot. Views dispatch [`OperadorasAction`]s; the reducer
//! turns read actions into API calls and applies their results.
//!
//! # Quick Start
//!
//! ```no_run
//! use ans_dashboard_api::{ApiClient, ApiClientConfig, Locale};
//! use ans_dashboard_core::environment::SystemClock;
//! use operadoras::{
//!     FiltrosPatch, OperadorasAction, OperadorasEnvironment, OperadorasReducer,
//!     OperadorasState, OperadorasStore,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(ApiClientConfig::new("http://localhost:8000"))?;
//! let env = OperadorasEnvironment::new(Arc::new(api), Arc::new(SystemClock), Locale::PtBr);
//! let store = OperadorasStore::new(OperadorasState::default(), OperadorasReducer::new(), env);
//!
//! // Filter by state and wait for the list to arrive
//! let mut handle = store
//!     .send(OperadorasAction::SetFiltros(FiltrosPatch::uf("SP")))
//!     .await;
//! handle.wait().await;
//!
//! let (count, pages) = store
//!     .state(|s| (s.operadoras.len(), s.total_pages()))
//!     .await;
//! println!("{count} operadoras, {pages} pages");
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use reducer::{OperadorasEnvironment, OperadorasReducer};
pub use types::{
    Filtros, FiltrosPatch, OperadorasAction, OperadorasState, Pagination, RequestId, RequestKind,
    RequestTracker,
};

/// Store running the operadoras reducer
pub type OperadorasStore = ans_dashboard_runtime::Store<
    OperadorasState,
    OperadorasAction,
    OperadorasEnvironment,
    OperadorasReducer,
>;
