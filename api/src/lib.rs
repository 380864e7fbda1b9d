//! # ANS Operadoras API Client
//!
//! HTTP client for the operadoras backend. Every failure is normalized into a
//! single [`ApiError`] shape with a localized, human-readable message.
//!
//! ## Example
//!
//! ```no_run
//! use ans_dashboard_api::{ApiClient, ApiClientConfig, ListQuery, OperadorasApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ApiClientConfig::new("http://localhost:8000"))?;
//!
//!     let page = client
//!         .list_operadoras(ListQuery {
//!             page: 1,
//!             limit: 10,
//!             q: String::new(),
//!             uf: "SP".to_string(),
//!         })
//!         .await?;
//!
//!     println!("{} operadoras", page.meta.total);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod operadoras;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiClient, ApiClientConfig, ApiResponse};
pub use error::{ApiError, ApiErrorKind};
pub use messages::{Locale, UnsupportedLocale};
pub use operadoras::{ApiFuture, ListQuery, OperadorasApi};
pub use types::{
    Cnpj, Despesa, DistribuicaoUf, Estatisticas, Operadora, OperadorasPage, PaginationMeta,
    TopOperadora,
};
