//! # ANS Dashboard
//!
//! Client for the ANS operadoras dashboard: configuration, route table,
//! views and the bootstrap that wires the store and router together.
//!
//! ## Example
//!
//! ```no_run
//! use ans_dashboard::{App, DashboardConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::bootstrap(DashboardConfig::from_env()?)?;
//!
//!     let mounted = app.mount("/operadoras/11222333000181").await?;
//!     println!("{}", serde_json::to_string_pretty(&mounted.snapshot)?);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod router;
pub mod views;

// Re-export main types for convenience
pub use app::{App, AppError, Mounted};
pub use config::{ConfigError, DashboardConfig, Environment};
pub use router::{RouteMatch, RouteName, RouteProps, Router, RouterError};
pub use views::{DashboardView, OperadoraDetalheView, OperadorasView, View};
