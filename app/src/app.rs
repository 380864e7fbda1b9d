//! Application bootstrap
//!
//! [`App`] owns the one store and the one router of a dashboard session and
//! hands them to whoever needs them. Nothing here is global: build an `App`
//! and pass it around.

use crate::config::DashboardConfig;
use crate::router::{RouteMatch, Router, RouterError};
use ans_dashboard_api::{ApiClient, OperadorasApi};
use ans_dashboard_core::environment::{Clock, SystemClock};
use ans_dashboard_runtime::StoreError;
use operadoras::{
    OperadorasAction, OperadorasEnvironment, OperadorasReducer, OperadorasState, OperadorasStore,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};

/// Extra time granted to mount effects on top of the request timeout
const MOUNT_GRACE: Duration = Duration::from_secs(1);

/// Application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// Navigation to an unknown path
    #[error(transparent)]
    Router(#[from] RouterError),
    /// Mount effects did not finish in time
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a navigation produced
#[derive(Debug, Clone, Serialize)]
pub struct Mounted {
    /// Matched route
    pub route: RouteMatch,
    /// Name of the mounted view
    pub view: &'static str,
    /// State slice the view displays after its mount actions completed
    pub snapshot: serde_json::Value,
}

/// A dashboard session
pub struct App {
    config: DashboardConfig,
    store: OperadorasStore,
    router: Router,
    current: RwLock<Option<RouteMatch>>,
}

impl App {
    /// Build the HTTP client, store and router for `config`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HttpClient`] if the HTTP client cannot be built
    pub fn bootstrap(config: DashboardConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(config.api_client_config())?;
        tracing::info!(
            base_url = api.base_url(),
            locale = %config.locale,
            environment = %config.environment,
            "Bootstrapping dashboard"
        );
        Ok(Self::with_dependencies(
            config,
            Arc::new(api),
            Arc::new(SystemClock),
        ))
    }

    /// Build an app over explicit dependencies
    #[must_use]
    pub fn with_dependencies(
        config: DashboardConfig,
        api: Arc<dyn OperadorasApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let env = OperadorasEnvironment::new(api, clock, config.locale);
        let store = OperadorasStore::new(
            OperadorasState::with_page_size(config.page_size),
            OperadorasReducer::new(),
            env,
        );

        Self {
            config,
            store,
            router: Router::new(),
            current: RwLock::new(None),
        }
    }

    /// Navigate to `path`
    ///
    /// Resolves the route, dispatches the view's mount actions and waits for
    /// their results before taking the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Router`] for unknown paths and
    /// [`AppError::Store`] if the mount effects outlive the request timeout.
    #[tracing::instrument(skip(self))]
    pub async fn mount(&self, path: &str) -> Result<Mounted, AppError> {
        let (route, view) = self.router.resolve(path)?;
        tracing::info!(route = %route.name, view = view.name(), "Mounting view");

        let mut handles = Vec::new();
        for action in view.on_mount(&route.props) {
            handles.push(self.store.send(action).await);
        }
        for handle in &mut handles {
            handle
                .wait_with_timeout(self.config.timeout() + MOUNT_GRACE)
                .await?;
        }

        *self.current.write().await = Some(route.clone());

        let snapshot = self
            .store
            .state(|state| view.snapshot(state, &route.props))
            .await;

        Ok(Mounted {
            route,
            view: view.name(),
            snapshot,
        })
    }

    /// The session's store
    #[must_use]
    pub const fn store(&self) -> &OperadorasStore {
        &self.store
    }

    /// The session's router
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// The configuration the app was built with
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Route of the last successful navigation
    pub async fn current_route(&self) -> Option<RouteMatch> {
        self.current.read().await.clone()
    }

    /// Response actions as the store receives them
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OperadorasAction> {
        self.store.subscribe_actions()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use crate::router::RouteName;
    use ans_dashboard_testing::{MockOperadorasApi, RecordedRequest, fixtures, test_clock};

    fn app_with(api: &MockOperadorasApi) -> App {
        App::with_dependencies(
            DashboardConfig {
                page_size: 25,
                ..DashboardConfig::default()
            },
            Arc::new(api.clone()),
            Arc::new(test_clock()),
        )
    }

    #[tokio::test]
    async fn bootstrap_builds_a_client_for_the_origin() {
        let app = App::bootstrap(DashboardConfig::default()).unwrap();
        assert_eq!(app.config().api_origin, "http://localhost:8000");
        assert!(app.current_route().await.is_none());
        assert!(!app.store().state(OperadorasState::is_loading).await);
    }

    #[tokio::test]
    async fn page_size_comes_from_config() {
        let api = MockOperadorasApi::new();
        api.push_list(Ok(fixtures::page(vec![], 0, 0)));
        let app = app_with(&api);

        let mounted = app.mount("/operadoras").await.unwrap();

        assert_eq!(mounted.view, "OperadorasView");
        assert_eq!(api.last_list_query().unwrap().limit, 25);
        assert_eq!(mounted.snapshot["pagination"]["limit"], 25);
    }

    #[tokio::test]
    async fn mount_records_current_route() {
        let api = MockOperadorasApi::new();
        api.push_estatisticas(Ok(fixtures::estatisticas()));
        let app = app_with(&api);

        app.mount("/").await.unwrap();

        let route = app.current_route().await.unwrap();
        assert_eq!(route.name, RouteName::Dashboard);
        assert_eq!(api.requests(), vec![RecordedRequest::Estatisticas]);
    }

    #[tokio::test]
    async fn unknown_path_keeps_previous_route() {
        let api = MockOperadorasApi::new();
        api.push_estatisticas(Ok(fixtures::estatisticas()));
        let app = app_with(&api);
        app.mount("/").await.unwrap();

        let error = app.mount("/nowhere").await.unwrap_err();

        assert!(matches!(error, AppError::Router(RouterError::NotFound(_))));
        assert_eq!(
            app.current_route().await.unwrap().name,
            RouteName::Dashboard
        );
    }
}
