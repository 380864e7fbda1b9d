//! Route table
//!
//! Routes are registered explicitly, each with a view constructor. A view is
//! constructed the first time its route is navigated to and reused for every
//! later navigation.

use crate::views::{DashboardView, OperadoraDetalheView, OperadorasView, View};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Router errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// No route matches the path
    #[error("No route matches {0}")]
    NotFound(String),
}

/// Names of the registered routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RouteName {
    /// `/`
    Dashboard,
    /// `/operadoras`
    Operadoras,
    /// `/operadoras/:cnpj`
    OperadoraDetalhe,
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Operadoras => write!(f, "Operadoras"),
            Self::OperadoraDetalhe => write!(f, "OperadoraDetalhe"),
        }
    }
}

/// Path parameters handed to a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteProps(BTreeMap<String, String>);

impl RouteProps {
    /// Value of a parameter
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RouteProps {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Result of matching a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Matched route
    pub name: RouteName,
    /// Path as navigated, without query string
    pub path: String,
    /// Parameters forwarded to the view (empty unless the route passes props)
    pub props: RouteProps,
}

type ViewConstructor = fn() -> Arc<dyn View>;

/// One registered route
struct RouteEntry {
    name: RouteName,
    pattern: &'static str,
    props: bool,
    construct: ViewConstructor,
    view: OnceLock<Arc<dyn View>>,
}

impl RouteEntry {
    fn new(name: RouteName, pattern: &'static str, props: bool, construct: ViewConstructor) -> Self {
        Self {
            name,
            pattern,
            props,
            construct,
            view: OnceLock::new(),
        }
    }

    /// Match path segments against the pattern, capturing `:name` segments
    fn matches(&self, segments: &[&str]) -> Option<Vec<(&'static str, String)>> {
        let pattern: Vec<&'static str> = split_segments(self.pattern);
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (expected, actual) in pattern.into_iter().zip(segments) {
            if let Some(param) = expected.strip_prefix(':') {
                params.push((param, (*actual).to_string()));
            } else if expected != *actual {
                return None;
            }
        }
        Some(params)
    }

    fn view(&self) -> Arc<dyn View> {
        Arc::clone(self.view.get_or_init(|| {
            tracing::debug!(route = %self.name, "Constructing view");
            (self.construct)()
        }))
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn dashboard_view() -> Arc<dyn View> {
    Arc::new(DashboardView)
}

fn operadoras_view() -> Arc<dyn View> {
    Arc::new(OperadorasView)
}

fn operadora_detalhe_view() -> Arc<dyn View> {
    Arc::new(OperadoraDetalheView)
}

/// The route table
pub struct Router {
    routes: Vec<RouteEntry>,
}

impl Router {
    /// Router with the dashboard's three routes
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: vec![
                RouteEntry::new(RouteName::Dashboard, "/", false, dashboard_view),
                RouteEntry::new(RouteName::Operadoras, "/operadoras", false, operadoras_view),
                RouteEntry::new(
                    RouteName::OperadoraDetalhe,
                    "/operadoras/:cnpj",
                    true,
                    operadora_detalhe_view,
                ),
            ],
        }
    }

    /// Match a path against the table
    ///
    /// The query string and a trailing slash are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotFound`] if no route matches
    pub fn match_path(&self, path: &str) -> Result<RouteMatch, RouterError> {
        self.find(path).map(|(_, route)| route)
    }

    /// Match a path and return its view, constructing it on first use
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotFound`] if no route matches
    pub fn resolve(&self, path: &str) -> Result<(RouteMatch, Arc<dyn View>), RouterError> {
        let (entry, route) = self.find(path)?;
        Ok((route, entry.view()))
    }

    /// Whether the view of a route has been constructed
    #[must_use]
    pub fn is_resolved(&self, name: RouteName) -> bool {
        self.routes
            .iter()
            .any(|entry| entry.name == name && entry.view.get().is_some())
    }

    /// Registered `(name, pattern)` pairs, in match order
    pub fn routes(&self) -> impl Iterator<Item = (RouteName, &'static str)> + '_ {
        self.routes.iter().map(|entry| (entry.name, entry.pattern))
    }

    fn find(&self, path: &str) -> Result<(&RouteEntry, RouteMatch), RouterError> {
        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        let segments = split_segments(path_only);

        for entry in &self.routes {
            if let Some(params) = entry.matches(&segments) {
                let props = if entry.props {
                    RouteProps(
                        params
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v))
                            .collect(),
                    )
                } else {
                    RouteProps::default()
                };
                let normalized = format!("/{}", segments.join("/"));
                return Ok((
                    entry,
                    RouteMatch {
                        name: entry.name,
                        path: normalized,
                        props,
                    },
                ));
            }
        }

        Err(RouterError::NotFound(path.to_string()))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
