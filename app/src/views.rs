//! Views of the dashboard
//!
//! Rendering is left to the presentation layer. A view here only declares
//! which store actions it dispatches when mounted and which slice of the
//! store state it displays.

use crate::router::RouteProps;
use ans_dashboard_api::Cnpj;
use operadoras::{OperadorasAction, OperadorasState};
use serde_json::{Value, json};

/// A screen the router can mount
pub trait View: Send + Sync {
    /// View name, as registered in the route table
    fn name(&self) -> &'static str;

    /// Actions to dispatch when the view is mounted with `props`
    fn on_mount(&self, props: &RouteProps) -> Vec<OperadorasAction>;

    /// State slice the view displays
    fn snapshot(&self, state: &OperadorasState, props: &RouteProps) -> Value;
}

/// Aggregate statistics screen at `/`
#[derive(Debug, Default)]
pub struct DashboardView;

impl View for DashboardView {
    fn name(&self) -> &'static str {
        "DashboardView"
    }

    fn on_mount(&self, _props: &RouteProps) -> Vec<OperadorasAction> {
        vec![OperadorasAction::FetchEstatisticas]
    }

    fn snapshot(&self, state: &OperadorasState, _props: &RouteProps) -> Value {
        json!({
            "estatisticas": state.estatisticas,
            "loading": state.is_loading(),
            "error": state.error,
        })
    }
}

/// Paginated, filterable operator list at `/operadoras`
#[derive(Debug, Default)]
pub struct OperadorasView;

impl View for OperadorasView {
    fn name(&self) -> &'static str {
        "OperadorasView"
    }

    fn on_mount(&self, _props: &RouteProps) -> Vec<OperadorasAction> {
        vec![OperadorasAction::FetchOperadoras]
    }

    fn snapshot(&self, state: &OperadorasState, _props: &RouteProps) -> Value {
        json!({
            "operadoras": state.operadoras,
            "has_operadoras": state.has_operadoras(),
            "filtros": state.filtros,
            "pagination": state.pagination,
            "total_pages": state.total_pages(),
            "loading": state.is_loading(),
            "error": state.error,
        })
    }
}

/// Operator detail with its expenses at `/operadoras/:cnpj`
#[derive(Debug, Default)]
pub struct OperadoraDetalheView;

impl OperadoraDetalheView {
    fn cnpj(props: &RouteProps) -> Option<Cnpj> {
        props.get("cnpj").map(Cnpj::from)
    }
}

impl View for OperadoraDetalheView {
    fn name(&self) -> &'static str {
        "OperadoraDetalheView"
    }

    fn on_mount(&self, props: &RouteProps) -> Vec<OperadorasAction> {
        let Some(cnpj) = Self::cnpj(props) else {
            return Vec::new();
        };
        vec![
            OperadorasAction::FetchOperadora { cnpj: cnpj.clone() },
            OperadorasAction::FetchDespesasOperadora { cnpj },
        ]
    }

    fn snapshot(&self, state: &OperadorasState, props: &RouteProps) -> Value {
        let cnpj = Self::cnpj(props);
        json!({
            "cnpj": cnpj.as_ref().map(Cnpj::formatted),
            "cnpj_valido": cnpj.as_ref().is_some_and(Cnpj::is_valid),
            "operadora": state.operadora_atual,
            "despesas": state.despesas_operadora,
            "loading": state.is_loading(),
            "error": state.error,
        })
    }
}
