//! Reducer logic for the operadoras store.
//!
//! Read actions flip `loading` on, clear `error` and return one effect that
//! calls the API. The effect feeds a response action back; the response is
//! applied only if no newer request of the same kind was issued meanwhile.

use crate::types::{Filtros, OperadorasAction, OperadorasState, RequestId, RequestKind};
use ans_dashboard_api::{ApiError, ListQuery, Locale, OperadorasApi};
use ans_dashboard_core::{
    SmallVec, async_effect, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};
use std::sync::Arc;

/// Environment dependencies for the operadoras reducer
#[derive(Clone)]
pub struct OperadorasEnvironment {
    /// Backend access
    pub api: Arc<dyn OperadorasApi>,
    /// Clock for `last_updated` stamps
    pub clock: Arc<dyn Clock>,
    /// Language of the fallback error messages
    pub locale: Locale,
}

impl OperadorasEnvironment {
    /// Creates a new `OperadorasEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn OperadorasApi>, clock: Arc<dyn Clock>, locale: Locale) -> Self {
        Self { api, clock, locale }
    }
}

/// Reducer for the operadoras store
#[derive(Clone, Debug, Default)]
pub struct OperadorasReducer;

impl OperadorasReducer {
    /// Creates a new `OperadorasReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Mark a request of `kind` as started
    fn begin(state: &mut OperadorasState, kind: RequestKind) -> RequestId {
        let request = state.requests.begin(kind);
        state.loading = true;
        state.error = None;
        tracing::debug!(
            kind = kind.as_str(),
            generation = request.generation,
            "Request started"
        );
        request
    }

    /// Mark a request as finished; returns whether its response may be applied
    fn finish(state: &mut OperadorasState, request: RequestId) -> bool {
        let current = state.requests.finish(request);
        state.loading = state.requests.in_flight() > 0;
        if !current {
            metrics::counter!("operadoras.responses.stale", "kind" => request.kind.as_str())
                .increment(1);
            tracing::debug!(
                kind = request.kind.as_str(),
                generation = request.generation,
                "Dropping stale response"
            );
        }
        current
    }

    /// Record a failure: backend detail if any, otherwise the action's default
    fn fail(state: &mut OperadorasState, request: RequestId, error: &ApiError, fallback: &str) {
        tracing::warn!(
            kind = request.kind.as_str(),
            status = ?error.status(),
            message = error.message(),
            cause = ?error.cause(),
            "Request failed"
        );
        state.error = Some(error.detail().unwrap_or(fallback).to_string());
    }

    /// Query for the list request from the current filters and pagination
    fn list_query(state: &OperadorasState) -> ListQuery {
        let Filtros { q, uf } = state.filtros.clone();
        ListQuery {
            page: state.pagination.page,
            limit: state.pagination.limit,
            q,
            uf,
        }
    }

    fn fetch_list(
        state: &mut OperadorasState,
        env: &OperadorasEnvironment,
    ) -> SmallVec<[Effect<OperadorasAction>; 4]> {
        let request = Self::begin(state, RequestKind::List);
        let query = Self::list_query(state);
        let api = Arc::clone(&env.api);

        smallvec![async_effect! {
            let result = api.list_operadoras(query).await;
            Some(OperadorasAction::OperadorasLoaded { request, result })
        }]
    }
}

impl Reducer for OperadorasReducer {
    type State = OperadorasState;
    type Action = OperadorasAction;
    type Environment = OperadorasEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action reads better than splitting
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Read actions ==========
            OperadorasAction::FetchOperadoras => Self::fetch_list(state, env),

            OperadorasAction::FetchOperadora { cnpj } => {
                let request = Self::begin(state, RequestKind::Detail);
                let api = Arc::clone(&env.api);

                smallvec![async_effect! {
                    let result = api.get_operadora(cnpj).await;
                    Some(OperadorasAction::OperadoraLoaded { request, result })
                }]
            },

            OperadorasAction::FetchDespesasOperadora { cnpj } => {
                let request = Self::begin(state, RequestKind::Despesas);
                let api = Arc::clone(&env.api);

                smallvec![async_effect! {
                    let result = api.get_despesas(cnpj).await;
                    Some(OperadorasAction::DespesasLoaded { request, result })
                }]
            },

            OperadorasAction::FetchEstatisticas => {
                let request = Self::begin(state, RequestKind::Estatisticas);
                let api = Arc::clone(&env.api);

                smallvec![async_effect! {
                    let result = api.get_estatisticas().await;
                    Some(OperadorasAction::EstatisticasLoaded { request, result })
                }]
            },

            // ========== Mutations ==========
            OperadorasAction::SetFiltros(patch) => {
                state.filtros.merge(patch);
                state.pagination.page = 1;
                Self::fetch_list(state, env)
            },

            OperadorasAction::SetPage { page } => {
                state.pagination.page = page.max(1);
                Self::fetch_list(state, env)
            },

            OperadorasAction::ClearFiltros => {
                state.filtros = Filtros::default();
                state.pagination.page = 1;
                Self::fetch_list(state, env)
            },

            // ========== Responses ==========
            OperadorasAction::OperadorasLoaded { request, result } => {
                if Self::finish(state, request) {
                    match result {
                        Ok(page) => {
                            state.operadoras = page.data;
                            state.pagination.total = page.meta.total;
                            state.pagination.pages = page.meta.pages;
                            state.last_updated = Some(env.clock.now());
                        },
                        Err(error) => {
                            Self::fail(
                                state,
                                request,
                                &error,
                                env.locale.error_loading_operadoras(),
                            );
                        },
                    }
                }
                SmallVec::new()
            },

            OperadorasAction::OperadoraLoaded { request, result } => {
                if Self::finish(state, request) {
                    match result {
                        Ok(operadora) => {
                            state.operadora_atual = Some(operadora);
                            state.last_updated = Some(env.clock.now());
                        },
                        Err(error) => {
                            Self::fail(state, request, &error, env.locale.operadora_not_found());
                            state.operadora_atual = None;
                        },
                    }
                }
                SmallVec::new()
            },

            OperadorasAction::DespesasLoaded { request, result } => {
                if Self::finish(state, request) {
                    match result {
                        Ok(despesas) => {
                            state.despesas_operadora = despesas;
                            state.last_updated = Some(env.clock.now());
                        },
                        Err(error) => {
                            Self::fail(state, request, &error, env.locale.error_loading_despesas());
                            state.despesas_operadora = Vec::new();
                        },
                    }
                }
                SmallVec::new()
            },

            OperadorasAction::EstatisticasLoaded { request, result } => {
                if Self::finish(state, request) {
                    match result {
                        Ok(estatisticas) => {
                            state.estatisticas = Some(estatisticas);
                            state.last_updated = Some(env.clock.now());
                        },
                        Err(error) => {
                            Self::fail(
                                state,
                                request,
                                &error,
                                env.locale.error_loading_estatisticas(),
                            );
                        },
                    }
                }
                SmallVec::new()
            },
        }
    }
}
