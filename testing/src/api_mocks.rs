//! Scripted operadoras API for store tests
//!
//! Provides a deterministic stand-in for the HTTP client:
//! - [`MockOperadorasApi`]: queued results per endpoint, optional delays
//! - [`RecordedRequest`]: every call the store made, in call order

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use ans_dashboard_api::{
    ApiError, ApiFuture, Cnpj, Despesa, Estatisticas, ListQuery, Locale, Operadora,
    OperadorasApi, OperadorasPage,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A call made against [`MockOperadorasApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedRequest {
    /// `GET /operadoras`
    List(ListQuery),
    /// `GET /operadoras/{cnpj}`
    Operadora(Cnpj),
    /// `GET /operadoras/{cnpj}/despesas`
    Despesas(Cnpj),
    /// `GET /estatisticas`
    Estatisticas,
}

/// One queued answer
#[derive(Clone, Debug)]
struct Scripted<T> {
    result: Result<T, ApiError>,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct Script {
    list: VecDeque<Scripted<OperadorasPage>>,
    operadora: VecDeque<Scripted<Operadora>>,
    despesas: VecDeque<Scripted<Vec<Despesa>>>,
    estatisticas: VecDeque<Scripted<Estatisticas>>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`OperadorasApi`] with scripted results
///
/// Each endpoint answers from its own FIFO queue. A call with nothing queued
/// fails with a network error so a missing script shows up as a store error
/// instead of a hang.
///
/// # Example
///
/// ```
/// use ans_dashboard_testing::{fixtures, MockOperadorasApi, RecordedRequest};
/// use ans_dashboard_api::OperadorasApi;
///
/// # async fn example() {
/// let api = MockOperadorasApi::new();
/// api.push_estatisticas(Ok(fixtures::estatisticas()));
///
/// let stats = api.get_estatisticas().await.unwrap();
/// assert_eq!(stats.total_operadoras, 2);
/// assert_eq!(api.requests(), vec![RecordedRequest::Estatisticas]);
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockOperadorasApi {
    script: Arc<Mutex<Script>>,
}

impl MockOperadorasApi {
    /// Create a mock with empty queues
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next `list_operadoras` call
    pub fn push_list(&self, result: Result<OperadorasPage, ApiError>) {
        let mut script = self.script.lock().unwrap();
        script.list.push_back(Scripted {
            result,
            delay: None,
        });
    }

    /// Queue a `list_operadoras` result that is delivered after `delay`
    pub fn push_list_delayed(&self, result: Result<OperadorasPage, ApiError>, delay: Duration) {
        let mut script = self.script.lock().unwrap();
        script.list.push_back(Scripted {
            result,
            delay: Some(delay),
        });
    }

    /// Queue a result for the next `get_operadora` call
    pub fn push_operadora(&self, result: Result<Operadora, ApiError>) {
        let mut script = self.script.lock().unwrap();
        script.operadora.push_back(Scripted {
            result,
            delay: None,
        });
    }

    /// Queue a `get_operadora` result that is delivered after `delay`
    pub fn push_operadora_delayed(&self, result: Result<Operadora, ApiError>, delay: Duration) {
        let mut script = self.script.lock().unwrap();
        script.operadora.push_back(Scripted {
            result,
            delay: Some(delay),
        });
    }

    /// Queue a result for the next `get_despesas` call
    pub fn push_despesas(&self, result: Result<Vec<Despesa>, ApiError>) {
        let mut script = self.script.lock().unwrap();
        script.despesas.push_back(Scripted {
            result,
            delay: None,
        });
    }

    /// Queue a result for the next `get_estatisticas` call
    pub fn push_estatisticas(&self, result: Result<Estatisticas, ApiError>) {
        let mut script = self.script.lock().unwrap();
        script.estatisticas.push_back(Scripted {
            result,
            delay: None,
        });
    }

    /// All calls received so far, in call order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Only the list queries, in call order
    #[must_use]
    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                RecordedRequest::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    /// The most recent list query, if any
    #[must_use]
    pub fn last_list_query(&self) -> Option<ListQuery> {
        self.list_queries().pop()
    }

    /// Record the call and take the next scripted answer
    fn answer<T>(
        &self,
        request: RecordedRequest,
        pick: impl FnOnce(&mut Script) -> Option<Scripted<T>>,
    ) -> ApiFuture<'static, T>
    where
        T: Send + 'static,
    {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request);
            pick(&mut script)
        };

        Box::pin(async move {
            let Some(Scripted { result, delay }) = next else {
                return Err(ApiError::network(Locale::default(), "no scripted response"));
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

impl OperadorasApi for MockOperadorasApi {
    fn list_operadoras(&self, query: ListQuery) -> ApiFuture<'_, OperadorasPage> {
        self.answer(RecordedRequest::List(query), |s| s.list.pop_front())
    }

    fn get_operadora(&self, cnpj: Cnpj) -> ApiFuture<'_, Operadora> {
        self.answer(RecordedRequest::Operadora(cnpj), |s| s.operadora.pop_front())
    }

    fn get_despesas(&self, cnpj: Cnpj) -> ApiFuture<'_, Vec<Despesa>> {
        self.answer(RecordedRequest::Despesas(cnpj), |s| s.despesas.pop_front())
    }

    fn get_estatisticas(&self) -> ApiFuture<'_, Estatisticas> {
        self.answer(RecordedRequest::Estatisticas, |s| s.estatisticas.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn answers_in_fifo_order() {
        let api = MockOperadorasApi::new();
        api.push_list(Ok(fixtures::page(vec![fixtures::operadora("11222333000181", "A")], 1, 1)));
        api.push_list(Ok(fixtures::page(vec![], 0, 0)));

        let first = api.list_operadoras(fixtures::list_query(1, 10)).await.unwrap();
        let second = api.list_operadoras(fixtures::list_query(2, 10)).await.unwrap();

        assert_eq!(first.data.len(), 1);
        assert!(second.data.is_empty());
        assert_eq!(api.list_queries().len(), 2);
        assert_eq!(api.last_list_query().unwrap().page, 2);
    }

    #[tokio::test]
    async fn missing_script_is_a_network_error() {
        let api = MockOperadorasApi::new();
        let error = api.get_operadora(Cnpj::from("123")).await.unwrap_err();
        assert!(error.is_network());
        assert_eq!(api.requests(), vec![RecordedRequest::Operadora(Cnpj::from("123"))]);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_answers_wait() {
        let api = MockOperadorasApi::new();
        api.push_operadora_delayed(
            Ok(fixtures::operadora("11222333000181", "A")),
            Duration::from_secs(3),
        );

        let started = tokio::time::Instant::now();
        let operadora = api.get_operadora(Cnpj::from("11222333000181")).await.unwrap();

        assert_eq!(operadora.razao_social, "A");
        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
