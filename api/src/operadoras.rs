//! Endpoints of the operadoras API
//!
//! [`OperadorasApi`] is the seam the store depends on. [`ApiClient`] is the
//! HTTP implementation; tests substitute a scripted one.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Cnpj, Despesa, Estatisticas, Operadora, OperadorasPage};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`OperadorasApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Query for one page of the operator list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Free-text search
    pub q: String,
    /// State code filter
    pub uf: String,
}

impl ListQuery {
    /// Query string pairs, leaving out empty filters
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        if !self.uf.is_empty() {
            pairs.push(("uf", self.uf.clone()));
        }
        pairs
    }
}

/// Read access to the operadoras backend
///
/// Methods return boxed futures so the trait stays object-safe and can be
/// shared as `Arc<dyn OperadorasApi>`.
pub trait OperadorasApi: Send + Sync {
    /// `GET /operadoras`
    fn list_operadoras(&self, query: ListQuery) -> ApiFuture<'_, OperadorasPage>;

    /// `GET /operadoras/{cnpj}`
    fn get_operadora(&self, cnpj: Cnpj) -> ApiFuture<'_, Operadora>;

    /// `GET /operadoras/{cnpj}/despesas`
    fn get_despesas(&self, cnpj: Cnpj) -> ApiFuture<'_, Vec<Despesa>>;

    /// `GET /estatisticas`
    fn get_estatisticas(&self) -> ApiFuture<'_, Estatisticas>;
}

impl OperadorasApi for ApiClient {
    fn list_operadoras(&self, query: ListQuery) -> ApiFuture<'_, OperadorasPage> {
        Box::pin(async move {
            let pairs = query.query_pairs();
            Ok(self.get("/operadoras", &[], &pairs).await?.data)
        })
    }

    fn get_operadora(&self, cnpj: Cnpj) -> ApiFuture<'_, Operadora> {
        Box::pin(async move {
            Ok(self
                .get("/operadoras/{cnpj}", &[cnpj.as_str()], &[])
                .await?
                .data)
        })
    }

    fn get_despesas(&self, cnpj: Cnpj) -> ApiFuture<'_, Vec<Despesa>> {
        Box::pin(async move {
            Ok(self
                .get("/operadoras/{cnpj}/despesas", &[cnpj.as_str()], &[])
                .await?
                .data)
        })
    }

    fn get_estatisticas(&self) -> ApiFuture<'_, Estatisticas> {
        Box::pin(async move { Ok(self.get("/estatisticas", &[], &[]).await?.data) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn query(q: &str, uf: &str) -> ListQuery {
        ListQuery {
            page: 2,
            limit: 10,
            q: q.to_string(),
            uf: uf.to_string(),
        }
    }

    #[test]
    fn empty_filters_are_omitted() {
        assert_eq!(
            query("", "").query_pairs(),
            vec![("page", "2".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn filters_are_appended() {
        assert_eq!(
            query("saude", "SP").query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("q", "saude".to_string()),
                ("uf", "SP".to_string()),
            ]
        );
    }

    proptest! {
        #[test]
        fn page_and_limit_always_present(page in 1u32..10_000, limit in 1u32..=100, q in ".{0,12}", uf in "[A-Z]{0,2}") {
            let pairs = ListQuery { page, limit, q: q.clone(), uf: uf.clone() }.query_pairs();
            prop_assert_eq!(&pairs[0], &("page", page.to_string()));
            prop_assert_eq!(&pairs[1], &("limit", limit.to_string()));
            prop_assert_eq!(pairs.iter().any(|(k, _)| *k == "q"), !q.is_empty());
            prop_assert_eq!(pairs.iter().any(|(k, _)| *k == "uf"), !uf.is_empty());
        }
    }
}
