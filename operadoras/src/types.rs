//! State and actions of the operadoras store.
//!
//! The state is the single source of truth the views render from: the loaded
//! records, the filter and pagination inputs of the next list request, and the
//! shared `loading`/`error` pair.

use ans_dashboard_api::{ApiError, Cnpj, Despesa, Estatisticas, Operadora, OperadorasPage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size of the list request
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter inputs of the list request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filtros {
    /// Free-text search over name and CNPJ
    pub q: String,
    /// State code
    pub uf: String,
}

impl Filtros {
    /// Whether no filter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.q.is_empty() && self.uf.is_empty()
    }

    /// Shallow merge: only the fields present in `patch` are replaced
    pub fn merge(&mut self, patch: FiltrosPatch) {
        if let Some(q) = patch.q {
            self.q = q;
        }
        if let Some(uf) = patch.uf {
            self.uf = uf;
        }
    }
}

/// Partial filter update
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltrosPatch {
    /// New search text, if it changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// New state code, if it changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
}

impl FiltrosPatch {
    /// Patch that only sets the search text
    #[must_use]
    pub fn q(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            uf: None,
        }
    }

    /// Patch that only sets the state code
    #[must_use]
    pub fn uf(uf: impl Into<String>) -> Self {
        Self {
            q: None,
            uf: Some(uf.into()),
        }
    }
}

/// Pagination state
///
/// `page` and `limit` are inputs to the next list request; `total` and
/// `pages` are overwritten from every accepted list response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total number of matching records
    pub total: u64,
    /// Total number of pages
    pub pages: u64,
}

impl Pagination {
    /// First page with the given page size
    #[must_use]
    pub const fn with_limit(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            pages: 0,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

/// Kind of read request the store issues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Operator list
    List,
    /// Single operator
    Detail,
    /// Expenses of one operator
    Despesas,
    /// Statistics snapshot
    Estatisticas,
}

impl RequestKind {
    const fn index(self) -> usize {
        match self {
            Self::List => 0,
            Self::Detail => 1,
            Self::Despesas => 2,
            Self::Estatisticas => 3,
        }
    }

    /// Label used in logs and metrics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Despesas => "despesas",
            Self::Estatisticas => "estatisticas",
        }
    }
}

/// Identity of one issued request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId {
    /// Request kind
    pub kind: RequestKind,
    /// Generation within the kind, starting at 1
    pub generation: u64,
}

/// Bookkeeping for in-flight requests
///
/// Each kind has a generation counter; only a response carrying the latest
/// generation of its kind may touch state. The in-flight count covers all
/// kinds and drives the shared `loading` flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestTracker {
    generations: [u64; 4],
    in_flight: usize,
}

impl RequestTracker {
    /// Start a request of `kind`, superseding any older one of the same kind
    pub fn begin(&mut self, kind: RequestKind) -> RequestId {
        let generation = &mut self.generations[kind.index()];
        *generation += 1;
        self.in_flight += 1;
        RequestId {
            kind,
            generation: *generation,
        }
    }

    /// Finish a request; returns whether it is still the latest of its kind
    pub fn finish(&mut self, request: RequestId) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_current(request)
    }

    /// Whether `request` is the latest issued request of its kind
    #[must_use]
    pub fn is_current(&self, request: RequestId) -> bool {
        self.generations[request.kind.index()] == request.generation
    }

    /// Number of requests started but not finished
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// State of the operadoras store
#[derive(Clone, Debug, Default, Serialize)]
pub struct OperadorasState {
    /// Current page of operators
    pub operadoras: Vec<Operadora>,
    /// Operator shown on the detail view
    pub operadora_atual: Option<Operadora>,
    /// Expenses of the operator shown on the detail view
    pub despesas_operadora: Vec<Despesa>,
    /// Statistics snapshot for the dashboard
    pub estatisticas: Option<Estatisticas>,
    /// Filter inputs
    pub filtros: Filtros,
    /// Pagination inputs and server totals
    pub pagination: Pagination,
    /// Whether any request is in flight
    pub loading: bool,
    /// Message of the last failure
    pub error: Option<String>,
    /// When a response was last applied
    pub last_updated: Option<DateTime<Utc>>,
    /// Request generations and in-flight count
    #[serde(skip)]
    pub requests: RequestTracker,
}

impl OperadorasState {
    /// Empty state whose list requests use the given page size
    #[must_use]
    pub fn with_page_size(limit: u32) -> Self {
        Self {
            pagination: Pagination::with_limit(limit),
            ..Self::default()
        }
    }

    /// Whether the current page has any operator
    #[must_use]
    pub fn has_operadoras(&self) -> bool {
        !self.operadoras.is_empty()
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last request failed
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of pages reported by the last list response
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.pagination.pages
    }
}

/// Actions of the operadoras store
#[derive(Clone, Debug)]
pub enum OperadorasAction {
    // ========== Read actions ==========
    /// Load the current page of operators with the current filters
    FetchOperadoras,

    /// Load one operator
    FetchOperadora {
        /// Operator to load
        cnpj: Cnpj,
    },

    /// Load the expenses of one operator
    FetchDespesasOperadora {
        /// Operator whose expenses to load
        cnpj: Cnpj,
    },

    /// Load the statistics snapshot
    FetchEstatisticas,

    // ========== Mutations ==========
    /// Merge filters, go back to the first page and reload the list
    SetFiltros(FiltrosPatch),

    /// Go to a page and reload the list
    SetPage {
        /// 1-based page number
        page: u32,
    },

    /// Clear all filters, go back to the first page and reload the list
    ClearFiltros,

    // ========== Responses ==========
    /// List request completed
    OperadorasLoaded {
        /// Request this answers
        request: RequestId,
        /// Page or failure
        result: Result<OperadorasPage, ApiError>,
    },

    /// Detail request completed
    OperadoraLoaded {
        /// Request this answers
        request: RequestId,
        /// Operator or failure
        result: Result<Operadora, ApiError>,
    },

    /// Expenses request completed
    DespesasLoaded {
        /// Request this answers
        request: RequestId,
        /// Expenses or failure
        result: Result<Vec<Despesa>, ApiError>,
    },

    /// Statistics request completed
    EstatisticasLoaded {
        /// Request this answers
        request: RequestId,
        /// Snapshot or failure
        result: Result<Estatisticas, ApiError>,
    },
}

impl OperadorasAction {
    /// Whether this action carries a response
    #[must_use]
    pub const fn is_response(&self) -> bool {
        matches!(
            self,
            Self::OperadorasLoaded { .. }
                | Self::OperadoraLoaded { .. }
                | Self::DespesasLoaded { .. }
                | Self::EstatisticasLoaded { .. }
        )
    }

    /// Action name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchOperadoras => "fetch_operadoras",
            Self::FetchOperadora { .. } => "fetch_operadora",
            Self::FetchDespesasOperadora { .. } => "fetch_despesas_operadora",
            Self::FetchEstatisticas => "fetch_estatisticas",
            Self::SetFiltros(_) => "set_filtros",
            Self::SetPage { .. } => "set_page",
            Self::ClearFiltros => "clear_filtros",
            Self::OperadorasLoaded { .. } => "operadoras_loaded",
            Self::OperadoraLoaded { .. } => "operadora_loaded",
            Self::DespesasLoaded { .. } => "despesas_loaded",
            Self::EstatisticasLoaded { .. } => "estatisticas_loaded",
        }
    }
}
