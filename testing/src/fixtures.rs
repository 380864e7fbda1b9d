//! Sample records for tests

use ans_dashboard_api::{
    Cnpj, Despesa, DistribuicaoUf, Estatisticas, ListQuery, Operadora, OperadorasPage,
    PaginationMeta, TopOperadora,
};

/// An operator with only the identifying fields set
#[must_use]
pub fn operadora(cnpj: &str, razao_social: &str) -> Operadora {
    Operadora {
        cnpj: Cnpj::from(cnpj),
        razao_social: razao_social.to_string(),
        id: None,
        registro_ans: None,
        modalidade: None,
        uf: None,
        total_despesas: None,
        quantidade_trimestres: None,
        extra: serde_json::Map::new(),
    }
}

/// A page with the given records and totals
#[must_use]
pub fn page(data: Vec<Operadora>, total: u64, pages: u64) -> OperadorasPage {
    OperadorasPage {
        data,
        meta: PaginationMeta {
            total,
            pages,
            ..PaginationMeta::default()
        },
    }
}

/// An expense record
#[must_use]
pub fn despesa(trimestre: &str, ano: i32, valor: f64) -> Despesa {
    Despesa {
        trimestre: trimestre.to_string(),
        ano,
        valor_despesas: valor,
        extra: serde_json::Map::new(),
    }
}

/// A small statistics snapshot over two operators
#[must_use]
pub fn estatisticas() -> Estatisticas {
    Estatisticas {
        total_despesas: 3000.0,
        media_despesas: 1500.0,
        total_operadoras: 2,
        top_5_operadoras: vec![TopOperadora {
            cnpj: Cnpj::from("11222333000181"),
            razao_social: "SAUDE TOTAL LTDA".to_string(),
            total_despesas: 2000.0,
            uf: Some("SP".to_string()),
        }],
        distribuicao_por_uf: vec![DistribuicaoUf {
            uf: "SP".to_string(),
            total: 2000.0,
            quantidade_operadoras: 1,
            percentual: 66.67,
        }],
        extra: serde_json::Map::new(),
    }
}

/// A list query without filters
#[must_use]
pub fn list_query(page: u32, limit: u32) -> ListQuery {
    ListQuery {
        page,
        limit,
        q: String::new(),
        uf: String::new(),
    }
}
