//! Data types returned by the operadoras API
//!
//! The backend owns these records. The client only needs a handful of fields
//! by name; everything else is kept in `extra` and passed through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes the client does not model explicitly
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Tax-registration identifier of an operator
///
/// Holds the value exactly as received. The backend accepts both
/// `12.345.678/0001-95` and `12345678000195`, so no normalization is applied
/// before a request; the client sends the value as one percent-encoded path
/// segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cnpj(String);

/// Weights for the first check digit
const FIRST_DIGIT_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second check digit
const SECOND_DIGIT_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

impl Cnpj {
    /// Wrap a raw identifier, trimming surrounding whitespace
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.trim().to_string())
    }

    /// The identifier as received
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the digits of the identifier
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Whether the identifier has 14 digits and correct check digits
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let digits: Vec<u32> = self.0.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != 14 || digits.iter().all(|d| *d == digits[0]) {
            return false;
        }

        check_digit(&digits[..12], &FIRST_DIGIT_WEIGHTS) == digits[12]
            && check_digit(&digits[..13], &SECOND_DIGIT_WEIGHTS) == digits[13]
    }

    /// Display form `XX.XXX.XXX/XXXX-XX`, or the raw value when it does not
    /// have 14 digits
    #[must_use]
    pub fn formatted(&self) -> String {
        let digits = self.digits();
        if digits.len() != 14 {
            return self.0.clone();
        }
        format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        )
    }
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cnpj {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Cnpj {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Monetary values arrive either as JSON numbers or as decimal strings
mod amount {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    fn parse<E: Error>(raw: RawAmount) -> Result<f64, E> {
        match raw {
            RawAmount::Number(value) => Ok(value),
            RawAmount::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount: {text:?}"))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse(RawAmount::deserialize(deserializer)?)
    }

    pub mod option {
        use super::{RawAmount, parse};
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<RawAmount>::deserialize(deserializer)?
                .map(parse)
                .transpose()
        }
    }
}

/// A health-insurance operator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operadora {
    /// Tax-registration identifier
    pub cnpj: Cnpj,
    /// Registered company name
    pub razao_social: String,
    /// Backend row id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// ANS registry number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registro_ans: Option<String>,
    /// Operator category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidade: Option<String>,
    /// State code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    /// Sum of all recorded expenses
    #[serde(
        default,
        deserialize_with = "amount::option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_despesas: Option<f64>,
    /// Number of quarters with expense records (detail responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantidade_trimestres: Option<u32>,
    /// Pass-through attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// One expense entry of an operator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Despesa {
    /// Quarter label, e.g. `"1T"`
    pub trimestre: String,
    /// Year
    pub ano: i32,
    /// Expense amount for the quarter
    #[serde(deserialize_with = "amount::deserialize")]
    pub valor_despesas: f64,
    /// Pass-through attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// Ranking entry in the statistics snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopOperadora {
    /// Tax-registration identifier
    pub cnpj: Cnpj,
    /// Registered company name
    pub razao_social: String,
    /// Sum of expenses
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_despesas: f64,
    /// State code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
}

/// Expense distribution for one state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistribuicaoUf {
    /// State code
    pub uf: String,
    /// Sum of expenses in the state
    #[serde(deserialize_with = "amount::deserialize")]
    pub total: f64,
    /// Operators based in the state
    pub quantidade_operadoras: u64,
    /// Share of the national total, in percent
    pub percentual: f64,
}

/// Aggregate statistics snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estatisticas {
    /// Sum of all expenses
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_despesas: f64,
    /// Mean expense
    #[serde(deserialize_with = "amount::deserialize")]
    pub media_despesas: f64,
    /// Number of operators with data
    pub total_operadoras: u64,
    /// Top five operators by expenses
    #[serde(default)]
    pub top_5_operadoras: Vec<TopOperadora>,
    /// Expenses per state
    #[serde(default)]
    pub distribuicao_por_uf: Vec<DistribuicaoUf>,
    /// Pass-through attributes
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pagination metadata of a list response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of matching records
    pub total: u64,
    /// Total number of pages
    pub pages: u64,
    /// Page that was returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size that was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Whether a next page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// Whether a previous page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

/// One page of operators
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperadorasPage {
    /// Operators on this page
    pub data: Vec<Operadora>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;

    #[test]
    fn cnpj_keeps_raw_value() {
        let cnpj = Cnpj::new(" 12.345.678/0001-95 ");
        assert_eq!(cnpj.as_str(), "12.345.678/0001-95");
        assert_eq!(cnpj.digits(), "12345678000195");
        assert_eq!(cnpj.to_string(), "12.345.678/0001-95");
    }

    #[test]
    fn cnpj_check_digits() {
        assert!(Cnpj::from("11.222.333/0001-81").is_valid());
        assert!(Cnpj::from("11222333000181").is_valid());
        assert!(!Cnpj::from("11222333000182").is_valid());
        assert!(!Cnpj::from("11111111111111").is_valid());
        assert!(!Cnpj::from("123").is_valid());
    }

    #[test]
    fn cnpj_formatting() {
        assert_eq!(Cnpj::from("11222333000181").formatted(), "11.222.333/0001-81");
        assert_eq!(Cnpj::from("123").formatted(), "123");
    }

    #[test]
    fn operadora_keeps_unknown_fields() {
        let json = r#"{
            "id": 7,
            "cnpj": "11222333000181",
            "razao_social": "SAUDE TOTAL LTDA",
            "uf": "SP",
            "total_despesas": 1500.5,
            "data_registro_ans": "2001-05-10"
        }"#;

        let operadora: Operadora = serde_json::from_str(json).unwrap();
        assert_eq!(operadora.id, Some(7));
        assert_eq!(operadora.uf.as_deref(), Some("SP"));
        assert_eq!(operadora.total_despesas, Some(1500.5));
        assert_eq!(
            operadora.extra.get("data_registro_ans"),
            Some(&serde_json::json!("2001-05-10"))
        );

        let back = serde_json::to_value(&operadora).unwrap();
        assert_eq!(back["data_registro_ans"], "2001-05-10");
    }

    #[test]
    fn amounts_accept_decimal_strings() {
        let json = r#"{"trimestre":"2T","ano":2024,"valor_despesas":"98765.43"}"#;
        let despesa: Despesa = serde_json::from_str(json).unwrap();
        assert!((despesa.valor_despesas - 98_765.43).abs() < f64::EPSILON);

        let json = r#"{"trimestre":"2T","ano":2024,"valor_despesas":"abc"}"#;
        assert!(serde_json::from_str::<Despesa>(json).is_err());
    }

    #[test]
    fn estatisticas_decode() {
        let json = r#"{
            "total_despesas": "1000.00",
            "media_despesas": "250.00",
            "total_operadoras": 4,
            "top_5_operadoras": [
                {"cnpj": "11222333000181", "razao_social": "A", "total_despesas": "600.00", "uf": "SP"}
            ],
            "distribuicao_por_uf": [
                {"uf": "SP", "total": "600.00", "quantidade_operadoras": 2, "percentual": 60.0}
            ]
        }"#;

        let stats: Estatisticas = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_operadoras, 4);
        assert_eq!(stats.top_5_operadoras.len(), 1);
        assert_eq!(stats.distribuicao_por_uf[0].uf, "SP");
        assert!(stats.extra.is_empty());
    }

    #[test]
    fn page_meta_only_requires_totals() {
        let json = r#"{"data": [], "meta": {"total": 0, "pages": 1}}"#;
        let page: OperadorasPage = serde_json::from_str(json).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.pages, 1);
        assert_eq!(page.meta.has_next, None);
    }
}
