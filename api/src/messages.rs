//! User-facing message catalog
//!
//! Every string the client shows to a user lives here, once per locale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for user-facing messages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese (default)
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Network failure, no response received
    #[must_use]
    pub const fn connection_error(self) -> &'static str {
        match self {
            Self::PtBr => "Erro de conexão. Verifique sua internet.",
            Self::En => "Connection error. Check your internet connection.",
        }
    }

    /// HTTP 400 without a backend detail
    #[must_use]
    pub const fn invalid_request(self) -> &'static str {
        match self {
            Self::PtBr => "Requisição inválida",
            Self::En => "Invalid request",
        }
    }

    /// HTTP 401
    #[must_use]
    pub const fn unauthorized(self) -> &'static str {
        match self {
            Self::PtBr => "Não autorizado",
            Self::En => "Unauthorized",
        }
    }

    /// HTTP 403
    #[must_use]
    pub const fn access_denied(self) -> &'static str {
        match self {
            Self::PtBr => "Acesso negado",
            Self::En => "Access denied",
        }
    }

    /// HTTP 404 without a backend detail
    #[must_use]
    pub const fn resource_not_found(self) -> &'static str {
        match self {
            Self::PtBr => "Recurso não encontrado",
            Self::En => "Resource not found",
        }
    }

    /// HTTP 500
    #[must_use]
    pub const fn internal_server_error(self) -> &'static str {
        match self {
            Self::PtBr => "Erro interno do servidor. Tente novamente mais tarde.",
            Self::En => "Internal server error. Try again later.",
        }
    }

    /// Any other failure without a backend detail
    #[must_use]
    pub const fn unexpected_error(self) -> &'static str {
        match self {
            Self::PtBr => "Ocorreu um erro inesperado",
            Self::En => "An unexpected error occurred",
        }
    }

    /// Store fallback when the operator list cannot be loaded
    #[must_use]
    pub const fn error_loading_operadoras(self) -> &'static str {
        match self {
            Self::PtBr => "Erro ao carregar operadoras",
            Self::En => "Error loading operators",
        }
    }

    /// Store fallback when a single operator cannot be loaded
    #[must_use]
    pub const fn operadora_not_found(self) -> &'static str {
        match self {
            Self::PtBr => "Operadora não encontrada",
            Self::En => "Operator not found",
        }
    }

    /// Store fallback when an operator's expenses cannot be loaded
    #[must_use]
    pub const fn error_loading_despesas(self) -> &'static str {
        match self {
            Self::PtBr => "Erro ao carregar despesas",
            Self::En => "Error loading expenses",
        }
    }

    /// Store fallback when statistics cannot be loaded
    #[must_use]
    pub const fn error_loading_estatisticas(self) -> &'static str {
        match self {
            Self::PtBr => "Erro ao carregar estatísticas",
            Self::En => "Error loading statistics",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PtBr => write!(f, "pt-BR"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Returned when a locale tag is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_portuguese() {
        assert_eq!(Locale::default(), Locale::PtBr);
        assert_eq!(
            Locale::default().connection_error(),
            "Erro de conexão. Verifique sua internet."
        );
    }

    #[test]
    fn parses_common_tags() {
        assert_eq!("pt-BR".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!("pt_br".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(UnsupportedLocale("fr".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for locale in [Locale::PtBr, Locale::En] {
            assert_eq!(locale.to_string().parse::<Locale>(), Ok(locale));
        }
    }
}
