//! Integration tests for the HTTP client against a mock backend

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use ans_dashboard_api::{
    ApiClient, ApiClientConfig, ApiErrorKind, Cnpj, ListQuery, Locale, OperadorasApi,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, locale: Locale) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.uri()).with_locale(locale)).unwrap()
}

fn first_page() -> ListQuery {
    ListQuery {
        page: 1,
        limit: 10,
        q: String::new(),
        uf: String::new(),
    }
}

#[tokio::test]
async fn list_sends_pagination_and_json_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("uf"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"cnpj": "11222333000181", "razao_social": "SAUDE TOTAL LTDA", "uf": "SP"}],
            "meta": {"total": 1, "page": 1, "limit": 10, "pages": 1, "has_next": false, "has_prev": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server, Locale::PtBr)
        .list_operadoras(first_page())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].cnpj, Cnpj::from("11222333000181"));
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.meta.pages, 1);
}

#[tokio::test]
async fn list_forwards_non_empty_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "25"))
        .and(query_param("q", "unimed"))
        .and(query_param("uf", "RJ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "meta": {"total": 0, "pages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server, Locale::PtBr)
        .list_operadoras(ListQuery {
            page: 3,
            limit: 25,
            q: "unimed".to_string(),
            uf: "RJ".to_string(),
        })
        .await
        .unwrap();

    assert!(page.data.is_empty());
}

#[tokio::test]
async fn get_returns_status_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "abc")
                .set_body_json(json!({
                    "total_despesas": "1000.00",
                    "media_despesas": "500.00",
                    "total_operadoras": 2
                })),
        )
        .mount(&server)
        .await;

    let response = client(&server, Locale::PtBr)
        .get::<serde_json::Value>("/estatisticas", &[], &[])
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.headers.get("x-request-id").unwrap(), "abc");
    assert_eq!(response.data["total_operadoras"], 2);
}

#[tokio::test]
async fn detail_and_despesas_use_cnpj_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/11222333000181"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cnpj": "11222333000181",
            "razao_social": "SAUDE TOTAL LTDA",
            "total_despesas": "1234.50",
            "quantidade_trimestres": 4
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/11222333000181/despesas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"trimestre": "1T", "ano": 2024, "valor_despesas": "600.00"},
            {"trimestre": "2T", "ano": 2024, "valor_despesas": 634.5}
        ])))
        .mount(&server)
        .await;

    let api = client(&server, Locale::PtBr);
    let cnpj = Cnpj::from("11222333000181");

    let operadora = api.get_operadora(cnpj.clone()).await.unwrap();
    assert_eq!(operadora.total_despesas, Some(1234.5));
    assert_eq!(operadora.quantidade_trimestres, Some(4));

    let despesas = api.get_despesas(cnpj).await.unwrap();
    assert_eq!(despesas.len(), 2);
    assert_eq!(despesas[1].trimestre, "2T");
}

#[tokio::test]
async fn error_statuses_are_normalized() {
    let cases: [(u16, serde_json::Value, ApiErrorKind, &str); 6] = [
        (400, json!({"detail": "uf inválida"}), ApiErrorKind::BadRequest, "uf inválida"),
        (401, json!({}), ApiErrorKind::Unauthorized, "Não autorizado"),
        (403, json!({"detail": "nope"}), ApiErrorKind::Forbidden, "Acesso negado"),
        (404, json!({}), ApiErrorKind::NotFound, "Recurso não encontrado"),
        (
            500,
            json!({"detail": "db down"}),
            ApiErrorKind::ServerError,
            "Erro interno do servidor. Tente novamente mais tarde.",
        ),
        (503, json!({}), ApiErrorKind::Unexpected, "Ocorreu um erro inesperado"),
    ];

    for (status, body, kind, message) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/estatisticas"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;

        let error = client(&server, Locale::PtBr)
            .get_estatisticas()
            .await
            .unwrap_err();

        assert_eq!(error.kind(), kind, "status {status}");
        assert_eq!(error.status(), Some(status));
        assert_eq!(error.message(), message, "status {status}");
    }
}

#[tokio::test]
async fn not_found_detail_reaches_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/123"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "Operadora com CNPJ 123 não encontrada"})),
        )
        .mount(&server)
        .await;

    let error = client(&server, Locale::En)
        .get_operadora(Cnpj::from("123"))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ApiErrorKind::NotFound);
    assert_eq!(error.detail(), Some("Operadora com CNPJ 123 não encontrada"));
    assert_eq!(error.message(), "Operadora com CNPJ 123 não encontrada");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = client(&server, Locale::En)
        .get_estatisticas()
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ApiErrorKind::Decode);
    assert_eq!(error.status(), Some(200));
    assert_eq!(error.message(), "An unexpected error occurred");
    assert!(error.cause().is_some());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error_on_every_endpoint() {
    // Bind then drop a listener so the port is known to be closed
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let api = ApiClient::new(
        ApiClientConfig::new(uri)
            .with_timeout(Duration::from_secs(2))
            .with_locale(Locale::PtBr),
    )
    .unwrap();
    let cnpj = Cnpj::from("11222333000181");

    let errors = vec![
        ("list", api.list_operadoras(first_page()).await.unwrap_err()),
        ("detail", api.get_operadora(cnpj.clone()).await.unwrap_err()),
        ("despesas", api.get_despesas(cnpj).await.unwrap_err()),
        ("estatisticas", api.get_estatisticas().await.unwrap_err()),
    ];

    for (endpoint, error) in errors {
        assert!(error.is_network(), "{endpoint}: {error:?}");
        assert_eq!(error.status(), None, "{endpoint}");
        assert_eq!(
            error.message(),
            "Erro de conexão. Verifique sua internet.",
            "{endpoint}"
        );
    }
}

#[tokio::test]
async fn cnpj_is_sent_as_a_single_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
        .mount(&server)
        .await;

    let api = client(&server, Locale::PtBr);
    for raw in ["12.345.678/0001-95", "123/despesas", "123?uf=SP"] {
        let error = api.get_operadora(Cnpj::from(raw)).await.unwrap_err();
        assert_eq!(error.kind(), ApiErrorKind::NotFound, "{raw}");
    }
    api.get_despesas(Cnpj::from("12.345.678/0001-95"))
        .await
        .unwrap_err();

    let received: Vec<(String, Option<String>)> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            (
                request.url.path().to_string(),
                request.url.query().map(str::to_string),
            )
        })
        .collect();

    assert_eq!(
        received,
        vec![
            ("/api/operadoras/12.345.678%2F0001-95".to_string(), None),
            ("/api/operadoras/123%2Fdespesas".to_string(), None),
            ("/api/operadoras/123%3Fuf=SP".to_string(), None),
            (
                "/api/operadoras/12.345.678%2F0001-95/despesas".to_string(),
                None
            ),
        ]
    );
}

#[tokio::test]
async fn slow_backend_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let api = ApiClient::new(
        ApiClientConfig::new(server.uri())
            .with_timeout(Duration::from_millis(200))
            .with_locale(Locale::En),
    )
    .unwrap();

    let error = api.get_estatisticas().await.unwrap_err();
    assert_eq!(error.kind(), ApiErrorKind::Network);
    assert_eq!(
        error.message(),
        "Connection error. Check your internet connection."
    );
}
