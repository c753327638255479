//! End-to-end tool calls through the server with a scripted transport.

use std::sync::Arc;

use mockall::Sequence;
use neobookings_core::{Gateway, HttpResponse, MockHttpTransport, NeobookingsConfig, TransportError};
use neobookings_mcp::NeobookingsMcpServer;
use pretty_assertions::assert_eq;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value, json};

fn server(mock: MockHttpTransport) -> NeobookingsMcpServer {
    let gateway = Gateway::with_connector(Arc::new(NeobookingsConfig::default()), Arc::new(Arc::new(mock)));
    NeobookingsMcpServer::new(gateway)
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn text(result: &CallToolResult) -> String {
    result.content[0].raw.as_text().unwrap().text.clone()
}

fn expect_login(mock: &mut MockHttpTransport, seq: &mut Sequence) {
    mock.expect_post_json()
        .withf(|request| request.url.ends_with("/AuthenticatorRQ") && request.body.get("Credentials").is_some())
        .times(1)
        .in_sequence(seq)
        .returning(|_| Ok(HttpResponse::json(200, &json!({"Token": "tok-1", "Response": {"StatusCode": 200}}))));
}

#[tokio::test]
async fn unknown_tools_list_categories_and_a_suggestion() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post_json().times(0);

    let result = server(mock).dispatch("basket_creat_rq", Map::new()).await;

    assert_eq!(result.is_error, Some(true));
    let body = text(&result);
    assert!(body.starts_with("Unknown tool: basket_creat_rq"));
    assert!(body.contains("- Order Management (13 tools)"));
    assert!(body.contains("Did you mean 'basket_create_rq'?"));
}

#[tokio::test]
async fn basket_summary_round_trip() {
    let mut mock = MockHttpTransport::new();
    let mut seq = Sequence::new();
    expect_login(&mut mock, &mut seq);
    mock.expect_post_json()
        .withf(|request| {
            request.url.ends_with("/BasketSummaryRQ")
                && request.bearer.as_deref() == Some("tok-1")
                && request.body["BasketId"] == "B-77"
                && request.body["Request"]["Language"] == "en"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(HttpResponse::json(
                200,
                &json!({
                    "Response": {"StatusCode": 200, "TimeResponse": 21},
                    "BasketDetail": {"BasketId": "B-77", "BasketStatus": "open"},
                    "AmountsDetail": {"AmountFinal": 180.0}
                }),
            ))
        });

    let result = server(mock)
        .dispatch("basket_summary_rq", args(json!({"basket_id": "B-77", "language": "en"})))
        .await;

    assert_eq!(result.is_error, Some(false));
    let body = text(&result);
    assert!(body.starts_with("# Basket Summary\n"), "{}", body);
    assert!(body.contains("Basket Summary completed successfully"));
    assert!(body.contains("### Basket Detail"));
    assert!(body.contains("\"BasketStatus\": \"open\""));
    assert!(body.contains("*Upstream time: 21 ms*"));
}

#[tokio::test]
async fn missing_arguments_fail_before_any_request() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post_json().times(0);

    let result = server(mock).dispatch("order_payment_create_rq", args(json!({"order_id": "ORD-1"}))).await;

    assert_eq!(result.is_error, Some(true));
    let body = text(&result);
    assert!(body.contains("## Failed"));
    assert!(body.contains("Missing required fields: payment_method, amount, currency, description"));
}

#[tokio::test]
async fn upstream_errors_are_reported() {
    let mut mock = MockHttpTransport::new();
    let mut seq = Sequence::new();
    expect_login(&mut mock, &mut seq);
    mock.expect_post_json()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(HttpResponse::json(
                200,
                &json!({
                    "Response": {
                        "StatusCode": 400,
                        "Error": [{"Code": "E12", "Description": "Basket not found"}]
                    }
                }),
            ))
        });

    let result = server(mock).dispatch("basket_create_rq", Map::new()).await;

    assert_eq!(result.is_error, Some(true));
    let body = text(&result);
    assert!(body.contains("API error: API returned errors: E12: Basket not found"), "{}", body);
    assert!(body.contains("UPSTREAM_ERROR"));
}

#[tokio::test]
async fn transport_failures_during_login_are_authentication_errors() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post_json()
        .times(1)
        .returning(|_| Err(TransportError::Connect("connection refused".into())));

    let result = server(mock).dispatch("zone_search_rq", Map::new()).await;

    assert_eq!(result.is_error, Some(true));
    let body = text(&result);
    assert!(body.contains("Authentication failed: Authentication request failed"), "{}", body);
}

#[tokio::test]
async fn authentication_tool_hides_the_password() {
    let mut mock = MockHttpTransport::new();
    mock.expect_post_json()
        .withf(|request| request.url.ends_with("/AuthenticatorRQ"))
        .times(1)
        .returning(|_| Ok(HttpResponse::json(200, &json!({"Token": "tok-9", "Response": {"StatusCode": 200}}))));

    let result = server(mock).dispatch("authenticator_rq", args(json!({"language": "it"}))).await;

    assert_eq!(result.is_error, Some(false));
    let body = text(&result);
    assert!(body.contains("\"tok-9\""));
    assert!(body.contains("### Session Info"));
    assert!(!body.to_lowercase().contains("password"));
}
