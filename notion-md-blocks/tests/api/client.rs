//! `NotionClient` request/response handling.
//!
//! Coverage:
//! - Auth and version headers on every request
//! - Search result parsing (ids and titles)
//! - Page creation body and returned id
//! - Append body shape
//! - Error statuses carry Notion's message
//! - Malformed JSON bodies

use notion_md_blocks::api::{NotionClient, PageSummary};
use notion_md_blocks::{ApiError, Block, RichTextSpan};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NotionClient {
    NotionClient::new("secret-token").with_base_url(server.uri())
}

#[tokio::test]
async fn search_sends_headers_and_parses_titles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(body_partial_json(json!({
            "query": "Release Notes",
            "filter": { "property": "object", "value": "page" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [
                {
                    "object": "page",
                    "id": "page-1",
                    "properties": {
                        "title": {
                            "id": "title",
                            "type": "title",
                            "title": [{ "plain_text": "Release Notes" }]
                        }
                    }
                },
                { "object": "page", "id": "page-2", "properties": {} }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pages = client_for(&server)
        .search_pages("Release Notes")
        .await
        .unwrap();

    assert_eq!(
        pages,
        vec![
            PageSummary {
                id: "page-1".into(),
                title: Some("Release Notes".into()),
            },
            PageSummary {
                id: "page-2".into(),
                title: None,
            },
        ]
    );
}

#[tokio::test]
async fn create_page_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(body_partial_json(json!({
            "parent": { "page_id": "parent-1" },
            "properties": {
                "title": [{ "type": "text", "text": { "content": "My Doc" } }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "page",
            "id": "new-page"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client_for(&server)
        .create_page("parent-1", "My Doc")
        .await
        .unwrap();
    assert_eq!(id, "new-page");
}

#[tokio::test]
async fn append_blocks_sends_children() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/blocks/page-1/children"))
        .and(body_partial_json(json!({
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{ "type": "text", "text": { "content": "hello" } }]
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .append_blocks("page-1", &[Block::Paragraph(vec![RichTextSpan::plain("hello")])])
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_carries_notion_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "object": "error",
            "status": 400,
            "code": "validation_error",
            "message": "body failed validation: parent.page_id should be a valid uuid"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_page("nope", "Doc")
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("should be a valid uuid"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).search_pages("x").await.unwrap_err();
    assert_eq!(err.to_string(), "notion rejected request (401): unauthorized");
}

#[tokio::test]
async fn malformed_json_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_page("parent", "Doc")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn missing_id_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "page" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_page("parent", "Doc")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}
