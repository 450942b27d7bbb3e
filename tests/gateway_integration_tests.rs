use std::time::Duration;

use newsflash::gateway::{
    ArticleQuery, ArticleUpdate, CategoryFilter, GatewayError, HttpGateway, NewArticle,
    NewCategory, NewsGateway, ProcessMode,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn article_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Article {id}"),
        "content": "Body",
        "category": "Tech",
        "publish_time": "2024-01-15 10:00:00",
        "author": "Reporter",
        "source": "example.com",
        "url": format!("https://example.com/news/{id}"),
        "tags": ["AI"]
    })
}

fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(server.uri())
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_default_query_sends_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article_json("1")])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let articles = assert_ok!(gateway.list_articles(&ArticleQuery::default()).await);
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].tags, vec!["AI".to_string()]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_non_default_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("category", "Artificial Intelligence"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("search", "chips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let query = ArticleQuery {
        category: CategoryFilter::from_key("Artificial Intelligence"),
        page: 2,
        page_size: 5,
        search: "chips".to_string(),
    };
    let articles = assert_ok!(gateway.list_articles(&query).await);
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.list_articles(&ArticleQuery::default()).await);
    assert_eq!(
        err,
        GatewayError::Status {
            status: 500,
            message: "database down".to_string()
        }
    );
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_payload_maps_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.list_articles(&ArticleQuery::default()).await);
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_article_missing_required_field_fails_closed() {
    let server = MockServer::start().await;
    let mut broken = article_json("1");
    broken.as_object_mut().unwrap().remove("url");
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([broken])))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.list_articles(&ArticleQuery::default()).await);
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_null_title_and_content_keep_the_page() {
    let server = MockServer::start().await;
    let mut no_content = article_json("2");
    no_content["content"] = serde_json::Value::Null;
    let mut no_title = article_json("3");
    no_title["title"] = serde_json::Value::Null;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_json("1"), no_content, no_title])),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let articles = assert_ok!(gateway.list_articles(&ArticleQuery::default()).await);
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[1].content, "");
    assert_eq!(articles[1].title, "Article 2");
    assert_eq!(articles[2].title, "");
    assert_eq!(articles[2].display_title(), "(untitled)");
    assert_eq!(articles[2].content, "Body");
}

#[tokio::test]
async fn test_article_with_empty_id_fails_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json("")))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.get_article("1").await);
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_service_maps_to_transport() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };
    let gateway = HttpGateway::with_timeout(uri, Duration::from_secs(2)).unwrap();
    let err = assert_err!(gateway.health_check().await);
    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(err.status(), None);
}

// ============================================================================
// Single Articles
// ============================================================================

#[tokio::test]
async fn test_article_crud_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json("7")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/news"))
        .and(body_json(json!({
            "title": "Fresh",
            "content": null,
            "publish_time": null,
            "author": null,
            "source": "example.com",
            "url": "https://example.com/fresh",
            "category": "Tech",
            "tags": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json("8")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/news/7"))
        .and(body_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json("7")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/news/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "News deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let fetched = assert_ok!(gateway.get_article("7").await);
    assert_eq!(fetched.id, "7");

    let created = assert_ok!(
        gateway
            .create_article(&NewArticle {
                title: Some("Fresh".to_string()),
                content: None,
                publish_time: None,
                author: None,
                source: "example.com".to_string(),
                url: "https://example.com/fresh".to_string(),
                category: Some("Tech".to_string()),
                tags: Vec::new(),
            })
            .await
    );
    assert_eq!(created.id, "8");

    let update = ArticleUpdate {
        title: Some("Renamed".to_string()),
        ..ArticleUpdate::default()
    };
    assert_ok!(gateway.update_article("7", &update).await);
    assert_ok!(gateway.delete_article("7").await);
}

#[tokio::test]
async fn test_missing_article_is_status_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("News not found"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.get_article("404").await);
    assert_eq!(err.status(), Some(404));
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_category_tree_decodes_nested_children() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "1",
                "name": "Tech",
                "children": [{ "id": "5", "name": "Artificial Intelligence" }]
            },
            { "id": "2", "name": "Finance", "children": [] }
        ])))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let tree = assert_ok!(gateway.get_category_tree().await);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children[0].name, "Artificial Intelligence");
    assert!(tree[0].children[0].children.is_empty());
}

#[tokio::test]
async fn test_category_tree_rejects_blank_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Tech", "children": [{ "id": "5", "name": "" }] }
        ])))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = assert_err!(gateway.get_category_tree().await);
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_category_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Tech", "description": "Technology", "parent_id": null }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "1", "name": "Tech" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(json!({ "name": "Robotics", "parent_id": "1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "id": "9", "name": "Robotics", "parent_id": "1" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let all = assert_ok!(gateway.list_categories().await);
    assert_eq!(all[0].description.as_deref(), Some("Technology"));

    let one = assert_ok!(gateway.get_category("1").await);
    assert_eq!(one.name, "Tech");

    let created = assert_ok!(
        gateway
            .create_category(&NewCategory {
                name: "Robotics".to_string(),
                description: None,
                parent_id: Some("1".to_string()),
            })
            .await
    );
    assert_eq!(created.parent_id.as_deref(), Some("1"));
}

// ============================================================================
// Processing & Health
// ============================================================================

#[tokio::test]
async fn test_process_posts_only_the_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-news"))
        .and(body_json(json!({ "url": "https://example.com/story" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "title": "Story" },
            "saved": true,
            "processing_steps": ["collect", "parse", "clean"]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    for mode in [ProcessMode::Full, ProcessMode::Parse] {
        let result = assert_ok!(
            gateway
                .submit_url_for_processing("https://example.com/story", mode)
                .await
        );
        assert!(result.success);
        assert!(result.saved);
        assert_eq!(result.processing_steps.len(), 3);
    }
}

#[tokio::test]
async fn test_health_check_reports_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "services": { "database": "connected", "redis": "connected" },
            "timestamp": "2024-01-15T10:00:00"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let health = assert_ok!(gateway.health_check().await);
    assert!(health.is_healthy());
    assert_eq!(health.services.get("redis").map(String::as_str), Some("connected"));
}
