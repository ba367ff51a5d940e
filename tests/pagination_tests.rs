//! Integration tests for collection traversals.
//!
//! These tests run `fetch_all` against a mock store and check page order,
//! request counts and how each retry policy handles failing pages.

use std::time::Duration;

use bigcommerce_api::rest::resources::Channel;
use bigcommerce_api::{
    AccessToken, ApiError, BigCommerceConfig, CollectionResource, HostUrl, QueryArgs, RestClient,
    RetryMode, RetryPolicy, StoreHash,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCTS: &str = "/stores/abc123/v3/catalog/products";

fn client_for(server: &MockServer, policy: RetryPolicy) -> RestClient {
    let config = BigCommerceConfig::builder()
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .retry_policy(policy)
        .build()
        .unwrap();
    RestClient::new(&config)
}

fn page_body(ids: &[u64], current: u32, total: u32) -> Value {
    json!({
        "data": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
        "meta": {
            "pagination": {
                "total": 6,
                "count": ids.len(),
                "per_page": 2,
                "current_page": current,
                "total_pages": total
            }
        }
    })
}

async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(PRODUCTS))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

fn ids(items: &[Value]) -> Vec<u64> {
    items.iter().map(|item| item["id"].as_u64().unwrap()).collect()
}

// ============================================================================
// Error-free traversals
// ============================================================================

#[tokio::test]
async fn test_pages_are_concatenated_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 3)), 1).await;
    mount_page(&server, 2, ResponseTemplate::new(200).set_body_json(page_body(&[3, 4], 2, 3)), 1).await;
    mount_page(&server, 3, ResponseTemplate::new(200).set_body_json(page_body(&[5, 6], 3, 3)), 1).await;

    let client = client_for(&server, RetryPolicy::default());
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert!(products.is_complete());
    assert_eq!(products.pages(), 3);
    assert_eq!(ids(&products), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_single_page_makes_one_request() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1], 1, 1)), 1).await;

    let client = client_for(&server, RetryPolicy::default());
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert!(products.is_complete());
    assert_eq!(ids(&products), vec![1]);
}

#[tokio::test]
async fn test_query_args_are_sent_with_every_page() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        Mock::given(method("GET"))
            .and(path(PRODUCTS))
            .and(query_param("page", page.to_string()))
            .and(query_param("is_visible", "true"))
            .and(query_param("include", "variants,images"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_body(&[u64::from(page)], page, 2)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server, RetryPolicy::default());
    let args = QueryArgs::new()
        .arg("is_visible", true)
        .include(["variants", "images"]);
    let products = client.fetch_all::<Value>("/v3/catalog/products", &args).await;

    assert_eq!(ids(&products), vec![1, 2]);
}

#[tokio::test]
async fn test_no_content_on_first_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(204), 1).await;

    let client = client_for(&server, RetryPolicy::default());
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert!(products.is_empty());
    assert!(matches!(products.error(), Some(ApiError::NoContent)));
}

#[tokio::test]
async fn test_collection_resource_uses_its_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores/abc123/v3/channels"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "Storefront", "type": "storefront"}],
            "meta": {"pagination": {"current_page": 1, "total_pages": 1}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let channels = tokio_test::assert_ok!(Channel::all(&client, &QueryArgs::new()).await.into_result());

    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name.as_deref(), Some("Storefront"));
}

// ============================================================================
// Failing pages
// ============================================================================

#[tokio::test]
async fn test_abandon_keeps_earlier_pages_without_error() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 3)), 1).await;
    mount_page(&server, 2, ResponseTemplate::new(500), 1).await;
    mount_page(&server, 3, ResponseTemplate::new(200).set_body_json(page_body(&[5, 6], 3, 3)), 0).await;

    let client = client_for(&server, RetryPolicy::new(3));
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert_eq!(ids(&products), vec![1, 2]);
    assert!(products.error().is_none());
}

#[tokio::test]
async fn test_zero_budget_reports_first_failure() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 2)), 1).await;
    mount_page(&server, 2, ResponseTemplate::new(500).set_body_string("boom"), 1).await;

    let client = client_for(&server, RetryPolicy::new(0));
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert_eq!(ids(&products), vec![1, 2]);
    assert!(matches!(products.error(), Some(ApiError::Response(e)) if e.code == 500));
}

#[tokio::test]
async fn test_retry_page_recovers() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 2)), 1).await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_page(&server, 2, ResponseTemplate::new(200).set_body_json(page_body(&[3], 2, 2)), 1).await;

    let policy = RetryPolicy::new(3)
        .with_mode(RetryMode::RetryPage)
        .with_retry_delay(Duration::from_millis(1));
    let client = client_for(&server, policy);
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert!(products.is_complete());
    assert_eq!(ids(&products), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_retry_page_gives_up_after_budget() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 2)), 1).await;
    mount_page(&server, 2, ResponseTemplate::new(500), 3).await;

    let client = client_for(&server, RetryPolicy::new(2).with_mode(RetryMode::RetryPage));
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert_eq!(ids(&products), vec![1, 2]);
    assert!(matches!(products.error(), Some(ApiError::Response(_))));
}

#[tokio::test]
async fn test_timed_out_pages_count_against_budget() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 2)), 1).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200)
            .set_body_json(page_body(&[3], 2, 2))
            .set_delay(Duration::from_secs(2)),
        2,
    )
    .await;

    let config = BigCommerceConfig::builder()
        .store_hash(StoreHash::new("abc123").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .timeout(Duration::from_millis(100))
        .retry_policy(RetryPolicy::new(1).with_mode(RetryMode::RetryPage))
        .build()
        .unwrap();
    let client = RestClient::new(&config);
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert_eq!(ids(&products), vec![1, 2]);
    assert!(matches!(products.error(), Some(ApiError::Transport(e)) if e.is_timeout()));
}

#[tokio::test]
async fn test_server_ignoring_page_still_terminates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 3)))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::default());
    let products = client
        .fetch_all::<Value>(
            "/v3/catalog/products",
            &QueryArgs::new().arg("page", 7),
        )
        .await;

    assert!(products.is_complete());
    assert_eq!(products.pages(), 3);
    assert_eq!(ids(&products), vec![1, 2, 1, 2, 1, 2]);
}

#[tokio::test]
async fn test_remote_error_not_retried_when_disabled() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 2)), 1).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(json!({"status": 500, "title": "Internal error"})),
        1,
    )
    .await;

    let policy = RetryPolicy::new(5)
        .with_mode(RetryMode::RetryPage)
        .with_retry_remote_errors(false);
    let client = client_for(&server, policy);
    let products = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await;

    assert_eq!(ids(&products), vec![1, 2]);
    let error = products.error().unwrap();
    assert!(matches!(error, ApiError::Remote { status: 500, .. }));
    assert_eq!(error.to_string(), "Internal error");
}

#[tokio::test]
async fn test_into_result_surfaces_the_error() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(401).set_body_string("unauthorized"), 1).await;

    let client = client_for(&server, RetryPolicy::new(0));
    let result = client
        .fetch_all::<Value>("/v3/catalog/products", &QueryArgs::new())
        .await
        .into_result();

    let error = tokio_test::assert_err!(result);
    assert!(matches!(error, ApiError::Response(e) if e.code == 401));
}
