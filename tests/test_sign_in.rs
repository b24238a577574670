//! End-to-end sign-in flow against a mock discovery service and a mock
//! remote endpoint living on the same server.

use chrono::{Duration as ChronoDuration, Utc};
use groupware_client::{Config, ContactsFacade, DiscoveryContext, FilesFacade};
use std::sync::Arc;

fn token_body() -> String {
    let expires_on = Utc::now() + ChronoDuration::seconds(3600);
    format!(
        r#"{{"accessToken":"tok-1","expiresOn":"{}"}}"#,
        expires_on.to_rfc3339()
    )
}

fn discovery_body(endpoint: &str) -> String {
    format!(
        r#"{{
            "serviceResourceId": "https://mail.groupware.example",
            "serviceEndpointUri": "{}",
            "userId": "user-1"
        }}"#,
        endpoint
    )
}

fn test_config(discovery_url: &str) -> Config {
    Config {
        discovery_url: discovery_url.to_string(),
        client_id: "client-123".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_contacts_sign_in_list_and_sign_out() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = server.url();

    let discover = server
        .mock("GET", "/discover/resource")
        .match_query(mockito::Matcher::UrlEncoded(
            "resourceId".into(),
            "https://mail.groupware.example".into(),
        ))
        .with_status(200)
        .with_body(discovery_body(&endpoint))
        .create_async()
        .await;

    let token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(token_body())
        .create_async()
        .await;

    let list = server
        .mock("GET", "/me/contacts")
        .match_query(mockito::Matcher::UrlEncoded(
            "$orderby".into(),
            "DisplayName".into(),
        ))
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(r#"{"value":[]}"#)
        .create_async()
        .await;

    let logout = server
        .mock("POST", "/logout")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let config = test_config(&server.url());
    let discovery = Arc::new(DiscoveryContext::new(&config));

    let facade = ContactsFacade::sign_in(&config, discovery).await.unwrap();
    assert_eq!(facade.user_id(), "user-1");

    let contacts = facade.list().await.unwrap();
    assert!(contacts.is_empty());

    facade.sign_out().await.unwrap();

    discover.assert_async().await;
    token.assert_async().await;
    list.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn test_files_sign_in_resolves_named_capability() {
    let mut server = mockito::Server::new_async().await;
    let endpoint = server.url();

    let discover = server
        .mock("GET", "/discover/capability")
        .match_query(mockito::Matcher::UrlEncoded(
            "name".into(),
            "MyFiles".into(),
        ))
        .with_status(200)
        .with_body(discovery_body(&endpoint))
        .create_async()
        .await;

    let _token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(token_body())
        .create_async()
        .await;

    let list = server
        .mock("GET", "/me/files")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(r#"{"value":[]}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let discovery = Arc::new(DiscoveryContext::new(&config));

    let facade = FilesFacade::sign_in(&config, discovery).await.unwrap();
    assert_eq!(facade.user_id(), "user-1");

    let files = facade.list().await.unwrap();
    assert!(files.is_empty());

    discover.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_discovery_failure_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _discover = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let discovery = Arc::new(DiscoveryContext::new(&config));

    let result = ContactsFacade::sign_in(&config, discovery).await;
    assert!(result.is_err());
}
