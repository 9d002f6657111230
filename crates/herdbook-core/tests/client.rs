//! Integration tests for the authenticated API client: bearer attachment,
//! refresh-and-replay on 401, logout cascades, and error propagation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use herdbook_core::api::{AnimalFilters, ApiClient, ApiError, StatusFilter};
use herdbook_core::auth::{MemorySession, SessionStore};

fn client_for(server: &MockServer, session: Arc<MemorySession>) -> ApiClient {
    let base_url = format!("{}/", server.uri());
    ApiClient::new(&base_url, Duration::from_secs(5), session).unwrap()
}

fn logged_in_session(access: &str, refresh: &str) -> Arc<MemorySession> {
    let session = Arc::new(MemorySession::new());
    session.set_session(access.to_string(), refresh.to_string());
    session
}

fn animal_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("animal-{id}"),
        "gender": "female",
        "animal_number": format!("A-{id:03}"),
        "animal_type": 1,
        "animal_type_name": "Goat",
        "birth_date": "2023-04-12",
        "mother": null,
        "weight": 30.5,
        "head_price": 400.0,
        "breeder_notes": "",
        "color": "brown",
        "status": "existing",
        "age": "1 year",
        "is_pregnant": false,
        "has_pending_pregnancy": false,
        "has_active_pregnancy": false,
        "current_pregnancy_status": null,
        "offspring_count": 0,
        "is_active": true,
        "created_at": "2024-06-01T10:00:00Z",
        "updated_at": "2024-06-01T10:00:00Z"
    })
}

fn page_json(results: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    json!({
        "count": results.len(),
        "next": next,
        "previous": null,
        "results": results
    })
}

fn stats_json() -> serde_json::Value {
    let period = json!({
        "current_month": 1.0,
        "previous_month": 2.0,
        "current_year": 3.0,
        "previous_year": 4.0
    });
    json!({
        "sales": period,
        "expenses": period,
        "purchases": period,
        "profits": period,
        "animals": {
            "total_alive": 10,
            "total_dead": 1,
            "by_type": [{"name": "Goat", "count": 10}],
            "sold": period,
            "purchased": period
        }
    })
}

#[tokio::test]
async fn refresh_and_replay_is_transparent() {
    let server = MockServer::start().await;

    // The stale token is rejected once; the replay must carry the new one.
    Mock::given(method("GET"))
        .and(path("/stats/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .and(body_json(json!({"refresh": "refresh-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("stale", "refresh-token");
    let client = client_for(&server, session.clone());

    // Caller observes success, not the intermediate 401
    let stats = client.stats().await.unwrap();
    assert_eq!(stats.animals.total_alive, 10);
    assert_eq!(session.tokens().access.as_deref(), Some("fresh"));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn second_401_propagates_without_second_refresh() {
    let server = MockServer::start().await;

    // Still 401 after the refresh: the replay's failure propagates.
    Mock::given(method("GET"))
        .and(path("/stats/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("stale", "refresh-token");
    let client = client_for(&server, session);

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn missing_refresh_token_logs_out_without_refresh_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(0)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::new());
    session.set_access_token("stale".to_string());
    let client = client_for(&server, session.clone());

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_authenticated());
    assert!(session.tokens().access.is_none());
}

#[tokio::test]
async fn failed_refresh_logs_out_and_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("stale", "expired-refresh");
    let client = client_for(&server, session.clone());

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired(_)));
    assert!(!session.is_authenticated());
    assert_eq!(session.tokens(), Default::default());
}

#[tokio::test]
async fn server_error_never_triggers_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(0)
        .mount(&server)
        .await;

    let session = logged_in_session("access", "refresh-token");
    let client = client_for(&server, session.clone());

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Server(_)));
    // Session untouched
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn transport_error_propagates_as_network() {
    // Bind and drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let session = logged_in_session("access", "refresh-token");
    let client = ApiClient::new(
        &format!("http://127.0.0.1:{port}/"),
        Duration::from_secs(1),
        session.clone(),
    )
    .unwrap();

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn login_stores_tokens_and_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({"username": "ali", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-1",
            "refresh": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "ali",
            "email": "ali@example.com",
            "first_name": "Ali",
            "last_name": "Shop"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Subsequent authenticated call carries the bearer header
    Mock::given(method("GET"))
        .and(path("/stats/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_json()))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySession::new());
    let client = client_for(&server, session.clone());

    let user = client.login("ali", "secret").await.unwrap();
    assert_eq!(user.username, "ali");
    assert!(session.is_authenticated());
    assert_eq!(session.tokens().access.as_deref(), Some("access-1"));
    assert_eq!(session.user().unwrap().username, "ali");

    client.stats().await.unwrap();
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_json()))
        .mount(&server)
        .await;
    // Single-flight: one refresh no matter how many requests raced
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh"}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("stale", "refresh-token");
    let client = client_for(&server, session.clone());

    let outcomes = futures::future::join_all((0..4).map(|_| {
        let client = client.clone();
        async move { client.stats().await }
    }))
    .await;

    for outcome in outcomes {
        assert!(outcome.is_ok());
    }
    assert_eq!(session.tokens().access.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn animal_list_pagination_and_filters() {
    let server = MockServer::start().await;

    // Default status filter goes on the wire as status=existing
    Mock::given(method("GET"))
        .and(path("/animals/"))
        .and(query_param("status", "existing"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![animal_json(1), animal_json(2)],
            Some("http://example.com/animals/?page=2"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("access", "refresh-token");
    let client = client_for(&server, session);

    let page = client.animals(&AnimalFilters::default(), 1).await.unwrap();
    assert_eq!(page.results.len(), 2);
    assert!(page.has_more());
}

#[tokio::test]
async fn all_animals_disables_pagination_and_all_suppresses_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/"))
        .and(query_param("no_pagination", "true"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([animal_json(1), animal_json(2)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("access", "refresh-token");
    let client = client_for(&server, session);

    let filters = AnimalFilters {
        status: Some(StatusFilter::All),
        ..Default::default()
    };
    let animals = client.all_animals(&filters).await.unwrap();
    assert_eq!(animals.len(), 2);
}

#[tokio::test]
async fn validation_error_surfaces_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in_session("access", "refresh-token");
    let client = client_for(&server, session);

    let err = client.animal(9).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn logout_clears_session() {
    let server = MockServer::start().await;
    let session = logged_in_session("access", "refresh-token");
    let client = client_for(&server, session.clone());

    client.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.tokens(), Default::default());
}
