use std::time::{Duration, Instant};

use anyhow::Result;
#[cfg(feature = "blocking")]
use genius_sdk::BlockingClient;
use genius_sdk::transport::request::Request as ApiRequest;
#[cfg(feature = "async")]
use genius_sdk::{ApiContent, ApiRoot, Client, Error};
#[cfg(feature = "async")]
use http::StatusCode;
use serde_json::json;
#[cfg(feature = "blocking")]
use tokio::task;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const TOKEN: &str = "abcdefgh12345678";

/// Matches only when the request carries no `Authorization` header at all.
#[derive(Clone, Copy)]
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("Authorization")
    }
}

async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    let mut mock = Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(expected);
    // up_to_n_times rejects 0; expect(0) alone verifies zero matches.
    if expected > 0 {
        mock = mock.up_to_n_times(expected);
    }
    mock.mount(server).await;
}

#[cfg(feature = "async")]
fn fast_client(server: &MockServer) -> Result<Client> {
    Ok(Client::builder()
        .access_token(TOKEN)
        .api_root(server.uri())
        .public_root(server.uri())
        .sleep_time(Duration::ZERO)
        .build()?)
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_unwraps_response_envelope() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Andy Shauf"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"status": 200},
            "response": {"hits": [{"type": "song"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server)?;
    let hits = client.search().songs("Andy Shauf", false).await?;

    assert_eq!(hits["hits"][0]["type"], "song");
    assert!(hits.get("meta").is_none(), "envelope must be unwrapped");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_passes_bare_payload_through() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/web_pages/lookup",
        ResponseTemplate::new(200).set_body_json(json!({"web_page": {"id": 10347}})),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let page = client.web_pages().lookup("https://example.com").await?;

    assert_eq!(page["web_page"]["id"], 10347);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_deserializes_song() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/songs/378195"))
        .and(query_param("text_format", "plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"song": {
                "id": 378195,
                "title": "The Magician",
                "primary_artist": {"id": 2358, "name": "Andy Shauf"},
                "annotation_count": 4,
                "lyrics_state": "complete"
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server)?;
    let song = client.songs().get(378195u64, false).await?;

    assert_eq!(song.title, "The Magician");
    assert_eq!(song.artist(), "Andy Shauf");
    assert!(song.lyrics.is_empty());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_reports_204_as_no_content() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(&server, "/account", ResponseTemplate::new(204), 1).await;

    let client = fast_client(&server)?;
    let content = client.send_api(ApiRequest::get(["account"])).await?;
    assert_eq!(content, ApiContent::NoContent);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn send_api_reaches_write_endpoints_via_post() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/annotations"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"annotation": {"id": 10225840}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server)?;
    let content = client.send_api(ApiRequest::post(["annotations"])).await?;

    let payload = content.payload().expect("expected a payload");
    assert_eq!(payload["annotation"]["id"], 10225840);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn request_hook_observes_the_target_root() -> Result<()> {
    use std::sync::{Arc, Mutex};

    let server = MockServer::start().await;

    mock_get(
        &server,
        "/search",
        ResponseTemplate::new(200).set_body_json(json!({"response": {"hits": []}})),
        2,
    )
    .await;

    let seen: Arc<Mutex<Vec<ApiRoot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let client = Client::builder()
        .access_token(TOKEN)
        .api_root(server.uri())
        .public_root(server.uri())
        .sleep_time(Duration::ZERO)
        .request_hook(move |ctx| {
            sink.lock().unwrap().push(ctx.root);
            Ok(())
        })
        .build()?;

    client.search().songs("q", false).await?;
    client.search().songs("q", true).await?;

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[ApiRoot::Developer, ApiRoot::Public]
    );

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_rejects_undocumented_2xx() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(202).set_body_json(json!({"response": {}})),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let err = client
        .send_api(ApiRequest::get(["account"]))
        .await
        .expect_err("202 must not be swallowed");

    match err {
        Error::UnexpectedStatus { status, .. } => assert_eq!(status, StatusCode::ACCEPTED),
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_extracts_meta_message_on_auth_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(403).set_body_json(json!({
            "meta": {"status": 403, "message": "invalid token"}
        })),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let err = client
        .account()
        .me()
        .await
        .expect_err("expected auth error");

    match err {
        Error::Auth(http) => {
            assert_eq!(http.status, StatusCode::FORBIDDEN);
            assert_eq!(http.message.as_deref(), Some("invalid token"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_tolerates_unparsable_error_body() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(500).set_body_string("<html>boom</html>"),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let err = client.account().me().await.expect_err("expected API error");

    match err {
        Error::Api(http) => {
            assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(http.message.is_none());
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_surfaces_retry_after_on_429() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(429)
            .append_header("Retry-After", "7")
            .set_body_json(json!({"meta": {"message": "slow down"}})),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let err = client
        .account()
        .me()
        .await
        .expect_err("expected rate limit error");

    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn public_root_requests_never_carry_the_bearer_token() -> Result<()> {
    let developer = MockServer::start().await;
    let public = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"sections": []}
        })))
        .expect(1)
        .mount(&public)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"hits": []}
        })))
        .expect(1)
        .mount(&developer)
        .await;

    let client = Client::builder()
        .access_token(TOKEN)
        .api_root(developer.uri())
        .public_root(public.uri())
        .sleep_time(Duration::ZERO)
        .build()?;

    // Public call first: a later authenticated call must still carry the
    // bearer header.
    client.search().songs("q", true).await?;
    client.search().songs("q", false).await?;

    developer.verify().await;
    public.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn token_guard_fails_before_any_network_io() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(&server, "/account", ResponseTemplate::new(200), 0).await;
    mock_get(&server, "/search", ResponseTemplate::new(200), 0).await;

    let client = Client::builder()
        .api_root(server.uri())
        .public_root(server.uri())
        .sleep_time(Duration::ZERO)
        .build()?;

    let err = client.account().me().await.expect_err("no token, no fallback");
    assert!(err.is_token_required());
    assert!(!err.to_string().contains("public_api"));

    let err = client
        .search()
        .songs("q", false)
        .await
        .expect_err("no token, fallback not requested");
    assert!(err.is_token_required());
    assert!(err.to_string().contains("public_api = true"));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn tokenless_client_reaches_the_public_root_on_opt_in() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"sections": [{"type": "song"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .public_root(server.uri())
        .sleep_time(Duration::ZERO)
        .build()?;

    let sections = client.search().songs("q", true).await?;
    assert_eq!(sections["sections"][0]["type"], "song");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn successful_calls_are_spaced_by_the_sleep_floor() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/search",
        ResponseTemplate::new(200).set_body_json(json!({"response": {"hits": []}})),
        2,
    )
    .await;

    // Zero requested sleep still gets floored at 200ms per successful call.
    let client = fast_client(&server)?;

    let start = Instant::now();
    client.search().songs("q", false).await?;
    client.search().songs("q", false).await?;
    assert!(start.elapsed() >= Duration::from_millis(400));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn error_responses_skip_the_rate_limit_sleep() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(404).set_body_json(json!({"meta": {"message": "not found"}})),
        1,
    )
    .await;

    let client = Client::builder()
        .access_token(TOKEN)
        .api_root(server.uri())
        .sleep_time(Duration::from_secs(2))
        .build()?;

    let start = Instant::now();
    let err = client.account().me().await.expect_err("expected 404");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(start.elapsed() < Duration::from_secs(1));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn body_snippets_redact_the_access_token() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/account",
        ResponseTemplate::new(400).set_body_string(format!(
            "{{\"meta\": {{\"message\": \"bad token {TOKEN}\"}}}}"
        )),
        1,
    )
    .await;

    let client = fast_client(&server)?;
    let err = client.account().me().await.expect_err("expected API error");

    match err {
        Error::Api(http) => {
            let snippet = http.body_snippet.as_deref().unwrap_or_default();
            assert!(snippet.contains("<redacted>"));
            assert!(!snippet.contains(TOKEN));
            let message = http.message.as_deref().unwrap_or_default();
            assert!(!message.contains(TOKEN));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_client_unwraps_response_envelope() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"hits": [{"type": "song"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .access_token(TOKEN)
            .api_root(base)
            .sleep_time(Duration::ZERO)
            .build()?;

        let hits = client.search().songs("q", false)?;
        assert_eq!(hits["hits"][0]["type"], "song");
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_send_api_reaches_write_endpoints_via_post() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/annotations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"annotation": {"id": 10225840}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .access_token(TOKEN)
            .api_root(base)
            .sleep_time(Duration::ZERO)
            .build()?;

        let content = client.send_api(ApiRequest::post(["annotations"]))?;
        let payload = content.payload().expect("expected a payload");
        assert_eq!(payload["annotation"]["id"], 10225840);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_client_enforces_the_token_guard() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(&server, "/account", ResponseTemplate::new(200), 0).await;

    let base = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .api_root(base)
            .sleep_time(Duration::ZERO)
            .build()?;

        let err = client.account().me().expect_err("no token, no fallback");
        assert!(err.is_token_required());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}
