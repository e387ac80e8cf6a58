// Integration tests against a stubbed Otter service.
//
// The stub keeps speech titles in memory so a rename is visible to a later
// fetch, the same way the real service behaves.

use otter_client::{ClientConfig, OtterClient};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const API: &str = "/forward/api/v1";
const USERNAME: &str = "me@example.com";
const PASSWORD: &str = "correct-horse";
const USERID: u64 = 123456;

/// In-memory speech store shared by the detail and rename endpoints
#[derive(Clone, Default)]
struct SpeechStore {
    titles: Arc<Mutex<HashMap<String, String>>>,
}

impl SpeechStore {
    fn with_speech(otid: &str, title: &str) -> Self {
        let store = Self::default();
        store
            .titles
            .lock()
            .unwrap()
            .insert(otid.to_string(), title.to_string());
        store
    }
}

fn query_value(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

struct SpeechDetail(SpeechStore);

impl Respond for SpeechDetail {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let otid = query_value(request, "otid").unwrap_or_default();
        let titles = self.0.titles.lock().unwrap();
        match titles.get(&otid) {
            Some(title) => ResponseTemplate::new(200).set_body_json(json!({
                "speech": {"otid": otid, "title": title, "created_at": 1700000000}
            })),
            None => ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})),
        }
    }
}

struct SetTitle(SpeechStore);

impl Respond for SetTitle {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let otid = query_value(request, "otid");
        let title = query_value(request, "title");
        let (Some(otid), Some(title)) = (otid, title) else {
            return ResponseTemplate::new(400);
        };
        self.0.titles.lock().unwrap().insert(otid, title);
        ResponseTemplate::new(200).set_body_json(json!({"status": "OK"}))
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("{API}/login")))
        .and(query_param("username", USERNAME))
        .and(basic_auth(USERNAME, PASSWORD))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=tok123; Path=/")
                .set_body_json(json!({"userid": USERID, "email": USERNAME})),
        )
        .with_priority(1)
        .mount(server)
        .await;

    // Anything else is rejected
    Mock::given(method("POST"))
        .and(path(format!("{API}/login")))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .with_priority(2)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> OtterClient {
    let config = ClientConfig {
        base_url: format!("{}{API}/", server.uri()),
        ..ClientConfig::default()
    };
    OtterClient::new(&config).unwrap()
}

async fn logged_in(server: &MockServer) -> OtterClient {
    mount_login(server).await;
    let mut client = client_for(server);
    let envelope = client.login(USERNAME, PASSWORD).await.unwrap();
    assert_eq!(envelope.status, 200);
    client
}

#[tokio::test]
async fn test_login_success_stores_userid() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    assert_eq!(client.userid(), Some("123456"));
    assert!(!client.session().is_userid_invalid());
}

#[tokio::test]
async fn test_login_bad_credentials_returns_status() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    for (username, password) in [
        ("nobody@example.com", PASSWORD),
        (USERNAME, "wrong"),
        ("nobody@example.com", "wrong"),
    ] {
        let mut client = client_for(&server);
        let envelope = client.login(username, password).await.unwrap();

        assert_ne!(envelope.status, 200);
        assert_eq!(envelope.data, json!({}));
        assert!(client.session().is_userid_invalid());
    }
}

#[tokio::test]
async fn test_login_falls_back_to_userid_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/login")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "userid=777; Path=/")
                .set_body_json(json!({"email": USERNAME})),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.login(USERNAME, PASSWORD).await.unwrap();

    assert_eq!(client.userid(), Some("777"));
}

#[tokio::test]
async fn test_get_speech_returns_requested_otid() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/speech")))
        .and(query_param("userid", USERID.to_string()))
        .respond_with(SpeechDetail(SpeechStore::with_speech("abc123", "Weekly sync")))
        .mount(&server)
        .await;

    let envelope = client.get_speech("abc123").await.unwrap();
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.data["speech"]["otid"], "abc123");

    let speech = envelope.speech().unwrap();
    assert_eq!(speech.otid, "abc123");
    assert_eq!(speech.created().unwrap().timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn test_set_speech_title_is_visible_on_refetch() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;
    let store = SpeechStore::with_speech("abc123", "Weekly sync");

    Mock::given(method("GET"))
        .and(path(format!("{API}/speech")))
        .respond_with(SpeechDetail(store.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/set_speech_title")))
        .and(query_param("userid", USERID.to_string()))
        .respond_with(SetTitle(store.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let renamed = client.set_speech_title("abc123", "Planning").await.unwrap();
    assert_eq!(renamed.status, 200);

    let envelope = client.get_speech("abc123").await.unwrap();
    assert_eq!(envelope.speech().unwrap().title.as_deref(), Some("Planning"));
}

#[tokio::test]
async fn test_get_speeches_sends_listing_params() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/speeches")))
        .and(query_param("userid", USERID.to_string()))
        .and(query_param("folder", "0"))
        .and(query_param("page_size", "45"))
        .and(query_param("source", "owned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "speeches": [
                {"otid": "a", "title": "One"},
                {"otid": "b", "title": "Two"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.get_speeches().await.unwrap();
    let speeches = envelope.speeches();
    assert_eq!(speeches.len(), 2);
    assert_eq!(speeches[1].otid, "b");
}

#[tokio::test]
async fn test_get_speakers_and_user() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/speakers")))
        .and(query_param("userid", USERID.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "speakers": [{"id": 1, "speaker_name": "Ana"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/user")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USERID, "email": USERNAME}
        })))
        .mount(&server)
        .await;

    let speakers = client.get_speakers().await.unwrap().speakers();
    assert_eq!(speakers[0].speaker_name.as_deref(), Some("Ana"));

    let user = client.get_user().await.unwrap().user().unwrap();
    assert_eq!(user.email.as_deref(), Some(USERNAME));
}

#[tokio::test]
async fn test_non_json_body_normalizes_to_empty() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/speakers")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let envelope = client.get_speakers().await.unwrap();
    assert_eq!(envelope.status, 502);
    assert_eq!(envelope.data, json!({}));
}

#[tokio::test]
async fn test_create_speaker_sends_csrf_token() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/create_speaker")))
        .and(query_param("userid", USERID.to_string()))
        .and(header("x-csrftoken", "tok123"))
        .and(body_string_contains("speaker_name=Ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"speaker": {"id": 9}})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.create_speaker("Ana").await.unwrap();
    assert_eq!(envelope.data["speaker"]["id"], 9);
}

#[tokio::test]
async fn test_move_to_trash_bin_posts_otid() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("{API}/move_to_trash_bin")))
        .and(body_string_contains("otid=abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.move_to_trash_bin("abc123").await.unwrap();
    assert!(envelope.is_success());
    assert_eq!(envelope.data, json!({}));
}

#[tokio::test]
async fn test_query_speech_sends_search_params() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/advanced_search")))
        .and(query_param("otid", "abc123"))
        .and(query_param("query", "budget"))
        .and(query_param("size", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.query_speech_default("abc123", "budget").await.unwrap();
    assert_eq!(envelope.data, json!({"hits": []}));
}

#[tokio::test]
async fn test_transport_failure_is_an_error() {
    // Port 1 is reserved and nothing listens on it
    let config = ClientConfig {
        base_url: format!("http://127.0.0.1:1{API}/"),
        ..ClientConfig::default()
    };
    let mut client = OtterClient::new(&config).unwrap();

    let result = client.login(USERNAME, PASSWORD).await;
    assert!(matches!(result, Err(otter_client::OtterError::Transport(_))));
}
