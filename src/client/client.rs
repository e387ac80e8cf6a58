use super::envelope::Envelope;
use super::session::Session;
use super::transport::{ApiRequest, HttpTransport, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{OtterError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const CSRF_COOKIE: &str = "csrftoken";
const USERID_COOKIE: &str = "userid";

/// Parameters for listing speeches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechQuery {
    /// Folder id; 0 is the top-level folder
    pub folder: u32,
    pub page_size: u32,
    /// "owned", "shared" or another source the service accepts
    pub source: String,
}

impl Default for SpeechQuery {
    fn default() -> Self {
        Self {
            folder: 0,
            page_size: 45,
            source: "owned".to_string(),
        }
    }
}

/// Session-backed client for the Otter API
pub struct OtterClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl OtterClient {
    /// Create a client talking HTTP to the configured base URL
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), &config.base_url))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            session: Session::new(base_url),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn userid(&self) -> Option<&str> {
        self.session.userid()
    }

    /// Authenticate and remember the user id for later calls.
    ///
    /// Bad credentials are not an error: the envelope carries the remote
    /// status. Only transport failures are returned as `Err`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Envelope> {
        info!("Logging in as {} at {}", username, self.session.base_url());

        let request = ApiRequest::post("login")
            .query("username", username)
            .basic_auth(username, password);

        let response = self.transport.execute(request).await?;
        let envelope = Envelope::from_response(&response, None);

        if !envelope.is_success() {
            warn!("Login failed with status {}", envelope.status);
            return Ok(envelope);
        }

        let userid =
            userid_from_body(&envelope.data).or_else(|| self.transport.cookie(USERID_COOKIE));
        match userid {
            Some(userid) => {
                info!("Logged in (userid={})", userid);
                self.session.set_userid(userid);
            }
            None => warn!("Login succeeded but no userid was returned"),
        }

        Ok(envelope)
    }

    /// Fetch the profile of the logged-in user
    pub async fn get_user(&self) -> Result<Envelope> {
        self.send(ApiRequest::get("user")).await
    }

    /// List speeches in the top-level folder, owned by the user
    pub async fn get_speeches(&self) -> Result<Envelope> {
        self.get_speeches_with(&SpeechQuery::default()).await
    }

    pub async fn get_speeches_with(&self, query: &SpeechQuery) -> Result<Envelope> {
        let userid = self.require_userid()?;
        let request = ApiRequest::get("speeches")
            .query("userid", userid)
            .query("folder", query.folder)
            .query("page_size", query.page_size)
            .query("source", &query.source);

        self.send(request).await
    }

    /// Fetch a single speech by its otid
    pub async fn get_speech(&self, speech_id: &str) -> Result<Envelope> {
        let userid = self.require_userid()?;
        let request = ApiRequest::get("speech")
            .query("userid", userid)
            .query("otid", speech_id);

        self.send(request).await
    }

    /// Rename a speech. The change is not read back.
    pub async fn set_speech_title(&self, speech_id: &str, title: &str) -> Result<Envelope> {
        let userid = self.require_userid()?;
        let request = ApiRequest::post("set_speech_title")
            .query("userid", userid)
            .query("otid", speech_id)
            .query("title", title);

        self.send(request).await
    }

    pub async fn get_speakers(&self) -> Result<Envelope> {
        let userid = self.require_userid()?;
        self.send(ApiRequest::get("speakers").query("userid", userid)).await
    }

    /// Full-text search within one speech
    pub async fn query_speech(&self, speech_id: &str, query: &str, size: u32) -> Result<Envelope> {
        self.require_userid()?;
        let request = ApiRequest::get("advanced_search")
            .query("query", query)
            .query("size", size)
            .query("otid", speech_id);

        self.send(request).await
    }

    pub async fn query_speech_default(&self, speech_id: &str, query: &str) -> Result<Envelope> {
        self.query_speech(speech_id, query, 500).await
    }

    pub async fn get_folders(&self) -> Result<Envelope> {
        let userid = self.require_userid()?;
        self.send(ApiRequest::get("folders").query("userid", userid)).await
    }

    pub async fn list_groups(&self) -> Result<Envelope> {
        let userid = self.require_userid()?;
        self.send(ApiRequest::get("list_groups").query("userid", userid)).await
    }

    pub async fn get_notification_settings(&self) -> Result<Envelope> {
        self.send(ApiRequest::get("get_notification_settings")).await
    }

    pub async fn create_speaker(&self, speaker_name: &str) -> Result<Envelope> {
        let userid = self.require_userid()?;
        let request = ApiRequest::post("create_speaker")
            .query("userid", userid)
            .form("speaker_name", speaker_name);

        self.send(self.with_csrf(request)).await
    }

    pub async fn move_to_trash_bin(&self, speech_id: &str) -> Result<Envelope> {
        let userid = self.require_userid()?;
        let request = ApiRequest::post("move_to_trash_bin")
            .query("userid", userid)
            .form("otid", speech_id);

        self.send(self.with_csrf(request)).await
    }

    /// Stored user id, or `InvalidSession` when there is none.
    /// Runs before any request is built or sent.
    fn require_userid(&self) -> Result<&str> {
        if self.session.is_userid_invalid() {
            warn!("Rejecting call: no valid userid in session");
            return Err(OtterError::InvalidSession);
        }
        Ok(self.session.userid().unwrap_or_default())
    }

    fn with_csrf(&self, request: ApiRequest) -> ApiRequest {
        match self.transport.cookie(CSRF_COOKIE) {
            Some(token) => request.header("x-csrftoken", token),
            None => request,
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<Envelope> {
        let response: RawResponse = self.transport.execute(request).await?;
        Ok(Envelope::from_response(&response, None))
    }
}

/// `userid` from a login body; the service sends it as a number or a string
fn userid_from_body(data: &Value) -> Option<String> {
    match data.get("userid")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
