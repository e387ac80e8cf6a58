/// Session state owned by an [`OtterClient`](super::OtterClient)
///
/// The cookie jar lives in the transport; this holds what the client itself
/// needs to decide whether authenticated calls may proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Base endpoint URL, as configured
    base_url: String,

    /// User id returned by login; unset until a login succeeds
    userid: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            userid: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn userid(&self) -> Option<&str> {
        self.userid.as_deref()
    }

    /// True when no usable user id is stored (unset or empty).
    ///
    /// No format check is applied to a non-empty id.
    pub fn is_userid_invalid(&self) -> bool {
        match self.userid.as_deref() {
            None => true,
            Some(id) => id.is_empty(),
        }
    }

    pub(crate) fn set_userid(&mut self, userid: impl Into<String>) {
        self.userid = Some(userid.into());
    }
}
