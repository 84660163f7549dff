use std::sync::Arc;

/// Name of the response header cookies are written to.
pub const SET_COOKIE: &str = "Set-Cookie";

/// Read access to the request currently being handled.
///
/// Implemented by the host framework. Both methods are called synchronously from inside cookie
/// and session operations.
pub trait RequestContext: Send + Sync {
    /// The raw `Cookie` request header, if the request carried one.
    fn cookie_header(&self) -> Option<String>;

    /// Opaque identifier of the current request.
    ///
    /// Session state is cached per identifier, so every concurrent request sharing a
    /// [`Cookie`](crate::Cookie) must return a distinct value.
    fn request_id(&self) -> String;
}

/// Write access to the response of the current request.
pub trait ResponseHeaders: Send + Sync {
    /// Set a response header. Called once per cookie write with [`SET_COOKIE`].
    fn set_header(&self, name: &str, value: &str);
}

/// The capabilities a [`Cookie`](crate::Cookie) needs from its host: the request it reads from and,
/// optionally, the response it writes to. Without a response sink every write fails with
/// [`CookieError::MissingHttpIntegration`](crate::CookieError::MissingHttpIntegration).
#[derive(Clone)]
pub struct HttpIntegration {
    request: Arc<dyn RequestContext>,
    response: Option<Arc<dyn ResponseHeaders>>,
}

impl HttpIntegration {
    /// Read-only integration with no response sink.
    pub fn new(request: Arc<dyn RequestContext>) -> Self {
        Self {
            request,
            response: None,
        }
    }

    /// Attach the response sink cookie writes go to.
    pub fn with_response(mut self, response: Arc<dyn ResponseHeaders>) -> Self {
        self.response = Some(response);
        self
    }

    pub(crate) fn request(&self) -> &dyn RequestContext {
        self.request.as_ref()
    }

    pub(crate) fn response(&self) -> Option<&dyn ResponseHeaders> {
        self.response.as_deref()
    }
}

impl std::fmt::Debug for HttpIntegration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIntegration")
            .field("has_response", &self.response.is_some())
            .finish_non_exhaustive()
    }
}
