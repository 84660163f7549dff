use std::sync::{PoisonError, RwLock};

use crate::{RequestContext, ResponseHeaders};

/// In-memory request and response, implementing both [`RequestContext`] and [`ResponseHeaders`].
///
/// Holds a settable `Cookie` header and request id, and records every header set on it.
/// Suitable for tests and for hosts that assemble responses after the handler returns.
#[derive(Debug, Default)]
pub struct InMemoryHttp {
    cookie_header: RwLock<Option<String>>,
    request_id: RwLock<String>,
    headers: RwLock<Vec<(String, String)>>,
}

impl InMemoryHttp {
    /// Creates an empty request with the given id and no `Cookie` header.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: RwLock::new(request_id.into()),
            ..Default::default()
        }
    }

    /// Set the request's `Cookie` header.
    pub fn with_cookie_header(self, header: impl Into<String>) -> Self {
        self.set_cookie_header(Some(header.into()));
        self
    }

    /// Replace the request's `Cookie` header.
    pub fn set_cookie_header(&self, header: Option<String>) {
        *self
            .cookie_header
            .write()
            .unwrap_or_else(PoisonError::into_inner) = header;
    }

    /// Start a new request: switch the request id and clear recorded response headers.
    pub fn begin_request(&self, request_id: impl Into<String>, cookie_header: Option<String>) {
        *self
            .request_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = request_id.into();
        self.set_cookie_header(cookie_header);
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The last value set for header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Every header set so far, in order.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RequestContext for InMemoryHttp {
    fn cookie_header(&self) -> Option<String> {
        self.cookie_header
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn request_id(&self) -> String {
        self.request_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ResponseHeaders for InMemoryHttp {
    fn set_header(&self, name: &str, value: &str) {
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_owned(), value.to_owned()));
    }
}
