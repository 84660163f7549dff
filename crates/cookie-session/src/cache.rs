use cookie_session_crypto::{CryptoError, EncodingError, SessionCodec};
use serde_json::{Map, Value};

/// Session payload memoized for one request.
///
/// The payload is decoded from the cookie the first time a request touches the session and then
/// served from memory. Any other request id invalidates it, so state never leaks from one request
/// into the next.
#[derive(Debug, Default)]
pub(crate) struct RequestCache {
    token: Option<String>,
    payload: Map<String, Value>,
    dirty: bool,
}

impl RequestCache {
    /// Make sure the cache holds the session of `request_id`, decoding `raw_cookie` if it does
    /// not. An absent cookie gives an empty session. The token is only recorded once decoding
    /// succeeds.
    pub(crate) fn ensure_fresh(
        &mut self,
        request_id: &str,
        raw_cookie: Option<&str>,
        codec: &SessionCodec,
    ) -> Result<(), CryptoError> {
        if self.token.as_deref() == Some(request_id) {
            return Ok(());
        }

        tracing::debug!(request_id, "Loading session for new request");

        let payload = match raw_cookie {
            None => Map::new(),
            Some(raw) => match codec.decode(raw)? {
                Value::Object(map) => map,
                _ => return Err(EncodingError::NotAnObject.into()),
            },
        };

        self.token = Some(request_id.to_owned());
        self.payload = payload;
        self.dirty = false;
        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Set `key`, or remove it when `value` is `None` or JSON `null`.
    pub(crate) fn merge(&mut self, key: &str, value: Option<Value>) {
        match value {
            None | Some(Value::Null) => {
                self.payload.remove(key);
            }
            Some(value) => {
                self.payload.insert(key.to_owned(), value);
            }
        }
        self.dirty = true;
    }

    /// Take over `request_id` with an empty session, without decoding anything.
    pub(crate) fn reset(&mut self, request_id: &str) {
        self.token = Some(request_id.to_owned());
        self.payload.clear();
        self.dirty = true;
    }

    pub(crate) fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Whether `request_id` modified the session without the result reaching the response.
    pub(crate) fn is_dirty(&self, request_id: &str) -> bool {
        self.dirty && self.token.as_deref() == Some(request_id)
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
