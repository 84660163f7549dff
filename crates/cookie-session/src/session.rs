use std::sync::{Mutex, MutexGuard, PoisonError};

use cookie_session_crypto::{CryptoError, SessionCodec, SessionOptions};
use serde_json::{Map, Value};

use crate::{Cookie, CookieError, cache::RequestCache};

/// Encrypted session state owned by a [`Cookie`].
#[derive(Debug)]
pub(crate) struct Session {
    codec: SessionCodec,
    cache: Mutex<RequestCache>,
}

impl Session {
    pub(crate) fn new(options: &SessionOptions) -> Result<Self, CryptoError> {
        Ok(Self {
            codec: SessionCodec::new(options)?,
            cache: Mutex::new(RequestCache::default()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RequestCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Key/value access to the encrypted session of the current request.
///
/// Obtained from [`Cookie::session`]. The whole session is stored as one encrypted cookie named
/// after [`SessionOptions::key`]. It is decoded once per request and every write re-encrypts the
/// full payload and emits a single `Set-Cookie` header.
#[derive(Debug, Clone, Copy)]
pub struct SessionHandle<'a> {
    cookie: &'a Cookie,
    session: &'a Session,
}

impl<'a> SessionHandle<'a> {
    pub(crate) fn new(cookie: &'a Cookie, session: &'a Session) -> Self {
        Self { cookie, session }
    }

    /// Read `key` from the session. Returns `None` when the key, or the session cookie itself,
    /// is absent.
    ///
    /// Fails with [`CryptoError::InvalidMac`] if the session cookie has been tampered with.
    pub fn read(&self, key: &str) -> Result<Option<Value>, CookieError> {
        let cache = self.fresh_cache()?;
        Ok(cache.get(key).cloned())
    }

    /// Set `key` to `value`, or delete it when `value` is `None` or JSON `null`, then write the
    /// re-encrypted session cookie.
    pub fn write(&self, key: &str, value: Option<Value>) -> Result<(), CookieError> {
        let envelope = {
            let mut cache = self.fresh_cache()?;
            cache.merge(key, value);
            self.session
                .codec
                .encode(&Value::Object(cache.payload().clone()))?
        };
        self.send(Some(&envelope))
    }

    /// A copy of every key currently in the session.
    pub fn entries(&self) -> Result<Map<String, Value>, CookieError> {
        let cache = self.fresh_cache()?;
        Ok(cache.payload().clone())
    }

    /// Drop all session state and write a deletion cookie.
    ///
    /// The existing session cookie is not decoded, so this also clears a cookie that fails
    /// verification.
    pub fn destroy(&self) -> Result<(), CookieError> {
        let request_id = self.cookie.http().request().request_id();
        self.session.lock().reset(&request_id);

        self.send(None)?;

        tracing::debug!(request_id = %request_id, "Session destroyed");
        Ok(())
    }

    /// Whether the current request modified the session without the result reaching the
    /// response, which only happens when the last write failed.
    pub fn is_dirty(&self) -> bool {
        let request_id = self.cookie.http().request().request_id();
        self.session.lock().is_dirty(&request_id)
    }

    /// The codec encrypting this session.
    pub fn codec(&self) -> &'a SessionCodec {
        &self.session.codec
    }

    fn fresh_cache(&self) -> Result<MutexGuard<'a, RequestCache>, CookieError> {
        let request_id = self.cookie.http().request().request_id();
        // Decoding errors on the raw value must surface, not read as a missing cookie
        let raw = self.cookie.read_raw(self.session.codec.name());

        let mut cache = self.session.lock();
        cache.ensure_fresh(&request_id, raw.as_deref(), &self.session.codec)?;
        Ok(cache)
    }

    /// Hand the session cookie to the response. Must be called without holding the cache lock,
    /// the response sink is free to call back into the session.
    fn send(&self, envelope: Option<&str>) -> Result<(), CookieError> {
        self.cookie.write(self.session.codec.name(), envelope)?;
        self.session.lock().mark_clean();
        Ok(())
    }
}
