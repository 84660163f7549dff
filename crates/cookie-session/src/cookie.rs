use crate::{
    CookieAttributes, CookieError, CookieOptions, HttpIntegration, SET_COOKIE, parse_cookie_header,
    render_set_cookie,
    header::find_raw_value,
    session::{Session, SessionHandle},
};

/// Reads and writes cookies of the current request, with an optional encrypted session.
///
/// A `Cookie` is created once with its [`CookieOptions`] and then shared between requests. The
/// [`HttpIntegration`] tells it which request is current and where `Set-Cookie` headers go.
#[derive(Debug)]
pub struct Cookie {
    attributes: CookieAttributes,
    session: Option<Session>,
    http: HttpIntegration,
}

impl Cookie {
    /// Create a cookie accessor. When `options.session` is set the session keys are derived here,
    /// so invalid session options fail immediately.
    pub fn new(options: CookieOptions, http: HttpIntegration) -> Result<Self, CookieError> {
        let session = options.session.as_ref().map(Session::new).transpose()?;

        Ok(Self {
            attributes: CookieAttributes::from(&options),
            session,
            http,
        })
    }

    /// The attributes every write uses unless overridden with [`Cookie::write_with`].
    pub fn attributes(&self) -> &CookieAttributes {
        &self.attributes
    }

    /// Read cookie `name` from the request's `Cookie` header.
    ///
    /// A value that is not valid percent-encoded UTF-8 reads as `None`, the same as a missing
    /// cookie.
    pub fn read(&self, name: &str) -> Option<String> {
        let header = self.http.request().cookie_header()?;
        parse_cookie_header(&header, name)
    }

    /// The value of cookie `name` exactly as the client sent it, without percent-decoding.
    pub(crate) fn read_raw(&self, name: &str) -> Option<String> {
        let header = self.http.request().cookie_header()?;
        find_raw_value(&header, name).map(str::to_owned)
    }

    /// Set cookie `name` to `value`, or delete it when `value` is `None`. Returns the rendered
    /// header value.
    pub fn write(&self, name: &str, value: Option<&str>) -> Result<String, CookieError> {
        self.write_with(name, value, &self.attributes)
    }

    /// Same as [`Cookie::write`] with per-call attributes.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use cookie_session::{Cookie, CookieAttributes, CookieOptions, HttpIntegration, InMemoryHttp};
    /// let http = Arc::new(InMemoryHttp::new("request-1"));
    /// let cookie = Cookie::new(
    ///     CookieOptions::default(),
    ///     HttpIntegration::new(http.clone()).with_response(http.clone()),
    /// )
    /// .unwrap();
    ///
    /// let attributes = CookieAttributes {
    ///     path: "/admin".to_owned(),
    ///     ..cookie.attributes().clone()
    /// };
    /// let header = cookie.write_with("theme", Some("dark"), &attributes).unwrap();
    /// assert_eq!(header, "theme=dark;max-age=31536000;path=/admin;Secure;HttpOnly;");
    /// ```
    pub fn write_with(
        &self,
        name: &str,
        value: Option<&str>,
        attributes: &CookieAttributes,
    ) -> Result<String, CookieError> {
        let Some(response) = self.http.response() else {
            tracing::error!(cookie_name = %name, "Cookie write without a response header sink");
            return Err(CookieError::MissingHttpIntegration);
        };

        let header = render_set_cookie(name, value, attributes);
        response.set_header(SET_COOKIE, &header);
        Ok(header)
    }

    /// The encrypted session, if this cookie was configured with one.
    pub fn session(&self) -> Result<SessionHandle<'_>, CookieError> {
        let session = self
            .session
            .as_ref()
            .ok_or(CookieError::SessionNotConfigured)?;
        Ok(SessionHandle::new(self, session))
    }

    pub(crate) fn http(&self) -> &HttpIntegration {
        &self.http
    }
}
