#![doc = include_str!("../README.md")]

mod cache;
mod config;
pub use config::{CookieOptions, Expiry};
mod cookie;
pub use cookie::Cookie;
mod error;
pub use error::CookieError;
mod header;
pub use header::{parse_cookie_header, render_set_cookie, CookieAttributes, EPOCH_EXPIRY};
mod http;
pub use http::{HttpIntegration, RequestContext, ResponseHeaders, SET_COOKIE};
mod in_memory_http;
pub use in_memory_http::InMemoryHttp;
mod session;
pub use session::SessionHandle;

pub use cookie_session_crypto::{CryptoError, SessionCodec, SessionOptions};
