//! Session middleware: token resolution and renewal cookie emission.
//!
//! Runs on every route. The resolved identity payload is inserted into
//! request extensions, where handlers read it back with
//! `Extension<Payload>`. When resolution performed a silent renewal, both
//! token cookies are re-set on the response of the same request.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use crate::auth::jwt::TokenCodec;
use crate::auth::session::TokenPair;

use super::{ApiError, AppState};

/// Cookie carrying the short-lived access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the long-lived refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_owned());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_owned());

    let resolution = match state.sessions.resolve(access.as_deref(), refresh.as_deref()) {
        Ok(resolution) => resolution,
        Err(err) => return ApiError::from(err).into_response(),
    };

    request.extensions_mut().insert(resolution.payload);
    let response = next.run(request).await;

    match resolution.issued {
        Some(pair) => (token_cookies(&pair, state.sessions.codec()), response).into_response(),
        None => response,
    }
}

/// Build the two token cookies, `HttpOnly` with kind-specific `Max-Age`.
pub fn token_cookies(pair: &TokenPair, codec: &TokenCodec) -> CookieJar {
    CookieJar::new()
        .add(token_cookie(
            ACCESS_COOKIE,
            pair.access.clone(),
            codec.access_ttl_secs(),
        ))
        .add(token_cookie(
            REFRESH_COOKIE,
            pair.refresh.clone(),
            codec.refresh_ttl_secs(),
        ))
}

fn token_cookie(name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .max_age(Duration::seconds(max_age_secs))
        .path("/")
        .build()
}
