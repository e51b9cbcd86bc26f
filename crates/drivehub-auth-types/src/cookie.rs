//! Cookie builders for the session tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const DRIVEHUB_ACCESS_TOKEN: &str = "drivehub_access_token";

/// Cookie name for the refresh token.
pub const DRIVEHUB_REFRESH_TOKEN: &str = "drivehub_refresh_token";

/// Cookie Max-Age for both tokens in seconds (7 days). The access token
/// itself expires sooner; the cookie outlives it so the client can refresh.
pub const SESSION_COOKIE_MAX_AGE: i64 = 604_800;

fn session_cookie(name: &'static str, value: String, domain: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .domain(domain)
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Store both session tokens on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use drivehub_auth_types::cookie::{set_session_cookies, DRIVEHUB_ACCESS_TOKEN};
///
/// let jar = set_session_cookies(
///     CookieJar::new(),
///     "access".to_string(),
///     "refresh".to_string(),
///     "drivehub.example".to_string(),
/// );
/// let cookie = jar.get(DRIVEHUB_ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "access");
/// assert_eq!(cookie.path(), Some("/"));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_session_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    domain: String,
) -> CookieJar {
    let max_age = Duration::seconds(SESSION_COOKIE_MAX_AGE);
    jar.add(session_cookie(
        DRIVEHUB_ACCESS_TOKEN,
        access_token,
        domain.clone(),
        max_age,
    ))
    .add(session_cookie(
        DRIVEHUB_REFRESH_TOKEN,
        refresh_token,
        domain,
        max_age,
    ))
}

/// Clear both session cookies by setting Max-Age to 0.
pub fn clear_session_cookies(jar: CookieJar, domain: String) -> CookieJar {
    jar.add(session_cookie(
        DRIVEHUB_ACCESS_TOKEN,
        String::new(),
        domain.clone(),
        Duration::ZERO,
    ))
    .add(session_cookie(
        DRIVEHUB_REFRESH_TOKEN,
        String::new(),
        domain,
        Duration::ZERO,
    ))
}
