//! Session cookie construction

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use af_shared::config::CookieConfig;

/// Http-only, `SameSite=Lax` cookie carrying a token for `max_age_secs`
pub fn session_cookie(
    config: &CookieConfig,
    name: &str,
    value: String,
    max_age_secs: i64,
) -> Cookie<'static> {
    Cookie::build(name.to_string(), value)
        .path(config.path.clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop `name`
pub fn removal_cookie(config: &CookieConfig, name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name.to_string(), "")
        .path(config.path.clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let config = CookieConfig::default();
        let cookie = session_cookie(&config, "access_token", "abc".into(), 60);

        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&CookieConfig::default(), "refresh_token");

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
