//! Cookie plumbing for the session token and one-shot flash notices.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap,
    },
    response::{IntoResponse, Redirect, Response},
};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Read a cookie value from the request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying the session token
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

/// `Set-Cookie` value that removes the session
pub fn clear_session_cookie() -> String {
    expired_cookie(SESSION_COOKIE)
}

fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// A notice left by the previous request, shown once.
///
/// Extracting it does not clear it; views that display it should send
/// [`Flash::clear_cookie`] back.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<String>);

impl Flash {
    pub fn cookie(message: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            urlencoding::encode(message)
        )
    }

    pub fn clear_cookie() -> String {
        expired_cookie(FLASH_COOKIE)
    }

    /// Redirect to `to` leaving `message` for the next view
    pub fn redirect(to: &str, message: &str) -> Response {
        ([(SET_COOKIE, Self::cookie(message))], Redirect::to(to)).into_response()
    }

    pub fn into_message(self) -> Option<String> {
        self.0
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = read_cookie(&parts.headers, FLASH_COOKIE)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| urlencoding::decode(&raw).ok().map(|m| m.into_owned()));

        Ok(Flash(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let headers = headers("theme=dark; session=abc.def.ghi; flash=hi");
        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn flash_cookie_is_percent_encoded() {
        let cookie = Flash::cookie("Please log in; then retry");
        assert!(cookie.starts_with("flash=Please%20log%20in%3B%20then%20retry;"));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
        assert!(Flash::clear_cookie().starts_with("flash=;"));
    }

    #[tokio::test]
    async fn flash_extractor_decodes_message() {
        let request = axum::http::Request::builder()
            .header(COOKIE, "flash=Task%20not%20found")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let flash = Flash::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(flash.into_message().as_deref(), Some("Task not found"));
    }
}
