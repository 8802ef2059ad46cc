use crate::error::Result;
use crate::state::AppState;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use wormhole_worker::http::{requested_url, ShortenForm};

/// Bytes that may not appear raw in a `Location` value. Non-ASCII bytes are
/// always encoded; `%` is left alone so already-escaped URLs stay as they are.
const LOCATION: &AsciiSet = &CONTROLS.add(b' ');

/// `POST /shorten` with a form body, or `GET /shorten?url=`.
/// Answers with the canonical short URL as plain text.
pub async fn shorten_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ShortenForm>, QueryRejection>,
    form: std::result::Result<Form<ShortenForm>, FormRejection>,
) -> Result<String> {
    let url = requested_url(query, form);
    state.frontend().shorten(&url).await
}

/// `GET /{code}`: 302 to the stored URL.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let target = state.frontend().resolve(&code).await?;
    let location = utf8_percent_encode(&target, LOCATION).to_string();

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(url: &str) -> String {
        utf8_percent_encode(url, LOCATION).to_string()
    }

    #[test]
    fn location_escaping() {
        assert_eq!(escape("http://example.com/a?b=c&d=%20"), "http://example.com/a?b=c&d=%20");
        assert_eq!(escape("http://example.com/a b"), "http://example.com/a%20b");
        assert_eq!(escape("http://日本.jp"), "http://%E6%97%A5%E6%9C%AC.jp");
        assert_eq!(escape("http://x/\r\nSet-Cookie"), "http://x/%0D%0ASet-Cookie");
    }
}
