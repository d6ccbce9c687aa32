use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::prismic::preview::{link_resolver, PreviewResolver};
use crate::prismic::{DocumentSource, PREVIEW_COOKIE};
use crate::util::html::{escape_html, js_string};

pub const INVALID_TOKEN: &str = "Invalid token";

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum PreviewResponse {
    Unauthorized(ErrorBody),
    Redirect { location: String, token: String },
}

/// Handles `/api/preview?token=...&documentId=...`.
pub async fn preview<S>(source: &S, token: Option<&str>, document_id: Option<&str>) -> PreviewResponse
    where
        S: DocumentSource + ?Sized,
{
    let token = token.unwrap_or_default();
    let resolver = PreviewResolver::new(source, token, document_id);

    match resolver.resolve(link_resolver, "/").await {
        Some(location) => PreviewResponse::Redirect {
            location,
            token: token.trim().to_string(),
        },
        None => PreviewResponse::Unauthorized(ErrorBody {
            message: INVALID_TOKEN.to_string(),
        }),
    }
}

/// Page that sends the browser to `location` once the preview cookie is set.
pub fn redirect_page(location: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta http-equiv=\"Refresh\" content=\"0; url={}\" />\n    <script>window.location.href = {}</script>\n    </head>",
        escape_html(location),
        js_string(location),
    )
}

pub fn preview_cookie(token: &str) -> String {
    format!("{}={}; Path=/; SameSite=Lax", PREVIEW_COOKIE, utf8_percent_encode(token, NON_ALPHANUMERIC))
}

pub fn clear_preview_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", PREVIEW_COOKIE)
}
