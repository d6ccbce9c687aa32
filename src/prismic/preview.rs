use lazy_static::lazy_static;
use regex::Regex;
use spdlog::warn;

use crate::prismic::{Document, DocumentSource};

lazy_static! {
    static ref PREVIEW_TOKEN: Regex = Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d+)?/\S*$").unwrap();
}

/// Maps a document to the path it is served on.
pub fn link_resolver(doc: &Document) -> String {
    resolve_document_link(&doc.doc_type, doc.uid.as_deref())
}

pub fn resolve_document_link(doc_type: &str, uid: Option<&str>) -> String {
    match (doc_type, uid) {
        ("posts", Some(uid)) if !uid.is_empty() => format!("/post/{}", uid),
        _ => "/".to_string(),
    }
}

/// Prismic preview tokens are URLs of the preview session.
pub fn is_valid_preview_token(token: &str) -> bool {
    PREVIEW_TOKEN.is_match(token)
}

pub struct PreviewResolver<'a, S: DocumentSource + ?Sized> {
    source: &'a S,
    token: String,
    document_id: Option<String>,
}

impl<'a, S: DocumentSource + ?Sized> PreviewResolver<'a, S> {
    pub fn new(source: &'a S, token: &str, document_id: Option<&str>) -> Self {
        PreviewResolver {
            source,
            token: token.trim().to_string(),
            document_id: document_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    /// Destination of the previewed document, or `None` when the token is
    /// unusable.
    pub async fn resolve<F>(&self, link_resolver: F, default_url: &str) -> Option<String>
        where
            F: Fn(&Document) -> String,
    {
        if !is_valid_preview_token(&self.token) {
            return None;
        }

        let destination = match self.document_id {
            None => default_url.to_string(),
            Some(ref id) => match self.source.get_by_id(id, Some(self.token.as_str())).await {
                Ok(Some(doc)) => link_resolver(&doc),
                Ok(None) => default_url.to_string(),
                Err(e) => {
                    warn!("Preview ref rejected for document {}: {}", id, e);
                    return None;
                }
            },
        };

        if destination.is_empty() {
            None
        } else {
            Some(destination)
        }
    }
}
