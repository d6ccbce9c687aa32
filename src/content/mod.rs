use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::prismic::{CmsError, Document};
use crate::rich_text::RichTextBlock;
use crate::util::serde_helpers::null_as_default;

pub mod date_format;
pub mod post_view;
pub mod reading_time;

/// Custom type of the blog posts in the repository
pub const POST_TYPE: &str = "post";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Banner {
    pub url: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<RichTextBlock>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PostData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDocument {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub data: PostData,
}

impl PostDocument {
    pub fn from_document(doc: Document) -> Result<Self, CmsError> {
        let Some(uid) = doc.uid else {
            return Err(CmsError::InvalidDocument {
                id: doc.id,
                reason: "post without uid".to_string(),
            });
        };

        let data: PostData = match serde_json::from_value(doc.data) {
            Ok(data) => data,
            Err(e) => return Err(CmsError::InvalidDocument {
                id: doc.id,
                reason: e.to_string(),
            }),
        };

        Ok(PostDocument {
            uid,
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            data,
        })
    }
}
