use chrono_tz::Tz;

use crate::content::date_format::{format_edition_date, format_publication_date};
use crate::content::reading_time::estimate_reading_time;
use crate::content::PostDocument;
use crate::prismic::{CmsError, Document};
use crate::rich_text::as_html;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub heading: String,
    pub body_html: String,
}

/// What the post page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub publication_date: Option<String>,
    pub edited_at: Option<String>,
    pub reading_time: u32,
    pub sections: Vec<SectionView>,
}

impl PostView {
    pub fn shape(post: PostDocument, tz: &Tz) -> Self {
        let reading_time = estimate_reading_time(&post.data.content);
        let publication_date = post.first_publication_date.as_ref()
            .map(|date| format_publication_date(date, tz));
        let edited_at = format_edition_date(
            post.first_publication_date.as_ref(),
            post.last_publication_date.as_ref(),
            tz,
        );

        let sections = post.data.content.iter()
            .map(|section| SectionView {
                heading: section.heading.clone(),
                body_html: as_html(&section.body),
            })
            .collect();

        PostView {
            uid: post.uid,
            title: post.data.title,
            subtitle: post.data.subtitle,
            author: post.data.author,
            banner_url: post.data.banner.url.filter(|url| !url.is_empty()),
            publication_date,
            edited_at,
            reading_time,
            sections,
        }
    }
}

/// One entry of the home listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub publication_date: Option<String>,
}

impl PostSummary {
    pub fn shape(doc: Document, tz: &Tz) -> Result<Self, CmsError> {
        let post = PostDocument::from_document(doc)?;
        Ok(PostSummary {
            uid: post.uid,
            title: post.data.title,
            subtitle: post.data.subtitle,
            author: post.data.author,
            publication_date: post.first_publication_date.as_ref()
                .map(|date| format_publication_date(date, tz)),
        })
    }
}
