use chrono_tz::Tz;
use spdlog::warn;

use crate::content::post_view::PostSummary;
use crate::content::POST_TYPE;
use crate::prismic::{DocumentSource, Predicate, QueryOptions, Result};

/// Fields the listing needs from each post
pub const LISTING_FIELDS: [&str; 3] = ["post.title", "post.subtitle", "post.author"];

const NEWEST_FIRST: &str = "[document.first_publication_date desc]";

#[derive(Debug, Clone, PartialEq)]
pub struct HomeProps {
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub next_page: Option<u32>,
    pub preview: bool,
}

pub fn listing_options(page_size: u32, page: u32) -> QueryOptions {
    QueryOptions {
        page_size: Some(page_size),
        page: Some(page.max(1)),
        fetch: LISTING_FIELDS.iter().map(|f| f.to_string()).collect(),
        orderings: Some(NEWEST_FIRST.to_string()),
    }
}

/// Fetches one page of the post listing.
pub async fn home_props<S>(source: &S, page_size: u32, page: u32, tz: &Tz) -> Result<HomeProps>
    where
        S: DocumentSource + ?Sized,
{
    let predicates = [Predicate::document_type(POST_TYPE)];
    let response = source.query(&predicates, &listing_options(page_size, page)).await?;
    let next_page = response.next_page_number();

    let mut posts = Vec::with_capacity(response.results.len());
    for doc in response.results {
        match PostSummary::shape(doc, tz) {
            Ok(summary) => posts.push(summary),
            Err(e) => warn!("Skipping post in listing: {}", e),
        }
    }

    Ok(HomeProps {
        posts,
        page: response.page,
        next_page,
        preview: source.is_preview(),
    })
}
