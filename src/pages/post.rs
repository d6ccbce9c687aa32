use chrono_tz::Tz;

use crate::content::post_view::PostView;
use crate::content::{PostDocument, POST_TYPE};
use crate::prismic::{DocumentSource, Predicate, QueryOptions, Result};

/// Fields fetched for the posts that are pre-rendered
pub const POST_FIELDS: [&str; 5] = [
    "post.title",
    "post.subtitle",
    "post.author",
    "post.banner",
    "post.content",
];

/// Shown while a post is not available.
pub const LOADING_PLACEHOLDER: &str = "Carregando...";

/// Uids of the posts generated ahead of any request.
pub async fn static_paths<S>(source: &S, page_size: u32) -> Result<Vec<String>>
    where
        S: DocumentSource + ?Sized,
{
    let predicates = [Predicate::document_type(POST_TYPE)];
    let options = QueryOptions {
        page_size: Some(page_size),
        fetch: POST_FIELDS.iter().map(|f| f.to_string()).collect(),
        ..Default::default()
    };

    let response = source.query(&predicates, &options).await?;
    Ok(response.results.into_iter().filter_map(|doc| doc.uid).collect())
}

/// The post page for `slug`, `None` when the repository has no such post.
pub async fn post_props<S>(source: &S, slug: &str, tz: &Tz) -> Result<Option<PostView>>
    where
        S: DocumentSource + ?Sized,
{
    let Some(doc) = source.get_by_uid(POST_TYPE, slug).await? else {
        return Ok(None);
    };

    let post = PostDocument::from_document(doc)?;
    Ok(Some(PostView::shape(post, tz)))
}
