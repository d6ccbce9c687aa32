use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::post_view::PostView;
use crate::pages::post::LOADING_PLACEHOLDER;

#[derive(ramhorns::Content)]
struct ViewSection<'a> {
    heading: &'a str,
    body: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewPost<'a> {
    title: &'a str,
    subtitle: &'a str,
    author: &'a str,
    has_banner: bool,
    banner_url: &'a str,
    date: &'a str,
    edited: bool,
    edited_at: &'a str,
    reading_time: u32,
    sections: Vec<ViewSection<'a>>,
    comments: &'a str,
}

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    site_name: &'a str,
    post: Option<ViewPost<'a>>,
    placeholder: &'a str,
    preview: bool,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(post_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(post_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// Renders the post page, or the loading placeholder when `post` is `None`.
    pub fn render(&self, site_name: &str, post: Option<&PostView>, comments: &str, preview: bool) -> String {
        let post = post.map(|post| ViewPost {
            title: post.title.as_str(),
            subtitle: post.subtitle.as_str(),
            author: post.author.as_str(),
            has_banner: post.banner_url.is_some(),
            banner_url: post.banner_url.as_deref().unwrap_or_default(),
            date: post.publication_date.as_deref().unwrap_or_default(),
            edited: post.edited_at.is_some(),
            edited_at: post.edited_at.as_deref().unwrap_or_default(),
            reading_time: post.reading_time,
            sections: post.sections.iter()
                .map(|s| ViewSection { heading: s.heading.as_str(), body: s.body_html.as_str() })
                .collect(),
            comments,
        });

        self.template.render(&PostPage {
            site_name,
            post,
            placeholder: LOADING_PLACEHOLDER,
            preview,
        })
    }
}
