use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::pages::home::HomeProps;

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site_name: &'a str,
    posts: Vec<PostItem<'a>>,
    has_next_page: bool,
    next_page_link: String,
    preview: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    link: String,
    title: &'a str,
    subtitle: &'a str,
    author: &'a str,
    date: &'a str,
}

pub struct HomeRenderer<'a> {
    pub template: Template<'a>,
}

impl HomeRenderer<'_> {
    pub fn new(home_tpl_src: &str) -> io::Result<HomeRenderer> {
        let template = match Template::new(home_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing home template: {}", e)));
            }
        };

        Ok(HomeRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, props: &HomeProps) -> String {
        let posts = props.posts.iter()
            .map(|post| PostItem {
                link: format!("/post/{}", post.uid),
                title: post.title.as_str(),
                subtitle: post.subtitle.as_str(),
                author: post.author.as_str(),
                date: post.publication_date.as_deref().unwrap_or_default(),
            })
            .collect();

        let next_page_link = props.next_page
            .map(|page| format!("/?page={}", page))
            .unwrap_or_default();

        self.template.render(&HomePage {
            site_name,
            posts,
            has_next_page: props.next_page.is_some(),
            next_page_link,
            preview: props.preview,
        })
    }
}
