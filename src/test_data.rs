use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::{parse_config, Config};
use crate::prismic::{CmsError, Document, DocumentSource, Predicate, QueryOptions, Result, SearchResponse};

pub const PREVIEW_TOKEN: &str = "https://spacetraveling.prismic.io/previews/YFD:YFE?websitePreviewId=YFC";

pub const API_INFO_JSON: &str = r##"{
  "refs": [
    {"id": "master", "ref": "YFDJmBIAACMAdvNT", "label": "Master", "isMasterRef": true},
    {"id": "YFDK", "ref": "YFDKoRIAACMAdvaM~YFDJmBIAACMAdvNT", "label": "Next release", "scheduledAt": null}
  ],
  "bookmarks": {},
  "types": {"post": "Post"},
  "languages": [{"id": "pt-br", "name": "Portuguese - Brazil"}],
  "oauth_initiate": "https://spacetraveling.prismic.io/auth",
  "oauth_token": "https://spacetraveling.prismic.io/auth/token",
  "version": "8ab9b3d",
  "license": "All Rights Reserved"
}"##;

pub const POST_DOCUMENT_JSON: &str = r##"{
  "id": "YFC4ZBIAACQAdQSd",
  "uid": "como-utilizar-hooks",
  "type": "post",
  "href": "https://spacetraveling.cdn.prismic.io/api/v2/documents/search?ref=YFDJmBIAACMAdvNT&q=%5B%5B%3Ad+%3D+at%28document.id%2C+%22YFC4ZBIAACQAdQSd%22%29+%5D%5D",
  "tags": [],
  "first_publication_date": "2021-03-15T19:25:28+0000",
  "last_publication_date": "2021-03-19T18:49:00+0000",
  "slugs": ["como-utilizar-hooks"],
  "linked_documents": [],
  "lang": "pt-br",
  "alternate_languages": [],
  "data": {
    "title": "Como utilizar Hooks",
    "subtitle": "Pensando em sincronização em vez de ciclos de vida",
    "author": "Joseph Oliveira",
    "banner": {
      "dimensions": {"width": 1440, "height": 400},
      "alt": null,
      "copyright": null,
      "url": "https://images.prismic.io/spacetraveling/banner.png"
    },
    "content": [
      {
        "heading": "Proin et varius",
        "body": [
          {"type": "paragraph", "text": "Nullam dolor sapien, vulputate eu diam at.", "spans": [{"start": 21, "end": 30, "type": "strong"}]}
        ]
      },
      {
        "heading": "Cras laoreet",
        "body": [
          {"type": "paragraph", "text": "Cras laoreet mi.", "spans": []},
          {"type": "list-item", "text": "Um", "spans": []},
          {"type": "list-item", "text": "Dois", "spans": []}
        ]
      }
    ]
  }
}"##;

pub const SEARCH_RESPONSE_JSON: &str = r##"{
  "page": 1,
  "results_per_page": 2,
  "results_size": 2,
  "total_results_size": 3,
  "total_pages": 2,
  "next_page": "https://spacetraveling.cdn.prismic.io/api/v2/documents/search?ref=YFDJmBIAACMAdvNT&q=%5B%5Bat%28document.type%2C+%22post%22%29%5D%5D&page=2&pageSize=2",
  "prev_page": null,
  "results": [
    {
      "id": "YFC4ZBIAACQAdQSd",
      "uid": "como-utilizar-hooks",
      "type": "post",
      "first_publication_date": "2021-03-15T19:25:28+0000",
      "last_publication_date": "2021-03-19T18:49:00+0000",
      "data": {
        "title": "Como utilizar Hooks",
        "subtitle": "Pensando em sincronização em vez de ciclos de vida",
        "author": "Joseph Oliveira"
      }
    },
    {
      "id": "YFC5EhIAACQAdQXK",
      "uid": "criando-um-app-cra-do-zero",
      "type": "post",
      "first_publication_date": "2021-03-15T19:28:12+0000",
      "last_publication_date": "2021-03-15T19:28:12+0000",
      "data": {
        "title": "Criando um app CRA do zero",
        "subtitle": "Tudo sobre como criar a sua primeira aplicação utilizando Create React App",
        "author": "Danilo Vieira"
      }
    }
  ]
}"##;

pub const CONFIG_TOML: &str = r##"
[prismic]
api_endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"

[paths]
public_dir = "res/public"

[defaults]
page_size = 2
static_paths_size = 3

[server]
address = "127.0.0.1"
port = 3000

[comments]
repo = "spacetraveling/comments"
"##;

pub fn test_config() -> Config {
    parse_config(CONFIG_TOML).unwrap()
}

/// A published post with a single short section.
pub fn post_document(id: &str, uid: &str) -> Document {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "uid": uid,
        "type": "post",
        "first_publication_date": "2021-03-25T12:00:00+0000",
        "last_publication_date": "2021-03-25T12:00:00+0000",
        "data": {
            "title": format!("Title of {}", uid),
            "subtitle": format!("Subtitle of {}", uid),
            "author": "Danilo Vieira",
            "banner": {"url": format!("https://images.prismic.io/spacetraveling/{}.png", uid)},
            "content": [
                {"heading": "Intro", "body": [{"type": "paragraph", "text": "Short <post> body", "spans": []}]}
            ]
        }
    })).unwrap()
}

/// In-memory repository. Searches on an unknown ref fail the way Prismic
/// rejects an expired preview token.
pub struct MemorySource {
    documents: Vec<Document>,
    previews: HashMap<String, Vec<Document>>,
    preview_ref: Option<String>,
    requests: Mutex<Vec<(Vec<Predicate>, QueryOptions)>>,
}

impl MemorySource {
    pub fn new(documents: Vec<Document>) -> Self {
        MemorySource {
            documents,
            previews: HashMap::new(),
            preview_ref: None,
            requests: Mutex::new(vec![]),
        }
    }

    pub fn with_preview(mut self, token: &str, documents: Vec<Document>) -> Self {
        self.previews.insert(token.to_string(), documents);
        self
    }

    pub fn reading_preview(mut self, token: &str) -> Self {
        self.preview_ref = Some(token.to_string());
        self
    }

    pub fn requests(&self) -> Vec<(Vec<Predicate>, QueryOptions)> {
        self.requests.lock().unwrap().clone()
    }

    fn matches(doc: &Document, predicate: &Predicate) -> bool {
        let Predicate::At { path, value } = predicate;
        match path.as_str() {
            "document.type" => doc.doc_type == *value,
            "document.id" => doc.id == *value,
            p => *p == format!("my.{}.uid", doc.doc_type) && doc.uid.as_deref() == Some(value.as_str()),
        }
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn search(&self, reference: Option<&str>, predicates: &[Predicate], options: &QueryOptions) -> Result<SearchResponse> {
        self.requests.lock().unwrap().push((predicates.to_vec(), options.clone()));

        let reference = reference.map(str::to_string).or_else(|| self.preview_ref.clone());
        let documents = match reference {
            None => &self.documents,
            Some(ref r) => match self.previews.get(r) {
                Some(documents) => documents,
                None => return Err(CmsError::Status {
                    status: 404,
                    url: format!("memory://documents/search?ref={}", r),
                }),
            },
        };

        let matching: Vec<Document> = documents.iter()
            .filter(|doc| predicates.iter().all(|p| Self::matches(doc, p)))
            .cloned()
            .collect();

        let page_size = options.page_size.unwrap_or(20).max(1);
        let page = options.page.unwrap_or(1).max(1);
        let total_results_size = matching.len() as u32;
        let total_pages = total_results_size.div_ceil(page_size);
        let results = matching.into_iter()
            .skip(((page - 1) * page_size) as usize)
            .take(page_size as usize)
            .collect();
        let next_page = if page < total_pages {
            Some(format!("memory://documents/search?page={}", page + 1))
        } else {
            None
        };

        Ok(SearchResponse {
            page,
            results_per_page: page_size,
            total_results_size,
            total_pages,
            next_page,
            results,
        })
    }

    fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }
}
