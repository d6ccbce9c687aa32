//! Prismic REST API v2 client.
//!
//! Pages talk to the repository through [`DocumentSource`]; [`PrismicClient`]
//! is the HTTP implementation and is built once per request so a preview ref
//! read from the visitor's cookie never reaches another request.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use spdlog::debug;

use crate::config::Config;

pub mod document;
pub mod error;
pub mod preview;

pub use document::{ApiInfo, Document, SearchResponse};
pub use error::{CmsError, Result};

/// Cookie Prismic's toolbar and our preview endpoint store the preview ref in.
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("spacetraveling/", env!("CARGO_PKG_VERSION"));

/// The only predicate the pages need.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: &str, value: &str) -> Self {
        Predicate::At {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    pub fn document_type(doc_type: &str) -> Self {
        Self::at("document.type", doc_type)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::At { path, value } => {
                let value = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[at({}, \"{}\")]", path, value)
            }
        }
    }
}

/// Builds the `q` parameter: `[[at(document.type, "post")]]`
pub fn encode_predicates(predicates: &[Predicate]) -> String {
    let inner: String = predicates.iter().map(|p| p.to_string()).collect();
    format!("[{}]", inner)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    pub fetch: Vec<String>,
    pub orderings: Option<String>,
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Searches on `reference`, or on the source's current ref when `None`.
    async fn search(&self, reference: Option<&str>, predicates: &[Predicate], options: &QueryOptions) -> Result<SearchResponse>;

    /// True when the source reads through a preview ref.
    fn is_preview(&self) -> bool;

    async fn query(&self, predicates: &[Predicate], options: &QueryOptions) -> Result<SearchResponse> {
        self.search(None, predicates, options).await
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Option<Document>> {
        let predicates = [Predicate::at(&format!("my.{}.uid", doc_type), uid)];
        let options = QueryOptions {
            page_size: Some(1),
            ..Default::default()
        };
        let response = self.search(None, &predicates, &options).await?;
        Ok(response.results.into_iter().next())
    }

    async fn get_by_id(&self, id: &str, reference: Option<&str>) -> Result<Option<Document>> {
        let predicates = [Predicate::at("document.id", id)];
        let options = QueryOptions {
            page_size: Some(1),
            ..Default::default()
        };
        let response = self.search(reference, &predicates, &options).await?;
        Ok(response.results.into_iter().next())
    }
}

pub struct PrismicClient {
    endpoint: String,
    access_token: Option<String>,
    preview_ref: Option<String>,
    http: Client,
}

impl PrismicClient {
    pub fn new(endpoint: &str, access_token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(PrismicClient {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token,
            preview_ref: None,
            http,
        })
    }

    pub fn with_preview_ref(mut self, preview_ref: Option<String>) -> Self {
        self.preview_ref = preview_ref;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn token_param(&self) -> Option<(&'static str, String)> {
        self.access_token.as_ref().map(|t| ("access_token", t.clone()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn master_ref(&self) -> Result<String> {
        let params: Vec<(&str, String)> = self.token_param().into_iter().collect();
        let info: ApiInfo = self.get_json(&self.endpoint, &params).await?;
        match info.master_ref() {
            Some(master) => Ok(master.to_string()),
            None => Err(CmsError::MissingMasterRef(self.endpoint.clone())),
        }
    }

    async fn current_ref(&self) -> Result<String> {
        match self.preview_ref {
            Some(ref preview) => Ok(preview.clone()),
            None => self.master_ref().await,
        }
    }
}

#[async_trait]
impl DocumentSource for PrismicClient {
    async fn search(&self, reference: Option<&str>, predicates: &[Predicate], options: &QueryOptions) -> Result<SearchResponse> {
        let reference = match reference {
            Some(r) => r.to_string(),
            None => self.current_ref().await?,
        };

        let mut params = vec![
            ("ref", reference),
            ("q", encode_predicates(predicates)),
        ];
        if let Some(page_size) = options.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(page) = options.page {
            params.push(("page", page.to_string()));
        }
        if !options.fetch.is_empty() {
            params.push(("fetch", options.fetch.join(",")));
        }
        if let Some(ref orderings) = options.orderings {
            params.push(("orderings", orderings.clone()));
        }
        if let Some(token) = self.token_param() {
            params.push(token);
        }

        let url = format!("{}/documents/search", self.endpoint);
        debug!("Searching {} with q={}", url, encode_predicates(predicates));
        self.get_json(&url, &params).await
    }

    fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }
}

/// Client for the configured repository, reading through the preview ref
/// carried by `preview_cookie` when there is one.
pub fn get_prismic_client(config: &Config, preview_cookie: Option<&str>) -> Result<PrismicClient> {
    let timeout = Duration::from_secs(config.prismic.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
    let client = PrismicClient::new(&config.prismic.api_endpoint, config.prismic.access_token.clone(), timeout)?;
    Ok(client.with_preview_ref(preview_cookie.and_then(preview_ref_from_cookie)))
}

/// Builds the document source serving one request.
pub trait SourceFactory: Send + Sync {
    fn source(&self, preview_cookie: Option<&str>) -> Result<Box<dyn DocumentSource>>;
}

/// Opens a [`PrismicClient`] on the configured repository for every request.
pub struct PrismicSources {
    config: Config,
}

impl PrismicSources {
    pub fn new(config: Config) -> Self {
        PrismicSources { config }
    }
}

impl SourceFactory for PrismicSources {
    fn source(&self, preview_cookie: Option<&str>) -> Result<Box<dyn DocumentSource>> {
        Ok(Box::new(get_prismic_client(&self.config, preview_cookie)?))
    }
}

/// Extracts the preview ref from the cookie value. Newer toolbars store
/// `{"repo.prismic.io":{"preview":"<ref>"}}`, older ones the bare ref.
pub fn preview_ref_from_cookie(value: &str) -> Option<String> {
    let decoded = percent_decode_str(value).decode_utf8().ok()?;
    let decoded = decoded.trim();
    if decoded.is_empty() {
        return None;
    }

    if decoded.starts_with('{') {
        let parsed: serde_json::Value = serde_json::from_str(decoded).ok()?;
        return parsed.as_object()?
            .values()
            .find_map(|repo| repo.get("preview").and_then(|p| p.as_str()))
            .map(str::to_string);
    }

    Some(decoded.to_string())
}

/// Finds a cookie in a `Cookie` request header.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
