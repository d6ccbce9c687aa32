use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::util::prismic_date;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, deserialize_with = "prismic_date::deserialize")]
    pub first_publication_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "prismic_date::deserialize")]
    pub last_publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One page of `documents/search` results
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    pub results: Vec<Document>,
}

impl SearchResponse {
    pub fn next_page_number(&self) -> Option<u32> {
        match self.next_page {
            Some(_) if self.page < self.total_pages => Some(self.page + 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// The repository root, `GET /api/v2`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

impl ApiInfo {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs.iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}
