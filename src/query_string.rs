use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Listing page, 1-based. Anything unparseable means the first page.
    pub fn get_page(&self) -> u32 {
        match self.get("page").and_then(|v| v.parse::<u32>().ok()) {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }
}
