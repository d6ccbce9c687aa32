pub mod config;
pub mod content;
pub mod generator;
pub mod logger;
pub mod pages;
pub mod prismic;
pub mod rich_text;
pub mod server;
mod query_string;
mod util;
pub mod view;
#[cfg(test)]
mod test_data;
