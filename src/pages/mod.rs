//! Data fetching for each route. Every function here takes the document
//! source explicitly, so the same code serves requests and static generation.

pub mod home;
pub mod post;
pub mod preview;
