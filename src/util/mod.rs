pub mod html;
pub mod prismic_date;
pub mod serde_helpers;
