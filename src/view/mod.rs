pub mod comments;
pub mod home_renderer;
pub mod post_renderer;
pub mod templates;
