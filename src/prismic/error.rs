use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prismic answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Could not find the master ref of {0}")]
    MissingMasterRef(String),

    #[error("Invalid document {id}: {reason}")]
    InvalidDocument { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CmsError>;
