use nativis_core::BrandId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("unknown {field} filter value '{value}'")]
    UnknownFilterValue { field: &'static str, value: String },

    #[error("location not found: {0}")]
    LocationNotFound(String),
}

/// Failure loading a brand logo for a marker icon. Never fatal: the icon
/// falls back to a letter glyph.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid logo URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("{url} is not an image (content-type: {content_type})")]
    NotAnImage { url: String, content_type: String },

    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("{url} is {size} bytes, too large to embed")]
    TooLarge { url: String, size: usize },

    #[error("brand '{0}' has no logo configured")]
    NoLogo(BrandId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapWidgetError {
    #[error("map provider failed to load: {0}")]
    LoadFailed(String),
}
