use std::future::Future;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::join_all;
use nativis_core::{Brand, BrandId};
use reqwest::{Client, Url};

use crate::error::AssetError;

/// Largest logo body accepted for embedding into a marker icon.
pub const MAX_LOGO_BYTES: usize = 512 * 1024;

/// A downloaded logo image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoAsset {
    /// Absolute URL the logo was fetched from.
    pub url: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LogoAsset {
    /// Self-contained `data:` URI for the image. Marker icons are used as
    /// images, and SVG loaded as an image never fetches external resources.
    #[must_use]
    pub fn data_uri(&self) -> String {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Where brand logos come from.
pub trait LogoSource: Send + Sync {
    /// Resolve and check one logo reference (absolute URL or site-relative path).
    fn fetch_logo(&self, url: &str) -> impl Future<Output = Result<LogoAsset, AssetError>> + Send;
}

/// Logo source backed by HTTP. Relative paths resolve against `base_url`.
#[derive(Debug, Clone)]
pub struct HttpLogoSource {
    client: Client,
    base_url: Url,
}

impl HttpLogoSource {
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidUrl`] if `base_url` does not parse, or
    /// [`AssetError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, AssetError> {
        let base_url = Url::parse(base_url).map_err(|e| AssetError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Absolute URL for a logo reference.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidUrl`] when the reference cannot be joined
    /// onto the base URL.
    pub fn resolve(&self, reference: &str) -> Result<Url, AssetError> {
        self.base_url
            .join(reference.trim())
            .map_err(|e| AssetError::InvalidUrl {
                url: reference.to_string(),
                reason: e.to_string(),
            })
    }
}

impl LogoSource for HttpLogoSource {
    async fn fetch_logo(&self, url: &str) -> Result<LogoAsset, AssetError> {
        let resolved = self.resolve(url)?;
        let response = self
            .client
            .get(resolved.clone())
            .header(reqwest::header::ACCEPT, "image/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::UnexpectedStatus {
                status: status.as_u16(),
                url: resolved.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("image/")
        {
            return Err(AssetError::NotAnImage {
                url: resolved.to_string(),
                content_type,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AssetError::EmptyBody {
                url: resolved.to_string(),
            });
        }
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(AssetError::TooLarge {
                url: resolved.to_string(),
                size: bytes.len(),
            });
        }

        Ok(LogoAsset {
            url: resolved.to_string(),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

/// Load every brand's logo concurrently.
///
/// Results come back in palette order. A failure only affects its own brand;
/// brands without a configured logo yield [`AssetError::NoLogo`].
pub async fn load_brand_logos<S: LogoSource>(
    source: &S,
    brands: &[Brand],
) -> Vec<(BrandId, Result<LogoAsset, AssetError>)> {
    let loads = brands.iter().map(|brand| async move {
        let outcome = match brand.logo_url.as_deref() {
            Some(url) if !url.trim().is_empty() => source.fetch_logo(url).await,
            _ => Err(AssetError::NoLogo(brand.id.clone())),
        };
        (brand.id.clone(), outcome)
    });
    join_all(loads).await
}
