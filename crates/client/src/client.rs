//! Multipart client for the enhancement endpoint.

use async_trait::async_trait;
use enhancer_core::codec::{self, IMAGE_REFERENCE_PREFIX};
use enhancer_core::error::EnhanceError;
use enhancer_core::result::EnhancementResult;
use enhancer_core::session::Enhancer;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::response;

/// Multipart field the service reads the image from.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Filename sent with every upload. The local filename never leaves the
/// client.
pub const UPLOAD_FILENAME: &str = "image.png";

/// HTTP client for a single enhancement endpoint.
pub struct EnhancementClient {
    client: reqwest::Client,
    endpoint_url: String,
}

impl EnhancementClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint_url: config.endpoint_url.clone(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, endpoint_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Run one enhancement round-trip for `image_reference`.
    ///
    /// The returned result carries `enhanced_image_base64` as a full image
    /// reference using the media type of `image_reference`; every other
    /// field is passed through as the service sent it.
    pub async fn submit(&self, image_reference: &str) -> Result<EnhancementResult, EnhanceError> {
        let endpoint = self.validate(image_reference)?;

        let image = codec::decode_image_reference(image_reference)?;
        let media_type = image.media_type.clone();
        let byte_count = image.bytes.len();

        let part = Part::bytes(image.bytes)
            .file_name(UPLOAD_FILENAME)
            .mime_str(&media_type)
            .map_err(|e| {
                EnhanceError::Validation(format!("Invalid image media type '{media_type}': {e}"))
            })?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::info!(
            endpoint = %endpoint,
            media_type = %media_type,
            bytes = byte_count,
            "Submitting image for enhancement",
        );

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        if !(200..300).contains(&status) {
            let message = response::service_error_message(status, &body);
            tracing::warn!(status, message = %message, "Enhancement service rejected request");
            return Err(EnhanceError::Service { status, message });
        }

        let mut result = response::parse_success_body(status, &body)?;
        result.enhanced_image_base64 =
            codec::encode_image_reference(&media_type, &result.enhanced_image_base64);

        tracing::debug!(
            status,
            original_score = result.original_rating.quality_score,
            enhanced_score = result.enhanced_rating.quality_score,
            "Enhancement response accepted",
        );

        Ok(result)
    }

    /// Syntactic checks that must pass before any network I/O.
    fn validate(&self, image_reference: &str) -> Result<Url, EnhanceError> {
        if image_reference.is_empty() {
            return Err(EnhanceError::Validation("Image data is required.".into()));
        }
        if !image_reference.starts_with(IMAGE_REFERENCE_PREFIX) {
            return Err(EnhanceError::Validation("Invalid image data format.".into()));
        }

        let invalid_endpoint = || EnhanceError::Validation("Invalid model endpoint URL.".into());
        let url = Url::parse(&self.endpoint_url).map_err(|_| invalid_endpoint())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid_endpoint());
        }
        Ok(url)
    }
}

#[async_trait]
impl Enhancer for EnhancementClient {
    async fn enhance(&self, image_reference: &str) -> Result<EnhancementResult, EnhanceError> {
        self.submit(image_reference).await
    }
}

fn transport_error(e: reqwest::Error) -> EnhanceError {
    tracing::error!(error = %e, timeout = e.is_timeout(), "Enhancement service unreachable");
    EnhanceError::Transport {
        detail: e.to_string(),
    }
}
