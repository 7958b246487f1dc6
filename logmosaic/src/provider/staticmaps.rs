//! Google Static Maps fragment source.
//!
//! Fetches rendered map fragments from the Static Maps service. Unlike
//! XYZ tile servers, the service renders an image centered on an
//! arbitrary coordinate at a requested pixel size, which is exactly the
//! fragment shape the compositor consumes.
//!
//! # Endpoint
//!
//! `https://maps.googleapis.com/maps/api/staticmap?center={lat},{lon}
//! &zoom={z}&size={w}x{h}&scale={s}&maptype={style}&format=png`
//!
//! The service caps images at 640x640 per scale unit; larger requests
//! come back silently truncated, so they are logged as a warning here.

use image::RgbaImage;
use tracing::{debug, warn};

use super::{FetchError, FragmentRequest, HttpClient, TileSource};

/// Largest fragment side the service renders per scale unit.
const MAX_FRAGMENT_SIDE: u32 = 640;

/// Map fragment source backed by the Google Static Maps service.
///
/// # Example
///
/// ```no_run
/// use logmosaic::provider::{FragmentRequest, ReqwestClient, StaticMapsSource, TileSource};
///
/// let client = ReqwestClient::new().unwrap();
/// let source = StaticMapsSource::new(client).with_api_key("YOUR_API_KEY");
/// let fragment = source.fetch(&FragmentRequest::new(59.93778, 30.494908, 10, (512, 512)));
/// ```
pub struct StaticMapsSource<C: HttpClient> {
    http_client: C,
    api_key: Option<String>,
}

impl<C: HttpClient> StaticMapsSource<C> {
    /// Creates a new source without an API key.
    ///
    /// Keyless requests are served with reduced quota; pass a key via
    /// [`StaticMapsSource::with_api_key`] for production use.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            api_key: None,
        }
    }

    /// Set the Maps Platform API key appended to every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds the Static Maps URL for the given fragment.
    fn build_url(&self, request: &FragmentRequest) -> String {
        let (width, height) = request.size();
        let mut url = format!(
            "https://maps.googleapis.com/maps/api/staticmap?center={:.10},{:.10}&zoom={}&size={}x{}&scale={}&maptype={}&format=png",
            request.latitude(),
            request.longitude(),
            request.zoom(),
            width,
            height,
            request.scale(),
            request.style(),
        );
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(key);
        }
        url
    }
}

impl<C: HttpClient> TileSource for StaticMapsSource<C> {
    fn fetch(&self, request: &FragmentRequest) -> Result<RgbaImage, FetchError> {
        let (width, height) = request.size();
        if width > MAX_FRAGMENT_SIDE || height > MAX_FRAGMENT_SIDE {
            warn!(
                width,
                height, "fragment exceeds the service's 640px cap and may come back truncated"
            );
        }

        let url = self.build_url(request);
        debug!(zoom = request.zoom(), url = %url, "fetching fragment");
        let body = self.http_client.get(&url)?;

        let decoded = image::load_from_memory(&body)
            .map_err(|e| FetchError::Decode(format!("Failed to decode fragment: {}", e)))?;
        Ok(decoded.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MapScale, MapStyle, MockHttpClient};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn test_url_construction() {
        let source = StaticMapsSource::new(MockHttpClient { response: Ok(vec![]) });
        let request = FragmentRequest::new(59.93778, 30.494908, 10, (512, 512))
            .with_style(MapStyle::Roadmap)
            .with_scale(MapScale::Two);

        let url = source.build_url(&request);
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/staticmap?center=59.9377800000,30.4949080000&zoom=10&size=512x512&scale=2&maptype=roadmap&format=png"
        );
    }

    #[test]
    fn test_url_includes_api_key() {
        let source = StaticMapsSource::new(MockHttpClient { response: Ok(vec![]) })
            .with_api_key("secret_key_123");
        let request = FragmentRequest::new(0.0, 0.0, 0, (256, 256));

        let url = source.build_url(&request);
        assert!(url.ends_with("&key=secret_key_123"));
    }

    #[test]
    fn test_fetch_decodes_png_body() {
        let source = StaticMapsSource::new(MockHttpClient {
            response: Ok(png_bytes(32, 16)),
        });
        let request = FragmentRequest::new(10.0, 20.0, 5, (32, 16));

        let fragment = source.fetch(&request).unwrap();
        assert_eq!(fragment.dimensions(), (32, 16));
        assert_eq!(fragment.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_fetch_http_error_propagates() {
        let source = StaticMapsSource::new(MockHttpClient {
            response: Err(FetchError::Http("Network error".to_string())),
        });
        let request = FragmentRequest::new(10.0, 20.0, 5, (512, 512));

        let result = source.fetch(&request);
        match result {
            Err(FetchError::Http(msg)) => assert_eq!(msg, "Network error"),
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_undecodable_body_is_decode_error() {
        let source = StaticMapsSource::new(MockHttpClient {
            response: Ok(vec![0xde, 0xad, 0xbe, 0xef]),
        });
        let request = FragmentRequest::new(10.0, 20.0, 5, (512, 512));

        let result = source.fetch(&request);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
