use iced::widget::image::Handle;
use image::imageops::FilterType;

use crate::error::ThumbnailError;

/// Size of gallery thumbnails (4:3, like the cards)
const THUMBNAIL_WIDTH: u32 = 400;
const THUMBNAIL_HEIGHT: u32 = 300;

/// Download a frame thumbnail and prepare it for display
pub async fn fetch_thumbnail(url: &'static str) -> Result<Handle, ThumbnailError> {
    let request_error = |e: reqwest::Error| ThumbnailError::Request {
        url: url.to_string(),
        message: e.to_string(),
    };

    let bytes = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(request_error)?
        .bytes()
        .await
        .map_err(request_error)?;

    decode_in_background(url, bytes.to_vec()).await
}

/// Run `decode_thumbnail` on the blocking pool
pub async fn decode_in_background(url: &'static str, bytes: Vec<u8>) -> Result<Handle, ThumbnailError> {
    // Spawn blocking task for the resize (CPU-bound)
    tokio::task::spawn_blocking(move || decode_thumbnail(url, &bytes))
        .await
        .map_err(|e| ThumbnailError::Decode {
            url: url.to_string(),
            message: format!("task join error: {}", e),
        })?
}

/// Decode downloaded bytes and crop them to the card size
pub fn decode_thumbnail(url: &str, bytes: &[u8]) -> Result<Handle, ThumbnailError> {
    let img = image::load_from_memory(bytes).map_err(|e| ThumbnailError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let thumbnail = img
        .resize_to_fill(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Lanczos3)
        .to_rgba8();
    let (width, height) = thumbnail.dimensions();

    Ok(Handle::from_rgba(width, height, thumbnail.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_decode_png() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(800, 800, Rgb([10, 20, 30])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        assert!(decode_thumbnail("test://frame", &bytes).is_ok());
    }

    #[tokio::test]
    async fn test_decode_off_the_async_thread() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([200, 100, 50])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        assert!(decode_in_background("test://frame", bytes).await.is_ok());

        let garbage = decode_in_background("test://frame", b"not an image".to_vec()).await;
        assert!(matches!(garbage, Err(ThumbnailError::Decode { .. })));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_thumbnail("test://frame", b"<html>not found</html>");
        assert!(matches!(result, Err(ThumbnailError::Decode { .. })));
    }
}
