/// Photo loader
///
/// Reads a user-selected file into memory and encodes it as a `data:` URL.
/// The "processing" step is simulated with a fixed delay; nothing is done
/// with the pixels beyond reading the image header for its dimensions.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Local;
use iced::widget::image::Handle;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::UploadError;
use crate::state::data::UploadedImage;

/// MIME type used for files that are not recognized images
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Image types the decoder does not know, by lowercase extension
const EXTRA_IMAGE_TYPES: [(&str, &str); 5] = [
    ("svg", "image/svg+xml"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("jxl", "image/jxl"),
    ("jfif", "image/jpeg"),
];

/// A file picked in the dialog or dropped on the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub mime: String,
}

impl SelectedFile {
    /// Describe a file on disk, deriving its MIME type from the extension
    pub fn from_path(path: PathBuf) -> Self {
        let mime = mime_for_path(&path);
        Self { path, mime }
    }

    /// Only `image/*` files are accepted
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Filename only (e.g., "selfie.jpg")
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Guess a MIME type from the file extension
pub fn mime_for_path(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    EXTRA_IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| UNKNOWN_MIME.to_string())
}

/// Encode raw bytes as a `data:` URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read the pixel dimensions from an encoded image, if the header is valid
fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Read a photo and hand it back after the simulated processing delay
///
/// The caller is expected to have checked `SelectedFile::is_image` first.
pub async fn submit_file(file: SelectedFile, delay: Duration) -> Result<UploadedImage, UploadError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| UploadError::Read {
            path: file.path.clone(),
            message: e.to_string(),
        })?;

    if bytes.is_empty() {
        return Err(UploadError::Empty { path: file.path });
    }

    let data_url = encode_data_url(&file.mime, &bytes);
    let dimensions = read_dimensions(&bytes);

    log::debug!("📷 Read {} ({} bytes)", file.path.display(), bytes.len());

    // Simulate processing time
    tokio::time::sleep(delay).await;

    Ok(UploadedImage {
        file_name: file.file_name(),
        mime: file.mime,
        data_url,
        handle: Handle::from_bytes(bytes),
        dimensions,
        received_at: Local::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mirror-3d-upload-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("me.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("me.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), UNKNOWN_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), UNKNOWN_MIME);
    }

    #[test]
    fn test_mime_for_undecodable_images() {
        assert_eq!(mime_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("IMG_0001.HEIC")), "image/heic");
        assert_eq!(mime_for_path(Path::new("photo.jxl")), "image/jxl");
        assert!(SelectedFile::from_path(PathBuf::from("IMG_0001.HEIC")).is_image());
    }

    #[test]
    fn test_is_image() {
        assert!(SelectedFile::from_path(PathBuf::from("a.webp")).is_image());
        assert!(!SelectedFile::from_path(PathBuf::from("a.pdf")).is_image());
    }

    #[test]
    fn test_encode_data_url() {
        assert_eq!(encode_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[tokio::test]
    async fn test_submit_valid_image() {
        let dir = scratch_dir("valid");
        let path = dir.join("face.png");
        RgbImage::from_pixel(4, 3, Rgb([200, 150, 120])).save(&path).unwrap();

        let file = SelectedFile::from_path(path);
        let uploaded = submit_file(file, Duration::from_millis(10)).await.unwrap();

        assert_eq!(uploaded.file_name, "face.png");
        assert_eq!(uploaded.mime, "image/png");
        assert!(uploaded.data_url.starts_with("data:image/png;base64,"));
        assert!(uploaded.data_url.len() > "data:image/png;base64,".len());
        assert_eq!(uploaded.dimensions, Some((4, 3)));
    }

    #[tokio::test]
    async fn test_submit_missing_file() {
        let file = SelectedFile::from_path(PathBuf::from("/nonexistent/face.png"));
        let result = submit_file(file, Duration::ZERO).await;
        assert!(matches!(result, Err(UploadError::Read { .. })));
    }

    #[tokio::test]
    async fn test_submit_empty_file() {
        let dir = scratch_dir("empty");
        let path = dir.join("blank.png");
        std::fs::write(&path, b"").unwrap();

        let result = submit_file(SelectedFile::from_path(path), Duration::ZERO).await;
        assert!(matches!(result, Err(UploadError::Empty { .. })));
    }
}
