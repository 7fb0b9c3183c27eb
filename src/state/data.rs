/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog, the upload pipeline and the UI layer.

use chrono::{DateTime, Local};
use iced::widget::image;
use std::fmt;

/// Stable identifier of a frame in the compiled-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(&'static str);

impl FrameId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single eyeglass frame offered in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescriptor {
    pub id: FrameId,
    /// Name shown on the card (e.g., "Classic Black")
    pub display_name: &'static str,
    /// Price as displayed, currency included
    pub price: &'static str,
    pub seller_name: &'static str,
    /// Hosted thumbnail image
    pub image_url: &'static str,
    pub description: &'static str,
}

/// A photo accepted by the upload panel
///
/// Lives only in memory for the duration of the session.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename only (e.g., "selfie.jpg")
    pub file_name: String,
    /// MIME type derived from the file (always starts with "image/")
    pub mime: String,
    /// `data:<mime>;base64,<payload>` encoding of the file contents
    pub data_url: String,
    /// Handle used to display the photo
    pub handle: image::Handle,
    /// Pixel dimensions, when the header could be decoded
    pub dimensions: Option<(u32, u32)>,
    pub received_at: DateTime<Local>,
}

impl UploadedImage {
    /// Short human-readable summary for status lines
    pub fn summary(&self) -> String {
        match self.dimensions {
            Some((width, height)) => format!(
                "{} ({}x{}, received {})",
                self.file_name,
                width,
                height,
                self.received_at.format("%H:%M:%S")
            ),
            None => format!(
                "{} (received {})",
                self.file_name,
                self.received_at.format("%H:%M:%S")
            ),
        }
    }
}
