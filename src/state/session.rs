/// Session state owned by the page
///
/// Two independent pieces of state: the uploaded photo and the selected
/// frame. Everything the page shows is derived from them.

use super::catalog::Catalog;
use super::data::{FrameId, UploadedImage};

/// Which top-level view the page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// No photo yet: hero text and the upload panel
    Landing,
    /// Viewer and gallery side by side, plus a preview panel when a frame is selected
    Workspace { show_preview: bool },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    uploaded: Option<UploadedImage>,
    selected: Option<FrameId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn selected(&self) -> Option<FrameId> {
        self.selected
    }

    /// Store the accepted photo, replacing any previous one
    pub fn set_uploaded(&mut self, image: UploadedImage) {
        self.uploaded = Some(image);
    }

    /// Select a frame.
    ///
    /// Ids outside the catalog are rejected so the selection always refers
    /// to a real frame. Returns whether the selection changed.
    pub fn select_frame(&mut self, id: FrameId, catalog: &Catalog) -> bool {
        if !catalog.contains(id) {
            log::debug!("Ignoring selection of unknown frame {}", id);
            return false;
        }
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Drop the photo and the selection
    pub fn reset(&mut self) {
        self.uploaded = None;
        self.selected = None;
    }

    pub fn view(&self) -> PageView {
        match self.uploaded {
            None => PageView::Landing,
            Some(_) => PageView::Workspace {
                show_preview: self.selected.is_some(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use iced::widget::image;

    fn sample_image() -> UploadedImage {
        UploadedImage {
            file_name: "me.png".to_string(),
            mime: "image/png".to_string(),
            data_url: "data:image/png;base64,AAAA".to_string(),
            handle: image::Handle::from_bytes(vec![0u8; 4]),
            dimensions: None,
            received_at: Local::now(),
        }
    }

    #[test]
    fn test_every_catalog_id_can_be_selected() {
        let catalog = Catalog::builtin();
        for frame in catalog.frames() {
            let mut session = Session::new();
            assert!(session.select_frame(frame.id, &catalog));
            assert_eq!(session.selected(), Some(frame.id));
        }
    }

    #[test]
    fn test_selecting_twice_is_idempotent() {
        let catalog = Catalog::builtin();
        let id = FrameId::new("vintage-round");
        let mut session = Session::new();

        assert!(session.select_frame(id, &catalog));
        assert!(!session.select_frame(id, &catalog));
        assert_eq!(session.selected(), Some(id));
    }

    #[test]
    fn test_unknown_id_leaves_selection() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        session.select_frame(FrameId::new("classic-black"), &catalog);

        assert!(!session.select_frame(FrameId::new("aviator-gold"), &catalog));
        assert_eq!(session.selected(), Some(FrameId::new("classic-black")));
    }

    #[test]
    fn test_view_derivation() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        assert_eq!(session.view(), PageView::Landing);

        // Selection alone does not leave the landing view
        session.select_frame(FrameId::new("sport-wrap"), &catalog);
        assert_eq!(session.view(), PageView::Landing);

        session.set_uploaded(sample_image());
        assert_eq!(session.view(), PageView::Workspace { show_preview: true });

        session.reset();
        assert_eq!(session.view(), PageView::Landing);
        assert!(session.selected().is_none());
    }
}
