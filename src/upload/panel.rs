use std::fmt;

use super::loader::SelectedFile;

/// Identifies one accepted upload, so late completions can be told apart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UploadTicket(u64);

impl fmt::Display for UploadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visible state of the upload panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadPanel {
    /// A file is being dragged over the window
    pub drag_active: bool,
    /// A photo is being "processed"
    pub loading: bool,
    /// Ticket of the most recently accepted upload
    pub ticket: UploadTicket,
}

impl UploadPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_entered(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_left(&mut self) {
        self.drag_active = false;
    }

    /// Try to start processing a file.
    ///
    /// Non-image files and files arriving while another one is loading are
    /// ignored without touching any state. Returns the ticket the completion
    /// must present.
    pub fn begin(&mut self, file: &SelectedFile) -> Option<UploadTicket> {
        if !file.is_image() {
            log::debug!("Ignoring {} ({})", file.path.display(), file.mime);
            return None;
        }
        if self.loading {
            log::debug!("Upload in progress, ignoring {}", file.path.display());
            return None;
        }

        self.ticket = UploadTicket(self.ticket.0 + 1);
        self.loading = true;
        Some(self.ticket)
    }

    /// Processing ended, successfully or not.
    ///
    /// Only the completion of the upload in flight is accepted; anything
    /// else (a cancelled or superseded upload) returns false.
    pub fn finish(&mut self, ticket: UploadTicket) -> bool {
        if !self.loading || ticket != self.ticket {
            log::debug!("Discarding upload {} (current {})", ticket, self.ticket);
            return false;
        }
        self.loading = false;
        true
    }

    /// Abandon the upload in flight and clear the highlight
    pub fn cancel(&mut self) {
        if self.loading {
            log::info!("✖️  Upload {} cancelled", self.ticket);
        }
        self.loading = false;
        self.drag_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_non_image_is_ignored() {
        for name in ["notes.txt", "scan.pdf", "archive.zip", "README"] {
            let mut panel = UploadPanel::new();
            let file = SelectedFile::from_path(PathBuf::from(name));

            assert_eq!(panel.begin(&file), None);
            assert_eq!(panel, UploadPanel::new());
        }
    }

    #[test]
    fn test_non_image_keeps_drag_highlight() {
        let mut panel = UploadPanel::new();
        panel.drag_entered();
        let before = panel;

        panel.begin(&SelectedFile::from_path(PathBuf::from("movie.mp4")));

        assert_eq!(panel, before);
    }

    #[test]
    fn test_image_starts_loading_once() {
        let mut panel = UploadPanel::new();
        let file = SelectedFile::from_path(PathBuf::from("me.jpg"));

        let ticket = panel.begin(&file).unwrap();
        assert!(panel.loading);
        assert_eq!(panel.begin(&file), None);

        assert!(panel.finish(ticket));
        assert!(!panel.loading);
        assert!(!panel.finish(ticket));
    }

    #[test]
    fn test_cancelled_upload_cannot_finish() {
        let mut panel = UploadPanel::new();
        let first = panel.begin(&SelectedFile::from_path(PathBuf::from("first.png"))).unwrap();

        panel.cancel();
        assert!(!panel.loading);

        let second = panel.begin(&SelectedFile::from_path(PathBuf::from("second.png"))).unwrap();
        assert_ne!(first, second);

        // The abandoned upload completes late
        assert!(!panel.finish(first));
        assert!(panel.loading);

        assert!(panel.finish(second));
        assert!(!panel.loading);
    }
}
