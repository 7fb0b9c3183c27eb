/// Photo upload module
///
/// This module handles:
/// - MIME-type checks on picked or dropped files
/// - Reading the file and encoding it as a `data:` URL
/// - The panel's drag/loading state

pub mod loader;
pub mod panel;

pub use loader::{submit_file, SelectedFile};
pub use panel::{UploadPanel, UploadTicket};
