/// User interface
///
/// Pure view functions over the application state. Interaction is reported
/// back as `Message`s; no widget here owns state of its own.
///
/// Architecture:
/// - `layout.rs` - header, landing hero and the workspace page
/// - `upload.rs` - the photo upload panel
/// - `gallery.rs` - frame cards in a wrapping grid
/// - `canvas.rs` - the 3D viewer surface and its input translation

pub mod canvas;
pub mod gallery;
pub mod layout;
pub mod upload;
