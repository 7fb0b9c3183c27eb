use iced::widget::{column, scrollable};
use iced::task;
use iced::widget::image::Handle;
use iced::{event, window, Element, Event, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod error;
mod gallery;
mod state;
mod ui;
mod upload;
mod viewer;

use error::{AssetError, ThumbnailError, UploadError};
use gallery::thumbnail::fetch_thumbnail;
use gallery::Thumbnails;
use state::catalog::Catalog;
use state::config::AppConfig;
use state::data::{FrameId, UploadedImage};
use state::session::{PageView, Session};
use ui::canvas::SurfaceCache;
use upload::{submit_file, SelectedFile, UploadPanel, UploadTicket};
use viewer::assets::probe_candidates;
use viewer::{InputEvent, Listener, Model, Viewer, ViewerId};

/// Extensions offered in the photo picker
const PHOTO_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Main application state
struct Mirror3d {
    config: AppConfig,
    catalog: Catalog,
    /// Uploaded photo and selected frame
    session: Session,
    upload: UploadPanel,
    /// Simulated processing in flight, aborted on start over
    pending_upload: Option<task::Handle>,
    thumbnails: Thumbnails,
    /// Present while the workspace is shown
    viewer: Option<Viewer>,
    next_viewer: ViewerId,
    /// Cached viewer geometry, cleared whenever the view changes
    viewer_surface: SurfaceCache,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose Photo"
    ChoosePhoto,
    /// A file is being dragged over the window
    FileHovered,
    /// The drag left the window without dropping
    FileHoverLeft,
    FileDropped(PathBuf),
    /// Simulated processing finished for an upload ticket
    UploadComplete(UploadTicket, Result<UploadedImage, UploadError>),
    FrameSelected(FrameId),
    ThumbnailLoaded(FrameId, Result<Handle, ThumbnailError>),
    /// Background model probe finished for a viewer mount
    ModelLoaded(ViewerId, Result<Model, AssetError>),
    /// Pointer, wheel or resize input on the viewer surface
    Viewer(InputEvent),
    /// Display frame for the viewer render loop
    Frame(Instant),
    /// Title clicked: drop the photo and go back to the landing view
    StartOver,
}

impl Mirror3d {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        Self::with_config(AppConfig::load())
    }

    fn with_config(config: AppConfig) -> (Self, Task<Message>) {
        let catalog = Catalog::builtin();

        log::info!("🪞 Mirror 3D initialized with {} frames", catalog.len());
        if let Ok(json) = config.to_json() {
            log::debug!("Effective configuration:\n{}", json);
        }

        let startup = if config.assets.fetch_thumbnails {
            Task::batch(catalog.frames().iter().map(|frame| {
                let id = frame.id;
                Task::perform(fetch_thumbnail(frame.image_url), move |result| {
                    Message::ThumbnailLoaded(id, result)
                })
            }))
        } else {
            Task::none()
        };

        (
            Mirror3d {
                config,
                catalog,
                session: Session::new(),
                upload: UploadPanel::new(),
                pending_upload: None,
                thumbnails: Thumbnails::new(),
                viewer: None,
                next_viewer: ViewerId::first(),
                viewer_surface: SurfaceCache::new(),
            },
            startup,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChoosePhoto => {
                // Show the native file picker
                let file = FileDialog::new()
                    .set_title("Choose a Photo of Your Face")
                    .add_filter("Images", &PHOTO_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.submit(path),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                if self.session.view() == PageView::Landing {
                    self.upload.drag_entered();
                }
                Task::none()
            }
            Message::FileHoverLeft => {
                self.upload.drag_left();
                Task::none()
            }
            Message::FileDropped(path) => {
                self.upload.drag_left();

                // Only the landing view has a drop zone
                if self.session.view() != PageView::Landing {
                    log::debug!("Ignoring drop of {} outside the upload panel", path.display());
                    return Task::none();
                }
                self.submit(path)
            }
            Message::UploadComplete(ticket, result) => {
                if !self.upload.finish(ticket) {
                    return Task::none();
                }
                self.pending_upload = None;

                match result {
                    Ok(image) => {
                        log::info!(
                            "📥 Photo ready: {} ({}, {} byte data URL)",
                            image.summary(),
                            image.mime,
                            image.data_url.len()
                        );
                        self.session.set_uploaded(image);
                        self.mount_viewer()
                    }
                    Err(e) => {
                        log::warn!("⚠️  {}", e);
                        Task::none()
                    }
                }
            }
            Message::FrameSelected(id) => {
                if self.session.select_frame(id, &self.catalog) {
                    let preview = Catalog::preview_path(id, &self.config.assets.preview_dir);
                    log::info!("👓 Selected {}", id);
                    if !preview.is_file() {
                        log::debug!("No preview image at {}", preview.display());
                    }
                }
                Task::none()
            }
            Message::ThumbnailLoaded(id, result) => {
                match result {
                    Ok(handle) => {
                        self.thumbnails.insert(id, handle);
                        log::debug!(
                            "🖼️  Thumbnail for {} ({}/{})",
                            id,
                            self.thumbnails.len(),
                            self.catalog.len()
                        );
                    }
                    Err(e) => log::warn!("⚠️  {}", e),
                }
                Task::none()
            }
            Message::ModelLoaded(id, result) => {
                let attached = self
                    .viewer
                    .as_mut()
                    .is_some_and(|viewer| viewer.attach_model(id, result));
                if attached {
                    self.viewer_surface.invalidate();
                }
                Task::none()
            }
            Message::Viewer(event) => {
                let changed = self.viewer.as_mut().is_some_and(|viewer| viewer.handle(event));
                if changed {
                    self.viewer_surface.invalidate();
                }
                Task::none()
            }
            Message::Frame(_) => {
                let changed = self.viewer.as_mut().is_some_and(|viewer| viewer.tick());
                if changed {
                    self.viewer_surface.invalidate();
                }
                Task::none()
            }
            Message::StartOver => {
                if let Some(mut viewer) = self.viewer.take() {
                    viewer.dispose();
                }
                if let Some(handle) = self.pending_upload.take() {
                    handle.abort();
                }
                self.upload.cancel();
                self.session.reset();
                self.viewer_surface.invalidate();
                Task::none()
            }
        }
    }

    /// Hand a picked or dropped file to the upload panel
    fn submit(&mut self, path: PathBuf) -> Task<Message> {
        let file = SelectedFile::from_path(path);
        let Some(ticket) = self.upload.begin(&file) else {
            return Task::none();
        };

        log::info!("⏳ Processing {} (upload {})", file.file_name(), ticket);
        let delay = Duration::from_millis(self.config.upload.simulated_delay_ms);
        let (task, handle) = Task::perform(submit_file(file, delay), move |result| {
            Message::UploadComplete(ticket, result)
        })
        .abortable();
        self.pending_upload = Some(handle);

        task
    }

    /// Replace the viewer with a fresh instance and start loading its model
    fn mount_viewer(&mut self) -> Task<Message> {
        if let Some(mut previous) = self.viewer.take() {
            previous.dispose();
        }

        let id = self.next_viewer;
        self.next_viewer = id.next();

        let mut viewer = Viewer::new(id, self.config.viewer);
        viewer.initialize();
        self.viewer_surface.invalidate();

        let candidates = self.config.assets.candidate_paths();
        if candidates.is_empty() {
            viewer.use_placeholder();
            self.viewer = Some(viewer);
            return Task::none();
        }

        // Abortable so that disposing the viewer cancels the probe
        let (task, handle) = Task::perform(
            probe_candidates(candidates, self.config.viewer.target_size),
            move |result| Message::ModelLoaded(id, result),
        )
        .abortable();
        viewer.track_load(handle);
        self.viewer = Some(viewer);

        task
    }

    fn subscription(&self) -> Subscription<Message> {
        let files = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        // Render loop only while a continuous viewer is running
        let frames = match &self.viewer {
            Some(viewer) if viewer.is_listening(Listener::Frame) => window::frames().map(Message::Frame),
            _ => Subscription::none(),
        };

        Subscription::batch([files, frames])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match (self.session.view(), self.session.uploaded()) {
            (PageView::Workspace { show_preview }, Some(uploaded)) => ui::layout::workspace(ui::layout::Workspace {
                viewer: self.viewer.as_ref(),
                surface: &self.viewer_surface,
                catalog: &self.catalog,
                thumbnails: &self.thumbnails,
                uploaded,
                selected: self.session.selected(),
                preview_dir: &self.config.assets.preview_dir,
                show_preview,
            }),
            _ => ui::layout::landing(&self.upload),
        };

        column![ui::layout::header(), scrollable(body).height(Length::Fill)].into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Mirror 3D", Mirror3d::update, Mirror3d::view)
        .theme(Mirror3d::theme)
        .subscription(Mirror3d::subscription)
        .window_size(Size::new(1280.0, 860.0))
        .centered()
        .run_with(Mirror3d::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use state::config::{AssetConfig, RenderMode, UploadConfig};
    use viewer::instance::Lifecycle;
    use cgmath::Point2;

    fn test_config() -> AppConfig {
        AppConfig {
            upload: UploadConfig { simulated_delay_ms: 0 },
            assets: AssetConfig {
                candidates: Vec::new(),
                fetch_thumbnails: false,
                ..AssetConfig::default()
            },
            ..AppConfig::default()
        }
    }

    fn app(config: AppConfig) -> Mirror3d {
        let (app, _) = Mirror3d::with_config(config);
        app
    }

    fn photo(name: &str) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            mime: "image/png".to_string(),
            data_url: "data:image/png;base64,".to_string(),
            handle: Handle::from_bytes(Vec::new()),
            dimensions: Some((640, 480)),
            received_at: Local::now(),
        }
    }

    /// Drop a file on the landing view and return the ticket it was given
    fn drop_photo(app: &mut Mirror3d, name: &str) -> UploadTicket {
        let _ = app.update(Message::FileDropped(PathBuf::from(name)));
        assert!(app.upload.loading);
        app.upload.ticket
    }

    fn lifecycle(app: &Mirror3d) -> Option<Lifecycle> {
        app.viewer.as_ref().map(|viewer| viewer.lifecycle())
    }

    #[test]
    fn test_upload_mounts_viewer() {
        let mut app = app(test_config());
        assert_eq!(app.session.view(), PageView::Landing);

        let ticket = drop_photo(&mut app, "face.png");
        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("face.png"))));

        assert!(!app.upload.loading);
        assert!(app.pending_upload.is_none());
        assert_eq!(app.session.view(), PageView::Workspace { show_preview: false });
        assert_eq!(lifecycle(&app), Some(Lifecycle::Running));
        assert!(app.viewer.as_ref().is_some_and(|viewer| viewer.model().is_some()));
    }

    #[test]
    fn test_failed_upload_stays_on_landing() {
        let mut app = app(test_config());
        let ticket = drop_photo(&mut app, "face.png");

        let error = UploadError::Read {
            path: PathBuf::from("face.png"),
            message: "gone".to_string(),
        };
        let _ = app.update(Message::UploadComplete(ticket, Err(error)));

        assert!(!app.upload.loading);
        assert_eq!(app.session.view(), PageView::Landing);
        assert!(app.viewer.is_none());
    }

    #[test]
    fn test_start_over_disposes_viewer() {
        let mut app = app(test_config());
        let ticket = drop_photo(&mut app, "face.png");
        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("face.png"))));
        let frame = app.catalog.frames()[0].id;
        let _ = app.update(Message::FrameSelected(frame));
        assert_eq!(app.session.view(), PageView::Workspace { show_preview: true });

        let _ = app.update(Message::StartOver);

        assert!(app.viewer.is_none());
        assert!(app.session.uploaded().is_none());
        assert_eq!(app.session.selected(), None);
        assert_eq!(app.session.view(), PageView::Landing);
    }

    #[test]
    fn test_start_over_discards_upload_in_flight() {
        let mut app = app(test_config());
        let abandoned = drop_photo(&mut app, "first.png");
        assert!(app.pending_upload.is_some());

        let _ = app.update(Message::StartOver);
        assert!(!app.upload.loading);
        assert!(app.pending_upload.is_none());

        // Late completion of the abandoned upload
        let _ = app.update(Message::UploadComplete(abandoned, Ok(photo("first.png"))));
        assert_eq!(app.session.view(), PageView::Landing);
        assert!(app.viewer.is_none());

        let ticket = drop_photo(&mut app, "second.png");
        let _ = app.update(Message::UploadComplete(abandoned, Ok(photo("first.png"))));
        assert!(app.upload.loading);
        assert!(app.session.uploaded().is_none());

        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("second.png"))));
        assert_eq!(app.session.uploaded().map(|image| image.file_name.as_str()), Some("second.png"));
        assert_eq!(lifecycle(&app), Some(Lifecycle::Running));
    }

    #[test]
    fn test_drop_outside_landing_is_ignored() {
        let mut app = app(test_config());
        let ticket = drop_photo(&mut app, "face.png");
        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("face.png"))));

        let _ = app.update(Message::FileHovered);
        assert!(!app.upload.drag_active);

        let _ = app.update(Message::FileDropped(PathBuf::from("other.png")));
        assert!(!app.upload.loading);
        assert_eq!(app.upload.ticket, ticket);
    }

    #[test]
    fn test_non_image_drop_is_ignored() {
        let mut app = app(test_config());
        let _ = app.update(Message::FileHovered);
        assert!(app.upload.drag_active);

        let _ = app.update(Message::FileDropped(PathBuf::from("notes.txt")));

        assert!(!app.upload.loading);
        assert!(app.pending_upload.is_none());
        assert_eq!(app.upload.ticket, UploadTicket::default());
    }

    #[test]
    fn test_model_routed_by_viewer_id() {
        let mut config = test_config();
        config.assets.model_dir = PathBuf::from("does-not-exist");
        config.assets.candidates = vec!["head.glb".to_string()];
        let mut app = app(config);

        let ticket = drop_photo(&mut app, "face.png");
        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("face.png"))));
        assert_eq!(lifecycle(&app), Some(Lifecycle::Initializing));

        let current = ViewerId::first();
        let _ = app.update(Message::ModelLoaded(current.next(), Err(AssetError::Exhausted { tried: 1 })));
        assert_eq!(lifecycle(&app), Some(Lifecycle::Initializing));

        let _ = app.update(Message::ModelLoaded(current, Err(AssetError::Exhausted { tried: 1 })));
        assert_eq!(lifecycle(&app), Some(Lifecycle::Running));
        assert!(app.viewer.as_ref().is_some_and(|viewer| viewer.model().is_some()));
    }

    #[test]
    fn test_on_demand_redraws_only_on_change() {
        let mut config = test_config();
        config.viewer.render_mode = RenderMode::OnDemand;
        let mut app = app(config);

        let ticket = drop_photo(&mut app, "face.png");
        let _ = app.update(Message::UploadComplete(ticket, Ok(photo("face.png"))));
        assert!(!app.viewer.as_ref().is_some_and(|viewer| viewer.is_listening(Listener::Frame)));
        let mounted = app.viewer_surface.invalidations();

        let _ = app.update(Message::Viewer(InputEvent::PointerDown(Point2::new(100.0, 100.0))));
        let _ = app.update(Message::Viewer(InputEvent::PointerMoved(Point2::new(100.0, 100.0))));
        let _ = app.update(Message::Frame(Instant::now()));
        assert_eq!(app.viewer_surface.invalidations(), mounted);

        let _ = app.update(Message::Viewer(InputEvent::PointerMoved(Point2::new(110.0, 100.0))));
        assert_eq!(app.viewer_surface.invalidations(), mounted + 1);

        let _ = app.update(Message::Viewer(InputEvent::PointerUp));
        let _ = app.update(Message::Viewer(InputEvent::PointerMoved(Point2::new(140.0, 100.0))));
        assert_eq!(app.viewer_surface.invalidations(), mounted + 2);
    }
}
