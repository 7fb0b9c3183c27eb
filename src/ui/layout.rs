/// Page layout
///
/// The header is always shown. Below it the page is either the landing hero
/// (no photo yet) or the workspace: viewer and gallery side by side, with a
/// preview panel once a frame is selected.
use iced::widget::{button, column, container, horizontal_space, image, row, text, Column, Row};
use iced::{Alignment, Element, Length};
use std::path::Path;

use super::{canvas, gallery, upload};
use crate::gallery::Thumbnails;
use crate::state::catalog::Catalog;
use crate::state::data::{FrameId, UploadedImage};
use crate::upload::UploadPanel;
use crate::viewer::instance::Lifecycle;
use crate::viewer::mesh::ModelSource;
use crate::viewer::Viewer;
use crate::Message;

const PAGE_MAX_WIDTH: f32 = 1200.0;

/// Title bar; clicking the title starts over
pub fn header<'a>() -> Element<'a, Message> {
    let title = button(
        row![
            text("🪞").size(28),
            column![
                text("Mirror 3D").size(24),
                text("Virtual Try-On Experience").size(12),
            ],
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .on_press(Message::StartOver)
    .style(button::text);

    container(row![title, horizontal_space()].align_y(Alignment::Center))
        .width(Length::Fill)
        .padding([12, 24])
        .style(container::bordered_box)
        .into()
}

pub fn landing<'a>(panel: &UploadPanel) -> Element<'a, Message> {
    let steps: Row<Message> = row![
        step("1", "Upload Photo", "Share a clear, front-facing photo of yourself"),
        step("2", "View in 3D", "See your head model from every angle"),
        step("3", "Try Frames", "Browse the collection and pick your style"),
    ]
    .spacing(24);

    let content: Column<Message> = column![
        text("Try on Glasses in 3D").size(44),
        text(
            "Upload a photo to create your 3D head model, then browse our \
             collection and find the frames that suit you best."
        )
        .size(16),
        container(upload::view(panel)).max_width(640.0),
        steps,
    ]
    .spacing(28)
    .padding(40)
    .max_width(PAGE_MAX_WIDTH)
    .align_x(Alignment::Center);

    container(content).width(Length::Fill).center_x(Length::Fill).into()
}

fn step<'a>(number: &'a str, title: &'a str, description: &'a str) -> Element<'a, Message> {
    container(
        column![
            text(number).size(28),
            text(title).size(18),
            text(description).size(13),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(16)
    .into()
}

/// Everything the workspace needs to draw
pub struct Workspace<'a> {
    pub viewer: Option<&'a Viewer>,
    pub surface: &'a canvas::SurfaceCache,
    pub catalog: &'a Catalog,
    pub thumbnails: &'a Thumbnails,
    pub uploaded: &'a UploadedImage,
    pub selected: Option<FrameId>,
    pub preview_dir: &'a Path,
    pub show_preview: bool,
}

pub fn workspace(workspace: Workspace<'_>) -> Element<'_, Message> {
    let viewer_surface: Element<Message> = match workspace.viewer {
        Some(viewer) => canvas::view(viewer, workspace.surface),
        None => container(text("Preparing viewer..."))
            .width(Length::Fill)
            .height(Length::Fixed(420.0))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(420.0))
            .into(),
    };

    let viewer_pane = panel(
        column![
            row![
                text("Your 3D Head Model").size(20),
                horizontal_space(),
                text(model_status(workspace.viewer)).size(12),
            ]
            .align_y(Alignment::Center),
            viewer_surface,
            text("Click and drag to rotate • Scroll to zoom").size(12),
            row![
                image(workspace.uploaded.handle.clone())
                    .width(Length::Fixed(48.0))
                    .height(Length::Fixed(48.0)),
                text(workspace.uploaded.summary()).size(12),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        ]
        .spacing(12),
    );

    let gallery_pane = panel(
        column![
            text("Choose Your Frames").size(20),
            gallery::view(workspace.catalog, workspace.selected, workspace.thumbnails),
        ]
        .spacing(12),
    );

    let mut content: Column<Message> = column![row![viewer_pane, gallery_pane].spacing(24)]
        .spacing(24)
        .padding(24)
        .max_width(PAGE_MAX_WIDTH);

    if workspace.show_preview {
        if let Some(frame) = workspace.selected.and_then(|id| workspace.catalog.get(id)) {
            let path = Catalog::preview_path(frame.id, workspace.preview_dir);
            content = content.push(panel(
                column![
                    text("Selected Frame Preview").size(20),
                    row![
                        image(image::Handle::from_path(path))
                            .width(Length::Fixed(320.0))
                            .height(Length::Fixed(200.0)),
                        column![
                            text(frame.display_name).size(22),
                            text(frame.price).size(18),
                            text(frame.description).size(14),
                        ]
                        .spacing(8),
                    ]
                    .spacing(24),
                ]
                .spacing(12),
            ));
        }
    }

    container(content).width(Length::Fill).center_x(Length::Fill).into()
}

/// Short note on which head is shown
fn model_status(viewer: Option<&Viewer>) -> String {
    let Some(viewer) = viewer else {
        return String::new();
    };
    if viewer.lifecycle() == Lifecycle::Initializing {
        return "Loading head model...".to_string();
    }

    match viewer.model().map(|model| &model.source) {
        Some(ModelSource::Asset(path)) => path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        Some(ModelSource::Placeholder) => "Placeholder head".to_string(),
        None => String::new(),
    }
}

fn panel<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    container(content)
        .width(Length::FillPortion(1))
        .padding(20)
        .style(container::rounded_box)
        .into()
}
