/// Frame gallery
///
/// Renders every catalog frame as a selectable card laid out in a wrapping
/// grid. Cards show the fetched thumbnail once it arrives.
use iced::widget::{button, column, container, horizontal_space, image, row, text, Column};
use iced::{Background, Border, Color, ContentFit, Element, Length, Shadow, Theme};
use iced_aw::Wrap;

use crate::gallery::Thumbnails;
use crate::state::catalog::Catalog;
use crate::state::data::{FrameDescriptor, FrameId};
use crate::Message;

const CARD_WIDTH: f32 = 250.0;
const THUMBNAIL_HEIGHT: f32 = 150.0;

pub fn view<'a>(catalog: &'a Catalog, selected: Option<FrameId>, thumbnails: &'a Thumbnails) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = catalog
        .frames()
        .iter()
        .map(|frame| card(frame, selected == Some(frame.id), thumbnails))
        .collect();

    let content: Column<Message> = column![
        Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0),
        text("Click on any frame to see a preview below").size(13),
    ]
    .spacing(12);

    content.into()
}

fn card<'a>(frame: &'a FrameDescriptor, is_selected: bool, thumbnails: &'a Thumbnails) -> Element<'a, Message> {
    let thumbnail: Element<'a, Message> = match thumbnails.get(frame.id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("👓").size(36))
            .width(Length::Fill)
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(THUMBNAIL_HEIGHT))
            .style(container::rounded_box)
            .into(),
    };

    let mut details = column![
        row![
            text(frame.display_name).size(16),
            horizontal_space(),
            text(frame.price).size(16),
        ],
        text(frame.seller_name).size(12),
        text(frame.description).size(13),
    ]
    .spacing(4);

    if is_selected {
        details = details.push(
            container(text("✓ Selected").size(12))
                .padding([2, 10])
                .style(container::rounded_box),
        );
    }

    button(column![thumbnail, details].spacing(10))
        .on_press(Message::FrameSelected(frame.id))
        .width(Length::Fixed(CARD_WIDTH))
        .padding(12)
        .style(move |theme: &Theme, status| card_style(theme, status, is_selected))
        .into()
}

fn card_style(theme: &Theme, status: button::Status, is_selected: bool) -> button::Style {
    let palette = theme.extended_palette();

    let border_color = if is_selected {
        palette.primary.strong.color
    } else if status == button::Status::Hovered {
        palette.primary.weak.color
    } else {
        palette.background.strong.color
    };

    let background = if is_selected {
        Color {
            a: 0.12,
            ..palette.primary.base.color
        }
    } else {
        palette.background.base.color
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette.background.base.text,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 10.0.into(),
        },
        shadow: Shadow::default(),
    }
}
