/// Upload panel view
use iced::widget::{button, column, container, text, Column};
use iced::{Alignment, Background, Border, Color, Element, Length, Theme};

use crate::upload::UploadPanel;
use crate::Message;

pub fn view<'a>(panel: &UploadPanel) -> Element<'a, Message> {
    let content: Column<Message> = if panel.loading {
        column![
            text("⏳").size(40),
            text("Processing your photo...").size(18),
        ]
    } else {
        column![
            text("📷").size(40),
            text("Upload Your Photo").size(22),
            text("Drag and drop your image here, or click to browse").size(14),
            button("Choose Photo")
                .on_press(Message::ChoosePhoto)
                .padding([10, 24])
                .style(button::primary),
            text("Supports JPG, PNG, WEBP up to 10MB").size(12),
        ]
    };
    let content = content.spacing(12).align_x(Alignment::Center);

    let drag_active = panel.drag_active;
    container(content)
        .width(Length::Fill)
        .padding(40)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| drop_zone_style(theme, drag_active))
        .into()
}

fn drop_zone_style(theme: &Theme, drag_active: bool) -> container::Style {
    let palette = theme.extended_palette();

    let (border_color, background) = if drag_active {
        (
            palette.primary.strong.color,
            Color {
                a: 0.08,
                ..palette.primary.base.color
            },
        )
    } else {
        (palette.background.strong.color, palette.background.base.color)
    };

    container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 12.0.into(),
        },
        ..container::Style::default()
    }
}
