use iced::widget::{button, column, container, mouse_area, text, Image};
use iced::{Alignment, Background, Border, Element, Length, Theme};

use portfolio_images::preview::PageModel;
use portfolio_images::state::slots::Slot;

use super::Message;

/// Preview box edge in logical pixels
const PREVIEW_SIZE: f32 = 200.0;

/// One upload slot: title, preview (or drop hint), picker button and the
/// "view full image" link once an image is set.
pub(super) fn view<'a>(
    index: usize,
    slot: &'a Slot,
    page: &'a PageModel,
    handle: Option<&'a iced::widget::image::Handle>,
    focused: bool,
    drag_active: bool,
) -> Element<'a, Message> {
    let visible = page
        .image(&slot.preview_id)
        .map(|image| !image.hidden)
        .unwrap_or(false);

    let preview: Element<'a, Message> = match handle {
        Some(handle) if visible => Image::new(handle.clone())
            .width(Length::Fixed(PREVIEW_SIZE))
            .height(Length::Fixed(PREVIEW_SIZE))
            .into(),
        _ => container(text("Drop an image here").size(14))
            .width(Length::Fixed(PREVIEW_SIZE))
            .height(Length::Fixed(PREVIEW_SIZE))
            .center_x(Length::Fixed(PREVIEW_SIZE))
            .center_y(Length::Fixed(PREVIEW_SIZE))
            .into(),
    };

    let mut content = column![
        text(&slot.base).size(20),
        preview,
        button("Choose Image").on_press(Message::PickFile(index)).padding(8),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if let Some(link) = page.link(&slot.link_id).filter(|link| !link.text.is_empty()) {
        content = content.push(
            button(text(&link.text).size(14))
                .style(button::text)
                .on_press(Message::ViewFull(slot.preview_id.clone())),
        );
    }

    let card = container(content)
        .padding(12)
        .width(Length::Fixed(PREVIEW_SIZE + 40.0))
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let border_color = if drag_active {
                palette.success.base.color
            } else if focused {
                palette.primary.strong.color
            } else {
                palette.background.strong.color
            };

            container::Style {
                background: Some(Background::Color(if drag_active {
                    palette.success.weak.color
                } else {
                    palette.background.weak.color
                })),
                border: Border {
                    color: border_color,
                    width: 2.0,
                    radius: 8.0.into(),
                },
                ..container::Style::default()
            }
        });

    mouse_area(card)
        .on_press(Message::SlotFocused(index))
        .on_enter(Message::SlotHovered(index))
        .on_exit(Message::SlotUnhovered(index))
        .into()
}
