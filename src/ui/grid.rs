/// Photo grid with the category picker
use iced::widget::image::Image;
use iced::widget::{button, column, container, pick_list, scrollable, text};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::filter::CategoryFilter;
use crate::state::navigation::Synchronizer;
use crate::ui::images::{ImageCache, ImageKey, Variant};
use crate::Message;

const TILE_WIDTH: f32 = 360.0;
const TILE_HEIGHT: f32 = 240.0;

pub fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("photo-grid")
}

/// Relative scroll position that brings the photo at `position` into view.
/// The wrap layout's column count is not known here, so this assumes rows
/// advance evenly through the list.
pub fn scroll_offset(position: usize, len: usize) -> f32 {
    if len <= 1 {
        return 0.0;
    }
    (position.min(len - 1) as f32 / (len - 1) as f32).clamp(0.0, 1.0)
}

pub fn view<'a>(
    title: &'a str,
    sync: &'a Synchronizer,
    images: &'a ImageCache,
    categories: &'a [CategoryFilter],
) -> Element<'a, Message> {
    let header = column![
        text(title).size(32),
        text(format!("{} photos", sync.view().len())).size(14),
        pick_list(categories, Some(sync.filter().clone()), Message::FilterSelected),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .width(Length::Fill);

    let tiles: Vec<Element<'a, Message>> = sync
        .view()
        .ids()
        .iter()
        .filter_map(|&id| sync.catalog().get(id))
        .map(|photo| {
            let key = ImageKey {
                id: photo.id,
                variant: Variant::Grid,
            };
            let content: Element<'a, Message> = match images.handle(&key) {
                Some(handle) => Image::new(handle.clone())
                    .width(Length::Fixed(TILE_WIDTH))
                    .height(Length::Fixed(TILE_HEIGHT))
                    .content_fit(ContentFit::Cover)
                    .into(),
                None => container(text(photo.title.as_str()).size(14))
                    .width(Length::Fixed(TILE_WIDTH))
                    .height(Length::Fixed(TILE_HEIGHT))
                    .center_x(Length::Fixed(TILE_WIDTH))
                    .center_y(Length::Fixed(TILE_HEIGHT))
                    .style(container::rounded_box)
                    .into(),
            };
            button(content)
                .padding(0)
                .style(button::text)
                .on_press(Message::OpenPhoto(photo.id))
                .into()
        })
        .collect();

    let body: Element<'a, Message> = if tiles.is_empty() {
        container(text("No photos in this category")).padding(40).into()
    } else {
        Wrap::with_elements(tiles).spacing(16.0).line_spacing(16.0).into()
    };

    scrollable(
        column![header, body]
            .spacing(24)
            .padding(24)
            .align_x(Alignment::Center)
            .width(Length::Fill),
    )
    .id(scroll_id())
    .height(Length::Fill)
    .into()
}
