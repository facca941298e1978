/// Lightbox viewer shown over the grid or as the dedicated photo page
use iced::widget::image::Image;
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::data::PhotoId;
use crate::state::navigation::Synchronizer;
use crate::ui::images::{ImageCache, ImageKey, Variant};
use crate::ui::strip::{self, StripEntry};
use crate::Message;

/// Hides the viewer controls until the current photo's image has loaded.
/// Completions for any other photo are ignored.
#[derive(Debug, Clone, Default)]
pub struct RevealGate {
    awaiting: Option<PhotoId>,
    revealed: bool,
}

impl RevealGate {
    /// Start waiting for `id`. Re-arming the photo already shown keeps it revealed.
    pub fn arm(&mut self, id: PhotoId) {
        if self.awaiting != Some(id) {
            self.awaiting = Some(id);
            self.revealed = false;
        }
    }

    /// Returns true when this completion revealed the controls
    pub fn notify_loaded(&mut self, id: PhotoId) -> bool {
        if self.awaiting == Some(id) && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }

    pub fn controls_visible(&self, current: PhotoId) -> bool {
        self.revealed && self.awaiting == Some(current)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Render the open photo. `dedicated` selects the back arrow instead of the
/// close cross, as on the single-photo page.
pub fn view<'a>(
    sync: &'a Synchronizer,
    images: &'a ImageCache,
    gate: &RevealGate,
    entries: &[StripEntry],
    dedicated: bool,
) -> Element<'a, Message> {
    let Some(photo) = sync.current_photo() else {
        return container(text("Loading…"))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    };
    let controls = gate.controls_visible(photo.id);

    let key = ImageKey {
        id: photo.id,
        variant: Variant::Overlay,
    };
    let picture: Element<'a, Message> = match images.handle(&key) {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None if images.is_settled(&key) => container(text("Image unavailable").size(18))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => container(text("Loading…").size(18))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    // Boundary controls are hidden rather than disabled
    let previous: Element<'a, Message> = if controls && sync.has_previous() {
        button(text("‹").size(32)).on_press(Message::Previous).padding(12).into()
    } else {
        horizontal_space().width(Length::Fixed(48.0)).into()
    };
    let next: Element<'a, Message> = if controls && sync.has_next() {
        button(text("›").size(32)).on_press(Message::Next).padding(12).into()
    } else {
        horizontal_space().width(Length::Fixed(48.0)).into()
    };

    let stage = row![previous, picture, next]
        .spacing(12)
        .align_y(Alignment::Center)
        .height(Length::Fill);

    let mut toolbar = row![].spacing(8).padding(8);
    if controls {
        toolbar = toolbar
            .push(button(text(if dedicated { "↩ Back" } else { "✕ Close" })).on_press(Message::Close))
            .push(horizontal_space())
            .push(
                text(format!("{} / {}", sync.state().map_or(0, |s| s.index_in_view + 1), sync.view().len()))
                    .size(14),
            )
            .push(button(text("⤓ Download")).on_press(Message::Download));
    }

    let mut info = Column::new().spacing(6).padding([8, 16]);
    if !photo.title.is_empty() {
        info = info.push(text(photo.title.as_str()).size(24));
    }
    let mut meta = row![].spacing(16);
    if let Some(date) = photo.display_date() {
        meta = meta.push(text(date).size(14));
    }
    if let Some(category) = &photo.category {
        meta = meta.push(text(category.as_str()).size(14));
    }
    info = info.push(meta);
    if let Some(description) = &photo.description {
        info = info.push(text(description.as_str()).size(15));
    }

    let content = column![toolbar, stage, info, strip::view(entries, images)]
        .width(Length::Fill)
        .height(Length::Fill);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::BLACK.into()),
            text_color: Some(Color::WHITE),
            ..container::Style::default()
        })
        .into()
}
