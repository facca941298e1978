/// Thumbnail strip at the bottom of the viewer
///
/// Policy: a window of `radius` positions on each side of the current photo,
/// taken from the filtered view. Entries carry the true photo id, so a click
/// always jumps by identity.
use iced::widget::image::Image;
use iced::widget::{button, container, horizontal_space, row, text, Row};
use iced::{Alignment, Element, Length};

use crate::state::data::PhotoId;
use crate::state::filter::FilteredView;
use crate::ui::images::{ImageCache, ImageKey, Variant};
use crate::Message;

const THUMB_WIDTH: f32 = 84.0;
const THUMB_HEIGHT: f32 = 56.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripEntry {
    pub id: PhotoId,
    /// Position in the filtered view
    pub view_index: usize,
    pub active: bool,
}

/// Project the strip window around `current_index`
pub fn project(view: &FilteredView, current_index: usize, radius: usize) -> Vec<StripEntry> {
    if view.is_empty() {
        return Vec::new();
    }
    let current_index = current_index.min(view.len() - 1);
    let start = current_index.saturating_sub(radius);
    let end = (current_index + radius + 1).min(view.len());

    (start..end)
        .filter_map(|view_index| {
            view.id_at(view_index).map(|id| StripEntry {
                id,
                view_index,
                active: view_index == current_index,
            })
        })
        .collect()
}

pub fn view<'a>(entries: &[StripEntry], images: &'a ImageCache) -> Element<'a, Message> {
    let thumbs: Vec<Element<'a, Message>> = entries
        .iter()
        .map(|entry| {
            let key = ImageKey {
                id: entry.id,
                variant: Variant::Strip,
            };
            let content: Element<'a, Message> = match images.handle(&key) {
                Some(handle) => Image::new(handle.clone())
                    .width(Length::Fixed(THUMB_WIDTH))
                    .height(Length::Fixed(THUMB_HEIGHT))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => container(text((entry.view_index + 1).to_string()).size(12))
                    .width(Length::Fixed(THUMB_WIDTH))
                    .height(Length::Fixed(THUMB_HEIGHT))
                    .center_x(Length::Fixed(THUMB_WIDTH))
                    .center_y(Length::Fixed(THUMB_HEIGHT))
                    .into(),
            };

            button(content)
                .padding(if entry.active { 3 } else { 0 })
                .style(if entry.active { button::primary } else { button::text })
                .on_press(Message::JumpTo(entry.id))
                .into()
        })
        .collect();

    row![
        horizontal_space(),
        Row::with_children(thumbs).spacing(4).align_y(Alignment::Center),
        horizontal_space(),
    ]
    .padding(12)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::record;
    use crate::state::data::Catalog;
    use crate::state::filter::{filter, CategoryFilter};

    fn view_of(len: usize) -> FilteredView {
        let records = (0..len)
            .map(|i| {
                let category = if i % 2 == 0 { "even" } else { "odd" };
                record(&format!("p{}", i), &format!("2024-{:02}-01", 12 - i.min(11)), Some(category))
            })
            .collect();
        filter(&Catalog::from_records(records), &CategoryFilter::All)
    }

    #[test]
    fn test_window_is_clamped_to_view() {
        let view = view_of(10);
        let entries = project(&view, 1, 3);
        let positions: Vec<usize> = entries.iter().map(|e| e.view_index).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);

        let entries = project(&view, 9, 3);
        let positions: Vec<usize> = entries.iter().map(|e| e.view_index).collect();
        assert_eq!(positions, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_exactly_one_active_entry() {
        let view = view_of(12);
        for current in 0..12 {
            let entries = project(&view, current, 15);
            assert_eq!(entries.len(), 12);
            let active: Vec<&StripEntry> = entries.iter().filter(|e| e.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].view_index, current);
        }
    }

    #[test]
    fn test_entries_carry_true_ids_in_filtered_view() {
        let catalog = Catalog::from_records(vec![
            record("a", "2024-03-01", Some("x")),
            record("b", "2024-02-01", Some("y")),
            record("c", "2024-01-01", Some("x")),
        ]);
        let view = filter(&catalog, &CategoryFilter::Only("x".into()));
        let entries = project(&view, 1, 15);
        assert_eq!(
            entries,
            vec![
                StripEntry { id: 0, view_index: 0, active: false },
                StripEntry { id: 2, view_index: 1, active: true },
            ]
        );
    }

    #[test]
    fn test_empty_view_has_no_strip() {
        assert!(project(&FilteredView::default(), 0, 15).is_empty());
    }
}
