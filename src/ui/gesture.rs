/// Mouse-drag swipe detection for the viewer
use iced::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Dragged towards the left: show the next photo
    Left,
    /// Dragged towards the right: show the previous photo
    Right,
}

/// Pointer input relevant to swipes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Point),
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    cursor: Option<Point>,
    origin: Option<Point>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            cursor: None,
            origin: None,
        }
    }

    /// Feed one pointer event; returns a swipe when a drag completes
    pub fn handle(&mut self, event: PointerEvent) -> Option<Swipe> {
        match event {
            PointerEvent::Moved(position) => {
                self.cursor = Some(position);
                None
            }
            PointerEvent::Pressed => {
                self.origin = self.cursor;
                None
            }
            PointerEvent::Released => {
                let origin = self.origin.take()?;
                let end = self.cursor?;
                let dx = end.x - origin.x;
                let dy = end.y - origin.y;
                // Mostly horizontal and long enough
                if dx.abs() < self.threshold || dx.abs() <= dy.abs() {
                    return None;
                }
                Some(if dx < 0.0 { Swipe::Left } else { Swipe::Right })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(tracker: &mut SwipeTracker, from: (f32, f32), to: (f32, f32)) -> Option<Swipe> {
        tracker.handle(PointerEvent::Moved(Point::new(from.0, from.1)));
        tracker.handle(PointerEvent::Pressed);
        tracker.handle(PointerEvent::Moved(Point::new(to.0, to.1)));
        tracker.handle(PointerEvent::Released)
    }

    #[test]
    fn test_horizontal_drags() {
        let mut tracker = SwipeTracker::new(50.0);
        assert_eq!(drag(&mut tracker, (300.0, 200.0), (120.0, 210.0)), Some(Swipe::Left));
        assert_eq!(drag(&mut tracker, (120.0, 200.0), (300.0, 190.0)), Some(Swipe::Right));
    }

    #[test]
    fn test_short_or_vertical_drags_are_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        assert_eq!(drag(&mut tracker, (100.0, 100.0), (130.0, 100.0)), None);
        assert_eq!(drag(&mut tracker, (100.0, 100.0), (170.0, 300.0)), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.handle(PointerEvent::Moved(Point::new(0.0, 0.0)));
        assert_eq!(tracker.handle(PointerEvent::Released), None);
        // a click (press/release in place) is not a swipe
        tracker.handle(PointerEvent::Pressed);
        assert_eq!(tracker.handle(PointerEvent::Released), None);
    }
}
