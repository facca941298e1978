/// Decoded image handles keyed by photo and display size
use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::state::data::PhotoId;

/// The sizes the presenter asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Grid,
    Overlay,
    Strip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub id: PhotoId,
    pub variant: Variant,
}

#[derive(Debug, Clone)]
enum Slot {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    slots: HashMap<ImageKey, Slot>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as loading. Returns false if it was already requested.
    pub fn begin(&mut self, key: ImageKey) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, Slot::Loading);
        true
    }

    pub fn finish(&mut self, key: ImageKey, result: Result<Vec<u8>, String>) {
        let slot = match result {
            Ok(bytes) => Slot::Ready(Handle::from_bytes(bytes)),
            Err(e) => {
                tracing::warn!(id = key.id, variant = ?key.variant, error = %e, "image load failed");
                Slot::Failed
            }
        };
        self.slots.insert(key, slot);
    }

    pub fn handle(&self, key: &ImageKey) -> Option<&Handle> {
        match self.slots.get(key) {
            Some(Slot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Finished, successfully or not
    pub fn is_settled(&self, key: &ImageKey) -> bool {
        matches!(self.slots.get(key), Some(Slot::Ready(_)) | Some(Slot::Failed))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_once() {
        let mut cache = ImageCache::new();
        let key = ImageKey { id: 1, variant: Variant::Grid };
        assert!(cache.begin(key));
        assert!(!cache.begin(key));
        assert!(!cache.is_settled(&key));
        assert!(cache.begin(ImageKey { id: 1, variant: Variant::Overlay }));
    }

    #[test]
    fn test_finish_success_and_failure() {
        let mut cache = ImageCache::new();
        let ok = ImageKey { id: 0, variant: Variant::Strip };
        let bad = ImageKey { id: 1, variant: Variant::Strip };
        cache.begin(ok);
        cache.begin(bad);

        cache.finish(ok, Ok(vec![0u8; 4]));
        cache.finish(bad, Err("404".into()));

        assert!(cache.handle(&ok).is_some());
        assert!(cache.handle(&bad).is_none());
        assert!(cache.is_settled(&bad));
        // failed loads are not retried automatically
        assert!(!cache.begin(bad));

        cache.clear();
        assert!(cache.begin(bad));
    }
}
