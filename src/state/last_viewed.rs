/// Single-slot store for the photo the user last closed
///
/// Owned by the application root and passed explicitly. `close()` is the only
/// writer and the grid's return handling is the only reader; reading clears
/// the slot so a later, unrelated visit does not scroll again.
use super::data::PhotoId;

#[derive(Debug, Default)]
pub struct LastViewed {
    slot: Option<PhotoId>,
}

impl LastViewed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: PhotoId) {
        self.slot = Some(id);
    }

    /// Read and clear
    pub fn take(&mut self) -> Option<PhotoId> {
        self.slot.take()
    }

    #[cfg(test)]
    pub fn peek(&self) -> Option<PhotoId> {
        self.slot
    }
}
