/// Presenter layer
///
/// Views render whatever the synchronizer hands them and emit navigation
/// intents as messages:
/// - grid.rs: wrap grid and category picker
/// - overlay.rs: lightbox viewer and the reveal gate
/// - strip.rs: thumbnail window under the viewer
/// - gesture.rs: swipe detection
/// - images.rs: decoded image handles

pub mod gesture;
pub mod grid;
pub mod images;
pub mod overlay;
pub mod strip;
