use clap::{Parser, Subcommand};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{column, container, scrollable, stack, text};
use iced::{event, mouse, Element, Event, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod backend;
mod config;
mod error;
mod state;
mod ui;

use backend::{loader, Backend, ImageResolver};
use config::{BackendKind, GalleryConfig};
use state::address::{AddressStrategy, DedicatedRoute, ShallowOverlay};
use state::data::{Catalog, PhotoId};
use state::filter::CategoryFilter;
use state::last_viewed::LastViewed;
use state::library::Library;
use state::navigation::{NavOutcome, OpenOutcome, Synchronizer};
use state::route::{History, Route, RouteChange, UpdateMode};
use ui::gesture::{PointerEvent, Swipe, SwipeTracker};
use ui::images::{ImageCache, ImageKey, Variant};
use ui::overlay::RevealGate;

#[derive(Debug, Parser)]
#[command(name = "photo-gallery", version, about = "Photo gallery with a lightbox viewer")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog provider to read photos from
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// SQLite catalog used by the local backend and `import`
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Address to open on start, e.g. "/p/3?category=lego"
    #[arg(long, value_name = "ADDRESS")]
    open: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import every image below a folder into the local catalog
    Import {
        folder: PathBuf,
        /// Category for all imported photos (default: top-level subfolder name)
        #[arg(long)]
        category: Option<String>,
    },
}

/// The page currently mounted
enum Page {
    /// Waiting for the catalog
    Loading,
    /// Grid with the overlay layered on top when a photo is open
    Grid(Synchronizer),
    /// Dedicated single-photo page
    Photo(Synchronizer),
}

/// Main application state
struct Gallery {
    config: GalleryConfig,
    http: reqwest::Client,
    resolver: ImageResolver,
    catalog: Option<Arc<Catalog>>,
    /// Picker options: "all" followed by every category in the catalog
    categories: Vec<CategoryFilter>,
    page: Page,
    history: History,
    /// Owned here so it survives the switch between pages
    last_viewed: LastViewed,
    images: ImageCache,
    gate: RevealGate,
    swipe: SwipeTracker,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    CatalogLoaded(Result<Arc<Catalog>, String>),
    /// Route parameters for the mounted page are available
    RouteResolved,
    /// Grid tile clicked
    OpenPhoto(PhotoId),
    Next,
    Previous,
    JumpTo(PhotoId),
    Close,
    FilterSelected(CategoryFilter),
    HistoryBack,
    HistoryForward,
    ImageLoaded(ImageKey, Result<Vec<u8>, String>),
    Download,
    DownloadFinished(Result<Option<PathBuf>, String>),
    Pointer(PointerEvent),
}

impl Gallery {
    /// Create a new instance of the application and start loading the catalog
    fn new(config: GalleryConfig, address: Option<String>) -> (Self, Task<Message>) {
        let initial = match address.as_deref() {
            Some(address) => Route::parse(address).unwrap_or_else(|| {
                warn!(address = %address, "unknown address, opening the grid");
                Route::base()
            }),
            None => Route::base(),
        };

        let http = reqwest::Client::new();
        let swipe = SwipeTracker::new(config.viewer.swipe_threshold);
        let mut gallery = Gallery {
            resolver: ImageResolver::from_config(&config),
            http: http.clone(),
            catalog: None,
            categories: vec![CategoryFilter::All],
            page: Page::Loading,
            history: History::new(initial),
            last_viewed: LastViewed::new(),
            images: ImageCache::new(),
            gate: RevealGate::default(),
            swipe,
            status: "Loading photos…".to_string(),
            config,
        };

        let task = match Backend::from_config(&gallery.config, http) {
            Ok(backend) => {
                info!(backend = backend.name(), "fetching catalog");
                Task::perform(backend.fetch_catalog(), |result| {
                    Message::CatalogLoaded(result.map(Arc::new).map_err(|e| e.to_string()))
                })
            }
            Err(e) => {
                gallery.status = format!("⚠️  {}", e);
                Task::none()
            }
        };

        (gallery, task)
    }

    fn title(&self) -> String {
        match self.sync().and_then(Synchronizer::current_photo) {
            Some(photo) if !photo.title.is_empty() => format!("{} - {}", photo.title, self.config.title),
            _ => self.config.title.clone(),
        }
    }

    fn sync(&self) -> Option<&Synchronizer> {
        match &self.page {
            Page::Grid(sync) | Page::Photo(sync) => Some(sync),
            Page::Loading => None,
        }
    }

    fn sync_mut(&mut self) -> Option<&mut Synchronizer> {
        match &mut self.page {
            Page::Grid(sync) | Page::Photo(sync) => Some(sync),
            Page::Loading => None,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(catalog)) => {
                self.status = format!("{} photos", catalog.len());
                self.categories = std::iter::once(CategoryFilter::All)
                    .chain(catalog.categories().into_iter().map(CategoryFilter::Only))
                    .collect();
                self.catalog = Some(catalog.clone());
                self.images.clear();

                let grid_images = Task::batch(
                    catalog
                        .iter()
                        .map(|photo| self.load_image(ImageKey { id: photo.id, variant: Variant::Grid }))
                        .collect::<Vec<_>>(),
                );
                let route = self.history.current().clone();
                Task::batch([grid_images, self.mount(route)])
            }
            Message::CatalogLoaded(Err(e)) => {
                warn!(error = %e, "catalog load failed");
                self.status = format!("⚠️  Could not load photos: {}", e);
                Task::none()
            }
            Message::RouteResolved => {
                let outcome = self.sync_mut().and_then(Synchronizer::resolve_pending);
                match outcome {
                    Some(outcome) => self.after_open(outcome),
                    None => Task::none(),
                }
            }
            Message::OpenPhoto(id) => {
                let category = self.sync().map(|s| s.filter().clone()).unwrap_or_default();
                let change = ShallowOverlay.photo_address(id, &category);
                self.history.apply(&change);
                self.mount(change.route)
            }
            Message::Next => self.navigate(|sync| sync.next()),
            Message::Previous => self.navigate(|sync| sync.previous()),
            Message::JumpTo(id) => self.navigate(|sync| sync.jump_to(id)),
            Message::Close => self.close(),
            Message::FilterSelected(category) => {
                let Some(sync) = self.sync_mut() else {
                    return Task::none();
                };
                let change = sync.set_filter(category);
                if change.reset {
                    self.status = "Showing all categories for the open photo".to_string();
                }
                if let Some(address) = change.address {
                    self.history.apply(&address);
                }
                self.request_strip()
            }
            Message::HistoryBack => match self.history.back().cloned() {
                Some(route) => self.mount(route),
                None => Task::none(),
            },
            Message::HistoryForward => match self.history.forward().cloned() {
                Some(route) => self.mount(route),
                None => Task::none(),
            },
            Message::ImageLoaded(key, result) => {
                self.images.finish(key, result);
                // A failed load still reveals the controls
                if key.variant == Variant::Overlay {
                    self.gate.notify_loaded(key.id);
                }
                Task::none()
            }
            Message::Download => {
                let Some(sync) = self.sync() else {
                    return Task::none();
                };
                let (Some(photo), Some(state)) = (sync.current_photo(), sync.state()) else {
                    return Task::none();
                };
                let source = self.resolver.source(&photo.image, None, None);
                let name = loader::suggested_file_name(state.index_in_view, &source);
                Task::perform(
                    loader::download_photo(self.http.clone(), source, name),
                    Message::DownloadFinished,
                )
            }
            Message::DownloadFinished(result) => {
                match result {
                    Ok(Some(path)) => {
                        info!(path = %path.display(), "photo saved");
                        self.status = format!("✅ Saved {}", path.display());
                    }
                    Ok(None) => {}
                    Err(e) => self.status = format!("⚠️  {}", e),
                }
                Task::none()
            }
            Message::Pointer(event) => {
                if !self.sync().is_some_and(Synchronizer::is_open) {
                    return Task::none();
                }
                match self.swipe.handle(event) {
                    Some(Swipe::Left) => self.navigate(|sync| sync.next()),
                    Some(Swipe::Right) => self.navigate(|sync| sync.previous()),
                    None => Task::none(),
                }
            }
        }
    }

    /// Mount the page for an address that changed from outside the
    /// synchronizer (deep link, history, grid click)
    fn mount(&mut self, route: Route) -> Task<Message> {
        let Some(catalog) = self.catalog.clone() else {
            // The catalog is still loading; the route stays in history until then
            return Task::none();
        };
        debug!(address = %route, photo = ?route.photo(), "mounting route");

        match route {
            Route::Photo { id, category } => {
                let mut sync = Synchronizer::pending(catalog, Box::new(DedicatedRoute));
                let outcome = sync.open_from_url(id, Some(category));
                self.page = Page::Photo(sync);
                self.gate.reset();
                let follow_up = self.after_open(outcome);
                // Route parameters resolve on the next turn of the update loop
                Task::batch([follow_up, Task::done(Message::RouteResolved)])
            }
            Route::Grid { photo, category } => {
                if let Page::Photo(sync) = &mut self.page {
                    sync.close(&mut self.last_viewed);
                }
                if !matches!(self.page, Page::Grid(_)) {
                    self.page = Page::Grid(Synchronizer::new(catalog, Box::new(ShallowOverlay)));
                }
                let Page::Grid(sync) = &mut self.page else {
                    return Task::none();
                };
                match photo {
                    Some(id) => {
                        let outcome = sync.open_from_url(id, (!category.is_all()).then(|| category.clone()));
                        self.after_open(outcome)
                    }
                    None => {
                        sync.close(&mut self.last_viewed);
                        self.gate.reset();
                        self.scroll_to_last_viewed()
                    }
                }
            }
        }
    }

    fn after_open(&mut self, outcome: OpenOutcome) -> Task<Message> {
        match outcome {
            OpenOutcome::Opened {
                id,
                filter_reset,
                correction,
                ..
            } => {
                if filter_reset {
                    info!(id, "opened photo outside the active category");
                }
                if let Some(change) = correction {
                    self.history.apply(&change);
                }
                self.show_photo(id)
            }
            OpenOutcome::Pending => Task::none(),
            OpenOutcome::NotFound => {
                self.status = "⚠️  Photo not found".to_string();
                let change = RouteChange {
                    route: Route::base(),
                    mode: UpdateMode::Full,
                };
                self.history.apply(&change);
                self.mount(change.route)
            }
        }
    }

    /// Run a navigation intent against the synchronizer's current state
    fn navigate<F>(&mut self, intent: F) -> Task<Message>
    where
        F: FnOnce(&mut Synchronizer) -> NavOutcome,
    {
        let Some(sync) = self.sync_mut() else {
            return Task::none();
        };
        match intent(sync) {
            NavOutcome::Moved(transition) => {
                self.history.apply(&transition.address);
                self.show_photo(transition.id)
            }
            NavOutcome::Unchanged | NavOutcome::Deferred => Task::none(),
        }
    }

    fn close(&mut self) -> Task<Message> {
        let (Page::Grid(sync) | Page::Photo(sync)) = &mut self.page else {
            return Task::none();
        };
        let Some(change) = sync.close(&mut self.last_viewed) else {
            return Task::none();
        };
        self.gate.reset();
        self.history.apply(&change);

        if change.mode == UpdateMode::Full {
            // Leaving the dedicated page mounts a fresh grid
            if let Some(catalog) = self.catalog.clone() {
                self.page = Page::Grid(Synchronizer::new(catalog, Box::new(ShallowOverlay)));
            }
        }
        self.scroll_to_last_viewed()
    }

    fn scroll_to_last_viewed(&mut self) -> Task<Message> {
        match self.take_last_viewed_offset() {
            Some(offset) => scrollable::snap_to(ui::grid::scroll_id(), scrollable::RelativeOffset { x: 0.0, y: offset }),
            None => Task::none(),
        }
    }

    /// Grid return handling: read-and-clear the last viewed photo and
    /// compute where the grid should scroll to show it
    fn take_last_viewed_offset(&mut self) -> Option<f32> {
        let Page::Grid(sync) = &self.page else {
            return None;
        };
        let id = self.last_viewed.take()?;
        let position = sync.view().position_of(id)?;
        Some(ui::grid::scroll_offset(position, sync.view().len()))
    }

    fn show_photo(&mut self, id: PhotoId) -> Task<Message> {
        self.gate.arm(id);
        let key = ImageKey { id, variant: Variant::Overlay };
        if self.images.is_settled(&key) {
            self.gate.notify_loaded(id);
        }
        Task::batch([self.load_image(key), self.request_strip()])
    }

    fn strip_entries(&self) -> Vec<ui::strip::StripEntry> {
        match self.sync().and_then(|s| s.state().map(|state| (s, state.index_in_view))) {
            Some((sync, index)) => ui::strip::project(sync.view(), index, self.config.viewer.strip_radius),
            None => Vec::new(),
        }
    }

    fn request_strip(&mut self) -> Task<Message> {
        let tasks: Vec<Task<Message>> = self
            .strip_entries()
            .into_iter()
            .map(|entry| self.load_image(ImageKey { id: entry.id, variant: Variant::Strip }))
            .collect();
        Task::batch(tasks)
    }

    /// Start fetching an image unless it was already requested
    fn load_image(&mut self, key: ImageKey) -> Task<Message> {
        let Some(photo) = self.catalog.as_ref().and_then(|c| c.get(key.id)) else {
            return Task::none();
        };
        let viewer = &self.config.viewer;
        let (width, quality) = match key.variant {
            Variant::Grid => (viewer.grid_width, viewer.grid_quality),
            Variant::Overlay => (viewer.overlay_width, viewer.overlay_quality),
            Variant::Strip => (viewer.strip_width, viewer.strip_quality),
        };
        let source = self.resolver.source(&photo.image, Some(width), Some(quality));
        if !self.images.begin(key) {
            return Task::none();
        }
        Task::perform(loader::fetch_image(self.http.clone(), source), move |result| {
            Message::ImageLoaded(key, result)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page: Element<'_, Message> = match &self.page {
            Page::Loading => container(text(self.status.as_str()).size(16))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
            Page::Grid(sync) => {
                let grid = ui::grid::view(&self.config.title, sync, &self.images, &self.categories);
                if sync.is_open() {
                    let overlay = ui::overlay::view(sync, &self.images, &self.gate, &self.strip_entries(), false);
                    stack![grid, overlay].into()
                } else {
                    grid
                }
            }
            Page::Photo(sync) => ui::overlay::view(sync, &self.images, &self.gate, &self.strip_entries(), true),
        };

        column![
            page,
            container(text(self.status.as_str()).size(12)).padding([4, 12]),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, modifiers| match key.as_ref() {
            Key::Named(Named::ArrowLeft) if modifiers.alt() => Some(Message::HistoryBack),
            Key::Named(Named::ArrowRight) if modifiers.alt() => Some(Message::HistoryForward),
            Key::Named(Named::ArrowRight) => Some(Message::Next),
            Key::Named(Named::ArrowLeft) => Some(Message::Previous),
            Key::Named(Named::Escape) => Some(Message::Close),
            Key::Named(Named::Backspace) => Some(Message::HistoryBack),
            _ => None,
        });

        let pointer = event::listen_with(|event, _status, _window| match event {
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::Pointer(PointerEvent::Moved(position)))
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                Some(Message::Pointer(PointerEvent::Pressed))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                Some(Message::Pointer(PointerEvent::Released))
            }
            _ => None,
        });

        Subscription::batch([keys, pointer])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = GalleryConfig::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    match cli.command {
        Some(Command::Import { folder, category }) => run_import(&config, &folder, category.as_deref()),
        None => run_gallery(config, cli.open),
    }
}

/// Import a folder into the local catalog and report the counts
fn run_import(config: &GalleryConfig, folder: &std::path::Path, category: Option<&str>) -> anyhow::Result<()> {
    let library = match &config.catalog_path {
        Some(path) => Library::open(path)?,
        None => Library::open_default()?,
    };
    info!(catalog = %library.path().display(), "importing into catalog");

    let result = library.import_folder(folder, category)?;
    println!(
        "Imported {} photos, skipped {} already in the catalog ({} total).",
        result.imported_count,
        result.skipped_count,
        library.photo_count()?
    );
    Ok(())
}

fn run_gallery(config: GalleryConfig, address: Option<String>) -> anyhow::Result<()> {
    iced::application(Gallery::title, Gallery::update, Gallery::view)
        .theme(Gallery::theme)
        .subscription(Gallery::subscription)
        .centered()
        .run_with(move || Gallery::new(config, address))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::record;
    use iced::Point;

    /// [id0 "a" cat=X, id1 "b" cat=Y, id2 "c" cat=X]
    fn xyx_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_records(vec![
            record("a", "2024-03-01", Some("X")),
            record("b", "2024-02-01", Some("Y")),
            record("c", "2024-01-01", Some("X")),
        ]))
    }

    fn send(gallery: &mut Gallery, message: Message) {
        let _ = gallery.update(message);
    }

    /// A gallery whose catalog has finished loading
    fn loaded(address: Option<&str>) -> Gallery {
        let config = GalleryConfig {
            catalog_path: Some(PathBuf::from("catalog-unused.db")),
            ..GalleryConfig::default()
        };
        let (mut gallery, _) = Gallery::new(config, address.map(str::to_string));
        send(&mut gallery, Message::CatalogLoaded(Ok(xyx_catalog())));
        gallery
    }

    fn overlay_key(id: PhotoId) -> ImageKey {
        ImageKey {
            id,
            variant: Variant::Overlay,
        }
    }

    fn address(gallery: &Gallery) -> String {
        gallery.history.current().to_string()
    }

    #[test]
    fn test_failed_overlay_load_still_reveals_controls() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::OpenPhoto(0));
        assert!(!gallery.gate.controls_visible(0));

        // a completion for another photo changes nothing
        send(&mut gallery, Message::ImageLoaded(overlay_key(1), Err("404".into())));
        assert!(!gallery.gate.controls_visible(0));

        send(&mut gallery, Message::ImageLoaded(overlay_key(0), Err("404".into())));
        assert!(gallery.gate.controls_visible(0));

        send(&mut gallery, Message::Close);
        assert!(!gallery.gate.controls_visible(0));

        // reopening a photo whose load already failed is not stuck
        send(&mut gallery, Message::OpenPhoto(0));
        assert!(gallery.gate.controls_visible(0));
    }

    #[test]
    fn test_unknown_photo_redirects_to_grid() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::OpenPhoto(99));

        assert_eq!(gallery.history.current(), &Route::base());
        assert!(gallery.status.contains("not found"));
        assert!(matches!(&gallery.page, Page::Grid(sync) if !sync.is_open()));
    }

    #[test]
    fn test_unknown_dedicated_photo_redirects_after_resolve() {
        let mut gallery = loaded(Some("/p/42"));
        assert!(matches!(&gallery.page, Page::Photo(_)));
        assert_eq!(address(&gallery), "/p/42");

        send(&mut gallery, Message::RouteResolved);
        assert_eq!(gallery.history.current(), &Route::base());
        assert!(matches!(&gallery.page, Page::Grid(sync) if !sync.is_open()));
    }

    #[test]
    fn test_filter_reset_correction_is_pushed_to_history() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::FilterSelected(CategoryFilter::Only("Y".into())));
        send(&mut gallery, Message::OpenPhoto(0));

        assert_eq!(address(&gallery), "/?photoId=0");
        let sync = gallery.sync().unwrap();
        assert!(sync.filter().is_all());
        assert_eq!(sync.state().unwrap().index_in_view, 0);
    }

    #[test]
    fn test_deep_link_category_excluding_photo_is_corrected() {
        let gallery = loaded(Some("/?photoId=1&category=X"));
        assert_eq!(address(&gallery), "/?photoId=1");
        let sync = gallery.sync().unwrap();
        assert!(sync.filter().is_all());
        assert_eq!(sync.state().unwrap().current, 1);
    }

    #[test]
    fn test_close_consumes_last_viewed_once() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::OpenPhoto(1));
        send(&mut gallery, Message::Next);
        assert_eq!(address(&gallery), "/?photoId=2");

        send(&mut gallery, Message::Close);
        assert_eq!(gallery.history.current(), &Route::base());
        assert_eq!(gallery.last_viewed.peek(), None);

        // a later mount of the grid does not scroll again
        send(&mut gallery, Message::FilterSelected(CategoryFilter::Only("X".into())));
        assert_eq!(gallery.take_last_viewed_offset(), None);
    }

    #[test]
    fn test_last_viewed_offset_follows_grid_view() {
        let mut gallery = loaded(None);
        gallery.last_viewed.record(1);
        assert_eq!(gallery.take_last_viewed_offset(), Some(0.5));
        assert_eq!(gallery.take_last_viewed_offset(), None);

        send(&mut gallery, Message::FilterSelected(CategoryFilter::Only("X".into())));
        gallery.last_viewed.record(2);
        assert_eq!(gallery.take_last_viewed_offset(), Some(1.0));

        // a photo outside the view is consumed without scrolling
        gallery.last_viewed.record(1);
        assert_eq!(gallery.take_last_viewed_offset(), None);
        assert_eq!(gallery.last_viewed.peek(), None);
    }

    #[test]
    fn test_dedicated_page_defers_until_route_resolved() {
        let mut gallery = loaded(Some("/p/2?category=X"));
        let Page::Photo(sync) = &gallery.page else {
            panic!("expected the dedicated page");
        };
        assert!(sync.is_opening());

        // intents before resolution are dropped
        send(&mut gallery, Message::Previous);
        assert_eq!(address(&gallery), "/p/2?category=X");

        send(&mut gallery, Message::RouteResolved);
        let sync = gallery.sync().unwrap();
        assert_eq!(sync.state().unwrap().index_in_view, 1);
        assert_eq!(sync.filter(), &CategoryFilter::Only("X".into()));

        send(&mut gallery, Message::Previous);
        assert_eq!(address(&gallery), "/p/0?category=X");

        send(&mut gallery, Message::Close);
        assert_eq!(gallery.history.current(), &Route::base());
        assert!(matches!(&gallery.page, Page::Grid(sync) if !sync.is_open()));
        assert_eq!(gallery.last_viewed.peek(), None);
    }

    #[test]
    fn test_swipe_left_shows_next_photo() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::OpenPhoto(0));

        send(&mut gallery, Message::Pointer(PointerEvent::Moved(Point::new(300.0, 200.0))));
        send(&mut gallery, Message::Pointer(PointerEvent::Pressed));
        send(&mut gallery, Message::Pointer(PointerEvent::Moved(Point::new(100.0, 210.0))));
        send(&mut gallery, Message::Pointer(PointerEvent::Released));

        assert_eq!(address(&gallery), "/?photoId=1");
    }

    #[test]
    fn test_history_back_reopens_previous_photo() {
        let mut gallery = loaded(None);
        send(&mut gallery, Message::OpenPhoto(0));
        send(&mut gallery, Message::Next);

        send(&mut gallery, Message::HistoryBack);
        assert_eq!(gallery.sync().unwrap().state().unwrap().current, 0);

        send(&mut gallery, Message::HistoryBack);
        assert!(!gallery.sync().unwrap().is_open());
    }
}
