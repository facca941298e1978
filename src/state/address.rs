/// Address strategies for the two host contexts
///
/// The synchronizer never builds addresses itself. The host injects one of
/// these to decide what an open photo and the closed state look like.
use super::data::PhotoId;
use super::filter::CategoryFilter;
use super::route::{Route, RouteChange, UpdateMode};

pub trait AddressStrategy: Send + Sync + std::fmt::Debug {
    /// Address for an open photo, carrying the active category
    fn photo_address(&self, id: PhotoId, category: &CategoryFilter) -> RouteChange;

    /// Address once the viewer is closed
    fn base_address(&self) -> RouteChange {
        RouteChange {
            route: Route::base(),
            mode: UpdateMode::Shallow,
        }
    }
}

/// Overlay layered on the grid: photo id lives in the query, updates are shallow
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowOverlay;

impl AddressStrategy for ShallowOverlay {
    fn photo_address(&self, id: PhotoId, category: &CategoryFilter) -> RouteChange {
        RouteChange {
            route: Route::Grid {
                photo: Some(id),
                category: category.clone(),
            },
            mode: UpdateMode::Shallow,
        }
    }
}

/// Dedicated single-photo page: photo id is the primary path segment
#[derive(Debug, Clone, Copy, Default)]
pub struct DedicatedRoute;

impl AddressStrategy for DedicatedRoute {
    fn photo_address(&self, id: PhotoId, category: &CategoryFilter) -> RouteChange {
        RouteChange {
            route: Route::Photo {
                id,
                category: category.clone(),
            },
            mode: UpdateMode::Full,
        }
    }

    fn base_address(&self) -> RouteChange {
        RouteChange {
            route: Route::base(),
            mode: UpdateMode::Full,
        }
    }
}
