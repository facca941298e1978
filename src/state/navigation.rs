/// Navigation state synchronizer
///
/// Keeps the displayed photo, the address and the category filter consistent.
/// One synchronizer serves both host contexts; what an address looks like is
/// decided by the injected `AddressStrategy`.
///
/// Identity is always the catalog-wide `PhotoId`. The position inside the
/// filtered view is derived from it and recomputed whenever the view changes,
/// so a position computed under an old filter is never reused.
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::address::AddressStrategy;
use super::data::{Catalog, Photo, PhotoId};
use super::filter::{filter, CategoryFilter, FilteredView};
use super::last_viewed::LastViewed;
use super::route::RouteChange;

/// Transition hint for the presenter. Never consulted for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    pub fn from_delta(delta: isize) -> Self {
        match delta.signum() {
            -1 => Direction::Backward,
            1 => Direction::Forward,
            _ => Direction::Still,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Still => 0,
            Direction::Forward => 1,
        }
    }
}

/// State of an open viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Identity into the catalog, not the view
    pub current: PhotoId,
    /// Position of `current` inside the filtered view
    pub index_in_view: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Closed,
    /// Waiting for route parameters before resolving
    Opening {
        photo: PhotoId,
        category: Option<CategoryFilter>,
    },
    Open(NavigationState),
}

/// Result of an open request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened {
        id: PhotoId,
        index: usize,
        /// The requested filter excluded the photo and was reset to "all"
        filter_reset: bool,
        /// Address update needed to keep the address in step with the reset filter
        correction: Option<RouteChange>,
    },
    /// Route parameters are not resolved yet; the open completes later
    Pending,
    /// The id is not in the catalog
    NotFound,
}

/// A completed move to another photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: PhotoId,
    pub index: usize,
    pub direction: Direction,
    pub address: RouteChange,
}

/// Result of a next/previous/jump intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(Transition),
    /// Boundary reached, same photo, or nothing open
    Unchanged,
    /// Route parameters still pending; the intent was dropped
    Deferred,
}

/// Result of a filter change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    /// The filter actually in effect afterwards
    pub applied: CategoryFilter,
    /// The open photo was excluded, so the filter fell back to "all"
    pub reset: bool,
    /// Address update when a photo is open
    pub address: Option<RouteChange>,
}

#[derive(Debug)]
pub struct Synchronizer {
    catalog: Arc<Catalog>,
    filter: CategoryFilter,
    view: FilteredView,
    phase: Phase,
    address: Box<dyn AddressStrategy>,
    route_ready: bool,
}

impl Synchronizer {
    /// Create a closed synchronizer showing the whole catalog.
    /// Route parameters are considered resolved.
    pub fn new(catalog: Arc<Catalog>, address: Box<dyn AddressStrategy>) -> Self {
        let view = filter(&catalog, &CategoryFilter::All);
        Synchronizer {
            catalog,
            filter: CategoryFilter::All,
            view,
            phase: Phase::Closed,
            address,
            route_ready: true,
        }
    }

    /// Create a synchronizer whose route parameters are still being resolved
    pub fn pending(catalog: Arc<Catalog>, address: Box<dyn AddressStrategy>) -> Self {
        let mut sync = Self::new(catalog, address);
        sync.route_ready = false;
        sync
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn state(&self) -> Option<&NavigationState> {
        match &self.phase {
            Phase::Open(state) => Some(state),
            _ => None,
        }
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.state().and_then(|s| self.catalog.get(s.current))
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open(_))
    }

    #[cfg(test)]
    pub fn is_opening(&self) -> bool {
        matches!(self.phase, Phase::Opening { .. })
    }

    pub fn has_previous(&self) -> bool {
        self.state().is_some_and(|s| s.index_in_view > 0)
    }

    pub fn has_next(&self) -> bool {
        self.state()
            .is_some_and(|s| s.index_in_view + 1 < self.view.len())
    }

    /// Open a photo named by the address.
    ///
    /// `category_from_url` overrides the current filter when the address
    /// carries one. A filter that excludes the photo falls back to "all".
    pub fn open_from_url(
        &mut self,
        photo_id: PhotoId,
        category_from_url: Option<CategoryFilter>,
    ) -> OpenOutcome {
        if !self.route_ready {
            debug!(photo_id, "route parameters pending, deferring open");
            self.phase = Phase::Opening {
                photo: photo_id,
                category: category_from_url,
            };
            return OpenOutcome::Pending;
        }
        self.resolve_open(photo_id, category_from_url)
    }

    /// Mark route parameters as resolved and finish a deferred open
    pub fn resolve_pending(&mut self) -> Option<OpenOutcome> {
        self.route_ready = true;
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Opening { photo, category } => Some(self.resolve_open(photo, category)),
            other => {
                self.phase = other;
                None
            }
        }
    }

    fn resolve_open(
        &mut self,
        photo_id: PhotoId,
        category_from_url: Option<CategoryFilter>,
    ) -> OpenOutcome {
        let Some(photo) = self.catalog.get(photo_id) else {
            warn!(photo_id, catalog_len = self.catalog.len(), "photo not found");
            self.phase = Phase::Closed;
            return OpenOutcome::NotFound;
        };

        let requested = category_from_url.unwrap_or_else(|| self.filter.clone());
        let filter_reset = !requested.matches(photo.category.as_deref());
        let effective = if filter_reset {
            info!(photo_id, filter = %requested, "photo excluded by filter, showing all");
            CategoryFilter::All
        } else {
            requested
        };
        self.apply_filter(effective);

        let index = self.view.position_of(photo_id).unwrap_or(0);
        self.phase = Phase::Open(NavigationState {
            current: photo_id,
            index_in_view: index,
            direction: Direction::Still,
        });

        let correction = filter_reset.then(|| self.address.photo_address(photo_id, &self.filter));
        OpenOutcome::Opened {
            id: photo_id,
            index,
            filter_reset,
            correction,
        }
    }

    /// Move by an offset within the filtered view. Clamps at both ends.
    pub fn advance(&mut self, delta: isize) -> NavOutcome {
        let state = match &self.phase {
            Phase::Open(state) => *state,
            Phase::Opening { .. } => return NavOutcome::Deferred,
            Phase::Closed => return NavOutcome::Unchanged,
        };

        let Some(target) = state.index_in_view.checked_add_signed(delta) else {
            return NavOutcome::Unchanged;
        };
        if delta == 0 || target >= self.view.len() {
            return NavOutcome::Unchanged;
        }
        let Some(id) = self.view.id_at(target) else {
            return NavOutcome::Unchanged;
        };

        NavOutcome::Moved(self.move_to(id, target, Direction::from_delta(delta)))
    }

    pub fn next(&mut self) -> NavOutcome {
        self.advance(1)
    }

    pub fn previous(&mut self) -> NavOutcome {
        self.advance(-1)
    }

    /// Move to a photo by identity, e.g. from a thumbnail click
    pub fn jump_to(&mut self, photo_id: PhotoId) -> NavOutcome {
        let state = match &self.phase {
            Phase::Open(state) => *state,
            Phase::Opening { .. } => return NavOutcome::Deferred,
            Phase::Closed => return NavOutcome::Unchanged,
        };

        let Some(target) = self.view.position_of(photo_id) else {
            debug!(photo_id, "jump target not in current view");
            return NavOutcome::Unchanged;
        };
        if target == state.index_in_view {
            return NavOutcome::Unchanged;
        }

        let delta = target as isize - state.index_in_view as isize;
        NavOutcome::Moved(self.move_to(photo_id, target, Direction::from_delta(delta)))
    }

    fn move_to(&mut self, id: PhotoId, index: usize, direction: Direction) -> Transition {
        self.phase = Phase::Open(NavigationState {
            current: id,
            index_in_view: index,
            direction,
        });
        debug!(id, index, direction = direction.as_i8(), "navigated");
        Transition {
            id,
            index,
            direction,
            address: self.address.photo_address(id, &self.filter),
        }
    }

    /// Change the category filter from outside the viewer.
    /// An open photo the new filter excludes forces the filter back to "all".
    pub fn set_filter(&mut self, requested: CategoryFilter) -> FilterChange {
        let open = match &self.phase {
            Phase::Open(state) => Some(*state),
            Phase::Opening { photo, .. } => {
                let photo = *photo;
                self.phase = Phase::Opening {
                    photo,
                    category: Some(requested.clone()),
                };
                None
            }
            Phase::Closed => None,
        };

        let Some(state) = open else {
            self.apply_filter(requested.clone());
            return FilterChange {
                applied: requested,
                reset: false,
                address: None,
            };
        };

        let category = self.catalog.get(state.current).and_then(|p| p.category.as_deref());
        let reset = !requested.matches(category);
        let effective = if reset { CategoryFilter::All } else { requested };
        self.apply_filter(effective);

        let index = self.view.position_of(state.current).unwrap_or(0);
        self.phase = Phase::Open(NavigationState {
            index_in_view: index,
            ..state
        });

        FilterChange {
            applied: self.filter.clone(),
            reset,
            address: Some(self.address.photo_address(state.current, &self.filter)),
        }
    }

    /// Close the viewer, remembering the open photo for the grid
    pub fn close(&mut self, last_viewed: &mut LastViewed) -> Option<RouteChange> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Open(state) => {
                last_viewed.record(state.current);
                debug!(id = state.current, "viewer closed");
                Some(self.address.base_address())
            }
            Phase::Opening { .. } => Some(self.address.base_address()),
            Phase::Closed => None,
        }
    }

    fn apply_filter(&mut self, category: CategoryFilter) {
        self.view = filter(&self.catalog, &category);
        self.filter = category;
    }
}
