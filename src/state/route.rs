/// In-app addresses and the history stack
///
/// Two address shapes exist:
/// - `/` or `/?photoId=3&category=lego`: the grid, optionally with the overlay open
/// - `/p/3?category=lego`: the dedicated single-photo page
use std::fmt;

use super::data::PhotoId;
use super::filter::CategoryFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The grid, with the overlay open when `photo` is set
    Grid {
        photo: Option<PhotoId>,
        category: CategoryFilter,
    },
    /// The dedicated single-photo page
    Photo { id: PhotoId, category: CategoryFilter },
}

impl Route {
    /// The bare grid route
    pub fn base() -> Self {
        Route::Grid {
            photo: None,
            category: CategoryFilter::All,
        }
    }

    /// Parse an address such as "/p/3?category=lego".
    /// Returns None for paths the gallery does not serve.
    pub fn parse(address: &str) -> Option<Self> {
        let address = address.trim();
        let (path, query) = match address.split_once('?') {
            Some((path, query)) => (path, query),
            None => (address, ""),
        };

        let mut photo_param = None;
        let mut category_param = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "photoId" => photo_param = Some(value.parse::<PhotoId>().ok()?),
                "category" => category_param = Some(urlencoding::decode(value).ok()?),
                _ => {}
            }
        }
        let category = CategoryFilter::parse(category_param.as_deref());

        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Route::Grid {
                photo: photo_param,
                category,
            });
        }

        let id = path.strip_prefix("/p/")?.parse::<PhotoId>().ok()?;
        Some(Route::Photo { id, category })
    }

    /// The photo this address points at, if any
    pub fn photo(&self) -> Option<PhotoId> {
        match self {
            Route::Grid { photo, .. } => *photo,
            Route::Photo { id, .. } => Some(*id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Grid { photo: None, .. } => f.write_str("/"),
            Route::Grid {
                photo: Some(id),
                category,
            } => {
                write!(f, "/?photoId={}", id)?;
                if let Some(label) = category.query_value() {
                    write!(f, "&category={}", urlencoding::encode(label))?;
                }
                Ok(())
            }
            Route::Photo { id, category } => {
                write!(f, "/p/{}", id)?;
                if let Some(label) = category.query_value() {
                    write!(f, "?category={}", urlencoding::encode(label))?;
                }
                Ok(())
            }
        }
    }
}

/// How an address change is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Only the address changes, the current page stays mounted
    Shallow,
    /// The page for the new address replaces the current one
    Full,
}

/// A navigation command produced by the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub route: Route,
    pub mode: UpdateMode,
}

/// Back/forward history of visited addresses
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Route) -> Self {
        History {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Push a new entry, dropping any forward entries
    pub fn apply(&mut self, change: &RouteChange) {
        if *self.current() == change.route {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(change.route.clone());
        self.cursor += 1;
        tracing::debug!(address = %change.route, mode = ?change.mode, "history push");
    }

    /// Step back one entry, returning the address now current
    pub fn back(&mut self) -> Option<&Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
