/// State management module
///
/// This module handles all application state, including:
/// - The photo catalog and its records (data.rs)
/// - The local SQLite catalog (library.rs)
/// - Category filtering (filter.rs)
/// - Addresses and history (route.rs, address.rs)
/// - Viewer navigation (navigation.rs)
/// - The last-viewed photo slot (last_viewed.rs)

pub mod address;
pub mod data;
pub mod filter;
pub mod last_viewed;
pub mod library;
pub mod navigation;
pub mod route;
