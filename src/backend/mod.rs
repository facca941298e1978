/// Catalog providers and image access
///
/// This module handles everything that talks to the outside world:
/// - The SQLite catalog, Supabase and Sanity providers (one batched read each)
/// - Image locator resolution (resolve.rs)
/// - Fetching image bytes (loader.rs)

pub mod loader;
pub mod resolve;
pub mod sanity;
pub mod supabase;

use std::path::PathBuf;

use tracing::info;

use crate::config::{BackendKind, GalleryConfig};
use crate::error::Result;
use crate::state::data::{Catalog, PhotoRecord};
use crate::state::library::Library;

pub use resolve::ImageResolver;

/// The configured catalog provider
#[derive(Debug, Clone)]
pub enum Backend {
    Local { db_path: PathBuf },
    Supabase(supabase::SupabaseClient),
    Sanity(sanity::SanityClient),
}

impl Backend {
    pub fn from_config(config: &GalleryConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        let backend = match config.backend {
            BackendKind::Local => Backend::Local {
                db_path: match &config.catalog_path {
                    Some(path) => path.clone(),
                    None => Library::default_path()?,
                },
            },
            BackendKind::Supabase => {
                Backend::Supabase(supabase::SupabaseClient::new(http, config.supabase.clone()))
            }
            BackendKind::Sanity => Backend::Sanity(sanity::SanityClient::new(http, config.sanity.clone())),
        };
        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Local { .. } => "local",
            Backend::Supabase(_) => "supabase",
            Backend::Sanity(_) => "sanity",
        }
    }

    /// The single batched read of raw photo records
    pub async fn fetch_records(&self) -> Result<Vec<PhotoRecord>> {
        match self {
            Backend::Local { db_path } => {
                let db_path = db_path.clone();
                // rusqlite::Connection is not Send, so open it on the blocking pool
                tokio::task::spawn_blocking(move || {
                    let library = Library::open(&db_path)?;
                    library.verify_files()?;
                    library.get_all_records()
                })
                .await?
            }
            Backend::Supabase(client) => client.fetch_records().await,
            Backend::Sanity(client) => client.fetch_records().await,
        }
    }

    /// Fetch and index the catalog
    pub async fn fetch_catalog(self) -> Result<Catalog> {
        let records = self.fetch_records().await?;
        let catalog = Catalog::from_records(records);
        info!(backend = self.name(), photos = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
