/// Supabase catalog provider
///
/// Photos live in a `photos` table keyed by site; the site row names the
/// storage bucket holding the image files.
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SupabaseConfig;
use crate::error::{GalleryError, Result};
use crate::state::data::{parse_date, ImageLocator, PhotoRecord};

#[derive(Debug, Clone, Deserialize)]
struct Website {
    id: String,
    bucket_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PhotoRow {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    storage_path: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(http: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { http, config }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn get(&self, table: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.rest_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    /// Fetch the site row, then all of its photos newest first
    pub async fn fetch_records(&self) -> Result<Vec<PhotoRecord>> {
        let site_filter = format!("eq.{}", self.config.site);
        let websites: Vec<Website> = self
            .get("websites")
            .query(&[("select", "id,name,bucket_name"), ("name", site_filter.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let website = websites
            .into_iter()
            .next()
            .ok_or_else(|| GalleryError::SiteNotFound(self.config.site.clone()))?;
        debug!(site = %self.config.site, bucket = %website.bucket_name, "resolved site");

        let siteid = format!("eq.{}", website.id);
        let rows: Vec<PhotoRow> = self
            .get("photos")
            .query(&[("select", "*"), ("siteid", siteid.as_str()), ("order", "date.desc")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(count = rows.len(), "fetched photos from supabase");
        Ok(records_from_rows(rows, &website.bucket_name))
    }
}

fn records_from_rows(rows: Vec<PhotoRow>, bucket: &str) -> Vec<PhotoRecord> {
    rows.into_iter()
        .map(|row| {
            let image = if row.storage_path.is_empty() {
                ImageLocator::Missing
            } else {
                ImageLocator::Storage {
                    bucket: bucket.to_string(),
                    path: row.storage_path,
                }
            };
            PhotoRecord {
                identifier: row.id,
                title: row.title,
                image,
                date: row.date.as_deref().and_then(parse_date),
                category: row.category,
                description: row.description,
                width: None,
                height: None,
            }
        })
        .collect()
}
