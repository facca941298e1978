/// Sanity catalog provider
///
/// One GROQ query returns every `photo` document, newest first.
use serde::Deserialize;
use tracing::info;

use crate::config::SanityConfig;
use crate::error::Result;
use crate::state::data::{parse_date, ImageLocator, PhotoRecord};

const PHOTO_QUERY: &str = r#"*[_type == "photo"] | order(date desc) {
    _id,
    title,
    image { asset, url },
    date,
    category,
    description
}"#;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Vec<PhotoDocument>,
}

#[derive(Debug, Deserialize)]
struct PhotoDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image: Option<ImageField>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageField {
    #[serde(default)]
    asset: Option<AssetRef>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetRef {
    #[serde(rename = "_ref", default)]
    reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    config: SanityConfig,
}

impl SanityClient {
    pub fn new(http: reqwest::Client, config: SanityConfig) -> Self {
        Self { http, config }
    }

    fn query_url(&self) -> String {
        let host = if self.config.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.config.project_id,
            host,
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }

    pub async fn fetch_records(&self) -> Result<Vec<PhotoRecord>> {
        let response: QueryResponse = self
            .http
            .get(self.query_url())
            .query(&[("query", PHOTO_QUERY)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(count = response.result.len(), "fetched photos from sanity");
        Ok(response.result.into_iter().map(record_from_document).collect())
    }
}

fn record_from_document(doc: PhotoDocument) -> PhotoRecord {
    // A direct url wins over the asset reference
    let image = match doc.image {
        Some(ImageField { url: Some(url), .. }) if !url.is_empty() => ImageLocator::Url(url),
        Some(ImageField {
            asset: Some(AssetRef {
                reference: Some(reference),
            }),
            ..
        }) => ImageLocator::SanityAsset(reference),
        _ => ImageLocator::Missing,
    };

    PhotoRecord {
        identifier: doc.id,
        title: doc.title.unwrap_or_default(),
        image,
        date: doc.date.as_deref().and_then(parse_date),
        category: doc.category,
        description: doc.description,
        width: None,
        height: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_map_to_locators() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"ms": 3, "query": "...", "result": [
                {"_id": "a", "title": "Draak", "date": "2024-01-02T09:00:00.000Z", "category": "kleikunst",
                 "image": {"asset": {"_ref": "image-abc-800x600-jpg", "_type": "reference"}}},
                {"_id": "b", "title": "Link", "image": {"url": "[x](https://example.com/x.png)",
                 "asset": {"_ref": "image-def-10x10-png"}}},
                {"_id": "c"}
            ]}"#,
        )
        .unwrap();

        let records: Vec<PhotoRecord> = response.result.into_iter().map(record_from_document).collect();
        assert_eq!(records[0].image, ImageLocator::SanityAsset("image-abc-800x600-jpg".into()));
        assert!(records[0].date.is_some());
        assert_eq!(records[1].image, ImageLocator::Url("[x](https://example.com/x.png)".into()));
        assert_eq!(records[2].image, ImageLocator::Missing);
        assert_eq!(records[2].title, "");
    }

    #[test]
    fn test_query_url() {
        let mut config = SanityConfig {
            project_id: "proj".into(),
            ..SanityConfig::default()
        };
        let client = SanityClient::new(reqwest::Client::new(), config.clone());
        assert_eq!(
            client.query_url(),
            "https://proj.apicdn.sanity.io/v2024-01-01/data/query/production"
        );

        config.use_cdn = false;
        let client = SanityClient::new(reqwest::Client::new(), config);
        assert!(client.query_url().starts_with("https://proj.api.sanity.io/"));
    }
}
