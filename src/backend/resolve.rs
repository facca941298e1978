/// Image locator resolution
///
/// Turns an opaque `ImageLocator` into something displayable. Resolution
/// never fails: a locator that cannot be resolved yields an empty URL (or
/// `ImageSource::None`) and the presenter shows a placeholder.
use std::path::PathBuf;

use crate::config::GalleryConfig;
use crate::state::data::ImageLocator;

const SANITY_CDN: &str = "https://cdn.sanity.io/images";

/// Where to fetch image bytes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageResolver {
    sanity_project: Option<(String, String)>,
    storage_base: Option<String>,
}

impl ImageResolver {
    pub fn new(sanity_project: Option<(String, String)>, storage_base: Option<String>) -> Self {
        Self {
            sanity_project,
            storage_base: storage_base.map(|base| base.trim_end_matches('/').to_string()),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        let sanity = (!config.sanity.project_id.is_empty())
            .then(|| (config.sanity.project_id.clone(), config.sanity.dataset.clone()));
        let storage = (!config.supabase.url.is_empty()).then(|| config.supabase.url.clone());
        Self::new(sanity, storage)
    }

    /// Display URL for a locator, optionally sized. Empty when unresolvable.
    pub fn resolve(&self, locator: &ImageLocator, width: Option<u32>, quality: Option<u8>) -> String {
        match locator {
            ImageLocator::Url(url) => strip_markdown_link(url).to_string(),
            ImageLocator::SanityAsset(reference) => self
                .sanity_url(reference, width, quality)
                .unwrap_or_default(),
            ImageLocator::Storage { bucket, path } => self.storage_url(bucket, path).unwrap_or_default(),
            ImageLocator::File(path) => format!("file://{}", path.display()),
            ImageLocator::Missing => String::new(),
        }
    }

    /// Like `resolve`, but keeps local files as paths for the loader
    pub fn source(&self, locator: &ImageLocator, width: Option<u32>, quality: Option<u8>) -> ImageSource {
        if let ImageLocator::File(path) = locator {
            return ImageSource::Local(path.clone());
        }
        let url = self.resolve(locator, width, quality);
        if url.is_empty() {
            ImageSource::None
        } else {
            ImageSource::Remote(url)
        }
    }

    /// "image-{hash}-{w}x{h}-{ext}" -> cdn.sanity.io/images/{project}/{dataset}/{hash}-{w}x{h}.{ext}
    fn sanity_url(&self, reference: &str, width: Option<u32>, quality: Option<u8>) -> Option<String> {
        let (project, dataset) = self.sanity_project.as_ref()?;
        let body = reference.strip_prefix("image-")?;
        let (stem, ext) = body.rsplit_once('-')?;
        let (hash, dimensions) = stem.rsplit_once('-')?;
        let (w, h) = dimensions.split_once('x')?;
        if hash.is_empty() || ext.is_empty() || w.parse::<u32>().is_err() || h.parse::<u32>().is_err() {
            return None;
        }

        let mut url = format!("{}/{}/{}/{}-{}.{}", SANITY_CDN, project, dataset, hash, dimensions, ext);
        let mut params = Vec::new();
        if let Some(width) = width {
            params.push(format!("w={}", width));
        }
        if let Some(quality) = quality {
            params.push(format!("q={}", quality));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        Some(url)
    }

    /// Public object URL; the storage service does not transform images
    fn storage_url(&self, bucket: &str, path: &str) -> Option<String> {
        let base = self.storage_base.as_ref()?;
        if bucket.is_empty() || path.is_empty() {
            return None;
        }
        Some(format!(
            "{}/storage/v1/object/public/{}/{}",
            base,
            bucket,
            path.trim_start_matches('/')
        ))
    }
}

/// "[label](https://x)" -> "https://x"; anything else is returned trimmed
fn strip_markdown_link(value: &str) -> &str {
    let value = value.trim();
    if let Some(rest) = value.strip_prefix('[') {
        if let Some((_, tail)) = rest.split_once("](") {
            if let Some(url) = tail.strip_suffix(')') {
                return url;
            }
        }
    }
    value
}
