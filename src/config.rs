/// Gallery configuration
///
/// Loaded from `config.json` in the user config directory, then overridden
/// by `GALLERY_*` environment variables. Command line flags are applied last
/// by `main`.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{GalleryError, Result};

/// Which catalog provider to read photos from
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local SQLite catalog filled by `import`
    #[default]
    Local,
    /// Supabase table + storage bucket
    Supabase,
    /// Sanity dataset queried with GROQ
    Sanity,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL, e.g. https://abcd.supabase.co
    pub url: String,
    pub anon_key: String,
    /// Row in the `websites` table whose photos are shown
    pub site: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
        }
    }
}

/// Image sizes and viewer behaviour
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Thumbnails shown on each side of the current photo in the strip
    pub strip_radius: usize,
    pub grid_width: u32,
    pub grid_quality: u8,
    pub overlay_width: u32,
    pub overlay_quality: u8,
    pub strip_width: u32,
    pub strip_quality: u8,
    /// Horizontal drag distance (logical pixels) that counts as a swipe
    pub swipe_threshold: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            strip_radius: 15,
            grid_width: 720,
            grid_quality: 80,
            overlay_width: 1280,
            overlay_quality: 90,
            strip_width: 180,
            strip_quality: 70,
            swipe_threshold: 50.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    pub title: String,
    pub backend: BackendKind,
    /// Overrides the default SQLite catalog location
    pub catalog_path: Option<PathBuf>,
    pub supabase: SupabaseConfig,
    pub sanity: SanityConfig,
    pub viewer: ViewerConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Photo Gallery".to_string(),
            backend: BackendKind::default(),
            catalog_path: None,
            supabase: SupabaseConfig::default(),
            sanity: SanityConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Default config file location, e.g. ~/.config/photo-gallery/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("photo-gallery").join("config.json"))
    }

    /// Load the config file (a missing file yields defaults) and apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                let config: GalleryConfig = serde_json::from_str(&contents)?;
                info!(path = %path.display(), "loaded config");
                config
            }
            Some(path) => {
                info!(path = %path.display(), "no config file found, using defaults");
                GalleryConfig::default()
            }
            None => {
                warn!("could not determine config directory, using defaults");
                GalleryConfig::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `GALLERY_*` overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup("GALLERY_BACKEND") {
            match kind.to_lowercase().as_str() {
                "local" => self.backend = BackendKind::Local,
                "supabase" => self.backend = BackendKind::Supabase,
                "sanity" => self.backend = BackendKind::Sanity,
                other => warn!(value = %other, "ignoring unknown GALLERY_BACKEND"),
            }
        }
        if let Some(url) = lookup("GALLERY_SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Some(key) = lookup("GALLERY_SUPABASE_KEY") {
            self.supabase.anon_key = key;
        }
        if let Some(site) = lookup("GALLERY_SUPABASE_SITE") {
            self.supabase.site = site;
        }
        if let Some(project) = lookup("GALLERY_SANITY_PROJECT") {
            self.sanity.project_id = project;
        }
        if let Some(dataset) = lookup("GALLERY_SANITY_DATASET") {
            self.sanity.dataset = dataset;
        }
    }

    /// Check that the selected backend has what it needs to connect
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            BackendKind::Local => Ok(()),
            BackendKind::Supabase => {
                if self.supabase.url.is_empty() || self.supabase.anon_key.is_empty() {
                    return Err(GalleryError::Misconfigured(
                        "supabase needs url and anon_key (GALLERY_SUPABASE_URL / GALLERY_SUPABASE_KEY)".into(),
                    ));
                }
                if self.supabase.site.is_empty() {
                    return Err(GalleryError::Misconfigured("supabase needs a site name".into()));
                }
                Ok(())
            }
            BackendKind::Sanity => {
                if self.sanity.project_id.is_empty() {
                    return Err(GalleryError::Misconfigured(
                        "sanity needs project_id (GALLERY_SANITY_PROJECT)".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{ "backend": "sanity", "sanity": { "project_id": "abc" } }"#).unwrap();
        assert_eq!(config.backend, BackendKind::Sanity);
        assert_eq!(config.sanity.project_id, "abc");
        assert_eq!(config.sanity.dataset, "production");
        assert_eq!(config.viewer.strip_radius, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GALLERY_BACKEND", "Supabase"),
            ("GALLERY_SUPABASE_URL", "https://abcd.supabase.co"),
            ("GALLERY_SUPABASE_KEY", "anon"),
            ("GALLERY_SUPABASE_SITE", "baskloos.nl"),
        ]
        .into_iter()
        .collect();

        let mut config = GalleryConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend, BackendKind::Supabase);
        assert_eq!(config.supabase.site, "baskloos.nl");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_env_is_ignored() {
        let mut config = GalleryConfig::default();
        config.apply_env(|key| (key == "GALLERY_BACKEND").then(|| "ftp".to_string()));
        assert_eq!(config.backend, BackendKind::Local);
    }

    #[test]
    fn test_validate_reports_missing_settings() {
        let mut config = GalleryConfig::default();
        config.backend = BackendKind::Supabase;
        assert!(matches!(config.validate(), Err(GalleryError::Misconfigured(_))));

        config.backend = BackendKind::Sanity;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = GalleryConfig::load(Some(Path::new("/nonexistent/photo-gallery/config.json"))).unwrap();
        assert_eq!(config.title, "Photo Gallery");
    }
}
