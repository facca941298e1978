/// Fetching image bytes for display and download
///
/// Results cross into iced messages, so errors are flattened to strings.
use std::path::PathBuf;

use tracing::{debug, warn};

use super::resolve::ImageSource;

pub async fn fetch_image(http: reqwest::Client, source: ImageSource) -> Result<Vec<u8>, String> {
    match source {
        ImageSource::Remote(url) => {
            debug!(url = %url, "fetching image");
            let response = http
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| format!("Failed to fetch {}: {}", url, e))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| format!("Failed to read {}: {}", url, e))?;
            Ok(bytes.to_vec())
        }
        ImageSource::Local(path) => tokio::fs::read(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e)),
        ImageSource::None => Err("photo has no image".to_string()),
    }
}

/// Ask for a destination and save the full-size image there.
/// Returns None when the user cancels the dialog.
pub async fn download_photo(
    http: reqwest::Client,
    source: ImageSource,
    suggested_name: String,
) -> Result<Option<PathBuf>, String> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title("Save photo")
        .set_file_name(&suggested_name)
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let bytes = fetch_image(http, source).await?;
    let path = handle.path().to_path_buf();
    tokio::fs::write(&path, bytes).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "saving photo failed");
        format!("Failed to save {}: {}", path.display(), e)
    })?;
    Ok(Some(path))
}

/// File name offered in the save dialog, e.g. "3.jpg"
pub fn suggested_file_name(index: usize, source: &ImageSource) -> String {
    let extension = match source {
        ImageSource::Remote(url) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase()),
        ImageSource::Local(path) => path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase()),
        ImageSource::None => None,
    };
    format!("{}.{}", index, extension.unwrap_or_else(|| "jpg".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_file_name() {
        let remote = ImageSource::Remote("https://cdn.example.com/a/b/photo.PNG?w=10".into());
        assert_eq!(suggested_file_name(3, &remote), "3.png");

        let local = ImageSource::Local(PathBuf::from("/photos/x.webp"));
        assert_eq!(suggested_file_name(0, &local), "0.webp");

        let bare = ImageSource::Remote("https://cdn.example.com/images/abc".into());
        assert_eq!(suggested_file_name(1, &bare), "1.jpg");
    }
}
