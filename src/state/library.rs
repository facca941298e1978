use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::data::{parse_date, ImageLocator, PhotoRecord};
use crate::error::{GalleryError, Result};

/// Image extensions picked up by a folder import
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Result of a folder import operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub imported_count: usize,
    pub skipped_count: usize,
}

/// The Library manages the local SQLite photo catalog.
/// It is the offline catalog provider: one row per photo, with the image
/// locator stored as JSON so rows can point at files or remote URLs.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open the catalog at the default location:
    /// - Linux: ~/.local/share/photo-gallery/catalog.db
    /// - macOS: ~/Library/Application Support/photo-gallery/catalog.db
    /// - Windows: %APPDATA%\photo-gallery\catalog.db
    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open or create a catalog database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        debug!(path = %db_path.display(), "catalog database opened");

        let library = Library {
            conn,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;
        Ok(library)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let library = Library {
            conn: Connection::open_in_memory()?,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Get the path where the database should be stored
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GalleryError::Misconfigured("no user data directory".into()))?;

        path.push("photo-gallery");
        path.push("catalog.db");
        Ok(path)
    }

    /// Initialize the database schema.
    /// Creates all necessary tables and indexes if they don't exist.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS photos (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                identifier      TEXT NOT NULL UNIQUE,
                title           TEXT NOT NULL,
                image_json      TEXT NOT NULL,
                taken_at        TEXT,
                category        TEXT,
                description     TEXT,
                width           INTEGER,
                height          INTEGER,
                imported_at     INTEGER NOT NULL,
                file_status     TEXT NOT NULL DEFAULT 'exists'
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_photos_taken_at
             ON photos(taken_at DESC)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_photos_category
             ON photos(category)",
            [],
        )?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Number of photos that still exist on disk
    pub fn photo_count(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM photos WHERE file_status = 'exists'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Insert a photo record.
    /// Returns false when a row with the same identifier already exists.
    pub fn insert_photo(&self, record: &PhotoRecord) -> Result<bool> {
        let image_json = serde_json::to_string(&record.image)?;
        let result = self.conn.execute(
            "INSERT INTO photos
                (identifier, title, image_json, taken_at, category, description, width, height, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                &record.identifier,
                &record.title,
                &image_json,
                record.date.map(|d| d.to_rfc3339()),
                &record.category,
                &record.description,
                record.width,
                record.height,
                Utc::now().timestamp(),
            ],
        );

        match result {
            Ok(_) => Ok(true),
            // UNIQUE constraint violation means the photo is already catalogued
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All existing photos, newest first.
    /// Ordering is repeated by `Catalog::from_records`; the index keeps it cheap.
    pub fn get_all_records(&self) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT identifier, title, image_json, taken_at, category, description, width, height
             FROM photos
             WHERE file_status = 'exists'
             ORDER BY taken_at DESC, id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<u32>>(6)?,
                row.get::<_, Option<u32>>(7)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (identifier, title, image_json, taken_at, category, description, width, height) = row?;
            let image = serde_json::from_str(&image_json).unwrap_or_else(|e| {
                warn!(identifier = %identifier, error = %e, "unreadable image locator");
                ImageLocator::Missing
            });
            records.push(PhotoRecord {
                identifier,
                title,
                image,
                date: taken_at.as_deref().and_then(parse_date),
                category,
                description,
                width,
                height,
            });
        }

        Ok(records)
    }

    /// Verify that local image files still exist on disk.
    /// Mark as 'deleted' if file is missing
    pub fn verify_files(&self) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, image_json FROM photos WHERE file_status = 'exists'")?;

        let existing: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();

        let mut deleted_count = 0;
        for (id, image_json) in existing {
            let Ok(ImageLocator::File(path)) = serde_json::from_str::<ImageLocator>(&image_json) else {
                continue;
            };
            if !path.exists() {
                self.conn.execute(
                    "UPDATE photos SET file_status = 'deleted' WHERE id = ?1",
                    rusqlite::params![id],
                )?;
                deleted_count += 1;
            }
        }

        if deleted_count > 0 {
            warn!(count = deleted_count, "marked missing photo files as deleted");
        }

        Ok(deleted_count)
    }

    /// Import every image below `folder`.
    ///
    /// Each file in a subfolder takes that top-level subfolder's name as its
    /// category; files directly in `folder` are uncategorised, unless
    /// `category` forces one for the whole import.
    pub fn import_folder(&self, folder: &Path, category: Option<&str>) -> Result<ImportResult> {
        let mut result = ImportResult::default();
        info!(folder = %folder.display(), "scanning folder");

        // Walk the directory tree recursively
        for entry in WalkDir::new(folder)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_image(path) {
                continue;
            }

            let record = record_for_file(folder, path, category);
            if self.insert_photo(&record)? {
                result.imported_count += 1;
                if result.imported_count % 100 == 0 {
                    info!(count = result.imported_count, "imported photos so far");
                }
            } else {
                result.skipped_count += 1;
            }
        }

        info!(
            imported = result.imported_count,
            skipped = result.skipped_count,
            "import complete"
        );
        Ok(result)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Build a catalog record for an image file found during import
fn record_for_file(root: &Path, path: &Path, forced_category: Option<&str>) -> PhotoRecord {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let folder_category = relative
        .parent()
        .and_then(|p| p.components().next())
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase());

    let title = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .replace(['_', '-'], " ");

    let date = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    // Dimensions are best effort; unreadable headers just leave them empty
    let (width, height) = match image::image_dimensions(path) {
        Ok((w, h)) => (Some(w), Some(h)),
        Err(_) => (None, None),
    };

    PhotoRecord {
        identifier: path.to_string_lossy().to_string(),
        title,
        image: ImageLocator::File(path.to_path_buf()),
        date,
        category: forced_category.map(str::to_string).or(folder_category),
        description: None,
        width,
        height,
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::record;

    #[test]
    fn test_insert_and_read_back() {
        let library = Library::in_memory().unwrap();
        let mut photo = record("sunset", "2024-05-01", Some("verfwerk"));
        photo.description = Some("paint on paper".into());
        photo.width = Some(2000);

        assert!(library.insert_photo(&photo).unwrap());
        assert_eq!(library.photo_count().unwrap(), 1);

        let records = library.get_all_records().unwrap();
        assert_eq!(records, vec![photo]);
    }

    #[test]
    fn test_duplicate_identifier_is_skipped() {
        let library = Library::in_memory().unwrap();
        let photo = record("sunset", "2024-05-01", None);
        assert!(library.insert_photo(&photo).unwrap());
        assert!(!library.insert_photo(&photo).unwrap());
        assert_eq!(library.photo_count().unwrap(), 1);
    }

    #[test]
    fn test_records_are_newest_first() {
        let library = Library::in_memory().unwrap();
        library.insert_photo(&record("old", "2020-01-01", None)).unwrap();
        library.insert_photo(&record("new", "2025-01-01", None)).unwrap();

        let titles: Vec<String> = library
            .get_all_records()
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[test]
    fn test_verify_files_marks_missing_files() {
        let library = Library::in_memory().unwrap();
        let mut photo = record("gone", "2024-01-01", None);
        photo.image = ImageLocator::File(PathBuf::from("/nonexistent/photo-gallery/gone.jpg"));
        library.insert_photo(&photo).unwrap();
        library.insert_photo(&record("remote", "2024-01-02", None)).unwrap();

        assert_eq!(library.verify_files().unwrap(), 1);
        assert_eq!(library.photo_count().unwrap(), 1);
        assert_eq!(library.get_all_records().unwrap()[0].title, "remote");
    }

    #[test]
    fn test_record_for_file_uses_top_level_folder_as_category() {
        let root = Path::new("/photos");
        let record = record_for_file(root, Path::new("/photos/Lego/castle/tower_west.jpg"), None);
        assert_eq!(record.category.as_deref(), Some("lego"));
        assert_eq!(record.title, "tower west");
        assert_eq!(record.image, ImageLocator::File(PathBuf::from("/photos/Lego/castle/tower_west.jpg")));

        let loose = record_for_file(root, Path::new("/photos/cover.png"), None);
        assert_eq!(loose.category, None);

        let forced = record_for_file(root, Path::new("/photos/cover.png"), Some("kleikunst"));
        assert_eq!(forced.category.as_deref(), Some("kleikunst"));
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.JPG")));
        assert!(is_image(Path::new("a.webp")));
        assert!(!is_image(Path::new("a.txt")));
        assert!(!is_image(Path::new("README")));
    }
}
