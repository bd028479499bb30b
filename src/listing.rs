//! Gallery directory listing.
//!
//! Enumerates the image files directly inside the gallery directory. The
//! listing is non-recursive and tracks nothing but filenames: eligibility
//! is decided purely by extension, and ordering is descending lexicographic.
//! Generation pipelines name outputs with ascending counters or timestamps,
//! so descending filename order puts the newest images first.
//!
//! Enumeration failure (missing directory, permission error) degrades to an
//! empty listing. The gallery renders as "no images" instead of taking the
//! server down with it.

use std::fs;
use std::path::Path;

/// Extensions recognized as gallery images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// List image filenames directly inside `dir`, sorted descending.
pub fn list_images(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_image(p))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect(),
        Err(_) => Vec::new(),
    };

    files.sort_unstable_by(|a, b| b.cmp(a));
    files
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "fake image").unwrap();
    }

    #[test]
    fn lists_only_recognized_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.jpg");
        touch(tmp.path(), "c.jpeg");
        touch(tmp.path(), "d.gif");
        touch(tmp.path(), "e.webp");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "manifest.json");

        let files = list_images(tmp.path());
        assert_eq!(files.len(), 5);
        assert!(!files.iter().any(|f| f == "notes.txt"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "IMAGE.PNG");
        touch(tmp.path(), "photo.Jpg");

        let files = list_images(tmp.path());
        assert_eq!(files, vec!["photo.Jpg".to_string(), "IMAGE.PNG".to_string()]);
    }

    #[test]
    fn order_is_descending_lexicographic() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "c.png");
        touch(tmp.path(), "b.png");

        let files = list_images(tmp.path());
        assert_eq!(files, vec!["c.png", "b.png", "a.png"]);
    }

    #[test]
    fn subdirectories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested.png")).unwrap();
        fs::create_dir(tmp.path().join("more")).unwrap();
        touch(&tmp.path().join("more"), "inner.png");
        touch(tmp.path(), "top.png");

        let files = list_images(tmp.path());
        assert_eq!(files, vec!["top.png"]);
    }

    #[test]
    fn missing_directory_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("does-not-exist");
        assert!(list_images(&gone).is_empty());
    }
}
