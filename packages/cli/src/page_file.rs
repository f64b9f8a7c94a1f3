//! Reading and writing page documents on disk

use anyhow::{Context, Result};
use pagecraft_common::FileSystem;
use pagecraft_editor::PageStore;
use std::path::Path;

/// Load a page file into a fresh editing store
pub fn open_page(fs: &impl FileSystem, path: &Path) -> Result<PageStore> {
    let source = fs
        .read_to_string(path)
        .with_context(|| format!("Cannot read page {}", path.display()))?;

    let mut store = PageStore::new();
    store
        .import_page(&source)
        .with_context(|| format!("Cannot load page {}", path.display()))?;

    Ok(store)
}

/// Write the store's document back as pretty JSON
pub fn save_page(fs: &mut impl FileSystem, path: &Path, store: &PageStore) -> Result<()> {
    let mut json = store.export_page()?;
    json.push('\n');

    fs.write(path, json.as_bytes())
        .with_context(|| format!("Cannot write page {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MockFileSystem;

    #[test]
    fn test_open_edit_save() {
        let mut fs = MockFileSystem::new();
        let path = Path::new("pages/home.json");
        fs.add_file(
            path,
            r#"{ "id": "p", "slug": "home", "meta": { "title": "Home" }, "blocks": [] }"#,
        );

        let mut store = open_page(&fs, path).unwrap();
        store.add_block("navbar", None).unwrap();
        save_page(&mut fs, path, &store).unwrap();

        let reopened = open_page(&fs, path).unwrap();
        assert_eq!(reopened.document(), store.document());
    }

    #[test]
    fn test_open_reports_missing_and_malformed_files() {
        let mut fs = MockFileSystem::new();
        fs.add_file("bad.json", "{}");

        let missing = open_page(&fs, Path::new("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("missing.json"));

        let malformed = open_page(&fs, Path::new("bad.json")).unwrap_err();
        assert!(format!("{:#}", malformed).contains("Malformed document"));
    }
}
