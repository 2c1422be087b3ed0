//! Shared helpers.

use std::path::Path;

/// Derive a document id from a file path: the file name minus its extension.
///
/// Only the final extension is removed, so `v1.2.md` becomes `v1.2`.
pub fn document_id(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(Path::new("notes/Alpha.md")), Some("Alpha".into()));
        assert_eq!(document_id(Path::new("v1.2.markdown")), Some("v1.2".into()));
        assert_eq!(
            document_id(Path::new("deep/dir/My Note.md")),
            Some("My Note".into())
        );
    }
}
