//! Reference resolution against the corpus identity set.

use std::collections::HashSet;
use vaultgraph_core::{Document, Link};

/// Case-sensitive set of every document id in a build
#[derive(Debug, Default, Clone)]
pub struct IdentitySet {
    ids: HashSet<String>,
}

impl IdentitySet {
    pub fn from_documents(documents: &[Document]) -> Self {
        Self {
            ids: documents.iter().map(|d| d.id.clone()).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Set `resolved_target` when the trimmed target matches an id exactly.
    /// Returns whether the link resolved.
    pub fn resolve(&self, link: &mut Link) -> bool {
        let target = link.raw_target.trim();
        link.resolved_target = self.contains(target).then(|| target.to_string());
        link.resolved_target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use vaultgraph_core::LinkKind;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document::new(*id, format!("{}.md", id), "", DateTime::<Utc>::UNIX_EPOCH))
            .collect()
    }

    #[test]
    fn test_exact_match_resolves() {
        let ids = IdentitySet::from_documents(&docs(&["Alpha", "Beta"]));
        let mut link = Link::new(LinkKind::Direct, "Alpha", "Beta", 1);
        assert!(ids.resolve(&mut link));
        assert_eq!(link.resolved_target.as_deref(), Some("Beta"));
    }

    #[test]
    fn test_case_sensitive() {
        let ids = IdentitySet::from_documents(&docs(&["Beta"]));
        let mut link = Link::new(LinkKind::Direct, "Alpha", "beta", 1);
        assert!(!ids.resolve(&mut link));
        assert!(link.resolved_target.is_none());
    }

    #[test]
    fn test_untrimmed_target_resolves() {
        let ids = IdentitySet::from_documents(&docs(&["Beta"]));
        let mut link = Link::new(LinkKind::Embed, "Alpha", " Beta ", 1);
        assert!(ids.resolve(&mut link));
    }
}
