//! Classification of the text between `[[` and `]]`.

use vaultgraph_core::LinkKind;

/// A classified reference body, before it is attached to a source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub kind: LinkKind,
    pub target: String,
    pub alias: Option<String>,
    pub section_name: Option<String>,
    pub block_id: Option<String>,
}

/// Classify a reference body into a [`ParsedReference`].
///
/// The alias is split off at the first `|`. The remaining text is split at the
/// first `#`; `#^` marks a block reference and a bare `#` a section. Embeds
/// keep [`LinkKind::Embed`] and drop any qualifier. Returns `None` when the
/// trimmed target is empty, as in `[[#Heading]]` or `[[ |text]]`.
///
/// # Examples
///
/// ```
/// use vaultgraph_parser::link_utils::classify_reference;
/// use vaultgraph_core::LinkKind;
///
/// let r = classify_reference("Target#^blockid", false).unwrap();
/// assert_eq!(r.kind, LinkKind::Block);
/// assert_eq!(r.target, "Target");
/// assert_eq!(r.block_id.as_deref(), Some("blockid"));
///
/// assert!(classify_reference("#Heading", false).is_none());
/// ```
pub fn classify_reference(body: &str, embed: bool) -> Option<ParsedReference> {
    let (target_part, alias) = match body.split_once('|') {
        Some((target, alias)) => (target, non_empty(alias)),
        None => (body, None),
    };

    let (target, qualifier) = match target_part.find('#') {
        Some(hash_pos) => {
            let rest = &target_part[hash_pos + 1..];
            let qualifier = match rest.strip_prefix('^') {
                Some(block) => Qualifier::Block(block),
                None => Qualifier::Section(rest),
            };
            (&target_part[..hash_pos], qualifier)
        }
        None => (target_part, Qualifier::None),
    };

    let target = target.trim();
    if target.is_empty() {
        return None;
    }

    let mut parsed = ParsedReference {
        kind: LinkKind::Direct,
        target: target.to_string(),
        alias,
        section_name: None,
        block_id: None,
    };

    if embed {
        parsed.kind = LinkKind::Embed;
        return Some(parsed);
    }

    match qualifier {
        Qualifier::Block(id) => {
            if let Some(id) = non_empty(id) {
                parsed.kind = LinkKind::Block;
                parsed.block_id = Some(id);
            }
        }
        Qualifier::Section(name) => {
            if let Some(name) = non_empty(name) {
                parsed.kind = LinkKind::Section;
                parsed.section_name = Some(name);
            }
        }
        Qualifier::None => {}
    }

    Some(parsed)
}

enum Qualifier<'a> {
    None,
    Section(&'a str),
    Block(&'a str),
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
