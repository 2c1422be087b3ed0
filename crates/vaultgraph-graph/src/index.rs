//! Immutable corpus index and the queries answered from it.
//!
//! A [`CorpusIndex`] is built once from a complete set of documents and their
//! extracted links, then only read. All maps are keyed by document id in a
//! `BTreeMap`, which gives the lexicographic corpus ordering every report uses.

use crate::resolver::IdentitySet;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use vaultgraph_core::{Diagnostic, Document, Link, LinkKind, MAX_DEPTH};

/// A resolved link seen from its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingRef {
    pub source: String,
    pub link: Link,
}

/// An unresolved link, positioned in its source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub source: String,
    pub broken_target: String,
    pub kind: LinkKind,
    pub line: usize,
}

/// All broken links of one source document, in line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBrokenLinks {
    pub source: String,
    pub links: Vec<BrokenLink>,
}

/// Resolved degree of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubEntry {
    pub id: String,
    pub degree: usize,
}

/// A document reached by a bounded neighborhood walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub distance: usize,
}

/// Immutable snapshot of the resolved link structure of a corpus
#[derive(Debug)]
pub struct CorpusIndex {
    generation: u64,
    documents: BTreeSet<String>,
    outgoing: BTreeMap<String, Vec<Link>>,
    incoming: BTreeMap<String, Vec<IncomingRef>>,
    broken: BTreeMap<String, Vec<Link>>,
    diagnostics: Vec<Diagnostic>,
    /// One node per document, one edge per resolved link occurrence
    graph: DiGraph<String, LinkKind>,
    node_index: HashMap<String, NodeIndex>,
}

impl CorpusIndex {
    /// Resolve extracted links and assemble the index.
    ///
    /// `extracted[i]` holds the links of `documents[i]`. Document ids must be
    /// unique; resolution only starts once every document is known.
    pub fn build(
        documents: &[Document],
        extracted: Vec<Vec<Link>>,
        diagnostics: Vec<Diagnostic>,
        generation: u64,
    ) -> Self {
        let identities = IdentitySet::from_documents(documents);

        let mut index = Self {
            generation,
            documents: documents.iter().map(|d| d.id.clone()).collect(),
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
            broken: BTreeMap::new(),
            diagnostics,
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        };

        // nodes in id order so petgraph indices are stable across builds
        for id in &index.documents {
            let node = index.graph.add_node(id.clone());
            index.node_index.insert(id.clone(), node);
        }

        let mut by_source: BTreeMap<&str, Vec<Link>> = BTreeMap::new();
        for (doc, links) in documents.iter().zip(extracted) {
            by_source.entry(doc.id.as_str()).or_default().extend(links);
        }

        for (source, links) in by_source {
            for mut link in links {
                if identities.resolve(&mut link) {
                    index.outgoing.entry(source.to_string()).or_default().push(link);
                } else {
                    index.broken.entry(source.to_string()).or_default().push(link);
                }
            }
        }

        // sources are visited in id order and links in line order, which is
        // exactly the ordering required for incoming lists
        for (source, links) in &index.outgoing {
            for link in links {
                let Some(target) = link.resolved_target.as_ref() else {
                    continue;
                };
                index
                    .incoming
                    .entry(target.clone())
                    .or_default()
                    .push(IncomingRef {
                        source: source.clone(),
                        link: link.clone(),
                    });

                if let (Some(&from), Some(&to)) =
                    (index.node_index.get(source), index.node_index.get(target))
                {
                    index.graph.add_edge(from, to, link.kind);
                }
            }
        }

        index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains(id)
    }

    /// Document ids in corpus order
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }

    pub fn resolved_link_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn broken_link_count(&self) -> usize {
        self.broken.values().map(Vec::len).sum()
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing.get(id).map_or(0, Vec::len)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming.get(id).map_or(0, Vec::len)
    }

    /// Incoming resolved links of `target`, ordered by source id then line
    pub fn backlinks(&self, target: &str) -> &[IncomingRef] {
        self.incoming.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolved outgoing links of `source`, in document order
    pub fn outgoing_links(&self, source: &str) -> &[Link] {
        self.outgoing.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unresolved links grouped by source document, in corpus order
    pub fn broken_links(&self) -> Vec<DocumentBrokenLinks> {
        self.broken
            .iter()
            .map(|(source, links)| DocumentBrokenLinks {
                source: source.clone(),
                links: links
                    .iter()
                    .map(|link| BrokenLink {
                        source: source.clone(),
                        broken_target: link.raw_target.clone(),
                        kind: link.kind,
                        line: link.line,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Documents with no resolved links in either direction
    pub fn orphans(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|id| self.out_degree(id) == 0 && self.in_degree(id) == 0)
            .cloned()
            .collect()
    }

    /// Documents whose resolved degree is at least `threshold`.
    ///
    /// Every link occurrence counts, so two links from A to B add two to the
    /// degree of each. Sorted by degree descending, then id ascending.
    pub fn hubs(&self, threshold: usize) -> Vec<HubEntry> {
        let mut hubs: Vec<HubEntry> = self
            .documents
            .iter()
            .map(|id| HubEntry {
                id: id.clone(),
                degree: self.out_degree(id) + self.in_degree(id),
            })
            .filter(|entry| entry.degree >= threshold)
            .collect();

        hubs.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.id.cmp(&b.id)));
        hubs
    }

    /// Breadth-first neighborhood of `start` over links in both directions.
    ///
    /// `depth` is clamped to `1..=MAX_DEPTH`. The start document is never
    /// reported, and each document appears once at its shortest distance.
    /// Results are ordered by distance, then id.
    pub fn connections(&self, start: &str, depth: i64) -> Vec<Connection> {
        let Some(&start_node) = self.node_index.get(start) else {
            return Vec::new();
        };
        let max_depth = clamp_depth(depth);

        let mut distances: HashMap<NodeIndex, usize> = HashMap::new();
        distances.insert(start_node, 0);
        let mut queue = VecDeque::from([(start_node, 0usize)]);

        while let Some((node, distance)) = queue.pop_front() {
            if distance == max_depth {
                continue;
            }
            for neighbor in self.graph.neighbors_undirected(node) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, distance + 1);
                    queue.push_back((neighbor, distance + 1));
                }
            }
        }

        let mut reached: Vec<Connection> = distances
            .into_iter()
            .filter(|(node, _)| *node != start_node)
            .map(|(node, distance)| Connection {
                id: self.graph[node].clone(),
                distance,
            })
            .collect();

        reached.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.id.cmp(&b.id)));
        reached
    }
}

/// Clamp a requested traversal depth into `1..=MAX_DEPTH`
pub fn clamp_depth(depth: i64) -> usize {
    depth.clamp(1, MAX_DEPTH as i64) as usize
}
