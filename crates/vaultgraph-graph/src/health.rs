//! Corpus-wide link health statistics.

use crate::index::CorpusIndex;
use serde::{Deserialize, Serialize};

/// Link health summary of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkHealth {
    pub total_documents: usize,
    /// Resolved link occurrences
    pub total_links: usize,
    pub broken_links: usize,
    pub orphaned_documents: usize,
    pub documents_without_incoming: usize,
    pub documents_without_outgoing: usize,
    pub average_outgoing: f64,
    pub average_incoming: f64,
}

impl LinkHealth {
    /// Compute statistics over a built index
    pub fn from_index(index: &CorpusIndex) -> Self {
        let total_documents = index.document_count();
        let total_links = index.resolved_link_count();

        let mut orphaned = 0;
        let mut without_incoming = 0;
        let mut without_outgoing = 0;
        let mut incoming_total = 0;

        for id in index.document_ids() {
            let (out, inc) = (index.out_degree(id), index.in_degree(id));
            incoming_total += inc;
            if out == 0 {
                without_outgoing += 1;
            }
            if inc == 0 {
                without_incoming += 1;
            }
            if out == 0 && inc == 0 {
                orphaned += 1;
            }
        }

        Self {
            total_documents,
            total_links,
            broken_links: index.broken_link_count(),
            orphaned_documents: orphaned,
            documents_without_incoming: without_incoming,
            documents_without_outgoing: without_outgoing,
            average_outgoing: average(total_links, total_documents),
            average_incoming: average(incoming_total, total_documents),
        }
    }

    /// Share of resolved links among all extracted links, in percent
    pub fn resolution_rate(&self) -> f64 {
        let all = self.total_links + self.broken_links;
        if all == 0 {
            return 100.0;
        }
        round2(self.total_links as f64 * 100.0 / all as f64)
    }
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(total as f64 / count as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
