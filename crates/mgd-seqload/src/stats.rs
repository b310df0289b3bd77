//! Per-run counters

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::decider::Organism;

/// Counters accumulated over one load run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub records_read: usize,
    /// Records `is_valid` turned away
    pub records_skipped: usize,
    pub records_loaded: usize,
    pub format_errors: usize,
    pub resolve_errors: usize,
    pub references_associated: usize,
    /// Citations on loaded records that matched no MGI reference
    pub references_unresolved: usize,
    /// Citations on loaded records that repeated an already associated reference
    pub references_duplicate: usize,
    /// Records accepted per organism decider
    pub organism_matches: BTreeMap<Organism, usize>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_organism(&mut self, organism: Organism) {
        *self.organism_matches.entry(organism).or_default() += 1;
    }

    pub fn failed(&self) -> usize {
        self.format_errors + self.resolve_errors
    }

    pub fn log_summary(&self, load: &str) {
        info!(
            load,
            read = self.records_read,
            loaded = self.records_loaded,
            skipped = self.records_skipped,
            format_errors = self.format_errors,
            resolve_errors = self.resolve_errors,
            "Load complete"
        );
        if self.references_associated > 0 || self.references_unresolved > 0 {
            info!(
                associated = self.references_associated,
                unresolved = self.references_unresolved,
                duplicate = self.references_duplicate,
                "Reference associations"
            );
        }
        for (organism, count) in &self.organism_matches {
            info!(%organism, count, "Organism decider matches");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_organism() {
        let mut stats = LoadStats::new();
        stats.record_organism(Organism::Mouse);
        stats.record_organism(Organism::Mouse);
        stats.record_organism(Organism::Rat);

        assert_eq!(stats.organism_matches.get(&Organism::Mouse), Some(&2));
        assert_eq!(stats.organism_matches.get(&Organism::Human), None);
    }

    #[test]
    fn test_failed() {
        let stats = LoadStats {
            format_errors: 2,
            resolve_errors: 1,
            ..LoadStats::default()
        };
        assert_eq!(stats.failed(), 3);
    }
}
