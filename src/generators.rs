//! Reference candidate generators.
//!
//! The pipeline consumes any [`CandidateSource`]; these implementations
//! cover the common enumeration shapes: every occupation of a selected
//! site subset, and the pre-reduced variant whose output is guaranteed
//! database-ready.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cache::CanonicalCache;
use crate::pipeline::{CandidateSource, InputError};
use crate::types::cell::Cell;
use crate::types::config::Config;

/// Input spec for occupation enumeration: a starting cell, the occupation
/// arity, and an optional subset of sites to vary. Unselected sites keep
/// occupation zero; an absent subset selects every site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccEnumInput {
    /// The cell whose sites are enumerated.
    pub cell: Cell,
    /// Number of occupation values per site.
    pub arity: u8,
    /// Sites allowed to vary; `None` selects all.
    pub sites: Option<BTreeSet<usize>>,
}

impl OccEnumInput {
    /// Input selecting every site of the cell.
    pub fn new(cell: Cell, arity: u8) -> Self {
        Self {
            cell,
            arity,
            sites: None,
        }
    }

    /// Restrict enumeration to a site subset.
    pub fn with_sites(mut self, sites: BTreeSet<usize>) -> Self {
        self.sites = Some(sites);
        self
    }

    /// Validate and resolve the selected sites in increasing order.
    fn selected_sites(&self) -> Result<Vec<usize>, InputError> {
        if self.arity == 0 {
            return Err(InputError::new("occupation arity must be at least 1"));
        }
        let volume = self.cell.volume();
        match &self.sites {
            None => Ok((0..volume).collect()),
            Some(sites) if sites.is_empty() => {
                Err(InputError::new("site selection must not be empty"))
            }
            Some(sites) => {
                if let Some(&out_of_range) = sites.iter().find(|&&site| site >= volume) {
                    return Err(InputError::new(format!(
                        "site {out_of_range} out of range for volume {volume}"
                    )));
                }
                Ok(sites.iter().copied().collect())
            }
        }
    }
}

/// Odometer enumeration of every occupation of the selected sites.
///
/// Candidates come out in lexicographic counter order, last selected site
/// varying fastest. Output is raw: not deduplicated, not canonical.
pub struct AllOccupationsSource {
    cell: Cell,
    arity: u8,
    sites: Vec<usize>,
    counters: Vec<u8>,
    exhausted: bool,
}

impl AllOccupationsSource {
    /// Build from a validated input spec.
    pub fn new(input: &OccEnumInput) -> Result<Self, InputError> {
        let sites = input.selected_sites()?;
        let counters = vec![0u8; sites.len()];
        Ok(Self {
            cell: input.cell,
            arity: input.arity,
            sites,
            counters,
            exhausted: false,
        })
    }

    fn advance(&mut self) {
        let mut slot = self.sites.len();
        loop {
            if slot == 0 {
                self.exhausted = true;
                return;
            }
            slot -= 1;
            self.counters[slot] += 1;
            if self.counters[slot] < self.arity {
                return;
            }
            self.counters[slot] = 0;
        }
    }
}

impl Iterator for AllOccupationsSource {
    type Item = Config;

    fn next(&mut self) -> Option<Config> {
        if self.exhausted {
            return None;
        }
        let mut occupation = vec![0u8; self.cell.volume()];
        for (slot, &site) in self.sites.iter().enumerate() {
            occupation[site] = self.counters[slot];
        }
        let candidate = Config::new(self.cell, occupation);
        self.advance();
        Some(candidate)
    }
}

impl CandidateSource for AllOccupationsSource {}

/// Enumeration of the distinct primitive canonical records reachable from
/// an input spec.
///
/// Each orbit's record is yielded exactly once, in first-seen order.
/// Output is guaranteed database-ready, so the pipeline inserts it
/// directly.
pub struct DistinctOccupationsSource {
    inner: AllOccupationsSource,
    seen: BTreeSet<Config>,
    records: CanonicalCache<Config>,
    done: bool,
}

impl DistinctOccupationsSource {
    /// Build from a validated input spec.
    pub fn new(input: &OccEnumInput) -> Result<Self, InputError> {
        Ok(Self {
            inner: AllOccupationsSource::new(input)?,
            seen: BTreeSet::new(),
            records: CanonicalCache::new(1024),
            done: false,
        })
    }
}

impl Iterator for DistinctOccupationsSource {
    type Item = Config;

    fn next(&mut self) -> Option<Config> {
        if self.done {
            return None;
        }
        for candidate in self.inner.by_ref() {
            let record = match self
                .records
                .get_or_compute(&candidate, || candidate.primitive().canonical_record())
            {
                Ok(record) => record,
                Err(error) => {
                    // Cells guarantee a nonempty permutation range, so this
                    // is unreachable for well-formed input; end the stream
                    // loudly rather than yield unreduced candidates.
                    tracing::error!(error = %error, "canonical reduction failed; ending stream");
                    self.done = true;
                    return None;
                }
            };
            if self.seen.insert(record.clone()) {
                return Some(record);
            }
        }
        self.done = true;
        None
    }
}

impl CandidateSource for DistinctOccupationsSource {
    fn is_guaranteed_db_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_occupations_counts() {
        let input = OccEnumInput::new(Cell::of_volume(3), 2);
        let source = AllOccupationsSource::new(&input).unwrap();
        let candidates: Vec<_> = source.collect();
        assert_eq!(candidates.len(), 8);
        assert_eq!(candidates[0].occupation(), &[0, 0, 0]);
        assert_eq!(candidates[7].occupation(), &[1, 1, 1]);
    }

    #[test]
    fn test_site_subset_keeps_background_zero() {
        let input = OccEnumInput::new(Cell::of_volume(4), 2)
            .with_sites(BTreeSet::from([1, 3]));
        let source = AllOccupationsSource::new(&input).unwrap();
        let candidates: Vec<_> = source.collect();
        assert_eq!(candidates.len(), 4);
        for candidate in &candidates {
            assert_eq!(candidate.occupation()[0], 0);
            assert_eq!(candidate.occupation()[2], 0);
        }
    }

    #[test]
    fn test_zero_arity_rejected() {
        let input = OccEnumInput::new(Cell::of_volume(3), 0);
        assert!(AllOccupationsSource::new(&input).is_err());
    }

    #[test]
    fn test_empty_site_selection_rejected() {
        let input = OccEnumInput::new(Cell::of_volume(3), 2).with_sites(BTreeSet::new());
        assert!(AllOccupationsSource::new(&input).is_err());
    }

    #[test]
    fn test_out_of_range_site_rejected() {
        let input = OccEnumInput::new(Cell::of_volume(3), 2)
            .with_sites(BTreeSet::from([0, 3]));
        let error = AllOccupationsSource::new(&input).err().unwrap();
        assert!(error.reason.contains("out of range"));
    }

    #[test]
    fn test_distinct_source_yields_one_record_per_orbit() {
        // Binary occupations of a 3-ring: orbits are the all-zero, the
        // all-one, the single-one, and the single-zero patterns; every
        // record is primitive canonical.
        let input = OccEnumInput::new(Cell::of_volume(3), 2);
        let source = DistinctOccupationsSource::new(&input).unwrap();
        assert!(source.is_guaranteed_db_ready());
        let records: Vec<_> = source.collect();
        assert_eq!(records.len(), 4);
        for record in &records {
            assert!(record.is_primitive());
            assert!(record.is_canonical().unwrap());
        }
    }

    #[test]
    fn test_distinct_source_is_deduplicated() {
        let input = OccEnumInput::new(Cell::of_volume(4), 2);
        let records: Vec<_> = DistinctOccupationsSource::new(&input).unwrap().collect();
        let unique: BTreeSet<_> = records.iter().cloned().collect();
        assert_eq!(records.len(), unique.len());
    }
}
