//! Per-arc reference aggregation for boundary classification.

use std::collections::HashSet;

use crate::dataset::ArcReference;

/// Which top-level regions reference each arc, and how often in total.
///
/// Built in a single aggregation pass after all area geometries are
/// known; read-only afterwards. An arc separates two regions when more
/// than one region references it, and is an unshared outer edge when it
/// is referenced exactly once — both render with the heavy stroke.
#[derive(Debug, Default)]
pub struct ArcUsage {
    entries: Vec<ArcUse>,
}

#[derive(Debug, Default, Clone)]
struct ArcUse {
    regions: HashSet<String>,
    total: u32,
}

impl ArcUsage {
    /// Aggregate over every ring of every `(region, rings)` pair.
    pub fn build<'a, I>(arc_count: usize, references: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [Vec<ArcReference>])>,
    {
        let mut entries = vec![ArcUse::default(); arc_count];
        for (region, rings) in references {
            for ring in rings {
                for arc_ref in ring {
                    let entry = &mut entries[arc_ref.index];
                    entry.regions.insert(region.to_string());
                    entry.total += 1;
                }
            }
        }
        Self { entries }
    }

    /// True when the arc should stroke with the preferred (heavy) weight:
    /// it borders more than one top-level region, or nothing shares it.
    pub fn is_preferred_boundary(&self, arc_index: usize) -> bool {
        match self.entries.get(arc_index) {
            Some(entry) => entry.regions.len() > 1 || entry.total == 1,
            None => false,
        }
    }

    /// Total number of geometry references to the arc.
    pub fn total_count(&self, arc_index: usize) -> u32 {
        self.entries.get(arc_index).map_or(0, |e| e.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(indices: &[i64]) -> Vec<Vec<ArcReference>> {
        vec![indices.iter().map(|&i| ArcReference::from_raw(i)).collect()]
    }

    #[test]
    fn test_cross_region_arc_is_preferred() {
        let a = refs(&[0]);
        let b = refs(&[-1]); // same arc, reversed
        let usage = ArcUsage::build(1, [("01", a.as_slice()), ("02", b.as_slice())]);
        assert!(usage.is_preferred_boundary(0));
        assert_eq!(usage.total_count(0), 2);
    }

    #[test]
    fn test_shared_within_one_region_is_interior() {
        let a = refs(&[0]);
        let b = refs(&[-1]);
        let usage = ArcUsage::build(1, [("01", a.as_slice()), ("01", b.as_slice())]);
        assert!(!usage.is_preferred_boundary(0));
    }

    #[test]
    fn test_unshared_outer_edge_is_preferred() {
        let a = refs(&[0]);
        let usage = ArcUsage::build(1, [("01", a.as_slice())]);
        assert!(usage.is_preferred_boundary(0));
        assert_eq!(usage.total_count(0), 1);
    }

    #[test]
    fn test_unreferenced_arc() {
        let usage = ArcUsage::build(2, std::iter::empty::<(&str, &[Vec<ArcReference>])>());
        assert!(!usage.is_preferred_boundary(0));
        assert!(!usage.is_preferred_boundary(5));
    }
}
