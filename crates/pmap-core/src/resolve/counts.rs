use serde::{Deserialize, Serialize};

/// Scale of one resolved request. `request_units` is the only metric
/// guardrails act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionCounts {
    #[serde(rename = "item_ids")]
    pub identifiers: usize,
    pub locations: usize,
    pub qualities: usize,
    pub request_units: usize,
}

impl ResolutionCounts {
    pub fn new(identifiers: usize, locations: usize, qualities: usize) -> Self {
        Self {
            identifiers,
            locations,
            qualities,
            request_units: request_units(identifiers, locations, qualities),
        }
    }

    /// Same locations and qualities, different identifier count.
    pub fn with_identifiers(&self, identifiers: usize) -> Self {
        Self::new(identifiers, self.locations, self.qualities)
    }
}

/// `identifiers * max(1, locations) * max(1, qualities)`, saturating.
pub fn request_units(identifiers: usize, locations: usize, qualities: usize) -> usize {
    identifiers
        .saturating_mul(locations.max(1))
        .saturating_mul(qualities.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_axes_count_as_one() {
        assert_eq!(request_units(3, 0, 0), 3);
        assert_eq!(request_units(3, 2, 0), 6);
        assert_eq!(request_units(3, 0, 4), 12);
        assert_eq!(request_units(0, 5, 5), 0);
    }

    #[test]
    fn formula_holds_for_small_grid() {
        for ids in 0..5 {
            for locs in 0..4 {
                for quals in 0..4 {
                    let c = ResolutionCounts::new(ids, locs, quals);
                    assert_eq!(c.request_units, ids * locs.max(1) * quals.max(1));
                }
            }
        }
    }

    #[test]
    fn huge_inputs_saturate() {
        assert_eq!(request_units(usize::MAX, 2, 2), usize::MAX);
    }

    #[test]
    fn with_identifiers_recomputes_units() {
        let before = ResolutionCounts::new(3, 2, 1);
        let after = before.with_identifiers(1);
        assert_eq!(after.request_units, 2);
        assert_eq!(after.locations, 2);
    }

    #[test]
    fn serializes_identifier_count_as_item_ids() {
        let v = serde_json::to_value(ResolutionCounts::new(3, 2, 1)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"item_ids": 3, "locations": 2, "qualities": 1, "request_units": 6})
        );
    }
}
