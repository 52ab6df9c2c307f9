//! Decoded, assembled topology: the immutable per-process dataset.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use map_common::{BoundingBox, Coordinate, MapError, MapResult};

use crate::arc_usage::ArcUsage;
use crate::raw::TopologyDocument;

/// A resolved reference to an arc within one polygon ring.
///
/// Raw references are signed: a negative value means "traverse the arc
/// in reverse", with the bitwise inverse recovering the unsigned index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcReference {
    pub index: usize,
    pub reversed: bool,
}

impl ArcReference {
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Self {
                index: !raw as usize,
                reversed: true,
            }
        } else {
            Self {
                index: raw as usize,
                reversed: false,
            }
        }
    }
}

/// One ring vertex with its boundary classification.
///
/// `preferred_boundary` applies to the edge *leading into* this point;
/// strokes read the trailing point's flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPoint {
    pub coordinate: Coordinate,
    pub preferred_boundary: bool,
}

/// An area with its assembled polygon rings.
///
/// Areas split across several geometry records (islands) merge into one
/// entry keyed by code, each record contributing rings.
#[derive(Debug, Clone)]
pub struct AssembledArea {
    pub code: String,
    pub rings: Vec<Vec<RingPoint>>,
}

impl AssembledArea {
    /// Iterate every vertex across all rings.
    pub fn vertices(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.rings
            .iter()
            .flat_map(|ring| ring.iter().map(|p| p.coordinate))
    }
}

/// The decoded topology: absolute-coordinate arcs, assembled per-area
/// rings with boundary classification, and the dataset-wide bounding box.
///
/// Constructed once at process start and read-only for the process
/// lifetime, so concurrent render calls can share it without locking.
#[derive(Debug)]
pub struct TopologyDataset {
    arcs: Vec<Vec<Coordinate>>,
    areas: Vec<AssembledArea>,
    by_code: HashMap<String, usize>,
    bounds: BoundingBox,
}

impl TopologyDataset {
    /// Decode a topology document and assemble the named area layer.
    ///
    /// Fails on malformed JSON, a missing layer, or an arc reference
    /// pointing outside the arc table. Geometry records without an area
    /// code are non-area features in the layer and are skipped.
    pub fn from_json(json: &str, layer_name: &str) -> MapResult<Self> {
        let start = Instant::now();
        let document: TopologyDocument = serde_json::from_str(json)?;

        let arcs = decode_arcs(&document);
        let layer = document
            .objects
            .get(layer_name)
            .ok_or_else(|| MapError::LayerNotFound(layer_name.to_string()))?;

        // First pass: resolve arc references per area, merged by code.
        let mut geometries: Vec<(String, Vec<Vec<ArcReference>>)> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for geometry in &layer.geometries {
            let code = match geometry.properties.as_ref().and_then(|p| p.code.as_deref()) {
                Some(code) => code,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let rings = match geometry.rings() {
                Some(rings) => rings,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let mut resolved: Vec<Vec<ArcReference>> = Vec::with_capacity(rings.len());
            for ring in &rings {
                let ring: Vec<ArcReference> =
                    ring.iter().map(|&raw| ArcReference::from_raw(raw)).collect();
                for arc_ref in &ring {
                    if arc_ref.index >= arcs.len() {
                        return Err(MapError::ArcIndexOutOfRange {
                            index: arc_ref.index,
                            len: arcs.len(),
                        });
                    }
                }
                resolved.push(ring);
            }

            match index_of.get(code) {
                Some(&i) => geometries[i].1.extend(resolved),
                None => {
                    index_of.insert(code.to_string(), geometries.len());
                    geometries.push((code.to_string(), resolved));
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "skipped geometries without an area code");
        }

        // Second pass: aggregate arc usage across every reference.
        let usage = ArcUsage::build(
            arcs.len(),
            geometries
                .iter()
                .map(|(code, rings)| (region_of(code), rings.as_slice())),
        );

        // Third pass: assemble rings and the dataset bounding box.
        let mut bounds = BoundingBox::empty();
        let mut areas = Vec::with_capacity(geometries.len());
        let mut by_code = HashMap::with_capacity(geometries.len());

        for (code, rings) in geometries {
            let rings: Vec<Vec<RingPoint>> = rings
                .iter()
                .map(|ring| assemble_ring(&arcs, &usage, ring))
                .collect();
            for point in rings.iter().flatten() {
                bounds.include(point.coordinate);
            }
            by_code.insert(code.clone(), areas.len());
            areas.push(AssembledArea { code, rings });
        }

        info!(
            arcs = arcs.len(),
            areas = areas.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "topology dataset assembled"
        );

        Ok(Self {
            arcs,
            areas,
            by_code,
            bounds,
        })
    }

    /// Every assembled area, in document order.
    pub fn areas(&self) -> &[AssembledArea] {
        &self.areas
    }

    /// Look up an area by its code.
    pub fn area(&self, code: &str) -> Option<&AssembledArea> {
        self.by_code.get(code).map(|&i| &self.areas[i])
    }

    /// Bounding box over every decoded vertex of every area.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// The decoded arc table.
    pub fn arcs(&self) -> &[Vec<Coordinate>] {
        &self.arcs
    }
}

/// Top-level region identifier: the leading two bytes of a code. Codes
/// too short, or not starting with two single-byte characters, group as
/// their own region.
fn region_of(code: &str) -> &str {
    code.get(..2).unwrap_or(code)
}

/// Cumulative-sum decode of every arc, then the affine transform.
fn decode_arcs(document: &TopologyDocument) -> Vec<Vec<Coordinate>> {
    let [scale_x, scale_y] = document.transform.scale;
    let [translate_x, translate_y] = document.transform.translate;

    document
        .arcs
        .iter()
        .map(|deltas| {
            let mut x = 0i64;
            let mut y = 0i64;
            deltas
                .iter()
                .filter(|pair| pair.len() >= 2)
                .map(|pair| {
                    x += pair[0];
                    y += pair[1];
                    Coordinate::new(
                        x as f64 * scale_x + translate_x,
                        y as f64 * scale_y + translate_y,
                    )
                })
                .collect()
        })
        .collect()
}

/// Concatenate a ring's arcs into one closed point sequence.
///
/// The ring's leading point is unclassified (its edge is the closing
/// edge); every other point, including each subsequent arc's own first
/// point, carries the classification of the arc it belongs to.
fn assemble_ring(
    arcs: &[Vec<Coordinate>],
    usage: &ArcUsage,
    ring: &[ArcReference],
) -> Vec<RingPoint> {
    let mut points = Vec::new();
    for (arc_position, arc_ref) in ring.iter().enumerate() {
        let preferred = usage.is_preferred_boundary(arc_ref.index);
        let arc = &arcs[arc_ref.index];

        let push = |points: &mut Vec<RingPoint>, i: usize, coordinate: Coordinate| {
            points.push(RingPoint {
                coordinate,
                preferred_boundary: !(arc_position == 0 && i == 0) && preferred,
            });
        };

        if arc_ref.reversed {
            for (i, &coordinate) in arc.iter().rev().enumerate() {
                push(&mut points, i, coordinate);
            }
        } else {
            for (i, &coordinate) in arc.iter().enumerate() {
                push(&mut points, i, coordinate);
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_reference_from_raw() {
        assert_eq!(
            ArcReference::from_raw(3),
            ArcReference {
                index: 3,
                reversed: false
            }
        );
        // Bitwise inverse: -1 -> 0, -4 -> 3.
        assert_eq!(
            ArcReference::from_raw(-1),
            ArcReference {
                index: 0,
                reversed: true
            }
        );
        assert_eq!(
            ArcReference::from_raw(-4),
            ArcReference {
                index: 3,
                reversed: true
            }
        );
    }

    #[test]
    fn test_delta_decode_round_trip() {
        let document: TopologyDocument = serde_json::from_str(
            r#"{
                "arcs": [[[2, 2], [1, 1], [-1, 0]]],
                "transform": { "scale": [1.0, 1.0], "translate": [0.0, 0.0] },
                "objects": {}
            }"#,
        )
        .unwrap();

        let arcs = decode_arcs(&document);
        assert_eq!(
            arcs[0],
            vec![
                Coordinate::new(2.0, 2.0),
                Coordinate::new(3.0, 3.0),
                Coordinate::new(2.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_delta_decode_applies_transform() {
        let document: TopologyDocument = serde_json::from_str(
            r#"{
                "arcs": [[[10, 20], [5, -10]]],
                "transform": { "scale": [0.1, 0.5], "translate": [100.0, 30.0] },
                "objects": {}
            }"#,
        )
        .unwrap();

        let arcs = decode_arcs(&document);
        assert_eq!(arcs[0][0], Coordinate::new(101.0, 40.0));
        assert_eq!(arcs[0][1], Coordinate::new(101.5, 35.0));
    }

    #[test]
    fn test_reversed_reference_reverses_points() {
        let arcs = vec![vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
        ]];
        let usage = ArcUsage::build(1, std::iter::empty::<(&str, &[Vec<ArcReference>])>());
        let ring = vec![ArcReference::from_raw(-1)];

        let points = assemble_ring(&arcs, &usage, &ring);
        let coordinates: Vec<Coordinate> = points.iter().map(|p| p.coordinate).collect();
        assert_eq!(
            coordinates,
            vec![
                Coordinate::new(2.0, 2.0),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(0.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_region_of() {
        assert_eq!(region_of("01001"), "01");
        assert_eq!(region_of("7"), "7");
        // Multibyte leading character must not split mid-char.
        assert_eq!(region_of("東京01"), "東京01");
    }
}
