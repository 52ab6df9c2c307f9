//! Serde types mirroring the raw topology document.
//!
//! Only the fields the assembler consumes are modeled; unknown fields
//! are ignored. Geometry `arcs` nesting depends on the geometry type, so
//! they are held as raw JSON and normalized during assembly.

use std::collections::HashMap;

use serde::Deserialize;

/// Root of a topology document.
#[derive(Debug, Deserialize)]
pub struct TopologyDocument {
    /// Delta-encoded arcs: each arc is a list of `[dx, dy]` integer pairs,
    /// the first pair being absolute in quantized space.
    pub arcs: Vec<Vec<Vec<i64>>>,
    pub transform: Transform,
    /// Named feature layers. The assembler consumes one by name.
    pub objects: HashMap<String, Layer>,
}

/// Quantization transform: `absolute = cumulative * scale + translate`.
#[derive(Debug, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub struct Layer {
    pub geometries: Vec<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `Vec<Vec<i64>>` for Polygon, `Vec<Vec<Vec<i64>>>` for MultiPolygon.
    #[serde(default)]
    pub arcs: serde_json::Value,
    #[serde(default)]
    pub properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
pub struct Properties {
    /// Area code; the first two characters identify the top-level region.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Geometry {
    /// Normalize `arcs` into a flat list of rings of signed arc indices.
    ///
    /// Polygon rings are taken as-is; MultiPolygon polygons are flattened
    /// into one ring list (ring identity is all the assembler needs).
    /// Returns `None` for non-area geometry kinds or malformed nesting.
    pub fn rings(&self) -> Option<Vec<Vec<i64>>> {
        fn ring(value: &serde_json::Value) -> Option<Vec<i64>> {
            value
                .as_array()?
                .iter()
                .map(|v| v.as_i64())
                .collect::<Option<Vec<i64>>>()
        }

        let arcs = self.arcs.as_array()?;
        match self.kind.as_str() {
            "Polygon" => arcs.iter().map(ring).collect(),
            "MultiPolygon" => {
                let mut rings = Vec::new();
                for polygon in arcs {
                    for r in polygon.as_array()? {
                        rings.push(ring(r)?);
                    }
                }
                Some(rings)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_rings() {
        let geometry: Geometry = serde_json::from_str(
            r#"{ "type": "Polygon", "arcs": [[0, 1], [-3]], "properties": { "code": "01001" } }"#,
        )
        .unwrap();
        assert_eq!(geometry.rings(), Some(vec![vec![0, 1], vec![-3]]));
    }

    #[test]
    fn test_multi_polygon_rings_flatten() {
        let geometry: Geometry = serde_json::from_str(
            r#"{ "type": "MultiPolygon", "arcs": [[[0]], [[1, 2]]] }"#,
        )
        .unwrap();
        assert_eq!(geometry.rings(), Some(vec![vec![0], vec![1, 2]]));
    }

    #[test]
    fn test_non_area_kind_is_none() {
        let geometry: Geometry =
            serde_json::from_str(r#"{ "type": "Point", "arcs": [] }"#).unwrap();
        assert_eq!(geometry.rings(), None);
    }
}
