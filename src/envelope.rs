use anyhow::{anyhow, Result};
use serde_json::Value;

/// Minimal axis-aligned bounding rectangle in lon/lat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Envelope {
    /// Computes the envelope of every coordinate in a GeoJSON document.
    /// Handles FeatureCollection, Feature, GeometryCollection, and bare
    /// geometries. A document with no coordinates is malformed.
    pub fn of_document(doc: &Value) -> Result<Envelope> {
        let mut env: Option<Envelope> = None;
        walk_geojson(doc, &mut env);
        env.ok_or_else(|| anyhow!("document contains no coordinates"))
    }

    /// The envelope as a closed polygon ring, min corner first.
    pub fn ring(&self) -> Vec<[f64; 2]> {
        vec![
            [self.min_lon, self.min_lat],
            [self.max_lon, self.min_lat],
            [self.max_lon, self.max_lat],
            [self.min_lon, self.max_lat],
            [self.min_lon, self.min_lat],
        ]
    }

    fn extend(env: &mut Option<Envelope>, lon: f64, lat: f64) {
        match env {
            Some(e) => {
                e.min_lon = e.min_lon.min(lon);
                e.min_lat = e.min_lat.min(lat);
                e.max_lon = e.max_lon.max(lon);
                e.max_lat = e.max_lat.max(lat);
            }
            None => {
                *env = Some(Envelope {
                    min_lon: lon,
                    min_lat: lat,
                    max_lon: lon,
                    max_lat: lat,
                });
            }
        }
    }
}

fn walk_geojson(v: &Value, env: &mut Option<Envelope>) {
    let Some(obj) = v.as_object() else { return };

    if let Some(features) = obj.get("features").and_then(Value::as_array) {
        for feature in features {
            walk_geojson(feature, env);
        }
    }
    if let Some(geometry) = obj.get("geometry") {
        walk_geojson(geometry, env);
    }
    if let Some(geometries) = obj.get("geometries").and_then(Value::as_array) {
        for geometry in geometries {
            walk_geojson(geometry, env);
        }
    }
    if let Some(coordinates) = obj.get("coordinates") {
        walk_coordinates(coordinates, env);
    }
}

fn walk_coordinates(v: &Value, env: &mut Option<Envelope>) {
    let Some(arr) = v.as_array() else { return };

    // A position is an array starting with two numbers; anything else is a
    // nested ring/line/polygon structure.
    if let (Some(lon), Some(lat)) = (
        arr.first().and_then(Value::as_f64),
        arr.get(1).and_then(Value::as_f64),
    ) {
        Envelope::extend(env, lon, lat);
        return;
    }

    for item in arr {
        walk_coordinates(item, env);
    }
}
