use crate::envelope::Envelope;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One aggregated summary: where a unit's fragment lives and the rectangle
/// its geometry covers. Recomputed from the filesystem every run.
#[derive(Debug, Clone)]
pub struct EnvelopeRecord {
    /// Unit's relative directory path (fragment path with the filename stripped).
    pub id: String,
    /// Fragment path relative to the output root.
    pub path: String,
    pub envelope: Envelope,
}

#[derive(Debug, Default)]
pub struct Aggregation {
    pub records: Vec<EnvelopeRecord>,
    /// Relative paths of fragments that failed to read or parse.
    pub skipped: Vec<String>,
}

/// Reads each fragment and computes its envelope, in discovery order. An
/// unreadable or malformed fragment is reported and excluded; it cannot sink
/// the rest of the catalog.
pub fn aggregate(output_dir: &Path, fragments: &[PathBuf], fragment_filename: &str) -> Aggregation {
    let mut agg = Aggregation::default();
    let suffix = format!("/{fragment_filename}");

    for fragment in fragments {
        let rel = relative_path(output_dir, fragment);
        match load_envelope(fragment) {
            Ok(envelope) => {
                let id = rel.strip_suffix(&suffix).unwrap_or(&rel).to_string();
                agg.records.push(EnvelopeRecord {
                    id,
                    path: rel,
                    envelope,
                });
            }
            Err(err) => {
                warn!("skipping fragment {rel}: {err:#}");
                agg.skipped.push(rel);
            }
        }
    }

    agg
}

fn load_envelope(path: &Path) -> Result<Envelope> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fragment: {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw).with_context(|| "parsing fragment GeoJSON")?;
    Envelope::of_document(&doc)
}

fn relative_path(output_dir: &Path, fragment: &Path) -> String {
    fragment
        .strip_prefix(output_dir)
        .unwrap_or(fragment)
        .display()
        .to_string()
}

/// The catalog is a FeatureCollection with one envelope polygon per record,
/// tagged with the unit's `id` and the fragment's `path`.
pub fn to_feature_collection(records: &[EnvelopeRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "properties": { "id": r.id, "path": r.path },
                "geometry": { "type": "Polygon", "coordinates": [r.envelope.ring()] },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// Writes the catalog exactly once per run, overwriting any earlier catalog.
/// A failed write is fatal; without the combined index the run is unmet.
pub fn write_catalog(
    output_dir: &Path,
    catalog_filename: &str,
    records: &[EnvelopeRecord],
) -> Result<PathBuf> {
    let path = output_dir.join(catalog_filename);
    let raw = serde_json::to_string(&to_feature_collection(records))?;
    std::fs::write(&path, raw).with_context(|| format!("writing catalog: {}", path.display()))?;
    Ok(path)
}
