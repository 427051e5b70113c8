use polygon_batch::envelope::Envelope;
use serde_json::json;

#[test]
fn feature_collection_envelope() {
    let doc = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-3.0, 0.5], [4.0, 0.5], [4.0, 7.25], [-3.0, 7.25], [-3.0, 0.5]
                    ]]
                }
            }
        ]
    });

    let env = Envelope::of_document(&doc).unwrap();
    assert_eq!(env.min_lon, -3.0);
    assert_eq!(env.min_lat, 0.5);
    assert_eq!(env.max_lon, 4.0);
    assert_eq!(env.max_lat, 7.25);
}

#[test]
fn bare_geometry_and_geometry_collection() {
    let line = json!({
        "type": "LineString",
        "coordinates": [[-0.1, 51.5], [-0.2, 51.6]]
    });
    let env = Envelope::of_document(&line).unwrap();
    assert_eq!(env.min_lon, -0.2);
    assert_eq!(env.max_lat, 51.6);

    let collection = json!({
        "type": "GeometryCollection",
        "geometries": [
            { "type": "Point", "coordinates": [10.0, -5.0] },
            { "type": "MultiPoint", "coordinates": [[12.0, -4.0], [9.0, -6.0]] }
        ]
    });
    let env = Envelope::of_document(&collection).unwrap();
    assert_eq!(env.min_lon, 9.0);
    assert_eq!(env.min_lat, -6.0);
    assert_eq!(env.max_lon, 12.0);
    assert_eq!(env.max_lat, -4.0);
}

#[test]
fn third_coordinate_is_ignored() {
    let doc = json!({
        "type": "Point",
        "coordinates": [5.0, 6.0, 120.5]
    });
    let env = Envelope::of_document(&doc).unwrap();
    assert_eq!(env.min_lon, 5.0);
    assert_eq!(env.max_lon, 5.0);
    assert_eq!(env.min_lat, 6.0);
    assert_eq!(env.max_lat, 6.0);
}

#[test]
fn envelope_is_idempotent() {
    let doc = json!({
        "type": "Polygon",
        "coordinates": [[
            [0.123456789, 51.987654321],
            [0.3, 51.1],
            [0.2, 51.5],
            [0.123456789, 51.987654321]
        ]]
    });
    let a = Envelope::of_document(&doc).unwrap();
    let b = Envelope::of_document(&doc).unwrap();
    // Bit-identical on re-runs over the same document.
    assert_eq!(a, b);
}

#[test]
fn document_without_coordinates_is_malformed() {
    let empty = json!({ "type": "FeatureCollection", "features": [] });
    assert!(Envelope::of_document(&empty).is_err());

    let not_geojson = json!({ "hello": "world" });
    assert!(Envelope::of_document(&not_geojson).is_err());
}

#[test]
fn ring_is_a_closed_rectangle() {
    let env = Envelope {
        min_lon: -1.0,
        min_lat: 2.0,
        max_lon: 3.0,
        max_lat: 4.0,
    };
    let ring = env.ring();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    assert_eq!(ring[0], [-1.0, 2.0]);
    assert_eq!(ring[2], [3.0, 4.0]);
}
