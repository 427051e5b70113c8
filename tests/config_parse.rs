use polygon_batch::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../polygon-batch.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.converter.bin, "polygon-city");
    assert_eq!(cfg.converter.source_extension, "gml");
    assert_eq!(cfg.converter.fragment_filename, "index.geojson");
    assert!(!cfg.output.catalog_filename.is_empty());
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("").expect("parse empty TOML");
    assert_eq!(cfg.converter.bin, "polygon-city");
    assert_eq!(cfg.output.catalog_filename, "index.geojson");
    assert_eq!(cfg.logging.level, "info");
}
