//! Catalog file loading against real files on disk.

use std::fs;

use kubepizza_catalog::{Catalog, CatalogError, CatalogFile};
use tempfile::TempDir;

const YAML: &str = r#"
pizzas:
  - name: Margherita
    recommended: [MOZZARELLA, tomato, basil]
  - name: marinara
toppings: [mozzarella, tomato, basil, garlic]
available: [mozzarella, garlic]
"#;

#[test]
fn test_load_yaml_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pizzeria.yaml");
    fs::write(&path, YAML).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.pizzas(), ["Margherita", "marinara"]);
    assert_eq!(
        catalog.recommended_toppings("margherita"),
        ["mozzarella", "tomato", "basil"]
    );
    assert!(catalog.is_available("GARLIC"));
    assert!(!catalog.is_available("basil"));
}

#[test]
fn test_load_json_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pizzeria.json");
    fs::write(
        &path,
        r#"{"pizzas": [{"name": "diavola", "recommended": ["salami"]}], "toppings": ["salami", "chili"]}"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.recommended_toppings("DIAVOLA"), ["salami"]);
    assert_eq!(catalog.available(), ["salami", "chili"]);
}

#[test]
fn test_saved_catalog_loads_back() {
    let dir = TempDir::new().unwrap();
    let builtin = Catalog::builtin();

    for name in ["catalog.yml", "catalog.json"] {
        let path = dir.path().join(name);
        CatalogFile::from(&builtin).save(&path).unwrap();
        assert_eq!(Catalog::load(&path).unwrap(), builtin, "{name}");
    }
}

#[test]
fn test_unknown_topping_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        "pizzas:\n  - name: margherita\n    recommended: [anchovies]\ntoppings: [mozzarella]\n",
    )
    .unwrap();

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownTopping { .. }));
    assert!(err.to_string().contains("anchovies"));
}

#[test]
fn test_load_failures() {
    let dir = TempDir::new().unwrap();

    let missing = Catalog::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(missing, CatalogError::IoError(_)));

    let toml = dir.path().join("catalog.toml");
    fs::write(&toml, "pizzas = []").unwrap();
    assert!(matches!(
        Catalog::load(&toml).unwrap_err(),
        CatalogError::UnsupportedFormat(_)
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        Catalog::load(&broken).unwrap_err(),
        CatalogError::JsonError(_)
    ));
}
