//! Catalog documents on disk.
//!
//! A catalog file lists pizzas (each with optional recommended toppings),
//! toppings and, optionally, the toppings currently available. When
//! `available` is omitted every topping is available.
//!
//! # Example YAML
//!
//! ```yaml
//! pizzas:
//!   - name: margherita
//!     recommended: [mozzarella, tomato, basil]
//!   - name: marinara
//! toppings: [mozzarella, tomato, basil, garlic]
//! available: [mozzarella, tomato, basil]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Catalog;
use crate::error::{CatalogError, Result};

/// One pizza entry in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended: Vec<String>,
}

/// Serializable form of a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub pizzas: Vec<PizzaEntry>,
    pub toppings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("yaml" | "yml") => Ok(Format::Yaml),
        _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    }
}

impl CatalogFile {
    /// Reads a catalog document, picking the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](CatalogError::UnsupportedFormat) for
    /// an unknown extension, [`IoError`](CatalogError::IoError) if the file
    /// cannot be read, or a JSON/YAML error if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = format_of(path)?;
        let reader = BufReader::new(File::open(path)?);
        let file = match format {
            Format::Json => serde_json::from_reader(reader)?,
            Format::Yaml => serde_yaml::from_reader(reader)?,
        };
        Ok(file)
    }

    /// Writes the document, picking the format from the extension.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`load`](CatalogFile::load).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = format_of(path)?;
        let writer = BufWriter::new(File::create(path)?);
        match format {
            Format::Json => serde_json::to_writer_pretty(writer, self)?,
            Format::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Checks the document and turns it into a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Any invariant violation reported by [`Catalog::new`].
    pub fn into_catalog(self) -> Result<Catalog> {
        let available = self.available.unwrap_or_else(|| self.toppings.clone());
        let mut pizzas = Vec::with_capacity(self.pizzas.len());
        let mut recommended = Vec::new();
        for entry in self.pizzas {
            if !entry.recommended.is_empty() {
                recommended.push((entry.name.clone(), entry.recommended));
            }
            pizzas.push(entry.name);
        }
        Catalog::new(pizzas, self.toppings, recommended, available)
    }
}

impl From<&Catalog> for CatalogFile {
    fn from(catalog: &Catalog) -> Self {
        let pizzas = catalog
            .pizzas()
            .iter()
            .map(|name| PizzaEntry {
                name: name.clone(),
                recommended: catalog.recommendations().get(name).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            pizzas,
            toppings: catalog.toppings().to_vec(),
            available: Some(catalog.available().to_vec()),
        }
    }
}

impl Catalog {
    /// Loads and checks a catalog file (`.yaml`, `.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// See [`CatalogFile::load`] and [`Catalog::new`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kubepizza_catalog::Catalog;
    ///
    /// let catalog = Catalog::load("pizzeria.yaml").unwrap();
    /// println!("{} pizzas", catalog.pizzas().len());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        CatalogFile::load(path)?.into_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert!(matches!(format_of(Path::new("a.JSON")), Ok(Format::Json)));
        assert!(matches!(format_of(Path::new("a.yml")), Ok(Format::Yaml)));
        assert!(matches!(
            format_of(Path::new("a.toml")),
            Err(CatalogError::UnsupportedFormat(_))
        ));
        assert!(format_of(Path::new("catalog")).is_err());
    }

    #[test]
    fn test_missing_available_means_everything() {
        let file = CatalogFile {
            pizzas: vec![PizzaEntry {
                name: "marinara".into(),
                recommended: Vec::new(),
            }],
            toppings: vec!["garlic".into(), "oregano".into()],
            available: None,
        };
        let catalog = file.into_catalog().unwrap();
        assert!(catalog.is_available("garlic"));
        assert!(catalog.is_available("oregano"));
        assert!(catalog.recommended_toppings("marinara").is_empty());
    }

    #[test]
    fn test_builtin_converts_to_file_and_back() {
        let builtin = Catalog::builtin();
        let file = CatalogFile::from(&builtin);
        assert_eq!(file.into_catalog().unwrap(), builtin);
    }
}
