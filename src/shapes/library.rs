//! Shape library: load precedence, lookup and persistence

use super::defaults::builtin_shapes;
use super::source::ShapeSource;
use super::types::ShapeDefinition;
use crate::error::{TangramError, TangramResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SHAPE_FILE: &str = "shapes.json";

/// Which source the library content came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryOrigin {
    Source(String),
    File(PathBuf),
    Builtin,
}

/// An entry that failed validation during load
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShape {
    pub name: String,
    pub reason: String,
}

type Loaded = (BTreeMap<String, ShapeDefinition>, Vec<SkippedShape>);

/// Named target layouts, read-only while the game loop runs
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    shapes: BTreeMap<String, ShapeDefinition>,
    path: PathBuf,
    origin: LibraryOrigin,
    skipped: Vec<SkippedShape>,
}

impl ShapeLibrary {
    /// Load from the first source that yields at least one valid shape:
    /// the structured source, then the shape file at `path`, then the
    /// built-in layouts. `path` is also where `save` writes.
    pub fn load(source: Option<&dyn ShapeSource>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if let Some(source) = source {
            match Self::load_from_source(source) {
                Ok((shapes, skipped)) if !shapes.is_empty() => {
                    log::info!("Loaded {} shape(s) from {}", shapes.len(), source.describe());
                    return Self::assemble(shapes, path, LibraryOrigin::Source(source.describe()), skipped);
                }
                Ok(_) => log::warn!("{} provided no valid shapes", source.describe()),
                Err(e) => log::warn!("Cannot use {}: {}", source.describe(), e),
            }
        }

        match Self::load_from_file(&path) {
            Ok(Some((shapes, skipped))) if !shapes.is_empty() => {
                log::info!("Loaded {} shape(s) from {:?}", shapes.len(), path);
                let origin = LibraryOrigin::File(path.clone());
                return Self::assemble(shapes, path, origin, skipped);
            }
            Ok(Some(_)) => log::warn!("{:?} contains no valid shapes, using built-in shapes", path),
            Ok(None) => log::info!("No shape file at {:?}, using built-in shapes", path),
            Err(e) => log::warn!("{e}; using built-in shapes"),
        }

        Self::builtin(path)
    }

    /// The built-in layouts, saving to `path`
    pub fn builtin(path: impl Into<PathBuf>) -> Self {
        Self::assemble(builtin_shapes(), path.into(), LibraryOrigin::Builtin, Vec::new())
    }

    fn assemble(
        shapes: BTreeMap<String, ShapeDefinition>,
        path: PathBuf,
        origin: LibraryOrigin,
        skipped: Vec<SkippedShape>,
    ) -> Self {
        for skip in &skipped {
            log::warn!("Skipped shape '{}': {}", skip.name, skip.reason);
        }
        Self {
            shapes,
            path,
            origin,
            skipped,
        }
    }

    fn load_from_source(source: &dyn ShapeSource) -> TangramResult<Loaded> {
        let mut shapes = BTreeMap::new();
        let mut skipped = Vec::new();
        for name in source.list_shape_names()? {
            match source.get_shape(&name) {
                Ok(shape) => {
                    shapes.insert(name, shape);
                }
                Err(e) => skipped.push(SkippedShape {
                    name,
                    reason: e.to_string(),
                }),
            }
        }
        Ok((shapes, skipped))
    }

    /// `Ok(None)` when the file does not exist
    fn load_from_file(path: &Path) -> TangramResult<Option<Loaded>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TangramError::io(path, e)),
        };
        Self::parse_entries(&text)
            .map(Some)
            .map_err(|e| TangramError::json(path, e))
    }

    /// Parse a shape document, validating each entry on its own
    pub fn parse_entries(text: &str) -> Result<Loaded, serde_json::Error> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut shapes = BTreeMap::new();
        let mut skipped = Vec::new();

        for (name, value) in entries {
            match ShapeDefinition::from_value(&name, value) {
                Ok(shape) => {
                    shapes.insert(name, shape);
                }
                Err(e) => skipped.push(SkippedShape {
                    name,
                    reason: e.to_string(),
                }),
            }
        }
        Ok((shapes, skipped))
    }

    pub fn get(&self, name: &str) -> Option<&ShapeDefinition> {
        self.shapes.get(name)
    }

    /// Shape keys in sorted order
    pub fn list_names(&self) -> Vec<String> {
        self.shapes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn origin(&self) -> &LibraryOrigin {
        &self.origin
    }

    /// Entries rejected during load
    pub fn skipped(&self) -> &[SkippedShape] {
        &self.skipped
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite a shape and persist the whole library immediately
    pub fn add_or_replace(
        &mut self,
        name: impl Into<String>,
        shape: ShapeDefinition,
    ) -> TangramResult<()> {
        let name = name.into();
        let shape = shape.validated(&name)?;
        if self.shapes.insert(name.clone(), shape).is_some() {
            log::info!("Replaced shape '{}'", name);
        } else {
            log::info!("Added shape '{}'", name);
        }
        self.save()
    }

    /// Write the library to its shape file
    pub fn save(&self) -> TangramResult<()> {
        self.save_to(&self.path)
    }

    /// Write the library as a shape document to `path`
    pub fn save_to(&self, path: impl AsRef<Path>) -> TangramResult<()> {
        let path = path.as_ref();
        let mut text =
            serde_json::to_string_pretty(&self.shapes).map_err(|e| TangramError::json(path, e))?;
        text.push('\n');
        std::fs::write(path, text).map_err(|e| TangramError::io(path, e))?;
        log::debug!("Saved {} shape(s) to {:?}", self.shapes.len(), path);
        Ok(())
    }
}
