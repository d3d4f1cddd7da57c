//! Structured shape sources that take precedence over the persisted shape file

use super::types::ShapeDefinition;
use crate::error::{TangramError, TangramResult};
use std::path::PathBuf;

/// A source exposing shape definitions directly, such as the layout editor's workspace
pub trait ShapeSource {
    fn list_shape_names(&self) -> TangramResult<Vec<String>>;

    fn get_shape(&self, name: &str) -> TangramResult<ShapeDefinition>;

    fn describe(&self) -> String;
}

/// One `<key>.json` file per shape, each holding a single definition
pub struct ShapeDirSource {
    directory: PathBuf,
}

impl ShapeDirSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn shape_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.json"))
    }
}

impl ShapeSource for ShapeDirSource {
    fn list_shape_names(&self) -> TangramResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| TangramError::io(&self.directory, e))?;

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();

        // Sort for consistent ordering
        names.sort();
        Ok(names)
    }

    fn get_shape(&self, name: &str) -> TangramResult<ShapeDefinition> {
        let path = self.shape_path(name);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TangramError::ShapeNotFound {
                    name: name.to_string(),
                }
            } else {
                TangramError::io(&path, e)
            }
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| TangramError::json(&path, e))?;
        ShapeDefinition::from_value(name, value)
    }

    fn describe(&self) -> String {
        format!("shape directory {}", self.directory.display())
    }
}
