use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::CatalogError;
use crate::model::RawRecipe;
use crate::sources::CatalogSource;

/// A single file holds either one recipe or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Many(Vec<RawRecipe>),
    One(Box<RawRecipe>),
}

/// Reads every `*.json` file in a directory.
///
/// Files are visited in file name order so ids are repeatable between loads
/// of an unchanged directory. One undecodable file fails the whole load.
pub struct LocalDirectorySource {
    directory: PathBuf,
}

impl LocalDirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    async fn json_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let mut entries = tokio::fs::read_dir(&self.directory).await.map_err(|e| {
            error!(
                "Recipe directory {} is not readable: {}",
                self.directory.display(),
                e
            );
            CatalogError::SourceUnavailable(format!(
                "recipe directory {} is not readable: {}",
                self.directory.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| CatalogError::IoError {
            path: self.directory.clone(),
            source: e,
        })? {
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl CatalogSource for LocalDirectorySource {
    fn source_name(&self) -> &str {
        "local"
    }

    async fn load_all(&self) -> Result<Vec<RawRecipe>, CatalogError> {
        let mut recipes = Vec::new();

        for path in self.json_files().await? {
            let content = tokio::fs::read(&path)
                .await
                .map_err(|e| CatalogError::IoError {
                    path: path.clone(),
                    source: e,
                })?;

            let parsed: RecipeFile = serde_json::from_slice(&content).map_err(|e| {
                error!("Failed to decode {}: {}", path.display(), e);
                CatalogError::MalformedData(format!("{}: {}", path.display(), e))
            })?;

            match parsed {
                RecipeFile::Many(many) => recipes.extend(many),
                RecipeFile::One(one) => recipes.push(*one),
            }
        }

        debug!(
            "Loaded {} recipes from {}",
            recipes.len(),
            self.directory.display()
        );
        Ok(recipes)
    }
}
