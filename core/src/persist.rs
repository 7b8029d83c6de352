use crate::model::{ModelFile, VocabularyModel};
use anyhow::{Context, Result};
use bincode;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

pub const MODEL_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
    #[serde(default)]
    pub source: Option<String>,
}

pub struct ModelPaths {
    pub root: PathBuf,
}

impl ModelPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn vocabulary(&self) -> PathBuf { self.root.join("vocabulary.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// Read a JSON export of a fitted vectorizer: `{"terms": [...], "idf": [...]}`.
pub fn import_export<P: AsRef<Path>>(path: P) -> Result<VocabularyModel> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening model export {}", path.display()))?;
    let file: ModelFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing model export {}", path.display()))?;
    VocabularyModel::from_file(file).with_context(|| format!("validating model export {}", path.display()))
}

pub fn save_model(paths: &ModelPaths, model: &VocabularyModel) -> Result<()> {
    create_dir_all(&paths.root).with_context(|| format!("creating {}", paths.root.display()))?;
    let path = paths.vocabulary();
    let mut f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let bytes = bincode::serialize(&model.to_file()).context("encoding vocabulary model")?;
    f.write_all(&bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Load and validate the model artifact. Callers treat an error here as fatal.
pub fn load_model(paths: &ModelPaths) -> Result<VocabularyModel> {
    let path = paths.vocabulary();
    let mut f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).with_context(|| format!("reading {}", path.display()))?;
    let file: ModelFile = bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))?;
    let model = VocabularyModel::from_file(file).with_context(|| format!("validating {}", path.display()))?;
    tracing::info!(terms = model.len(), path = %path.display(), "loaded vocabulary model");
    Ok(model)
}

pub fn save_meta(paths: &ModelPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root).with_context(|| format!("creating {}", paths.root.display()))?;
    let path = paths.meta();
    let mut f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let json = serde_json::to_string_pretty(meta).context("encoding model meta")?;
    f.write_all(json.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn load_meta(paths: &ModelPaths) -> Result<MetaFile> {
    let path = paths.meta();
    let mut f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf).with_context(|| format!("reading {}", path.display()))?;
    let meta: MetaFile = serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))?;
    Ok(meta)
}

/// Everything a process needs at startup: the model and its meta.
pub fn load_model_dir(paths: &ModelPaths) -> Result<(VocabularyModel, MetaFile)> {
    let model = load_model(paths)?;
    let meta = load_meta(paths)?;
    if meta.num_terms != model.len() {
        tracing::warn!(meta_terms = meta.num_terms, model_terms = model.len(), "meta term count disagrees with vocabulary");
    }
    Ok((model, meta))
}
