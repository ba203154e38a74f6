use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use shared::protocol::{Classification, ImageRef};
use tracing::debug;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "gif", "webp", "bmp"];

/// Opaque image recognition service. Implementations may be slow; callers run
/// them off the owning event loop.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &ImageRef) -> Result<Classification>;
}

pub struct UnavailableClassifier;

#[async_trait]
impl ImageClassifier for UnavailableClassifier {
    async fn classify(&self, image: &ImageRef) -> Result<Classification> {
        Err(anyhow!(
            "image classification unavailable for '{}'",
            image.path.display()
        ))
    }
}

/// Labels an image after its file stem (`glass_bottle.jpg` -> "glass bottle").
///
/// Stands in for an on-device model: the file must exist and carry a known
/// image extension, and every label is reported with `confidence`.
pub struct FileNameClassifier {
    confidence: f32,
}

impl FileNameClassifier {
    pub fn new(confidence: f32) -> Self {
        Self {
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

impl Default for FileNameClassifier {
    fn default() -> Self {
        Self::new(0.9)
    }
}

#[async_trait]
impl ImageClassifier for FileNameClassifier {
    async fn classify(&self, image: &ImageRef) -> Result<Classification> {
        let metadata = tokio::fs::metadata(&image.path)
            .await
            .with_context(|| format!("failed to open image '{}'", image.path.display()))?;
        if !metadata.is_file() {
            return Err(anyhow!("'{}' is not a file", image.path.display()));
        }

        let label = label_from_path(&image.path)
            .ok_or_else(|| anyhow!("no usable label in '{}'", image.path.display()))?;
        debug!(path = %image.path.display(), %label, "classified image by file name");

        Ok(Classification::new(label, self.confidence)?)
    }
}

fn label_from_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    let label = stem
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty() && !word.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
