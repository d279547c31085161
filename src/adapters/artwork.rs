use crate::domain::model::{ArtifactRef, GroupKey};
use crate::domain::ports::ArtifactResolver;
use std::path::PathBuf;

/// 圖稿資料夾：`{base_dir}/{group key}.{extension}`
#[derive(Debug, Clone)]
pub struct ArtworkDirectory {
    base_dir: PathBuf,
    extension: String,
}

impl ArtworkDirectory {
    pub fn new(base_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn path_for(&self, key: &GroupKey) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", key.as_str(), self.extension))
    }
}

impl ArtifactResolver for ArtworkDirectory {
    fn resolve(&self, key: &GroupKey) -> Option<ArtifactRef> {
        let path = self.path_for(key);
        if path.is_file() {
            Some(ArtifactRef::new(path))
        } else {
            tracing::debug!("No artwork at {}", path.display());
            None
        }
    }
}
