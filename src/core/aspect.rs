use crate::domain::model::{ArtifactRef, DegradedArtifact};
use crate::domain::ports::ImageProbe;
use crate::utils::error::{Result, SheetError};
use std::collections::HashMap;

/// 依原圖比例換算目標寬度下的高度
pub fn aspect_height<P>(probe: &P, artifact: &ArtifactRef, target_width: f64) -> Result<f64>
where
    P: ImageProbe + ?Sized,
{
    let (width, height) = probe.dimensions(artifact)?;
    if width == 0 || height == 0 {
        return Err(SheetError::ImageProbeError {
            path: artifact.to_string(),
            message: format!("image reports zero size ({}x{})", width, height),
        });
    }
    Ok(target_width * (f64::from(height) / f64::from(width)))
}

/// 排版時的高度來源。
///
/// 同一張圖在佇列中會重複出現，所以每個檔案只讀一次；讀不到時改用
/// S-3XL 的預設高度，並記錄在 `degraded`（每個檔案一筆）。
pub struct HeightSource<'a, P: ImageProbe + ?Sized> {
    probe: &'a P,
    fallback_height: f64,
    ratios: HashMap<ArtifactRef, Option<f64>>,
    degraded: Vec<DegradedArtifact>,
}

impl<'a, P: ImageProbe + ?Sized> HeightSource<'a, P> {
    pub fn new(probe: &'a P, fallback_height: f64) -> Self {
        Self {
            probe,
            fallback_height,
            ratios: HashMap::new(),
            degraded: Vec::new(),
        }
    }

    pub fn height_of(&mut self, artifact: &ArtifactRef, width: f64) -> f64 {
        if !self.ratios.contains_key(artifact) {
            let ratio = match aspect_height(self.probe, artifact, 1.0) {
                Ok(ratio) => Some(ratio),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Using fallback height {} for {}: {}",
                        self.fallback_height,
                        artifact,
                        e
                    );
                    self.degraded.push(DegradedArtifact {
                        artifact: artifact.clone(),
                        reason: e.to_string(),
                    });
                    None
                }
            };
            self.ratios.insert(artifact.clone(), ratio);
        }

        match self.ratios.get(artifact).copied().flatten() {
            Some(ratio) => width * ratio,
            None => self.fallback_height,
        }
    }

    pub fn into_degraded(self) -> Vec<DegradedArtifact> {
        self.degraded
    }
}
