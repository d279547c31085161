use crate::domain::model::ArtifactRef;
use crate::domain::ports::ImageProbe;
use crate::utils::error::{Result, SheetError};

/// 只讀檔頭取得像素尺寸，不解碼整張圖
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProbe;

impl ImageProbe for HeaderProbe {
    fn dimensions(&self, artifact: &ArtifactRef) -> Result<(u32, u32)> {
        let size = imagesize::size(artifact.path()).map_err(|e| SheetError::ImageProbeError {
            path: artifact.to_string(),
            message: e.to_string(),
        })?;

        let to_u32 = |value: usize| {
            u32::try_from(value).map_err(|_| SheetError::ImageProbeError {
                path: artifact.to_string(),
                message: format!("dimension {} out of range", value),
            })
        };
        Ok((to_u32(size.width)?, to_u32(size.height)?))
    }
}
