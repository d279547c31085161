use crate::domain::model::{ArtifactRef, GroupKey, PickRow, SheetResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 工作包的輸出位置
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 由 group key 找到對應的圖稿檔，找不到回傳 `None`
pub trait ArtifactResolver {
    fn resolve(&self, key: &GroupKey) -> Option<ArtifactRef>;
}

/// 讀取圖檔原始像素尺寸 (width, height)
pub trait ImageProbe {
    fn dimensions(&self, artifact: &ArtifactRef) -> Result<(u32, u32)>;
}

#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, job_xml: &str) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PickRow>>;
    async fn transform(&self, rows: Vec<PickRow>) -> Result<SheetResult>;
    async fn load(&self, result: SheetResult) -> Result<String>;
}

impl<F> ArtifactResolver for F
where
    F: Fn(&GroupKey) -> Option<ArtifactRef>,
{
    fn resolve(&self, key: &GroupKey) -> Option<ArtifactRef> {
        self(key)
    }
}
