use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 版型寬度分級，由 SKU 最後一段的尺碼決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[serde(rename = "S-3XL")]
    S3xl,
    #[serde(rename = "4XL-5XL")]
    Xl4To5,
    #[serde(rename = "Other")]
    Other,
}

impl SizeClass {
    /// 與圖檔命名一致的標籤，例如 `HD-FOX-S-3XL.png`
    pub fn label(self) -> &'static str {
        match self {
            SizeClass::S3xl => "S-3XL",
            SizeClass::Xl4To5 => "4XL-5XL",
            SizeClass::Other => "Other",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedSku {
    pub design_key: String,
    pub size_class: SizeClass,
}

/// 聚合單位：design key + size class。
///
/// 排序依照渲染後的字串（`HD-FOX-S-3XL`），因此 `BTreeMap<GroupKey, _>`
/// 的迭代順序就是排版時的字典序。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct GroupKey {
    design_key: String,
    size_class: SizeClass,
    rendered: String,
}

impl GroupKey {
    pub fn new(design_key: impl Into<String>, size_class: SizeClass) -> Self {
        let design_key = design_key.into();
        let rendered = format!("{}-{}", design_key, size_class.label());
        Self {
            design_key,
            size_class,
            rendered,
        }
    }

    pub fn design_key(&self) -> &str {
        &self.design_key
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl From<ParsedSku> for GroupKey {
    fn from(sku: ParsedSku) -> Self {
        GroupKey::new(sku.design_key, sku.size_class)
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.rendered
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rendered.cmp(&other.rendered)
    }
}

pub type GroupCount = BTreeMap<GroupKey, usize>;

/// 已解析到檔案的圖稿
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(PathBuf);

impl ArtifactRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub artifact: ArtifactRef,
    pub size_class: SizeClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntry {
    pub artifact: ArtifactRef,
    pub size_class: SizeClass,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 換列時的垂直前進量要看哪一張圖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPitch {
    /// 該列最後放入那張圖的高度（現行 RIP 對位依賴此行為）
    #[default]
    LastEntry,
    /// 該列最高的那張圖
    RowMax,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub s_3xl_width: f64,
    pub xl4_5_width: f64,
    pub columns: usize,
    pub h_gap: f64,
    pub v_gap: f64,
    pub fallback_height: f64,
    pub row_pitch: RowPitch,
}

impl LayoutParams {
    /// `Other` 從不進佇列，給 S-3XL 的寬度只是讓函式是全域的
    pub fn width_of(&self, size_class: SizeClass) -> f64 {
        match size_class {
            SizeClass::S3xl | SizeClass::Other => self.s_3xl_width,
            SizeClass::Xl4To5 => self.xl4_5_width,
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            s_3xl_width: 11.0,
            xl4_5_width: 13.0,
            columns: 2,
            h_gap: 0.25,
            v_gap: 0.25,
            fallback_height: 14.0,
            row_pitch: RowPitch::LastEntry,
        }
    }
}

/// 撿貨單中的一列，只關心 SKU 欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRow {
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupStatus {
    Queued,
    Unresolved,
    NotQueued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub status: GroupStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradedArtifact {
    pub artifact: ArtifactRef,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct SheetResult {
    pub summary: Vec<GroupSummary>,
    pub placed: Vec<PlacedEntry>,
    pub unresolved: Vec<GroupKey>,
    pub degraded: Vec<DegradedArtifact>,
    pub job_xml: String,
}

/// 一次執行的結果，給 CLI 印出摘要
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub summary: Vec<GroupSummary>,
    pub placed: usize,
    pub unresolved: Vec<String>,
    pub degraded: Vec<DegradedArtifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_renders_like_artifact_name() {
        let key = GroupKey::new("HD-FOX", SizeClass::S3xl);
        assert_eq!(key.as_str(), "HD-FOX-S-3XL");
        assert_eq!(GroupKey::new("HD-FOX", SizeClass::Xl4To5).to_string(), "HD-FOX-4XL-5XL");
        assert_eq!(GroupKey::new("TS-OWL", SizeClass::Other).to_string(), "TS-OWL-Other");
    }

    #[test]
    fn test_group_key_orders_by_rendered_string() {
        let mut keys = vec![
            GroupKey::new("TS-OWL", SizeClass::S3xl),
            GroupKey::new("HD-FOX", SizeClass::S3xl),
            GroupKey::new("HD-BEAR", SizeClass::S3xl),
        ];
        keys.sort();
        let rendered: Vec<&str> = keys.iter().map(GroupKey::as_str).collect();
        assert_eq!(rendered, vec!["HD-BEAR-S-3XL", "HD-FOX-S-3XL", "TS-OWL-S-3XL"]);
    }

    #[test]
    fn test_width_of_tiers() {
        let params = LayoutParams::default();
        assert_eq!(params.width_of(SizeClass::S3xl), 11.0);
        assert_eq!(params.width_of(SizeClass::Xl4To5), 13.0);
        assert_eq!(params.width_of(SizeClass::Other), 11.0);
    }

    #[test]
    fn test_row_pitch_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            pitch: RowPitch,
        }
        let w: Wrapper = toml::from_str("pitch = \"row_max\"").unwrap();
        assert_eq!(w.pitch, RowPitch::RowMax);
    }
}
