use crate::core::job::JobEnvelope;
use crate::domain::model::{LayoutParams, RowPitch};
use crate::utils::error::{Result, SheetError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "pick-sheet.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub input: InputConfig,
    pub artifacts: ArtifactConfig,
    pub layout: LayoutConfig,
    pub rip: RipConfig,
    pub output: OutputConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub pick_file: String,
    pub sku_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub base_dir: String,
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub columns: usize,
    pub h_gap: f64,
    pub v_gap: f64,
    /// 讀不到圖檔時使用的高度（S-3XL 尺寸）
    pub fallback_height: f64,
    pub row_pitch: RowPitch,
    pub widths: WidthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthConfig {
    pub s_3xl: f64,
    pub xl4_5: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RipConfig {
    /// 未設定時只輸出 bundle，不送出
    pub controller_url: Option<String>,
    pub print_unit: String,
    pub query_param: String,
    pub delete_after_print: bool,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub bundle_name: String,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pick_file: "pick.csv".to_string(),
            sku_column: "SKU".to_string(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            base_dir: "./art".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            columns: params.columns,
            h_gap: params.h_gap,
            v_gap: params.v_gap,
            fallback_height: params.fallback_height,
            row_pitch: params.row_pitch,
            widths: WidthConfig {
                s_3xl: params.s_3xl_width,
                xl4_5: params.xl4_5_width,
            },
        }
    }
}

impl Default for WidthConfig {
    fn default() -> Self {
        LayoutConfig::default().widths
    }
}

impl Default for RipConfig {
    fn default() -> Self {
        Self {
            controller_url: None,
            print_unit: "1".to_string(),
            query_param: "job".to_string(),
            delete_after_print: true,
            timeout_seconds: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            bundle_name: "sheet_bundle.zip".to_string(),
            dry_run: false,
        }
    }
}

impl SheetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SheetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SheetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RIP_HOST})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SheetError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            s_3xl_width: self.layout.widths.s_3xl,
            xl4_5_width: self.layout.widths.xl4_5,
            columns: self.layout.columns,
            h_gap: self.layout.h_gap,
            v_gap: self.layout.v_gap,
            fallback_height: self.layout.fallback_height,
            row_pitch: self.layout.row_pitch,
        }
    }

    pub fn job_envelope(&self) -> JobEnvelope {
        JobEnvelope {
            print_unit: self.rip.print_unit.clone(),
            delete_after_print: self.rip.delete_after_print,
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    /// 有設定控制器且不是 dry run 才會真的送出
    pub fn submission_enabled(&self) -> bool {
        self.rip.controller_url.is_some() && !self.output.dry_run
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.pick_file", &self.input.pick_file)?;
        validation::validate_non_empty_string("input.sku_column", &self.input.sku_column)?;
        validation::validate_path("artifacts.base_dir", &self.artifacts.base_dir)?;
        validation::validate_non_empty_string("artifacts.extension", &self.artifacts.extension)?;

        validation::validate_positive_number("layout.columns", self.layout.columns, 1)?;
        validation::validate_positive_length("layout.widths.s_3xl", self.layout.widths.s_3xl)?;
        validation::validate_positive_length("layout.widths.xl4_5", self.layout.widths.xl4_5)?;
        validation::validate_non_negative_length("layout.h_gap", self.layout.h_gap)?;
        validation::validate_non_negative_length("layout.v_gap", self.layout.v_gap)?;
        validation::validate_positive_length("layout.fallback_height", self.layout.fallback_height)?;

        if let Some(url) = &self.rip.controller_url {
            if let Some(var) = unresolved_env_var(url) {
                return Err(SheetError::MissingConfigError {
                    field: format!("rip.controller_url (environment variable {} is not set)", var),
                });
            }
            validation::validate_url("rip.controller_url", url)?;
        }
        validation::validate_non_empty_string("rip.print_unit", &self.rip.print_unit)?;
        validation::validate_non_empty_string("rip.query_param", &self.rip.query_param)?;
        validation::validate_range("rip.timeout_seconds", self.rip.timeout_seconds, 1, 600)?;

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_path("output.bundle_name", &self.output.bundle_name)?;

        Ok(())
    }
}

/// `substitute_env_vars` 找不到的變數會原樣留下，這裡把它挑出來
fn unresolved_env_var(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let len = value[start..].find('}')?;
    Some(&value[start..start + len])
}

impl Validate for SheetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = SheetConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.submission_enabled());
        assert_eq!(config.layout_params(), LayoutParams::default());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
pick_file = "orders/pick.csv"
sku_column = "Item SKU"

[artifacts]
base_dir = "/srv/art"

[layout]
columns = 3
h_gap = 0.5
v_gap = 0.75
fallback_height = 12.0
row_pitch = "row_max"

[layout.widths]
s_3xl = 10.5
xl4_5 = 12.5

[rip]
controller_url = "http://rip.local:8080/api/print"
print_unit = "DTG-2"
delete_after_print = false

[output]
path = "./out"
"#;

        let config = SheetConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.sku_column, "Item SKU");
        assert_eq!(config.artifacts.extension, "png");

        let params = config.layout_params();
        assert_eq!(params.columns, 3);
        assert_eq!(params.s_3xl_width, 10.5);
        assert_eq!(params.row_pitch, RowPitch::RowMax);

        assert!(config.submission_enabled());
        assert_eq!(config.rip.query_param, "job");
        assert!(!config.job_envelope().delete_after_print);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_widths_keep_defaults() {
        let config = SheetConfig::from_toml_str("[layout.widths]\nxl4_5 = 14.0\n").unwrap();
        assert_eq!(config.layout.widths.s_3xl, 11.0);
        assert_eq!(config.layout.widths.xl4_5, 14.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PICK_SHEET_TEST_RIP", "http://10.1.2.3:9000/print");

        let toml_content = r#"
[rip]
controller_url = "${PICK_SHEET_TEST_RIP}"
"#;

        let config = SheetConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.rip.controller_url.as_deref(),
            Some("http://10.1.2.3:9000/print")
        );

        std::env::remove_var("PICK_SHEET_TEST_RIP");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = SheetConfig::from_toml_str("[rip]\ncontroller_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let zero_columns = SheetConfig::from_toml_str("[layout]\ncolumns = 0\n").unwrap();
        assert!(zero_columns.validate().is_err());

        let negative_gap = SheetConfig::from_toml_str("[layout]\nh_gap = -1.0\n").unwrap();
        assert!(negative_gap.validate().is_err());
    }

    #[test]
    fn test_unset_controller_variable_is_missing_config() {
        std::env::remove_var("PICK_SHEET_TEST_UNSET_HOST");
        let config = SheetConfig::from_toml_str(
            "[rip]\ncontroller_url = \"http://${PICK_SHEET_TEST_UNSET_HOST}/api/print\"\n",
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SheetError::MissingConfigError { ref field } if field.contains("PICK_SHEET_TEST_UNSET_HOST")
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SheetConfig::from_toml_str("[layout\ncolumns = 2").unwrap_err();
        assert!(matches!(err, SheetError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./batch-42\"\ndry_run = true\n")
            .unwrap();

        let config = SheetConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./batch-42");
        assert!(config.output.dry_run);
    }
}
