pub mod cli;
pub mod toml_config;

pub use toml_config::SheetConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::Path;

/// 命令列參數；有給的值會覆蓋設定檔
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pick-sheet")]
#[command(about = "Build a RIP print sheet from a garment pick list")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Pick list CSV (overrides input.pick_file)
    #[arg(short, long)]
    pub pick_file: Option<String>,

    /// Directory holding the `{group}.png` artwork (overrides artifacts.base_dir)
    #[arg(short, long)]
    pub artifact_dir: Option<String>,

    /// Output directory for the job bundle (overrides output.path)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the bundle but do not submit to the RIP
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log per-phase timing and memory
    #[arg(long)]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    pub fn apply_to(&self, config: &mut SheetConfig) {
        if let Some(pick_file) = &self.pick_file {
            config.input.pick_file = pick_file.clone();
        }
        if let Some(dir) = &self.artifact_dir {
            config.artifacts.base_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.dry_run {
            config.output.dry_run = true;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
    }
}

#[cfg(feature = "cli")]
impl SheetConfig {
    /// 決定這次執行的設定：明確給的 `--config` 必須存在，
    /// 沒給時才找工作目錄下的 `pick-sheet.toml`，都沒有就用預設值。
    /// 命令列參數最後套用，覆蓋檔案內的值。
    pub fn load(args: &CliArgs) -> Result<Self> {
        Self::load_with_default(args, Path::new(toml_config::DEFAULT_CONFIG_FILE))
    }

    fn load_with_default(args: &CliArgs, default_file: &Path) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None if default_file.is_file() => Self::from_file(default_file)?,
            None => Self::default(),
        };
        args.apply_to(&mut config);
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::SheetError;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::parse_from([
            "pick-sheet",
            "--pick-file",
            "today.csv",
            "--artifact-dir",
            "/srv/art",
            "--dry-run",
        ]);
        let mut config = SheetConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.input.pick_file, "today.csv");
        assert_eq!(config.artifacts.base_dir, "/srv/art");
        assert_eq!(config.output.path, "./output");
        assert!(config.output.dry_run);
        assert!(!config.monitoring.enabled);
    }

    #[test]
    fn test_explicit_missing_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let args = CliArgs::parse_from(["pick-sheet", "--config", missing.to_str().unwrap()]);

        // 即使預設檔存在，明確指定的檔案找不到也不能退回預設
        let fallback = dir.path().join("pick-sheet.toml");
        std::fs::write(&fallback, "[output]\npath = \"./fallback\"\n").unwrap();

        let err = SheetConfig::load_with_default(&args, &fallback).unwrap_err();
        assert!(matches!(err, SheetError::IoError(_)));
    }

    #[test]
    fn test_no_config_and_no_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let args = CliArgs::parse_from(["pick-sheet"]);

        let config = SheetConfig::load_with_default(&args, &dir.path().join("pick-sheet.toml")).unwrap();
        assert_eq!(config.input.pick_file, "pick.csv");
        assert_eq!(config.output.path, "./output");
        assert!(config.rip.controller_url.is_none());
    }

    #[test]
    fn test_default_file_is_picked_up_without_flag() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("pick-sheet.toml");
        std::fs::write(&default_file, "[input]\nsku_column = \"Item SKU\"\n").unwrap();
        let args = CliArgs::parse_from(["pick-sheet"]);

        let config = SheetConfig::load_with_default(&args, &default_file).unwrap();
        assert_eq!(config.input.sku_column, "Item SKU");
    }

    #[test]
    fn test_cli_output_overrides_file_value() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("night-shift.toml");
        std::fs::write(&file, "[output]\npath = \"./from-file\"\nbundle_name = \"night.zip\"\n").unwrap();
        let args = CliArgs::parse_from([
            "pick-sheet",
            "--config",
            file.to_str().unwrap(),
            "--output",
            "./from-cli",
        ]);

        let config = SheetConfig::load_with_default(&args, &dir.path().join("unused.toml")).unwrap();
        assert_eq!(config.output.path, "./from-cli");
        assert_eq!(config.output.bundle_name, "night.zip");
    }
}
