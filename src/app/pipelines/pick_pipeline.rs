use crate::adapters::artwork::ArtworkDirectory;
use crate::adapters::pick_csv::read_pick_rows;
use crate::config::toml_config::SheetConfig;
use crate::core::aggregator::aggregate;
use crate::core::aspect::HeightSource;
use crate::core::job::render_job;
use crate::core::packer::pack;
use crate::core::queue::{build_queue, summarize};
use crate::core::{ImageProbe, JobSubmitter, PickRow, Pipeline, SheetResult, Storage};
use crate::domain::model::{DegradedArtifact, GroupSummary, PlacedEntry};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 撿貨單 → 排版 → RIP 工作的管道
pub struct PickSheetPipeline<S: Storage, P: ImageProbe + Send + Sync> {
    pub(crate) storage: S,
    pub(crate) probe: P,
    pub(crate) config: SheetConfig,
    pub(crate) submitter: Option<Box<dyn JobSubmitter>>,
}

#[derive(Serialize)]
struct PlacementManifest<'a> {
    generated_at: String,
    print_unit: &'a str,
    placements: &'a [PlacedEntry],
    unresolved: Vec<String>,
    degraded: &'a [DegradedArtifact],
}

impl<S: Storage, P: ImageProbe + Send + Sync> PickSheetPipeline<S, P> {
    pub fn new(storage: S, probe: P, config: SheetConfig) -> Self {
        Self {
            storage,
            probe,
            config,
            submitter: None,
        }
    }

    pub fn with_submitter(mut self, submitter: Box<dyn JobSubmitter>) -> Self {
        self.submitter = Some(submitter);
        self
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    fn summary_csv(summary: &[GroupSummary]) -> Result<Vec<u8>> {
        // 空的 summary 也要有標題列，所以自己寫
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["group", "count", "status"])?;
        for line in summary {
            writer.serialize(line)?;
        }
        writer.into_inner().map_err(|e| e.into_error().into())
    }

    fn bundle(&self, result: &SheetResult) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>("job.xml", FileOptions::default())?;
        zip.write_all(result.job_xml.as_bytes())?;

        zip.start_file::<_, ()>("summary.csv", FileOptions::default())?;
        zip.write_all(&Self::summary_csv(&result.summary)?)?;

        let manifest = PlacementManifest {
            generated_at: chrono::Utc::now().to_rfc3339(),
            print_unit: &self.config.rip.print_unit,
            placements: &result.placed,
            unresolved: result.unresolved.iter().map(|k| k.to_string()).collect(),
            degraded: &result.degraded,
        };
        zip.start_file::<_, ()>("placements.json", FileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: ImageProbe + Send + Sync> Pipeline for PickSheetPipeline<S, P> {
    async fn extract(&self) -> Result<Vec<PickRow>> {
        let pick_file = &self.config.input.pick_file;
        tracing::info!("📋 Reading pick list: {}", pick_file);

        let data = tokio::fs::read(pick_file).await?;
        read_pick_rows(&data, &self.config.input.sku_column)
    }

    async fn transform(&self, rows: Vec<PickRow>) -> Result<SheetResult> {
        let counts = aggregate(rows.iter().map(|row| row.sku.as_str()));
        let classified: usize = counts.values().sum();
        tracing::info!(
            "🔢 {} of {} SKUs classified into {} groups",
            classified,
            rows.len(),
            counts.len()
        );

        let artwork = ArtworkDirectory::new(
            &self.config.artifacts.base_dir,
            self.config.artifacts.extension.as_str(),
        );
        let queue = build_queue(&counts, &artwork);
        for key in &queue.unresolved {
            tracing::warn!(
                "⚠️ No artwork for {} at {}, skipping {} prints",
                key,
                artwork.path_for(key).display(),
                counts.get(key).copied().unwrap_or(0)
            );
        }

        let params = self.config.layout_params();
        let mut heights = HeightSource::new(&self.probe, params.fallback_height);
        let placed = pack(&queue.entries, &params, |artifact, width| {
            heights.height_of(artifact, width)
        });
        let degraded = heights.into_degraded();

        let summary = summarize(&counts, &queue.unresolved);
        for line in &summary {
            tracing::info!("{}: {}", line.group, line.count);
        }

        let job_xml = render_job(&self.config.job_envelope(), &placed);

        Ok(SheetResult {
            summary,
            placed,
            unresolved: queue.unresolved,
            degraded,
            job_xml,
        })
    }

    async fn load(&self, result: SheetResult) -> Result<String> {
        let bundle_name = &self.config.output.bundle_name;
        let output_path = format!("{}/{}", self.config.output_path(), bundle_name);

        let bundle = self.bundle(&result)?;
        tracing::debug!("Writing job bundle ({} bytes)", bundle.len());
        self.storage.write_file(bundle_name, &bundle).await?;
        tracing::info!("💾 Job bundle saved: {}", output_path);

        match (&self.submitter, self.config.output.dry_run) {
            (Some(_), true) => {
                tracing::info!("🔍 DRY RUN - job not submitted to the RIP");
            }
            (Some(submitter), false) => {
                if result.placed.is_empty() {
                    tracing::warn!("⚠️ Nothing was placed, skipping RIP submission");
                } else {
                    submitter.submit(&result.job_xml).await?;
                    tracing::info!(
                        "🖨️ Submitted {} prints to print unit {}",
                        result.placed.len(),
                        self.config.rip.print_unit
                    );
                }
            }
            (None, _) => {
                tracing::info!("No RIP controller configured, bundle only");
            }
        }

        Ok(output_path)
    }
}
