use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use tokio::sync::Mutex;

pub struct SheetEngine<P: Pipeline> {
    pipeline: P,
    monitor: Mutex<RunMonitor>,
}

impl<P: Pipeline> SheetEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: Mutex::new(RunMonitor::new(monitor_enabled)),
        }
    }

    /// extract → transform → load
    pub async fn run(&self) -> Result<RunReport> {
        let mut monitor = self.monitor.lock().await;
        tracing::info!("🚀 Starting pick sheet run");

        monitor.begin_phase();
        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} pick rows", rows.len());
        monitor.end_phase("extract");

        monitor.begin_phase();
        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "🧩 Placed {} prints ({} groups unresolved, {} degraded)",
            result.placed.len(),
            result.unresolved.len(),
            result.degraded.len()
        );
        monitor.end_phase("transform");

        let summary = result.summary.clone();
        let placed = result.placed.len();
        let unresolved = result.unresolved.iter().map(|k| k.to_string()).collect();
        let degraded = result.degraded.clone();

        monitor.begin_phase();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📦 Output saved to: {}", output_path);
        monitor.end_phase("load");

        monitor.log_final_stats();
        Ok(RunReport {
            output_path,
            summary,
            placed,
            unresolved,
            degraded,
        })
    }
}
