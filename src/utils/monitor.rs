use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
}

/// 記錄每個階段（extract / transform / load）的耗時與記憶體
pub struct RunMonitor {
    enabled: bool,
    started: Instant,
    phase_started: Instant,
    timings: Vec<PhaseTiming>,
    #[cfg(feature = "cli")]
    system: System,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            phase_started: now,
            timings: Vec::new(),
            #[cfg(feature = "cli")]
            system: System::new(),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn begin_phase(&mut self) {
        self.phase_started = Instant::now();
    }

    pub fn end_phase(&mut self, phase: &str) {
        if !self.enabled {
            return;
        }

        let timing = PhaseTiming {
            phase: phase.to_string(),
            elapsed: self.phase_started.elapsed(),
            memory_mb: self.memory_mb(),
        };

        match timing.memory_mb {
            Some(mb) => tracing::info!("📊 {} - {:?}, memory {}MB", phase, timing.elapsed, mb),
            None => tracing::info!("📊 {} - {:?}", phase, timing.elapsed),
        }
        self.timings.push(timing);
    }

    pub fn timings(&self) -> &[PhaseTiming] {
        &self.timings
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak = self.timings.iter().filter_map(|t| t.memory_mb).max();
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}",
            self.started.elapsed(),
            peak.map(|mb| format!("{}MB", mb))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }

    #[cfg(feature = "cli")]
    fn memory_mb(&mut self) -> Option<u64> {
        let pid = self.pid?;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn memory_mb(&mut self) -> Option<u64> {
        None
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
