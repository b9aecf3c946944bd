//! Optional process stats for operator visibility during a catalog run.
//! The pipeline is a single batch, so one summary after the run is enough.

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Mutex<System>,
    pid: Pid,
    started: Instant,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");

        Self {
            system: Mutex::new(system),
            pid,
            started: Instant::now(),
        }
    }

    /// Logs elapsed wall time and current process memory. Stats that cannot
    /// be collected are skipped silently; monitoring never fails a run.
    pub fn log_summary(&self, phase: &str) {
        let Ok(mut system) = self.system.lock() else {
            return;
        };
        system.refresh_all();

        let elapsed = self.started.elapsed();
        match system.process(self.pid) {
            Some(process) => {
                let memory_mb = process.memory() / 1024 / 1024;
                tracing::info!(
                    "📊 {} - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                    phase,
                    process.cpu_usage(),
                    memory_mb,
                    elapsed
                );
            }
            None => tracing::info!("📊 {} - Time: {:?}", phase, elapsed),
        }
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new() -> Self {
        Self
    }

    pub fn log_summary(&self, _phase: &str) {}
}

#[cfg(not(feature = "cli"))]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new()
    }
}
