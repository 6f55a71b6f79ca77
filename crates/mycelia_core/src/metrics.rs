//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and tick counters for monitoring a running
//! world.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Collector for per-tick simulation statistics.
pub struct Metrics {
    tick_count: AtomicU64,
    cell_count: AtomicU64,
    organism_count: AtomicU64,
    spore_count: AtomicU64,
    busiest_tick_us: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            cell_count: AtomicU64::new(0),
            organism_count: AtomicU64::new(0),
            spore_count: AtomicU64::new(0),
            busiest_tick_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and population.
    pub fn record_tick(&self, duration: Duration, cells: usize, organisms: usize, spores: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.cell_count.store(cells as u64, Ordering::Relaxed);
        self.organism_count.store(organisms as u64, Ordering::Relaxed);
        self.spore_count.store(spores as u64, Ordering::Relaxed);
        self.busiest_tick_us
            .fetch_max(duration.as_micros() as u64, Ordering::Relaxed);

        // Log at info level every 1000 ticks
        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::info!(
                tick = tick,
                cells = cells,
                organisms = organisms,
                spores = spores,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cell_count(&self) -> u64 {
        self.cell_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn organism_count(&self) -> u64 {
        self.organism_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn spore_count(&self) -> u64 {
        self.spore_count.load(Ordering::Relaxed)
    }

    /// Slowest tick seen so far.
    #[must_use]
    pub fn busiest_tick(&self) -> Duration {
        Duration::from_micros(self.busiest_tick_us.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`, defaulting to `info`. Output goes to stderr.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
