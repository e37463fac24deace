//! FPS sampling and the A/B benchmark between backends.

use crate::types::BackendKind;

/// One closed sampling window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub fps: u32,
    pub avg_frame_ms: f64,
}

/// Counts frames over fixed windows of `interval` seconds.
///
/// Every display refresh is timed; only refreshes that actually rendered
/// count towards the FPS figure.
#[derive(Debug)]
pub struct FrameStats {
    interval: f64,
    window: f64,
    rendered: u32,
    ticks: u32,
    last: Option<FpsSample>,
}

impl FrameStats {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(f64::EPSILON),
            window: 0.0,
            rendered: 0,
            ticks: 0,
            last: None,
        }
    }

    /// Most recently published sample.
    pub fn last(&self) -> Option<FpsSample> {
        self.last
    }

    /// Records one refresh that took `dt` seconds.
    ///
    /// ### Returns
    /// The new sample when this refresh closes a window.
    pub fn record(&mut self, dt: f64, rendered: bool) -> Option<FpsSample> {
        self.window += dt.max(0.0);
        self.ticks += 1;
        if rendered {
            self.rendered += 1;
        }
        if self.window < self.interval {
            return None;
        }

        let sample = FpsSample {
            fps: (self.rendered as f64 / self.window).round() as u32,
            avg_frame_ms: self.window * 1000.0 / self.ticks.max(1) as f64,
        };
        self.window = 0.0;
        self.rendered = 0;
        self.ticks = 0;
        self.last = Some(sample);
        Some(sample)
    }
}

/// Averages collected by one benchmark run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkReport {
    pub native_avg: Option<f64>,
    pub script_avg: Option<f64>,
}

impl BenchmarkReport {
    /// Relative FPS gain of native over script, in percent.
    pub fn improvement_pct(&self) -> Option<f64> {
        match (self.native_avg, self.script_avg) {
            (Some(n), Some(s)) if s > 0.0 => Some((n - s) / s * 100.0),
            _ => None,
        }
    }
}

/// Collects FPS samples per backend while running.
#[derive(Debug, Default)]
pub struct Benchmark {
    running: bool,
    samples: [Vec<u32>; 2],
}

impl Benchmark {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        log::info!("benchmark started");
        self.running = true;
        for s in &mut self.samples {
            s.clear();
        }
    }

    pub fn record(&mut self, kind: BackendKind, fps: u32) {
        if self.running {
            self.samples[kind.slot()].push(fps);
        }
    }

    pub fn samples(&self, kind: BackendKind) -> &[u32] {
        &self.samples[kind.slot()]
    }

    pub fn stop(&mut self) -> BenchmarkReport {
        self.running = false;
        let avg = |s: &[u32]| {
            (!s.is_empty()).then(|| s.iter().map(|&v| v as f64).sum::<f64>() / s.len() as f64)
        };
        let report = BenchmarkReport {
            native_avg: avg(&self.samples[BackendKind::Native.slot()]),
            script_avg: avg(&self.samples[BackendKind::Script.slot()]),
        };
        log::info!(
            "benchmark stopped: native avg {:?} fps, script avg {:?} fps, gain {:?}%",
            report.native_avg,
            report.script_avg,
            report.improvement_pct()
        );
        report
    }
}
