//! Rolling fps estimate and sustained-band timers

use glyphswarm_core::LodConfig;
use log::debug;

/// What the pool should do with its particle budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodDirective {
    None,
    Reduce,
    Restore,
}

/// Observes frame timestamps and emits hysteresis-gated resize directives.
///
/// Timestamps are seconds on any monotonic clock supplied by the driver, so
/// the timers pause whenever the driver stops ticking.
pub struct FpsMonitor {
    low_fps: f32,
    high_fps: f32,
    reduce_after: f64,
    restore_after: f64,
    warmup: f64,
    /// Ring buffer of instantaneous fps samples
    samples: Vec<f32>,
    next_slot: usize,
    filled: usize,
    first_tick: Option<f64>,
    last_tick: Option<f64>,
    low_since: Option<f64>,
    high_since: Option<f64>,
}

impl FpsMonitor {
    pub fn new(config: &LodConfig) -> Self {
        let window = config.sample_window.max(1);
        Self {
            low_fps: config.low_fps,
            high_fps: config.high_fps,
            reduce_after: config.reduce_after_secs,
            restore_after: config.restore_after_secs,
            warmup: config.warmup_secs,
            samples: vec![0.0; window],
            next_slot: 0,
            filled: 0,
            first_tick: None,
            last_tick: None,
            low_since: None,
            high_since: None,
        }
    }

    /// Forget all samples and timers; the warm-up window restarts
    pub fn reset(&mut self) {
        self.next_slot = 0;
        self.filled = 0;
        self.first_tick = None;
        self.last_tick = None;
        self.low_since = None;
        self.high_since = None;
    }

    /// Mean of the buffered samples, 0 before the second tick
    pub fn fps(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        self.samples[..self.filled].iter().sum::<f32>() / self.filled as f32
    }

    pub fn is_warming_up(&self, now: f64) -> bool {
        match self.first_tick {
            Some(first) => now - first < self.warmup,
            None => true,
        }
    }

    fn push_sample(&mut self, fps: f32) {
        self.samples[self.next_slot] = fps;
        self.next_slot = (self.next_slot + 1) % self.samples.len();
        self.filled = (self.filled + 1).min(self.samples.len());
    }

    /// Record a frame at `now` and return the directive it triggers, if any
    pub fn observe(&mut self, now: f64) -> LodDirective {
        let Some(last) = self.last_tick.replace(now) else {
            self.first_tick = Some(now);
            return LodDirective::None;
        };
        let elapsed = now - last;
        if !(elapsed > 0.0) {
            return LodDirective::None;
        }
        self.push_sample((1.0 / elapsed) as f32);

        if self.is_warming_up(now) {
            self.low_since = None;
            self.high_since = None;
            return LodDirective::None;
        }

        let fps = self.fps();
        let (low, high) = (self.low_fps, self.high_fps);
        if fps < low {
            self.high_since = None;
            let since = *self.low_since.get_or_insert_with(|| {
                debug!("[lod] fps {fps:.1} below {low}: low timer started");
                now
            });
            if now - since > self.reduce_after {
                self.low_since = None;
                return LodDirective::Reduce;
            }
        } else if fps > high {
            self.low_since = None;
            let since = *self.high_since.get_or_insert_with(|| {
                debug!("[lod] fps {fps:.1} above {high}: high timer started");
                now
            });
            if now - since > self.restore_after {
                self.high_since = None;
                return LodDirective::Restore;
            }
        } else {
            self.low_since = None;
            self.high_since = None;
        }
        LodDirective::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(warmup: f64) -> LodConfig {
        LodConfig {
            warmup_secs: warmup,
            sample_window: 4,
            ..Default::default()
        }
    }

    /// Tick at `fps` for `frames` frames starting at `*t`, collecting directives
    fn run(monitor: &mut FpsMonitor, t: &mut f64, fps: f64, frames: usize) -> Vec<(f64, LodDirective)> {
        let mut fired = Vec::new();
        let start = *t;
        for i in 1..=frames {
            *t = start + i as f64 / fps;
            let d = monitor.observe(*t);
            if d != LodDirective::None {
                fired.push((*t, d));
            }
        }
        fired
    }

    #[test]
    fn first_tick_and_duplicates_are_ignored() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        assert_eq!(monitor.observe(1.0), LodDirective::None);
        assert_eq!(monitor.fps(), 0.0);
        assert_eq!(monitor.observe(1.0), LodDirective::None);
        assert_eq!(monitor.fps(), 0.0);
        monitor.observe(1.5);
        assert!((monitor.fps() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn fps_is_mean_of_window() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        let mut t = 0.0;
        monitor.observe(t);
        run(&mut monitor, &mut t, 10.0, 4);
        assert!((monitor.fps() - 10.0).abs() < 1e-3);
        // Two 20 fps samples replace the two oldest 10 fps samples
        run(&mut monitor, &mut t, 20.0, 2);
        assert!((monitor.fps() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn sustained_low_fires_once_per_period() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        let mut t = 0.0;
        monitor.observe(t);
        // 10 fps for 12 seconds
        let fired = run(&mut monitor, &mut t, 10.0, 120);
        assert_eq!(fired.len(), 2);
        assert!(fired.iter().all(|(_, d)| *d == LodDirective::Reduce));
        assert!(fired[0].0 > 5.0 && fired[0].0 < 5.5);
        assert!(fired[1].0 - fired[0].0 > 5.0);
    }

    #[test]
    fn sustained_high_restores_after_longer_period() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        let mut t = 0.0;
        monitor.observe(t);
        // 60 fps for 7.5 seconds: not yet
        assert!(run(&mut monitor, &mut t, 60.0, 450).is_empty());
        let fired = run(&mut monitor, &mut t, 60.0, 60);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, LodDirective::Restore);
    }

    #[test]
    fn mid_band_cancels_timers() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        let mut t = 0.0;
        monitor.observe(t);
        assert!(run(&mut monitor, &mut t, 10.0, 40).is_empty());
        // 30 fps sits between the thresholds
        assert!(run(&mut monitor, &mut t, 30.0, 30).is_empty());
        // Low timer starts over: another 4 seconds is not enough
        assert!(run(&mut monitor, &mut t, 10.0, 40).is_empty());
    }

    #[test]
    fn entering_low_cancels_high() {
        let mut monitor = FpsMonitor::new(&config(0.0));
        let mut t = 0.0;
        monitor.observe(t);
        assert!(run(&mut monitor, &mut t, 60.0, 420).is_empty());
        assert!(run(&mut monitor, &mut t, 10.0, 20).is_empty());
        // High timer restarted from zero: 7 more seconds does not restore
        assert!(run(&mut monitor, &mut t, 60.0, 420).is_empty());
    }

    #[test]
    fn warmup_suppresses_directives() {
        let mut monitor = FpsMonitor::new(&config(12.0));
        let mut t = 0.0;
        monitor.observe(t);
        // 10 fps for 11 seconds, all inside the warm-up window
        assert!(run(&mut monitor, &mut t, 10.0, 110).is_empty());
        assert!(monitor.is_warming_up(t));
        // Timers only start once warm-up ends at t = 12
        let fired = run(&mut monitor, &mut t, 10.0, 70);
        assert_eq!(fired.len(), 1);
        assert!(fired[0].0 > 17.0);
    }

    #[test]
    fn reset_restarts_warmup() {
        let mut monitor = FpsMonitor::new(&config(1.0));
        let mut t = 0.0;
        monitor.observe(t);
        run(&mut monitor, &mut t, 10.0, 30);
        assert!(!monitor.is_warming_up(t));
        monitor.reset();
        assert_eq!(monitor.fps(), 0.0);
        monitor.observe(t);
        assert!(monitor.is_warming_up(t + 0.5));
    }
}
