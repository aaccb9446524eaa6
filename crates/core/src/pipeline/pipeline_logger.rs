use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for the control loop.
///
/// The use case reports frames, stage timings and gesture events here
/// instead of formatting output itself.
pub trait PipelineLogger: Send {
    /// Count one captured frame; `interpreted` is true when gestures ran on it.
    fn frame(&mut self, interpreted: bool);

    /// Record how long a named loop stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Count one occurrence of a named gesture event (click, zoom, ...).
    fn event(&mut self, name: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Used by tests and embedders with their own reporting.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame(&mut self, _interpreted: bool) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn event(&mut self, _name: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger that keeps per-stage timings and event counters and prints a
/// summary when the loop stops.
///
/// A frame-rate line is logged every `report_every` captured frames.
pub struct StdoutPipelineLogger {
    report_every: usize,
    timings: HashMap<String, Vec<f64>>,
    events: HashMap<String, usize>,
    start_time: Instant,
    captured_frames: usize,
    interpreted_frames: usize,
}

impl StdoutPipelineLogger {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            timings: HashMap::new(),
            events: HashMap::new(),
            start_time: Instant::now(),
            captured_frames: 0,
            interpreted_frames: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.captured_frames == 0 && self.timings.is_empty() && self.events.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.captured_frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Session summary ({frames} frames, {} interpreted, {:.1}s):",
            self.interpreted_frames,
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:6.1}ms  max {:6.1}ms",
                durations.iter().cloned().fold(0.0, f64::max)
            ));
        }

        let mut names: Vec<_> = self.events.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: {}", self.events[name]));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Capture rate: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn event_count(&self, name: &str) -> usize {
        self.events.get(name).copied().unwrap_or(0)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(300)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame(&mut self, interpreted: bool) {
        self.captured_frames += 1;
        if interpreted {
            self.interpreted_frames += 1;
        }
        if self.captured_frames % self.report_every == 0 {
            let secs = self.start_time.elapsed().as_secs_f64();
            if secs > 0.0 {
                log::info!(
                    "{} frames captured ({:.1} fps)",
                    self.captured_frames,
                    self.captured_frames as f64 / secs
                );
            }
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn event(&mut self, name: &str) {
        *self.events.entry(name.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
