// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Wall-clock timing of a safety evaluation
//!
//! `TimingMonitor` starts its clock when the scan is entered and reports
//! `[DEBUG] <label> took <elapsed>` when it exits. The last measured
//! duration stays available through `elapsed()` so callers can read it
//! after the evaluation.

use crate::{
    monitor::safety_monitor::{BlockReason, SafetyMonitor},
    outcome::SafetyVerdict,
    stats::SafetyStatistics,
};
use num_traits::{PrimInt, Signed};
use solvency_model::{index::ProcessIndex, state::ResourceState};
use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

/// A safety monitor that measures how long an evaluation takes.
#[derive(Debug)]
pub struct TimingMonitor<W = Stdout>
where
    W: Write,
{
    label: String,
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    writer: W,
}

impl TimingMonitor<Stdout> {
    /// Creates a new `TimingMonitor` reporting to stdout under `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_writer(label, std::io::stdout())
    }
}

impl<W> TimingMonitor<W>
where
    W: Write,
{
    /// Creates a new `TimingMonitor` reporting to `writer` under `label`.
    pub fn with_writer(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            start_time: None,
            elapsed: None,
            writer,
        }
    }

    /// Returns the label used in the report line.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the duration of the last completed evaluation, if any.
    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Consumes the monitor and returns the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T, W> SafetyMonitor<T> for TimingMonitor<W>
where
    T: PrimInt + Signed,
    W: Write,
{
    fn name(&self) -> &str {
        "TimingMonitor"
    }

    fn on_enter_scan(&mut self, _state: &ResourceState<T>, _statistics: &SafetyStatistics) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    fn on_exit_scan(&mut self, _verdict: &SafetyVerdict, _statistics: &SafetyStatistics) {
        let Some(start) = self.start_time.take() else {
            return;
        };
        let elapsed = start.elapsed();
        self.elapsed = Some(elapsed);
        let _ = writeln!(self.writer, "[DEBUG] {} took {:?}", self.label, elapsed);
    }

    fn on_process_finished(
        &mut self,
        _process: ProcessIndex,
        _available: &[T],
        _statistics: &SafetyStatistics,
    ) {
    }

    fn on_process_blocked(
        &mut self,
        _process: ProcessIndex,
        _reason: BlockReason,
        _statistics: &SafetyStatistics,
    ) {
    }

    fn on_pass_completed(&mut self, _pass: u64, _statistics: &SafetyStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_reports_after_exit() {
        let state =
            ResourceState::<IntegerType>::from_need(vec![0], vec![], vec![]).unwrap();
        let stats = SafetyStatistics::default();
        let mut monitor = TimingMonitor::with_writer("solve", Vec::new());
        assert!(monitor.elapsed().is_none());

        SafetyMonitor::<IntegerType>::on_enter_scan(&mut monitor, &state, &stats);
        SafetyMonitor::<IntegerType>::on_exit_scan(&mut monitor, &SafetyVerdict::Unsafe, &stats);

        assert!(monitor.elapsed().is_some());
        assert_eq!(monitor.label(), "solve");
        let text = String::from_utf8(monitor.into_inner()).unwrap();
        assert!(text.starts_with("[DEBUG] solve took "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_exit_without_enter_is_silent() {
        let stats = SafetyStatistics::default();
        let mut monitor = TimingMonitor::with_writer("solve", Vec::new());
        SafetyMonitor::<IntegerType>::on_exit_scan(&mut monitor, &SafetyVerdict::Unsafe, &stats);
        assert!(monitor.elapsed().is_none());
        assert!(monitor.into_inner().is_empty());
    }
}
