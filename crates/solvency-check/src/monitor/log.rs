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

//! Per-step trace of a safety evaluation
//!
//! `LogMonitor` prints one `[DEBUG]` line for every visit of the scan plus a
//! line at the start, at each wrap-around and at the verdict. Output goes to
//! stdout unless another writer is supplied; write failures are ignored so a
//! closed pipe never aborts an evaluation.

use crate::{
    monitor::safety_monitor::{BlockReason, SafetyMonitor},
    outcome::SafetyVerdict,
    stats::SafetyStatistics,
};
use num_traits::{PrimInt, Signed};
use solvency_model::{index::ProcessIndex, state::ResourceState};
use std::io::{Stdout, Write};

#[derive(Debug)]
pub struct LogMonitor<W = Stdout>
where
    W: Write,
{
    writer: W,
}

impl LogMonitor<Stdout> {
    /// Creates a `LogMonitor` writing to stdout.
    pub fn new() -> Self {
        Self {
            writer: std::io::stdout(),
        }
    }
}

impl Default for LogMonitor<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> LogMonitor<W>
where
    W: Write,
{
    /// Creates a `LogMonitor` writing to `writer`.
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the underlying writer.
    #[inline]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the monitor and returns the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    #[inline(always)]
    fn log_line(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.writer, "[DEBUG] {}", args);
    }
}

impl<W> std::fmt::Display for LogMonitor<W>
where
    W: Write,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor")
    }
}

impl<T, W> SafetyMonitor<T> for LogMonitor<W>
where
    T: PrimInt + Signed + std::fmt::Display,
    W: Write,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_scan(&mut self, state: &ResourceState<T>, _statistics: &SafetyStatistics) {
        self.log_line(format_args!(
            "checking safety of {} processes over {} resources",
            state.num_processes(),
            state.num_resources()
        ));
    }

    fn on_exit_scan(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics) {
        self.log_line(format_args!(
            "verdict {} after {} visits",
            verdict, statistics.visits
        ));
        let _ = self.writer.flush();
    }

    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        _available: &[T],
        _statistics: &SafetyStatistics,
    ) {
        self.log_line(format_args!(
            "resources are sufficient: freeing resource ({})",
            process
        ));
    }

    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        reason: BlockReason,
        _statistics: &SafetyStatistics,
    ) {
        match reason {
            BlockReason::InsufficientResources => {
                self.log_line(format_args!("resources are not sufficient ({})", process))
            }
            BlockReason::AlreadyDone => {
                self.log_line(format_args!("process already done ({})", process))
            }
        }
    }

    fn on_pass_completed(&mut self, pass: u64, _statistics: &SafetyStatistics) {
        self.log_line(format_args!("pass {} completed", pass));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn output(monitor: LogMonitor<Vec<u8>>) -> String {
        String::from_utf8(monitor.into_inner()).unwrap()
    }

    #[test]
    fn test_visit_lines() {
        let stats = SafetyStatistics::default();
        let mut monitor = LogMonitor::with_writer(Vec::new());
        let m: &mut dyn SafetyMonitor<IntegerType> = &mut monitor;
        m.on_process_finished(ProcessIndex::new(3), &[1, 2], &stats);
        m.on_process_blocked(
            ProcessIndex::new(0),
            BlockReason::InsufficientResources,
            &stats,
        );
        m.on_process_blocked(ProcessIndex::new(3), BlockReason::AlreadyDone, &stats);

        assert_eq!(
            output(monitor),
            "[DEBUG] resources are sufficient: freeing resource (P3)\n\
             [DEBUG] resources are not sufficient (P0)\n\
             [DEBUG] process already done (P3)\n"
        );
    }

    #[test]
    fn test_enter_and_exit_lines() {
        let state = ResourceState::<IntegerType>::from_need(
            vec![1, 1],
            vec![vec![0, 0]],
            vec![vec![1, 1]],
        )
        .unwrap();
        let stats = SafetyStatistics {
            visits: 2,
            ..Default::default()
        };
        let mut monitor = LogMonitor::with_writer(Vec::new());
        SafetyMonitor::<IntegerType>::on_enter_scan(&mut monitor, &state, &stats);
        SafetyMonitor::<IntegerType>::on_pass_completed(&mut monitor, 1, &stats);
        SafetyMonitor::<IntegerType>::on_exit_scan(&mut monitor, &SafetyVerdict::Unsafe, &stats);

        let text = output(monitor);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[DEBUG] checking safety of 1 processes over 2 resources",
                "[DEBUG] pass 1 completed",
                "[DEBUG] verdict Unsafe after 2 visits",
            ]
        );
    }
}
