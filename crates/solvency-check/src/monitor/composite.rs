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

//! Monitoring combinator for safety evaluations
//!
//! Provides `CompositeSafetyMonitor`, a fan‑out monitor that forwards every
//! event to its children in insertion order. This lets a caller attach a
//! trace and a timer to the same evaluation without the checker knowing.

use crate::{
    monitor::safety_monitor::{BlockReason, SafetyMonitor},
    outcome::SafetyVerdict,
    stats::SafetyStatistics,
};
use num_traits::{PrimInt, Signed};
use solvency_model::{index::ProcessIndex, state::ResourceState};

/// A safety monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeSafetyMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    monitors: Vec<Box<dyn SafetyMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeSafetyMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeSafetyMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new empty `CompositeSafetyMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeSafetyMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SafetyMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SafetyMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn SafetyMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Clears all monitors from the composite monitor.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SafetyMonitor<T> + 'a>> for CompositeSafetyMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SafetyMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SafetyMonitor<T> for CompositeSafetyMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeSafetyMonitor"
    }

    #[inline(always)]
    fn on_enter_scan(&mut self, state: &ResourceState<T>, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_scan(state, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_scan(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_scan(verdict, statistics);
        }
    }

    #[inline(always)]
    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        available: &[T],
        statistics: &SafetyStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_process_finished(process, available, statistics);
        }
    }

    #[inline(always)]
    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        reason: BlockReason,
        statistics: &SafetyStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_process_blocked(process, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_pass_completed(&mut self, pass: u64, statistics: &SafetyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_pass_completed(pass, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;

    type IntegerType = i64;

    #[derive(Default)]
    struct CountingMonitor {
        enters: usize,
        finished: Vec<usize>,
        blocked: usize,
        passes: u64,
        exits: usize,
    }

    impl SafetyMonitor<IntegerType> for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }

        fn on_enter_scan(&mut self, _state: &ResourceState<IntegerType>, _s: &SafetyStatistics) {
            self.enters += 1;
        }

        fn on_exit_scan(&mut self, _verdict: &SafetyVerdict, _s: &SafetyStatistics) {
            self.exits += 1;
        }

        fn on_process_finished(
            &mut self,
            process: ProcessIndex,
            _available: &[IntegerType],
            _s: &SafetyStatistics,
        ) {
            self.finished.push(process.get());
        }

        fn on_process_blocked(
            &mut self,
            _process: ProcessIndex,
            _reason: BlockReason,
            _s: &SafetyStatistics,
        ) {
            self.blocked += 1;
        }

        fn on_pass_completed(&mut self, pass: u64, _s: &SafetyStatistics) {
            self.passes = pass;
        }
    }

    #[test]
    fn test_events_reach_every_child() {
        let state = ResourceState::<IntegerType>::from_need(vec![1], vec![vec![0]], vec![vec![1]])
            .unwrap();
        let stats = SafetyStatistics::default();

        let mut first = CountingMonitor::default();
        let mut second = CountingMonitor::default();
        {
            let mut composite = CompositeSafetyMonitor::<IntegerType>::with_capacity(3);
            composite.add_monitor(&mut first);
            composite.add_monitor(&mut second);
            composite.add_monitor(NoOperationMonitor::new());
            assert_eq!(composite.len(), 3);

            composite.on_enter_scan(&state, &stats);
            composite.on_process_finished(ProcessIndex::new(0), &[1], &stats);
            composite.on_process_blocked(ProcessIndex::new(0), BlockReason::AlreadyDone, &stats);
            composite.on_pass_completed(1, &stats);
            composite.on_exit_scan(&SafetyVerdict::Unsafe, &stats);
        }

        for monitor in [&first, &second] {
            assert_eq!(monitor.enters, 1);
            assert_eq!(monitor.finished, vec![0]);
            assert_eq!(monitor.blocked, 1);
            assert_eq!(monitor.passes, 1);
            assert_eq!(monitor.exits, 1);
        }
    }

    #[test]
    fn test_empty_composite() {
        let mut composite = CompositeSafetyMonitor::<IntegerType>::default();
        assert!(composite.is_empty());
        composite.add_monitor(NoOperationMonitor::new());
        assert!(!composite.is_empty());
        assert_eq!(composite.monitors()[0].name(), "NoOperationMonitor");
        composite.clear();
        assert!(composite.is_empty());
        assert_eq!(composite.name(), "CompositeSafetyMonitor");
    }
}
