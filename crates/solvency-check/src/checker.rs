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

//! Circular-scan safety checker.
//!
//! `SafetyChecker` decides whether every process in a `ResourceState` can be
//! driven to completion. It walks the processes in index order, wrapping
//! around after the last one. A visited process that is still pending and
//! whose remaining need fits the working pool is simulated to completion: its
//! holdings are released into the pool and it is appended to the sequence.
//! Any other visit counts as a failure. The scan reports `Safe` on the first
//! failing visit once every process is done, and `Unsafe` on the first
//! failing visit after `P - 1` failures within the current pass. The failure
//! counter restarts at every wrap-around, while completed processes stay done.
//!
//! Each evaluation runs inside a short-lived session object that owns the
//! counters, statistics and timing of that run. The checker itself only keeps
//! reusable scratch buffers (working pool, done set, sequence) that are reset
//! after every evaluation, so one checker can serve many snapshots without
//! reallocating.

use crate::{
    monitor::{
        no_op::NoOperationMonitor,
        safety_monitor::{BlockReason, SafetyMonitor},
    },
    outcome::{SafetyOutcome, SafetyVerdict},
    sequence::SafeSequence,
    stats::SafetyStatistics,
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use solvency_model::{index::ProcessIndex, state::ResourceState};

/// A reusable engine that answers the safety question for resource
/// allocation snapshots.
#[derive(Debug, Clone)]
pub struct SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    work: Vec<T>,
    done: FixedBitSet,
    sequence: Vec<ProcessIndex>,
}

impl<T> Default for SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SafetyChecker<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new checker without any preallocated storage.
    #[inline]
    pub fn new() -> Self {
        Self {
            work: Vec::new(),
            done: FixedBitSet::new(),
            sequence: Vec::new(),
        }
    }

    /// Creates a new checker with storage preallocated for snapshots of
    /// `num_resources` resource types and `num_processes` processes.
    ///
    /// # Note
    ///
    /// Larger snapshots are still accepted; the buffers grow on demand.
    /// Preallocation only moves the cost of the allocations to construction.
    #[inline]
    pub fn preallocated(num_resources: usize, num_processes: usize) -> Self {
        Self {
            work: Vec::with_capacity(num_resources),
            done: FixedBitSet::with_capacity(num_processes),
            sequence: Vec::with_capacity(num_processes),
        }
    }

    /// Evaluates `state` without observing the scan.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solvency_check::checker::SafetyChecker;
    /// # use solvency_model::state::ResourceState;
    /// let state = ResourceState::<i64>::from_need(
    ///     vec![1],
    ///     vec![vec![1], vec![0]],
    ///     vec![vec![1], vec![2]],
    /// )
    /// .unwrap();
    ///
    /// let mut checker = SafetyChecker::new();
    /// let outcome = checker.evaluate(&state);
    /// assert_eq!(outcome.sequence().unwrap().to_string(), "<P0 P1>");
    /// ```
    #[inline]
    pub fn evaluate(&mut self, state: &ResourceState<T>) -> SafetyOutcome {
        self.evaluate_with_monitor(state, NoOperationMonitor::new())
    }

    /// Evaluates `state`, reporting every scan event to `monitor`.
    ///
    /// Pass `&mut monitor` to keep ownership of the monitor and inspect it
    /// after the evaluation.
    ///
    /// # Panics
    ///
    /// Panics if the scan visits more than `P * (P + 1)` positions. This
    /// cannot happen for a well-formed snapshot and indicates a broken
    /// internal invariant.
    pub fn evaluate_with_monitor<S>(
        &mut self,
        state: &ResourceState<T>,
        mut monitor: S,
    ) -> SafetyOutcome
    where
        S: SafetyMonitor<T>,
    {
        let session = SafetyScanSession::new(self, state, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Returns `true` if every process in `state` can run to completion.
    #[inline]
    pub fn is_safe(&mut self, state: &ResourceState<T>) -> bool {
        self.evaluate(state).is_safe()
    }

    /// Clears the scratch buffers while keeping their capacity.
    #[inline]
    fn reset(&mut self) {
        self.work.clear();
        self.done.clear();
        self.sequence.clear();
    }
}

/// The state and logic of a single safety evaluation.
struct SafetyScanSession<'a, T, S>
where
    T: PrimInt + Signed,
{
    checker: &'a mut SafetyChecker<T>,
    state: &'a ResourceState<T>,
    monitor: &'a mut S,
    stats: SafetyStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for SafetyScanSession<'a, T, S>
where
    T: PrimInt + Signed + std::fmt::Debug,
    S: SafetyMonitor<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafetyScanSession")
            .field("monitor", &self.monitor.name())
            .field("work", &self.checker.work)
            .field("sequence", &self.checker.sequence)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> SafetyScanSession<'a, T, S>
where
    T: PrimInt + Signed,
    S: SafetyMonitor<T>,
{
    #[inline]
    fn new(
        checker: &'a mut SafetyChecker<T>,
        state: &'a ResourceState<T>,
        monitor: &'a mut S,
    ) -> Self {
        Self {
            checker,
            state,
            monitor,
            stats: SafetyStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> SafetyOutcome {
        self.initialize();
        self.monitor.on_enter_scan(self.state, &self.stats);

        let verdict = self.scan();

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_scan(&verdict, &self.stats);
        SafetyOutcome::new(verdict, self.stats)
    }

    /// Loads the working pool from the snapshot and sizes the done set.
    #[inline]
    fn initialize(&mut self) {
        let num_processes = self.state.num_processes();

        self.checker.work.clear();
        self.checker.work.extend_from_slice(self.state.available());

        self.checker.done.clear();
        self.checker.done.grow(num_processes);

        self.checker.sequence.clear();
        self.checker.sequence.reserve(num_processes);
    }

    fn scan(&mut self) -> SafetyVerdict {
        let num_processes = self.state.num_processes();
        if num_processes == 0 {
            return SafetyVerdict::Safe(SafeSequence::empty());
        }

        let max_visits = (num_processes as u64).saturating_mul(num_processes as u64 + 1);
        let mut done_counter = 0usize;
        let mut fail_counter = 0usize;
        let mut index = 0usize;

        loop {
            assert!(
                self.stats.visits < max_visits,
                "safety scan exceeded {} visits for {} processes",
                max_visits,
                num_processes
            );
            self.stats.on_visit();

            let process = ProcessIndex::new(index);
            let already_done = self.checker.done.contains(index);

            if !already_done && self.is_sufficient(process) {
                self.finish(process);
                done_counter += 1;
            } else if done_counter >= num_processes {
                return SafetyVerdict::Safe(self.checker.sequence.iter().copied().collect());
            } else if fail_counter >= num_processes - 1 {
                return SafetyVerdict::Unsafe;
            } else {
                fail_counter += 1;
                let reason = if already_done {
                    BlockReason::AlreadyDone
                } else {
                    BlockReason::InsufficientResources
                };
                self.stats.on_blocked(reason);
                self.monitor
                    .on_process_blocked(process, reason, &self.stats);
            }

            index += 1;
            if index == num_processes {
                index = 0;
                fail_counter = 0;
                self.stats.on_pass_completed();
                self.monitor
                    .on_pass_completed(self.stats.passes, &self.stats);
            }
        }
    }

    /// Returns `true` if the remaining need of `process` fits the working pool
    /// for every resource type.
    #[inline(always)]
    fn is_sufficient(&self, process: ProcessIndex) -> bool {
        self.state
            .process_need(process)
            .iter()
            .zip(&self.checker.work)
            .all(|(need, work)| need <= work)
    }

    /// Simulates `process` to completion.
    #[inline(always)]
    fn finish(&mut self, process: ProcessIndex) {
        for (work, &held) in self
            .checker
            .work
            .iter_mut()
            .zip(self.state.process_assigned(process))
        {
            *work = work.saturating_add(held);
        }
        self.checker.done.insert(process.get());
        self.checker.sequence.push(process);

        self.stats.on_completion();
        self.monitor
            .on_process_finished(process, &self.checker.work, &self.stats);
    }
}
