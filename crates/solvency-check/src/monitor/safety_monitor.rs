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

//! Safety scan monitoring interface
//!
//! Declares the `SafetyMonitor` trait and `BlockReason` for observing a
//! safety evaluation. Monitors see every scan event but cannot influence the
//! verdict; they exist for tracing, timing and test instrumentation.
//!
//! Lifecycle
//! - enter → {finished | blocked}* per visit → pass completed at each wrap → exit
//! - The terminal visit that decides the verdict produces no per-visit event.
//! - `SafetyStatistics` is provided to every callback.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - `&mut M` is itself a monitor, so callers can keep ownership of a
//!   monitor and inspect it after the evaluation.

use crate::{outcome::SafetyVerdict, stats::SafetyStatistics};
use num_traits::{PrimInt, Signed};
use solvency_model::{index::ProcessIndex, state::ResourceState};

/// Why a visited process was not simulated to completion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum BlockReason {
    /// The process was already simulated to completion in an earlier visit.
    AlreadyDone,
    /// The process needs more of some resource than is currently available.
    InsufficientResources,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::AlreadyDone => write!(f, "AlreadyDone"),
            BlockReason::InsufficientResources => write!(f, "InsufficientResources"),
        }
    }
}

/// Trait for observing a safety evaluation.
pub trait SafetyMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the first visit.
    fn on_enter_scan(&mut self, state: &ResourceState<T>, statistics: &SafetyStatistics);
    /// Called once after the verdict is known.
    fn on_exit_scan(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics);
    /// Called when `process` is simulated to completion; `available` is the
    /// working pool after its holdings were released.
    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        available: &[T],
        statistics: &SafetyStatistics,
    );
    /// Called when a visit to `process` makes no progress.
    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        reason: BlockReason,
        statistics: &SafetyStatistics,
    );
    /// Called when the scan wraps around after the last process.
    /// `pass` is the number of passes completed so far.
    fn on_pass_completed(&mut self, pass: u64, statistics: &SafetyStatistics);
}

impl<T, M> SafetyMonitor<T> for &mut M
where
    T: PrimInt + Signed,
    M: SafetyMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_scan(&mut self, state: &ResourceState<T>, statistics: &SafetyStatistics) {
        (**self).on_enter_scan(state, statistics);
    }

    #[inline(always)]
    fn on_exit_scan(&mut self, verdict: &SafetyVerdict, statistics: &SafetyStatistics) {
        (**self).on_exit_scan(verdict, statistics);
    }

    #[inline(always)]
    fn on_process_finished(
        &mut self,
        process: ProcessIndex,
        available: &[T],
        statistics: &SafetyStatistics,
    ) {
        (**self).on_process_finished(process, available, statistics);
    }

    #[inline(always)]
    fn on_process_blocked(
        &mut self,
        process: ProcessIndex,
        reason: BlockReason,
        statistics: &SafetyStatistics,
    ) {
        (**self).on_process_blocked(process, reason, statistics);
    }

    #[inline(always)]
    fn on_pass_completed(&mut self, pass: u64, statistics: &SafetyStatistics) {
        (**self).on_pass_completed(pass, statistics);
    }
}

impl<T> std::fmt::Debug for dyn SafetyMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SafetyMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SafetyMonitor({})", self.name())
    }
}
