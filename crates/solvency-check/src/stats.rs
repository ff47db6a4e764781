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

use crate::monitor::safety_monitor::BlockReason;
use std::time::Duration;

/// Statistics collected during one safety evaluation.
///
/// Every visited scan position is counted exactly once: as a completion, as
/// a blocked visit (already done or insufficient resources), or as the single
/// terminal visit that produced the verdict. For a non-empty state this gives
/// `visits == completions + already_done_visits + insufficient_visits + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafetyStatistics {
    /// Total scan positions visited.
    pub visits: u64,
    /// Full passes over all processes that wrapped around to the first one.
    pub passes: u64,
    /// Processes simulated to completion.
    pub completions: u64,
    /// Visits to a process that had already been simulated to completion.
    pub already_done_visits: u64,
    /// Visits to a pending process whose need exceeded the available units.
    pub insufficient_visits: u64,
    /// Total time spent in the evaluation.
    pub time_total: Duration,
}

impl SafetyStatistics {
    #[inline]
    pub fn on_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    #[inline]
    pub fn on_pass_completed(&mut self) {
        self.passes = self.passes.saturating_add(1);
    }

    #[inline]
    pub fn on_completion(&mut self) {
        self.completions = self.completions.saturating_add(1);
    }

    #[inline]
    pub fn on_blocked(&mut self, reason: BlockReason) {
        match reason {
            BlockReason::AlreadyDone => {
                self.already_done_visits = self.already_done_visits.saturating_add(1)
            }
            BlockReason::InsufficientResources => {
                self.insufficient_visits = self.insufficient_visits.saturating_add(1)
            }
        }
    }

    /// Returns the number of visits that did not complete a process.
    #[inline]
    pub fn blocked_visits(&self) -> u64 {
        self.already_done_visits
            .saturating_add(self.insufficient_visits)
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SafetyStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Safety Check Statistics:")?;
        writeln!(f, "  Visits:               {}", self.visits)?;
        writeln!(f, "  Passes:               {}", self.passes)?;
        writeln!(f, "  Completions:          {}", self.completions)?;
        writeln!(f, "  Already done visits:  {}", self.already_done_visits)?;
        writeln!(f, "  Insufficient visits:  {}", self.insufficient_visits)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
