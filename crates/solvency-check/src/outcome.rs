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

use crate::{sequence::SafeSequence, stats::SafetyStatistics};

/// The answer to the safety question for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// Every process can finish; the sequence is a witness order.
    Safe(SafeSequence),
    /// Some processes can never finish from this snapshot.
    Unsafe,
}

impl SafetyVerdict {
    #[inline]
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe(_))
    }

    #[inline]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, SafetyVerdict::Unsafe)
    }

    /// Returns the witness sequence if the verdict is `Safe`.
    #[inline]
    pub fn sequence(&self) -> Option<&SafeSequence> {
        match self {
            SafetyVerdict::Safe(sequence) => Some(sequence),
            SafetyVerdict::Unsafe => None,
        }
    }

    /// Returns the witness sequence.
    ///
    /// # Panics
    ///
    /// Panics if the verdict is `Unsafe`.
    #[inline]
    pub fn unwrap_safe(self) -> SafeSequence {
        match self {
            SafetyVerdict::Safe(sequence) => sequence,
            SafetyVerdict::Unsafe => {
                panic!("called `SafetyVerdict::unwrap_safe()` on an `Unsafe` value")
            }
        }
    }
}

impl std::fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyVerdict::Safe(sequence) => write!(f, "Safe({})", sequence),
            SafetyVerdict::Unsafe => write!(f, "Unsafe"),
        }
    }
}

/// Result of one safety evaluation: the verdict plus the statistics of the
/// scan that produced it.
#[derive(Debug, Clone)]
pub struct SafetyOutcome {
    verdict: SafetyVerdict,
    statistics: SafetyStatistics,
}

impl SafetyOutcome {
    #[inline]
    pub fn new(verdict: SafetyVerdict, statistics: SafetyStatistics) -> Self {
        Self {
            verdict,
            statistics,
        }
    }

    #[inline]
    pub fn safe(sequence: SafeSequence, statistics: SafetyStatistics) -> Self {
        Self::new(SafetyVerdict::Safe(sequence), statistics)
    }

    #[inline]
    pub fn unsafe_state(statistics: SafetyStatistics) -> Self {
        Self::new(SafetyVerdict::Unsafe, statistics)
    }

    /// Returns the verdict.
    #[inline]
    pub fn verdict(&self) -> &SafetyVerdict {
        &self.verdict
    }

    /// Returns the scan statistics.
    #[inline]
    pub fn statistics(&self) -> &SafetyStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_safe(&self) -> bool {
        self.verdict.is_safe()
    }

    /// Returns the witness sequence if the snapshot is safe.
    #[inline]
    pub fn sequence(&self) -> Option<&SafeSequence> {
        self.verdict.sequence()
    }

    /// Consumes the outcome and returns the verdict.
    #[inline]
    pub fn into_verdict(self) -> SafetyVerdict {
        self.verdict
    }
}

impl std::fmt::Display for SafetyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Verdict: {}", self.verdict)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvency_model::index::ProcessIndex;

    #[test]
    fn test_safe_outcome_exposes_sequence() {
        let sequence: SafeSequence = [1, 0].into_iter().map(ProcessIndex::new).collect();
        let outcome = SafetyOutcome::safe(sequence.clone(), SafetyStatistics::default());
        assert!(outcome.is_safe());
        assert_eq!(outcome.sequence(), Some(&sequence));
        assert_eq!(outcome.into_verdict().unwrap_safe(), sequence);
    }

    #[test]
    fn test_unsafe_outcome_has_no_sequence() {
        let outcome = SafetyOutcome::unsafe_state(SafetyStatistics::default());
        assert!(!outcome.is_safe());
        assert!(outcome.verdict().is_unsafe());
        assert!(outcome.sequence().is_none());
    }

    #[test]
    #[should_panic(expected = "called `SafetyVerdict::unwrap_safe()` on an `Unsafe` value")]
    fn test_unwrap_safe_panics_on_unsafe() {
        let _ = SafetyVerdict::Unsafe.unwrap_safe();
    }

    #[test]
    fn test_verdict_display() {
        let sequence: SafeSequence = [2, 0].into_iter().map(ProcessIndex::new).collect();
        assert_eq!(format!("{}", SafetyVerdict::Safe(sequence)), "Safe(<P2 P0>)");
        assert_eq!(format!("{}", SafetyVerdict::Unsafe), "Unsafe");
    }
}
