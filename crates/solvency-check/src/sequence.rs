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

//! Safe sequences and their replay validation.
//!
//! A `SafeSequence` is the witness a successful check returns: the order in
//! which processes were confirmed able to finish. `SafeSequence::validate`
//! replays that order against the input snapshot, releasing each
//! process's holdings into a running pool, and reports the first point where
//! the sequence stops being a valid witness. It never mutates the snapshot
//! and is independent of the scan that produced the sequence, which makes it
//! usable as an oracle in tests and for sequences obtained elsewhere.

use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use solvency_model::{
    index::{ProcessIndex, ResourceIndex},
    state::ResourceState,
};

/// Reasons a sequence fails to witness the safety of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessError {
    /// The sequence does not list every process exactly once by length.
    LengthMismatch { expected: usize, actual: usize },
    /// The sequence names a process outside `0..num_processes`.
    UnknownProcess {
        position: usize,
        process: ProcessIndex,
    },
    /// The sequence names the same process twice.
    DuplicateProcess {
        position: usize,
        process: ProcessIndex,
    },
    /// A process is scheduled while its need for `resource` exceeds the pool.
    InsufficientResources {
        position: usize,
        process: ProcessIndex,
        resource: ResourceIndex,
    },
}

impl std::fmt::Display for WitnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "Sequence has {} entries but the state has {} processes",
                actual, expected
            ),
            Self::UnknownProcess { position, process } => {
                write!(f, "Unknown process {} at position {}", process, position)
            }
            Self::DuplicateProcess { position, process } => {
                write!(f, "Process {} repeated at position {}", process, position)
            }
            Self::InsufficientResources {
                position,
                process,
                resource,
            } => write!(
                f,
                "Process {} at position {} needs more {} than available",
                process, position, resource
            ),
        }
    }
}

impl std::error::Error for WitnessError {}

/// An ordering of processes in which each one can finish using the units
/// available after all earlier ones have released their holdings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeSequence {
    processes: Vec<ProcessIndex>,
}

impl SafeSequence {
    /// Creates a sequence from the given order.
    #[inline]
    pub fn new(processes: Vec<ProcessIndex>) -> Self {
        Self { processes }
    }

    /// Creates an empty sequence, the witness for a state without processes.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of processes in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Returns `true` if the sequence contains no processes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Returns the processes in scheduling order.
    #[inline]
    pub fn as_slice(&self) -> &[ProcessIndex] {
        &self.processes
    }

    /// Returns an iterator over the processes in scheduling order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessIndex> {
        self.processes.iter()
    }

    /// Returns the position of `process` in the sequence, if present.
    #[inline]
    pub fn position_of(&self, process: ProcessIndex) -> Option<usize> {
        self.processes.iter().position(|&p| p == process)
    }

    /// Consumes the sequence and returns the underlying order.
    #[inline]
    pub fn into_vec(self) -> Vec<ProcessIndex> {
        self.processes
    }

    /// Replays the sequence against `state` and checks that it is a
    /// permutation of all processes in which every process's need fits the
    /// pool at the time it is scheduled.
    ///
    /// # Errors
    ///
    /// Returns the first `WitnessError` encountered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solvency_check::sequence::SafeSequence;
    /// # use solvency_model::{index::ProcessIndex, state::ResourceState};
    /// let state = ResourceState::<i64>::from_need(
    ///     vec![1],
    ///     vec![vec![1], vec![0]],
    ///     vec![vec![2], vec![1]],
    /// )
    /// .unwrap();
    ///
    /// let good = SafeSequence::new(vec![ProcessIndex::new(1), ProcessIndex::new(0)]);
    /// assert!(good.validate(&state).is_ok());
    ///
    /// let bad = SafeSequence::new(vec![ProcessIndex::new(0), ProcessIndex::new(1)]);
    /// assert!(bad.validate(&state).is_err());
    /// ```
    pub fn validate<T>(&self, state: &ResourceState<T>) -> Result<(), WitnessError>
    where
        T: PrimInt + Signed,
    {
        let num_processes = state.num_processes();
        if self.len() != num_processes {
            return Err(WitnessError::LengthMismatch {
                expected: num_processes,
                actual: self.len(),
            });
        }

        let mut pool = state.available().to_vec();
        let mut seen = FixedBitSet::with_capacity(num_processes);

        for (position, &process) in self.processes.iter().enumerate() {
            let index = process.get();
            if index >= num_processes {
                return Err(WitnessError::UnknownProcess { position, process });
            }
            if seen.contains(index) {
                return Err(WitnessError::DuplicateProcess { position, process });
            }

            let need = state.process_need(process);
            if let Some(r) = need.iter().zip(&pool).position(|(n, w)| n > w) {
                return Err(WitnessError::InsufficientResources {
                    position,
                    process,
                    resource: ResourceIndex::new(r),
                });
            }

            for (w, &a) in pool.iter_mut().zip(state.process_assigned(process)) {
                *w = w.saturating_add(a);
            }
            seen.insert(index);
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a SafeSequence {
    type Item = &'a ProcessIndex;
    type IntoIter = std::slice::Iter<'a, ProcessIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

impl FromIterator<ProcessIndex> for SafeSequence {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = ProcessIndex>,
    {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ProcessIndex>> for SafeSequence {
    fn from(processes: Vec<ProcessIndex>) -> Self {
        Self::new(processes)
    }
}

impl std::fmt::Display for SafeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<")?;
        for (i, p) in self.processes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ">")
    }
}
