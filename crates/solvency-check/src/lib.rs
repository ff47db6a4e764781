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

//! Solvency‑Check: deadlock‑avoidance safety checking
//!
//! Decides whether a resource allocation snapshot is safe, meaning there is
//! an order in which every process can obtain its remaining need, run to
//! completion and release what it holds. When it is, the checker returns
//! that order as a witness.
//!
//! Core flow
//! - Build a `solvency_model::state::ResourceState<T>`.
//! - Run `checker::SafetyChecker::evaluate` (or `evaluate_with_monitor`).
//! - Inspect the `outcome::SafetyOutcome`: verdict plus scan statistics.
//! - Optionally replay the witness with `sequence::SafeSequence::validate`.
//!
//! Design highlights
//! - The scan is a fixed circular walk over processes; verdicts, sequences
//!   and visit counts are fully determined by the snapshot.
//! - The snapshot is never mutated; all simulation happens on scratch
//!   buffers owned by the checker and reused across evaluations.
//! - Monitors observe the scan without being able to change its result.
//!
//! Module map
//! - `checker`: the scan engine and session orchestration.
//! - `monitor`: scan monitors (log, timing, composite, no-op).
//! - `outcome`: verdicts and outcomes.
//! - `sequence`: witness sequences and their replay.
//! - `stats`: lightweight counters/timing.

pub mod checker;
pub mod monitor;
pub mod outcome;
pub mod sequence;
pub mod stats;
