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

//! # Solvency Model
//!
//! **Resource allocation snapshots for deadlock-avoidance safety checks.**
//!
//! This crate defines the data a safety check operates on: how many units of
//! each resource type are unassigned, and how many units each process holds
//! and may still request. It is the input layer for `solvency_check`.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed `ProcessIndex` and `ResourceIndex` so rows and columns cannot be mixed up.
//! * **`state`**: `ResourceState` (immutable, validated) and `ResourceStateBuilder` (mutable, cell by cell).
//! * **`error`**: `InvalidStateError`, the single construction failure type.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: Negative quantities and malformed matrices are rejected when the snapshot is built, never during a check.
//! 2.  **Memory Layout**: Matrices are stored flattened in row-major order so a process row is one contiguous slice.
//! 3.  **Signed Inputs**: Quantities are signed primitives so that malformed negative input can be represented and reported instead of wrapping.

pub mod error;
pub mod index;
pub mod state;
