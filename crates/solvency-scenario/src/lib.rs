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

//! # Solvency Scenario
//!
//! **Seeded random resource allocation snapshots.**
//!
//! Produces `solvency_model::state::ResourceState` instances for drivers,
//! tests and benchmarks. The safety checker never depends on this crate.
//!
//! ## Architecture
//!
//! * **`config`**: `ScenarioConfig` (validated ranges) and its builder.
//! * **`generator`**: `ScenarioGenerator`, generic over any `rand::Rng`, with a deterministic `ChaCha8Rng` constructor.
//!
//! ## Design Philosophy
//!
//! 1.  **Validate Early**: Impossible ranges are rejected when the configuration is built, before any snapshot exists.
//! 2.  **Reproducibility**: A seed fully determines the sequence of generated snapshots.

pub mod config;
pub mod generator;
