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

//! The run loop behind the `solvency` binary.
//!
//! Each run generates a fresh snapshot from a single seeded generator, checks
//! it and prints the verdict. In debug mode the snapshot and scan statistics
//! are printed as well, and the per-step trace and timing monitors are
//! attached to the checker; those write to stdout directly.

use crate::args::SolvencyArgs;
use solvency_check::{
    checker::SafetyChecker,
    monitor::{composite::CompositeSafetyMonitor, log::LogMonitor, time::TimingMonitor},
};
use solvency_model::error::InvalidStateError;
use solvency_scenario::{config::ScenarioConfig, generator::ScenarioGenerator};
use std::{fmt::Display, io::Write};

/// Failures that abort the driver.
#[derive(Debug)]
pub enum DriverError {
    /// A generated snapshot was rejected.
    InvalidState(InvalidStateError<i64>),
    /// Writing the report failed.
    Io(std::io::Error),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState(e) => write!(f, "Invalid state: {}", e),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidState(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<InvalidStateError<i64>> for DriverError {
    fn from(e: InvalidStateError<i64>) -> Self {
        Self::InvalidState(e)
    }
}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Runs `args.runs` checks on snapshots generated from `seed` and writes
/// the report to `out`.
pub fn run<W>(args: &SolvencyArgs, seed: u64, out: &mut W) -> Result<(), DriverError>
where
    W: Write,
{
    let config = ScenarioConfig::default();
    let mut generator = ScenarioGenerator::from_seed(config, seed);
    let mut checker = SafetyChecker::preallocated(config.num_resources(), config.num_processes());

    for run in 0..args.runs {
        let state = generator.generate()?;

        writeln!(out, "Run {}", run)?;
        writeln!(out, "-----")?;
        if args.debug {
            writeln!(out, "{}", state)?;
        }

        let outcome = if args.debug {
            let mut monitor = CompositeSafetyMonitor::with_capacity(2);
            monitor.add_monitor(LogMonitor::new());
            monitor.add_monitor(TimingMonitor::new(format!("safety check run {}", run)));
            checker.evaluate_with_monitor(&state, monitor)
        } else {
            checker.evaluate(&state)
        };

        match outcome.sequence() {
            Some(sequence) => {
                writeln!(out, "Safe sequence found!")?;
                writeln!(out, "Safe sequence: {}", sequence)?;
            }
            None => writeln!(out, "Safe sequence NOT found! :(")?,
        }
        if args.debug {
            write!(out, "{}", outcome.statistics())?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
