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

//! Command-line arguments of the `solvency` driver.

use clap::Parser;

/// Repeated deadlock-avoidance safety checks on randomly generated snapshots
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "solvency")]
#[command(about = "Checks randomly generated resource allocation snapshots for safety")]
pub struct SolvencyArgs {
    /// Number of runs, each on a freshly generated snapshot
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Print every snapshot, a per-step trace and timings
    #[arg(long)]
    pub debug: bool,

    /// Seed for the snapshot generator; drawn at random when absent
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SolvencyArgs {
    /// Returns the explicit seed, or draws one from `rng`.
    pub fn seed_or_random<R>(&self, rng: &mut R) -> u64
    where
        R: rand::Rng,
    {
        self.seed.unwrap_or_else(|| rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_defaults() {
        let args = SolvencyArgs::parse_from(["solvency"]);
        assert_eq!(args.runs, 1);
        assert!(!args.debug);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_all_flags() {
        let args = SolvencyArgs::parse_from(["solvency", "--runs", "5", "--debug", "--seed", "42"]);
        assert_eq!(args.runs, 5);
        assert!(args.debug);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_zero_runs_is_rejected() {
        assert!(SolvencyArgs::try_parse_from(["solvency", "--runs", "0"]).is_err());
        assert!(SolvencyArgs::try_parse_from(["solvency", "--runs", "-3"]).is_err());
    }

    #[test]
    fn test_explicit_seed_wins() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let args = SolvencyArgs::parse_from(["solvency", "--seed", "7"]);
        assert_eq!(args.seed_or_random(&mut rng), 7);

        let args = SolvencyArgs::parse_from(["solvency"]);
        let mut a = rand::rngs::StdRng::seed_from_u64(1);
        let mut b = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(args.seed_or_random(&mut a), args.seed_or_random(&mut b));
    }
}
