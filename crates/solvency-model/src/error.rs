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

//! Construction errors for resource allocation snapshots.
//!
//! A `ResourceState` is validated once, when it is built. Every failure names
//! the offending cell so the caller can point at the broken input directly;
//! none of these errors can surface later from the safety check itself.

use crate::index::{ProcessIndex, ResourceIndex};

/// Identifies one of the vectors or matrices a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matrix {
    /// The per-resource vector of unassigned units.
    Available,
    /// The process × resource matrix of held units.
    Assigned,
    /// The process × resource matrix of remaining requests.
    Need,
    /// The process × resource matrix of maximum claims.
    TotalDemand,
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matrix::Available => write!(f, "available"),
            Matrix::Assigned => write!(f, "assigned"),
            Matrix::Need => write!(f, "need"),
            Matrix::TotalDemand => write!(f, "total demand"),
        }
    }
}

/// Details about an input whose shape does not match the snapshot dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// The input with the wrong shape.
    pub matrix: Matrix,
    /// The offending row, or `None` when the number of rows is wrong.
    pub row: Option<ProcessIndex>,
    /// The expected length.
    pub expected: usize,
    /// The length actually supplied.
    pub actual: usize,
}

impl std::fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(
                f,
                "{} row {} has {} entries, expected {}",
                self.matrix, row, self.actual, self.expected
            ),
            None => write!(
                f,
                "{} has {} rows, expected {}",
                self.matrix, self.actual, self.expected
            ),
        }
    }
}

impl std::error::Error for DimensionMismatch {}

/// The error type for building a `ResourceState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateError<T> {
    /// An input vector or matrix has the wrong shape.
    DimensionMismatch(DimensionMismatch),
    /// A resource has a negative number of unassigned units.
    NegativeAvailable { resource: ResourceIndex, value: T },
    /// A process holds a negative number of units.
    NegativeAssigned {
        process: ProcessIndex,
        resource: ResourceIndex,
        value: T,
    },
    /// A supplied or derived need is negative, i.e. a process holds more
    /// than its total demand.
    NegativeNeed {
        process: ProcessIndex,
        resource: ResourceIndex,
        value: T,
    },
    /// `total_demand - assigned` does not fit into the quantity type.
    NeedOverflow {
        process: ProcessIndex,
        resource: ResourceIndex,
        total_demand: T,
        assigned: T,
    },
}

impl<T> std::fmt::Display for InvalidStateError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch(e) => write!(f, "Dimension mismatch: {}", e),
            Self::NegativeAvailable { resource, value } => {
                write!(f, "Available units of {} are negative ({})", resource, value)
            }
            Self::NegativeAssigned {
                process,
                resource,
                value,
            } => write!(
                f,
                "Process {} holds a negative amount of {} ({})",
                process, resource, value
            ),
            Self::NegativeNeed {
                process,
                resource,
                value,
            } => write!(
                f,
                "Process {} has a negative need for {} ({})",
                process, resource, value
            ),
            Self::NeedOverflow {
                process,
                resource,
                total_demand,
                assigned,
            } => write!(
                f,
                "Need of process {} for {} overflows: total demand {} minus assigned {}",
                process, resource, total_demand, assigned
            ),
        }
    }
}

impl<T> std::error::Error for InvalidStateError<T> where T: std::fmt::Debug + std::fmt::Display {}

impl<T> From<DimensionMismatch> for InvalidStateError<T> {
    fn from(e: DimensionMismatch) -> Self {
        Self::DimensionMismatch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display_names_row() {
        let e = DimensionMismatch {
            matrix: Matrix::Need,
            row: Some(ProcessIndex::new(2)),
            expected: 3,
            actual: 4,
        };
        assert_eq!(format!("{}", e), "need row P2 has 4 entries, expected 3");
    }

    #[test]
    fn test_dimension_mismatch_display_rows() {
        let e = DimensionMismatch {
            matrix: Matrix::TotalDemand,
            row: None,
            expected: 5,
            actual: 1,
        };
        assert_eq!(format!("{}", e), "total demand has 1 rows, expected 5");
    }

    #[test]
    fn test_invalid_state_error_display() {
        let e = InvalidStateError::NegativeNeed {
            process: ProcessIndex::new(1),
            resource: ResourceIndex::new(0),
            value: -2_i64,
        };
        assert_eq!(format!("{}", e), "Process P1 has a negative need for R0 (-2)");
    }

    #[test]
    fn test_from_dimension_mismatch() {
        let d = DimensionMismatch {
            matrix: Matrix::Available,
            row: None,
            expected: 1,
            actual: 0,
        };
        let e: InvalidStateError<i64> = d.into();
        assert!(matches!(e, InvalidStateError::DimensionMismatch(_)));
    }
}
