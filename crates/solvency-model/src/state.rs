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

//! Resource allocation snapshots.
//!
//! `ResourceState` holds one consistent snapshot of a system with `R`
//! resource types and `P` processes:
//! - `available[r]`: units of resource `r` not held by any process.
//! - `assigned[p * R + r]`: units of resource `r` held by process `p`.
//! - `need[p * R + r]`: units of resource `r` process `p` may still request.
//!
//! The matrices are stored flattened in row-major order so a process row is a
//! contiguous slice, which is what the safety scan reads on every visit.
//!
//! A snapshot is immutable once built and every entry is non-negative. It can
//! be obtained from row matrices (`from_need`, `from_total_demand`) or
//! assembled cell by cell with `ResourceStateBuilder`. Both paths fail with
//! `InvalidStateError` instead of producing a state the checker could
//! misinterpret.

use crate::{
    error::{DimensionMismatch, InvalidStateError, Matrix},
    index::{ProcessIndex, ResourceIndex},
};
use num_traits::{PrimInt, Signed};

#[inline(always)]
fn flatten_index(num_resources: usize, process: ProcessIndex, resource: ResourceIndex) -> usize {
    process.get() * num_resources + resource.get()
}

/// Flattens a row matrix, checking that it has `num_rows` rows of
/// `num_columns` entries each.
fn flatten_rows<T>(
    matrix: Matrix,
    rows: Vec<Vec<T>>,
    num_rows: usize,
    num_columns: usize,
) -> Result<Vec<T>, DimensionMismatch> {
    if rows.len() != num_rows {
        return Err(DimensionMismatch {
            matrix,
            row: None,
            expected: num_rows,
            actual: rows.len(),
        });
    }

    let mut flat = Vec::with_capacity(num_rows * num_columns);
    for (p, row) in rows.into_iter().enumerate() {
        if row.len() != num_columns {
            return Err(DimensionMismatch {
                matrix,
                row: Some(ProcessIndex::new(p)),
                expected: num_columns,
                actual: row.len(),
            });
        }
        flat.extend(row);
    }
    Ok(flat)
}

/// An immutable, validated snapshot of resource availability and per-process
/// holdings and needs.
///
/// Invariants (established at construction):
/// - `available.len() == num_resources()`
/// - `assigned.len() == need.len() == num_processes() * num_resources()`
/// - every entry of `available`, `assigned` and `need` is `>= 0`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceState<T> {
    available: Vec<T>, // len = num_resources
    assigned: Vec<T>,  // len = num_processes * num_resources
    need: Vec<T>,      // len = num_processes * num_resources
    num_processes: usize,
}

impl<T> ResourceState<T>
where
    T: PrimInt + Signed,
{
    /// Builds a snapshot from the available vector and the `assigned` and
    /// `need` row matrices. The number of processes is `assigned.len()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError` if a matrix has the wrong shape or any
    /// entry is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solvency_model::state::ResourceState;
    /// let state = ResourceState::<i64>::from_need(
    ///     vec![3, 3, 2],
    ///     vec![vec![0, 1, 0], vec![2, 0, 0]],
    ///     vec![vec![7, 4, 3], vec![1, 2, 2]],
    /// )
    /// .unwrap();
    /// assert_eq!(state.num_processes(), 2);
    /// assert_eq!(state.num_resources(), 3);
    /// ```
    pub fn from_need(
        available: Vec<T>,
        assigned: Vec<Vec<T>>,
        need: Vec<Vec<T>>,
    ) -> Result<Self, InvalidStateError<T>> {
        let num_resources = available.len();
        let num_processes = assigned.len();

        let assigned = flatten_rows(Matrix::Assigned, assigned, num_processes, num_resources)?;
        let need = flatten_rows(Matrix::Need, need, num_processes, num_resources)?;

        Self::validated(available, assigned, need, num_processes)
    }

    /// Builds a snapshot from the available vector and the `assigned` and
    /// `total_demand` row matrices, deriving
    /// `need[p][r] = total_demand[p][r] - assigned[p][r]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError` if a matrix has the wrong shape, the
    /// subtraction overflows, or any entry (including a derived need) is
    /// negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solvency_model::{index::{ProcessIndex, ResourceIndex}, state::ResourceState};
    /// let state = ResourceState::<i64>::from_total_demand(
    ///     vec![1, 1],
    ///     vec![vec![1, 0]],
    ///     vec![vec![4, 2]],
    /// )
    /// .unwrap();
    /// assert_eq!(state.need_of(ProcessIndex::new(0), ResourceIndex::new(0)), 3);
    ///
    /// let err = ResourceState::<i64>::from_total_demand(vec![1], vec![vec![5]], vec![vec![4]]);
    /// assert!(err.is_err());
    /// ```
    pub fn from_total_demand(
        available: Vec<T>,
        assigned: Vec<Vec<T>>,
        total_demand: Vec<Vec<T>>,
    ) -> Result<Self, InvalidStateError<T>> {
        let num_resources = available.len();
        let num_processes = assigned.len();

        let assigned = flatten_rows(Matrix::Assigned, assigned, num_processes, num_resources)?;
        let total_demand = flatten_rows(
            Matrix::TotalDemand,
            total_demand,
            num_processes,
            num_resources,
        )?;

        let need = derive_need(num_resources, &assigned, &total_demand)?;
        Self::validated(available, assigned, need, num_processes)
    }

    /// Checks the non-negativity invariants on already flattened data.
    fn validated(
        available: Vec<T>,
        assigned: Vec<T>,
        need: Vec<T>,
        num_processes: usize,
    ) -> Result<Self, InvalidStateError<T>> {
        let num_resources = available.len();
        debug_assert_eq!(assigned.len(), num_processes * num_resources);
        debug_assert_eq!(need.len(), num_processes * num_resources);

        if let Some((r, &value)) = available.iter().enumerate().find(|(_, v)| v.is_negative()) {
            return Err(InvalidStateError::NegativeAvailable {
                resource: ResourceIndex::new(r),
                value,
            });
        }

        let process = |i: usize| ProcessIndex::new(i / num_resources);
        let resource = |i: usize| ResourceIndex::new(i % num_resources);

        if let Some((i, &value)) = assigned.iter().enumerate().find(|(_, v)| v.is_negative()) {
            return Err(InvalidStateError::NegativeAssigned {
                process: process(i),
                resource: resource(i),
                value,
            });
        }

        if let Some((i, &value)) = need.iter().enumerate().find(|(_, v)| v.is_negative()) {
            return Err(InvalidStateError::NegativeNeed {
                process: process(i),
                resource: resource(i),
                value,
            });
        }

        Ok(Self {
            available,
            assigned,
            need,
            num_processes,
        })
    }
}

fn derive_need<T>(
    num_resources: usize,
    assigned: &[T],
    total_demand: &[T],
) -> Result<Vec<T>, InvalidStateError<T>>
where
    T: PrimInt + Signed,
{
    debug_assert_eq!(assigned.len(), total_demand.len());

    assigned
        .iter()
        .zip(total_demand)
        .enumerate()
        .map(|(i, (&a, &t))| {
            t.checked_sub(&a).ok_or(InvalidStateError::NeedOverflow {
                process: ProcessIndex::new(i / num_resources),
                resource: ResourceIndex::new(i % num_resources),
                total_demand: t,
                assigned: a,
            })
        })
        .collect()
}

impl<T> ResourceState<T> {
    /// Returns the number of resource types `R`.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Returns the number of processes `P`.
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.num_processes
    }

    /// Returns the available vector.
    #[inline]
    pub fn available(&self) -> &[T] {
        &self.available
    }

    /// Returns the flattened assigned matrix (`p * R + r`).
    #[inline]
    pub fn assigned(&self) -> &[T] {
        &self.assigned
    }

    /// Returns the flattened need matrix (`p * R + r`).
    #[inline]
    pub fn need(&self) -> &[T] {
        &self.need
    }

    /// Returns an iterator over all process indices in ascending order.
    #[inline]
    pub fn processes(&self) -> impl ExactSizeIterator<Item = ProcessIndex> + use<T> {
        (0..self.num_processes).map(ProcessIndex::new)
    }

    /// Returns an iterator over all resource indices in ascending order.
    #[inline]
    pub fn resources(&self) -> impl ExactSizeIterator<Item = ResourceIndex> + use<T> {
        (0..self.num_resources()).map(ResourceIndex::new)
    }

    /// Returns the units process `process` holds, one entry per resource.
    ///
    /// # Panics
    ///
    /// Panics if `process` is not in `0..num_processes()`.
    #[inline]
    pub fn process_assigned(&self, process: ProcessIndex) -> &[T] {
        let index = process.get();
        debug_assert!(
            index < self.num_processes,
            "called `ResourceState::process_assigned` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes,
            index
        );

        let r = self.num_resources();
        &self.assigned[index * r..(index + 1) * r]
    }

    /// Returns the units process `process` may still request, one entry per resource.
    ///
    /// # Panics
    ///
    /// Panics if `process` is not in `0..num_processes()`.
    #[inline]
    pub fn process_need(&self, process: ProcessIndex) -> &[T] {
        let index = process.get();
        debug_assert!(
            index < self.num_processes,
            "called `ResourceState::process_need` with process index out of bounds: the len is {} but the index is {}",
            self.num_processes,
            index
        );

        let r = self.num_resources();
        &self.need[index * r..(index + 1) * r]
    }
}

impl<T> ResourceState<T>
where
    T: PrimInt + Signed,
{
    /// Returns the unassigned units of `resource`.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is not in `0..num_resources()`.
    #[inline]
    pub fn available_of(&self, resource: ResourceIndex) -> T {
        let index = resource.get();
        debug_assert!(
            index < self.num_resources(),
            "called `ResourceState::available_of` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            index
        );

        self.available[index]
    }

    /// Returns the units of `resource` held by `process`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn assigned_of(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.assert_cell(process, resource, "assigned_of");
        self.assigned[flatten_index(self.num_resources(), process, resource)]
    }

    /// Returns the units of `resource` that `process` may still request.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn need_of(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.assert_cell(process, resource, "need_of");
        self.need[flatten_index(self.num_resources(), process, resource)]
    }

    /// Returns the total demand `assigned + need` of `process` for `resource`,
    /// saturating at `T::max_value()`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn total_demand_of(&self, process: ProcessIndex, resource: ResourceIndex) -> T {
        self.assert_cell(process, resource, "total_demand_of");
        let i = flatten_index(self.num_resources(), process, resource);
        self.assigned[i].saturating_add(self.need[i])
    }

    #[inline(always)]
    fn assert_cell(&self, process: ProcessIndex, resource: ResourceIndex, method: &str) {
        debug_assert!(
            process.get() < self.num_processes,
            "called `ResourceState::{}` with process index out of bounds: the len is {} but the index is {}",
            method,
            self.num_processes,
            process.get()
        );
        debug_assert!(
            resource.get() < self.num_resources(),
            "called `ResourceState::{}` with resource index out of bounds: the len is {} but the index is {}",
            method,
            self.num_resources(),
            resource.get()
        );
    }
}

fn write_row<T>(f: &mut std::fmt::Formatter<'_>, row: &[T]) -> std::fmt::Result
where
    T: std::fmt::Display,
{
    write!(f, "[")?;
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

impl<T> std::fmt::Display for ResourceState<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Available: ")?;
        write_row(f, &self.available)?;
        writeln!(f)?;
        for p in self.processes() {
            write!(f, "{:<5} assigned ", format!("{}", p))?;
            write_row(f, self.process_assigned(p))?;
            write!(f, " need ")?;
            write_row(f, self.process_need(p))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// How a single cell's remaining request was specified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Claim<T> {
    Need(T),
    TotalDemand(T),
}

/// A mutable builder for `ResourceState`.
///
/// Starts with every quantity at zero: nothing available, nothing held and
/// nothing needed. For every `(process, resource)` cell the remaining request
/// is either set directly with `set_need` or as a maximum claim with
/// `set_total_demand`; the latter is turned into a need at `build` time, so
/// setters can be called in any order.
#[derive(Clone, Debug)]
pub struct ResourceStateBuilder<T> {
    num_resources: usize,
    num_processes: usize,
    available: Vec<T>,
    assigned: Vec<T>,
    claims: Vec<Claim<T>>,
}

impl<T> ResourceStateBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder for `num_resources` resource types and
    /// `num_processes` processes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solvency_model::{index::{ProcessIndex, ResourceIndex}, state::ResourceStateBuilder};
    /// let mut builder = ResourceStateBuilder::<i64>::new(2, 1);
    /// builder
    ///     .set_available(ResourceIndex::new(0), 4)
    ///     .set_total_demand(ProcessIndex::new(0), ResourceIndex::new(0), 3)
    ///     .set_assigned(ProcessIndex::new(0), ResourceIndex::new(0), 1);
    /// let state = builder.build().unwrap();
    /// assert_eq!(state.need_of(ProcessIndex::new(0), ResourceIndex::new(0)), 2);
    /// ```
    pub fn new(num_resources: usize, num_processes: usize) -> Self {
        Self {
            num_resources,
            num_processes,
            available: vec![T::zero(); num_resources],
            assigned: vec![T::zero(); num_processes * num_resources],
            claims: vec![Claim::Need(T::zero()); num_processes * num_resources],
        }
    }

    /// Returns the number of resource types.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Returns the number of processes.
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.num_processes
    }

    /// Sets the unassigned units of `resource`.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is not in `0..num_resources()`.
    #[inline]
    pub fn set_available(&mut self, resource: ResourceIndex, units: T) -> &mut Self {
        let index = resource.get();
        debug_assert!(
            index < self.num_resources,
            "called `ResourceStateBuilder::set_available` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources,
            index
        );

        self.available[index] = units;
        self
    }

    /// Sets the units of `resource` held by `process`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_assigned(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        units: T,
    ) -> &mut Self {
        let i = self.cell(process, resource, "set_assigned");
        self.assigned[i] = units;
        self
    }

    /// Sets the remaining request of `process` for `resource` directly.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_need(&mut self, process: ProcessIndex, resource: ResourceIndex, units: T) -> &mut Self {
        let i = self.cell(process, resource, "set_need");
        self.claims[i] = Claim::Need(units);
        self
    }

    /// Sets the maximum claim of `process` for `resource`; the need becomes
    /// `units - assigned` when the state is built.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_total_demand(
        &mut self,
        process: ProcessIndex,
        resource: ResourceIndex,
        units: T,
    ) -> &mut Self {
        let i = self.cell(process, resource, "set_total_demand");
        self.claims[i] = Claim::TotalDemand(units);
        self
    }

    /// Resolves all claims and validates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError` if a derived need overflows or any entry
    /// is negative.
    pub fn build(self) -> Result<ResourceState<T>, InvalidStateError<T>> {
        let num_resources = self.num_resources;
        let need = self
            .claims
            .iter()
            .zip(&self.assigned)
            .enumerate()
            .map(|(i, (claim, &a))| match *claim {
                Claim::Need(n) => Ok(n),
                Claim::TotalDemand(t) => t.checked_sub(&a).ok_or(InvalidStateError::NeedOverflow {
                    process: ProcessIndex::new(i / num_resources),
                    resource: ResourceIndex::new(i % num_resources),
                    total_demand: t,
                    assigned: a,
                }),
            })
            .collect::<Result<Vec<T>, _>>()?;

        ResourceState::validated(self.available, self.assigned, need, self.num_processes)
    }

    #[inline(always)]
    fn cell(&self, process: ProcessIndex, resource: ResourceIndex, method: &str) -> usize {
        debug_assert!(
            process.get() < self.num_processes,
            "called `ResourceStateBuilder::{}` with process index out of bounds: the len is {} but the index is {}",
            method,
            self.num_processes,
            process.get()
        );
        debug_assert!(
            resource.get() < self.num_resources,
            "called `ResourceStateBuilder::{}` with resource index out of bounds: the len is {} but the index is {}",
            method,
            self.num_resources,
            resource.get()
        );

        flatten_index(self.num_resources, process, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn pi(i: usize) -> ProcessIndex {
        ProcessIndex::new(i)
    }

    fn ri(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn textbook() -> ResourceState<IntegerType> {
        ResourceState::from_need(
            vec![3, 3, 2],
            vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]],
            vec![vec![7, 4, 3], vec![1, 2, 2], vec![6, 0, 0]],
        )
        .expect("textbook state must be valid")
    }

    #[test]
    fn test_from_need_dimensions_and_accessors() {
        let state = textbook();
        assert_eq!(state.num_processes(), 3);
        assert_eq!(state.num_resources(), 3);
        assert_eq!(state.available(), &[3, 3, 2]);
        assert_eq!(state.process_assigned(pi(2)), &[3, 0, 2]);
        assert_eq!(state.process_need(pi(1)), &[1, 2, 2]);
        assert_eq!(state.assigned_of(pi(0), ri(1)), 1);
        assert_eq!(state.need_of(pi(0), ri(0)), 7);
        assert_eq!(state.available_of(ri(2)), 2);
        assert_eq!(state.total_demand_of(pi(2), ri(0)), 9);
        assert_eq!(state.assigned().len(), 9);
        assert_eq!(state.need().len(), 9);
    }

    #[test]
    fn test_from_total_demand_derives_need() {
        let state = ResourceState::<IntegerType>::from_total_demand(
            vec![5, 5],
            vec![vec![1, 2], vec![0, 0]],
            vec![vec![4, 2], vec![3, 8]],
        )
        .unwrap();

        assert_eq!(state.process_need(pi(0)), &[3, 0]);
        assert_eq!(state.process_need(pi(1)), &[3, 8]);
        for p in state.processes() {
            for r in state.resources() {
                assert_eq!(
                    state.total_demand_of(p, r),
                    state.assigned_of(p, r) + state.need_of(p, r)
                );
            }
        }
    }

    #[test]
    fn test_zero_processes_is_valid() {
        let state = ResourceState::<IntegerType>::from_need(vec![1, 2], vec![], vec![]).unwrap();
        assert_eq!(state.num_processes(), 0);
        assert_eq!(state.num_resources(), 2);
        assert_eq!(state.processes().len(), 0);
    }

    #[test]
    fn test_zero_resources_keeps_process_count() {
        let state =
            ResourceState::<IntegerType>::from_need(vec![], vec![vec![], vec![]], vec![vec![], vec![]])
                .unwrap();
        assert_eq!(state.num_processes(), 2);
        assert_eq!(state.num_resources(), 0);
        assert!(state.process_need(pi(1)).is_empty());
    }

    #[test]
    fn test_negative_available_is_rejected() {
        let err = ResourceState::<IntegerType>::from_need(vec![1, -1], vec![], vec![]).unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::NegativeAvailable {
                resource: ri(1),
                value: -1
            }
        );
    }

    #[test]
    fn test_negative_assigned_is_rejected() {
        let err = ResourceState::<IntegerType>::from_need(
            vec![1, 1],
            vec![vec![0, 0], vec![0, -3]],
            vec![vec![0, 0], vec![0, 0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::NegativeAssigned {
                process: pi(1),
                resource: ri(1),
                value: -3
            }
        );
    }

    #[test]
    fn test_negative_need_is_rejected() {
        let err = ResourceState::<IntegerType>::from_need(
            vec![1, 1],
            vec![vec![0, 0]],
            vec![vec![-1, 0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InvalidStateError::NegativeNeed { value: -1, .. }
        ));
    }

    #[test]
    fn test_assigned_above_total_demand_is_rejected() {
        let err = ResourceState::<IntegerType>::from_total_demand(
            vec![0, 0],
            vec![vec![0, 3]],
            vec![vec![0, 2]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::NegativeNeed {
                process: pi(0),
                resource: ri(1),
                value: -1
            }
        );
    }

    #[test]
    fn test_need_overflow_is_reported() {
        let err =
            ResourceState::<i8>::from_total_demand(vec![0], vec![vec![1]], vec![vec![i8::MIN]])
                .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::NeedOverflow {
                process: pi(0),
                resource: ri(0),
                total_demand: i8::MIN,
                assigned: 1
            }
        );
    }

    #[test]
    fn test_wrong_row_count_is_rejected() {
        let err = ResourceState::<IntegerType>::from_need(
            vec![1],
            vec![vec![0], vec![0]],
            vec![vec![0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::DimensionMismatch(DimensionMismatch {
                matrix: Matrix::Need,
                row: None,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_wrong_row_length_is_rejected() {
        let err = ResourceState::<IntegerType>::from_total_demand(
            vec![1, 1],
            vec![vec![0, 0], vec![0]],
            vec![vec![0, 0], vec![0, 0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::DimensionMismatch(DimensionMismatch {
                matrix: Matrix::Assigned,
                row: Some(pi(1)),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_builder_matches_matrix_constructor() {
        let mut builder = ResourceStateBuilder::<IntegerType>::new(3, 3);
        for (r, &units) in [3, 3, 2].iter().enumerate() {
            builder.set_available(ri(r), units);
        }
        let assigned = [[0, 1, 0], [2, 0, 0], [3, 0, 2]];
        let need = [[7, 4, 3], [1, 2, 2], [6, 0, 0]];
        for p in 0..3 {
            for r in 0..3 {
                builder.set_assigned(pi(p), ri(r), assigned[p][r]);
                builder.set_need(pi(p), ri(r), need[p][r]);
            }
        }

        assert_eq!(builder.build().unwrap(), textbook());
    }

    #[test]
    fn test_builder_total_demand_is_order_independent() {
        let mut a = ResourceStateBuilder::<IntegerType>::new(1, 1);
        a.set_total_demand(pi(0), ri(0), 5)
            .set_assigned(pi(0), ri(0), 2);

        let mut b = ResourceStateBuilder::<IntegerType>::new(1, 1);
        b.set_assigned(pi(0), ri(0), 2)
            .set_total_demand(pi(0), ri(0), 5);

        let a = a.build().unwrap();
        let b = b.build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.need_of(pi(0), ri(0)), 3);
    }

    #[test]
    fn test_builder_rejects_negative_derived_need() {
        let mut builder = ResourceStateBuilder::<IntegerType>::new(2, 2);
        builder
            .set_assigned(pi(1), ri(0), 4)
            .set_total_demand(pi(1), ri(0), 2);
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::NegativeNeed {
                process: pi(1),
                resource: ri(0),
                value: -2
            }
        );
    }

    #[test]
    fn test_builder_defaults_are_all_zero() {
        let state = ResourceStateBuilder::<IntegerType>::new(2, 3).build().unwrap();
        assert!(state.available().iter().all(|&v| v == 0));
        assert!(state.assigned().iter().all(|&v| v == 0));
        assert!(state.need().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_display_lists_every_process() {
        let text = format!("{}", textbook());
        assert!(text.starts_with("Available: [3 3 2]\n"));
        assert!(text.contains("P0    assigned [0 1 0] need [7 4 3]"));
        assert!(text.contains("P2    assigned [3 0 2] need [6 0 0]"));
        assert_eq!(text.lines().count(), 4);
    }
}
