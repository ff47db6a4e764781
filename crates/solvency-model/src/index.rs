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

//! Strongly typed indices for processes and resource types.
//!
//! Both index spaces are plain `usize` positions, so mixing them up compiles
//! silently when raw integers are used. `ProcessIndex` and `ResourceIndex`
//! are transparent wrappers that keep the two apart at the type level.

macro_rules! typed_index {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(usize);

        impl $name {
            /// Creates a new index from a raw position.
            #[inline(always)]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw position.
            #[inline(always)]
            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline(always)]
            fn from(index: usize) -> Self {
                Self::new(index)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(index: $name) -> Self {
                index.0
            }
        }
    };
}

typed_index!(
    /// Identifies a process by its row in the allocation matrices.
    ///
    /// Displayed as `P<n>`, the conventional notation in safe sequences.
    ///
    /// ```rust
    /// # use solvency_model::index::ProcessIndex;
    /// let p = ProcessIndex::new(3);
    /// assert_eq!(p.get(), 3);
    /// assert_eq!(format!("{}", p), "P3");
    /// assert_eq!(format!("{:?}", p), "ProcessIndex(3)");
    /// ```
    ProcessIndex,
    "P"
);

typed_index!(
    /// Identifies a resource type by its column in the allocation matrices.
    ///
    /// Displayed as `R<n>`.
    ResourceIndex,
    "R"
);
