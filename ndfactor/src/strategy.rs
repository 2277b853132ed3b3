/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for shapes and factorizations.
//!
//! These strategies are used in `proptest`-based tests of
//! [`crate::factor`] and [`crate::convert`].
//!
//! ```ignore
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_factorization_pair;
//!
//! proptest! {
//!     #[test]
//!     fn test_alignment((a, b) in gen_factorization_pair(4, 8)) {
//!         // `a` and `b` have the same element count.
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use proptest::prelude::*;

/// Generates a non-empty shape of at most `max_dims` dimensions, each
/// of extent in `1..=max_len`.
pub fn gen_bounds(max_dims: usize, max_len: i64) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1..=max_len, 1..=max_dims)
}

/// Groups consecutive `factors` into dimensions. `cuts[k]` decides
/// whether a new dimension starts after `factors[k]`.
fn group(factors: &[i64], cuts: &[bool]) -> Vec<i64> {
    let mut dims = Vec::new();
    let mut acc = 1;
    for (k, &factor) in factors.iter().enumerate() {
        acc *= factor;
        if cuts.get(k).copied().unwrap_or(true) || k + 1 == factors.len() {
            dims.push(acc);
            acc = 1;
        }
    }
    dims
}

/// Generates a pair of shapes with the same element count.
///
/// Both shapes are built from one list of at most `max_factors`
/// factors in `1..=max_len`. The first shape groups the factors in
/// order; the second groups a permutation of them, so the two
/// shapes need not share any boundary besides the ends.
pub fn gen_factorization_pair(
    max_factors: usize,
    max_len: i64,
) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::vec(1..=max_len, 1..=max_factors).prop_flat_map(|factors| {
        let n = factors.len();
        (
            Just(factors.clone()),
            Just(factors).prop_shuffle(),
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
        )
            .prop_map(|(lhs, rhs, lhs_cuts, rhs_cuts)| {
                (group(&lhs, &lhs_cuts), group(&rhs, &rhs_cuts))
            })
    })
}

/// Generates `(from_dimensions, from_sizes, to_sizes)` suitable for
/// [`crate::convert::convert_dimension_numbers`].
pub fn gen_conversion(
    max_factors: usize,
    max_len: i64,
) -> impl Strategy<Value = (Vec<i64>, Vec<i64>, Vec<i64>)> {
    gen_factorization_pair(max_factors, max_len).prop_flat_map(|(from, to)| {
        let rank = from.len();
        (
            prop::sample::subsequence((0..rank as i64).collect::<Vec<_>>(), 0..=rank),
            Just(from),
            Just(to),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::product;

    #[test]
    fn test_group() {
        assert_eq!(group(&[2, 3, 4], &[true, true, true]), vec![2, 3, 4]);
        assert_eq!(group(&[2, 3, 4], &[false, false, false]), vec![24]);
        assert_eq!(group(&[2, 3, 4], &[false, true, false]), vec![6, 4]);
        assert!(group(&[], &[]).is_empty());
    }

    proptest! {
        #[test]
        fn test_factorization_pair_products((a, b) in gen_factorization_pair(6, 8)) {
            prop_assert!(!a.is_empty() && !b.is_empty());
            prop_assert_eq!(product(&a), product(&b));
        }

        #[test]
        fn test_conversion_dimensions_in_range(
            (dims, from, _to) in gen_conversion(6, 8)
        ) {
            prop_assert!(dims.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(dims.iter().all(|&d| (d as usize) < from.len()));
        }
    }
}
