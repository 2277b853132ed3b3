/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Factorizations of extents.
//!
//! This module holds the integer algorithms that relate two shapes
//! with the same number of elements:
//!
//! - [`product`] reduces a shape to its element count;
//! - [`to_mixed_radix`] turns a linear index into per-dimension
//!   coordinates (most significant dimension first);
//! - [`common_factors`] aligns two factorizations of the same
//!   element count into matching groups of dimensions.
//!
//! Violating a precondition (a non-positive radix, or two shapes with
//! different element counts) is a logic error in the caller. The
//! plain entry points panic with a diagnostic; the `try_` variants
//! return the same condition as a [`FactorError`].

/// A boundary between groups of dimensions in two factorizations:
/// `(i, j)` such that `product(&a[..i]) == product(&b[..j])`.
pub type Boundary = (usize, usize);

/// A broken invariant detected while factoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FactorError {
    #[error("product of bounds {bounds:?} must be positive, got {product}")]
    NonPositiveProduct { bounds: Vec<i64>, product: i64 },

    #[error("radix {radix} at dimension {dim} must be positive")]
    NonPositiveRadix { dim: usize, radix: i64 },

    #[error("divisor became {divisor} after dimension {dim}")]
    NonPositiveDivisor { dim: usize, divisor: i64 },

    #[error("element counts differ: product({lhs:?}) = {lhs_product} != product({rhs:?}) = {rhs_product}")]
    ProductMismatch {
        lhs: Vec<i64>,
        lhs_product: i64,
        rhs: Vec<i64>,
        rhs_product: i64,
    },

    #[error("factorizations {lhs:?} and {rhs:?} do not converge")]
    Diverged { lhs: Vec<i64>, rhs: Vec<i64> },
}

/// Returns the product of `xs`, or 1 if `xs` is empty.
///
/// Overflow wraps; callers are expected to keep element counts in
/// range.
pub fn product(xs: &[i64]) -> i64 {
    xs.iter().fold(1i64, |acc, &x| acc.wrapping_mul(x))
}

/// Decomposes `n` into mixed-radix digits under `bounds`.
///
/// The first digit is the most significant. Multiples of
/// `product(bounds)` are discarded: the decomposition is of
/// `n % product(bounds)`. For `n >= 0`, `digits[k]` lies in
/// `[0, bounds[k])`; a negative `n` keeps the sign of its remainder,
/// so its digits are non-positive. An empty `bounds` yields no
/// digits.
///
/// ```
/// use ndfactor::factor::to_mixed_radix;
///
/// assert_eq!(to_mixed_radix(11, &[2, 3, 4]), vec![0, 2, 3]);
/// assert_eq!(to_mixed_radix(24 + 11, &[2, 3, 4]), vec![0, 2, 3]);
/// assert!(to_mixed_radix(7, &[]).is_empty());
/// ```
///
/// # Panics
/// Panics if any radix is not positive, or if the product of
/// `bounds` is not positive.
pub fn to_mixed_radix(n: i64, bounds: &[i64]) -> Vec<i64> {
    match try_to_mixed_radix(n, bounds) {
        Ok(digits) => digits,
        Err(err) => panic!("to_mixed_radix: {}", err),
    }
}

/// Checked version of [`to_mixed_radix`].
pub fn try_to_mixed_radix(n: i64, bounds: &[i64]) -> Result<Vec<i64>, FactorError> {
    if bounds.is_empty() {
        return Ok(Vec::new());
    }

    let mut divisor = product(bounds);
    if divisor <= 0 {
        return Err(FactorError::NonPositiveProduct {
            bounds: bounds.to_vec(),
            product: divisor,
        });
    }

    let mut digits = Vec::with_capacity(bounds.len());
    let mut remainder = n % divisor;
    for (dim, &radix) in bounds.iter().enumerate() {
        if radix <= 0 {
            return Err(FactorError::NonPositiveRadix { dim, radix });
        }
        divisor /= radix;
        if divisor <= 0 {
            return Err(FactorError::NonPositiveDivisor { dim, divisor });
        }
        // The divisor is 1 on the last dimension.
        digits.push(remainder / divisor);
        remainder %= divisor;
    }
    Ok(digits)
}

/// Inverse of [`to_mixed_radix`] for in-range digits: the
/// place-value weighted sum of `digits` under `bounds`.
pub fn from_mixed_radix(digits: &[i64], bounds: &[i64]) -> i64 {
    digits
        .iter()
        .zip(bounds)
        .fold(0i64, |acc, (&digit, &radix)| acc * radix + digit)
}

/// Aligns two factorizations of the same element count.
///
/// Returns the boundaries `(i, j)` at which the prefix products of
/// `a` and `b` coincide, so that for adjacent boundaries `(i, j)`,
/// `(i', j')`, `product(&a[i..i'])` equals `product(&b[j..j'])`. The
/// result starts at `(0, 0)` and ends at `(a.len(), b.len())`.
///
/// ```
/// use ndfactor::factor::common_factors;
///
/// assert_eq!(common_factors(&[2, 3], &[6]), vec![(0, 0), (2, 1)]);
/// assert_eq!(common_factors(&[6], &[2, 3]), vec![(0, 0), (1, 2)]);
/// assert_eq!(
///     common_factors(&[2, 6], &[2, 2, 3]),
///     vec![(0, 0), (1, 1), (2, 3)]
/// );
/// ```
///
/// When the shapes disagree after zero-sized dimensions are taken
/// into account (e.g. `[0, 10, 3]` and `[0, 3]`), the only boundaries
/// are the two ends. Past a matched prefix, a zero-sized remainder is
/// a single group.
///
/// # Panics
/// Panics if `product(a) != product(b)`.
pub fn common_factors(a: &[i64], b: &[i64]) -> Vec<Boundary> {
    match try_common_factors(a, b) {
        Ok(bounds) => bounds,
        Err(err) => panic!("common_factors: {}", err),
    }
}

/// Checked version of [`common_factors`].
pub fn try_common_factors(a: &[i64], b: &[i64]) -> Result<Vec<Boundary>, FactorError> {
    let (lhs_product, rhs_product) = (product(a), product(b));
    if lhs_product != rhs_product {
        return Err(FactorError::ProductMismatch {
            lhs: a.to_vec(),
            lhs_product,
            rhs: b.to_vec(),
            rhs_product,
        });
    }

    if a == b {
        return Ok((0..=a.len()).map(|i| (i, i)).collect());
    }

    let mut bounds = Vec::new();
    let (mut i, mut j) = (0, 0);
    let mut prior: Option<Boundary> = None;
    while i < a.len() && j < b.len() && a[i] == b[j] {
        prior = Some((i, j));
        bounds.push((i, j));
        i += 1;
        j += 1;
    }

    // Matching prefixes may have hidden a zero: [0, 10, 3] and [0, 3]
    // have equal (zero) products but unequal suffixes.
    let suffix_product = product(&a[i..]);
    if suffix_product != product(&b[j..]) {
        return Ok(vec![(0, 0), (a.len(), b.len())]);
    }
    if suffix_product == 0 {
        bounds.push((i, j));
        bounds.push((a.len(), b.len()));
        return Ok(bounds);
    }

    let (mut partial_a, mut partial_b) = (1i64, 1i64);
    loop {
        let advanced = prior.is_none_or(|(prior_i, prior_j)| i > prior_i || j > prior_j);
        if partial_a == partial_b && advanced {
            prior = Some((i, j));
            bounds.push((i, j));
            continue;
        }

        let in_bounds_a = i < a.len();
        let in_bounds_b = j < b.len();
        if !(in_bounds_a || in_bounds_b) {
            break;
        }

        let next_a = partial_a < partial_b
            || (in_bounds_a
                && (!in_bounds_b || (partial_a == partial_b && a[i] <= b[j])));
        let next_b = partial_b < partial_a
            || (in_bounds_b
                && (!in_bounds_a || (partial_b == partial_a && b[j] <= a[i])));
        if !(next_a || next_b) {
            return Err(diverged(a, b));
        }
        if next_a {
            let Some(&size) = a.get(i) else {
                return Err(diverged(a, b));
            };
            partial_a = partial_a.wrapping_mul(size);
            i += 1;
        }
        if next_b {
            let Some(&size) = b.get(j) else {
                return Err(diverged(a, b));
            };
            partial_b = partial_b.wrapping_mul(size);
            j += 1;
        }
    }
    Ok(bounds)
}

/// Whether `seq`, a list of distinct numbers, forms a contiguous
/// range once sorted, e.g. `[3, 1, 2]`. An empty list is trivially
/// contiguous.
pub fn distinct_numbers_are_consecutive_if_sorted(seq: &[i64]) -> bool {
    match (seq.iter().min(), seq.iter().max()) {
        (Some(&min), Some(&max)) => max.abs_diff(min) == (seq.len() - 1) as u64,
        _ => true,
    }
}

fn diverged(a: &[i64], b: &[i64]) -> FactorError {
    FactorError::Diverged {
        lhs: a.to_vec(),
        rhs: b.to_vec(),
    }
}
