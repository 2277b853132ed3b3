/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Tracking dimensions through a reshape.
//!
//! A reshape from `from_sizes` to `to_sizes` merges and splits
//! dimensions. [`convert_dimension_numbers`] answers "where did these
//! dimensions go?" using the groups computed by
//! [`common_factors`](crate::factor::common_factors): a group of
//! source dimensions maps to its group of target dimensions only if
//! every source dimension in the group was asked about.

use serde::Deserialize;
use serde::Serialize;

use crate::factor::FactorError;
use crate::factor::try_common_factors;

/// The result of [`convert_dimension_numbers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConvertedDimensionNumbers {
    /// Source dimensions whose whole group was requested and mapped.
    pub transformed_from_dimensions: Vec<i64>,
    /// Requested source dimensions whose group was only partly
    /// requested.
    pub untransformed_from_dimensions: Vec<i64>,
    /// Target dimensions, sorted ascending.
    pub to_dimensions: Vec<i64>,
    /// Source dimensions partly absorbed into target dimensions.
    /// Paired with `split_from_sizes`.
    pub split_from_dimensions: Vec<i64>,
    /// For each entry of `split_from_dimensions`, the extent left
    /// over after dividing out the target dimensions it was split
    /// into.
    pub split_from_sizes: Vec<i64>,
}

/// Maps `from_dimensions`, a set of dimensions of `from_sizes`, to
/// the corresponding dimensions of `to_sizes`.
///
/// For each group of dimensions aligned by
/// [`common_factors`](crate::factor::common_factors):
///
/// - if every source dimension of the group is in `from_dimensions`,
///   the whole target group goes to `to_dimensions` and the source
///   group to `transformed_from_dimensions`;
/// - if only some are, the requested ones go to
///   `untransformed_from_dimensions`. When the group is exactly two
///   source dimensions and the second one is requested, trailing
///   target dimensions that evenly divide its extent are also
///   reported in `to_dimensions`, and the second dimension is
///   recorded as split along with its residual extent. For example,
///   `[2, 32] -> [4, 4, 4]` maps dimension 1 to target dimensions 1
///   and 2 with a residual size of 2.
/// - otherwise the group contributes nothing.
///
/// ```
/// use ndfactor::convert::convert_dimension_numbers;
///
/// let converted = convert_dimension_numbers(&[1], &[2, 32], &[4, 4, 4]);
/// assert_eq!(converted.to_dimensions, vec![1, 2]);
/// assert_eq!(converted.split_from_dimensions, vec![1]);
/// assert_eq!(converted.split_from_sizes, vec![2]);
/// assert_eq!(converted.untransformed_from_dimensions, vec![1]);
/// ```
///
/// # Panics
/// Panics if `from_sizes` and `to_sizes` have different products.
pub fn convert_dimension_numbers(
    from_dimensions: &[i64],
    from_sizes: &[i64],
    to_sizes: &[i64],
) -> ConvertedDimensionNumbers {
    match try_convert_dimension_numbers(from_dimensions, from_sizes, to_sizes) {
        Ok(dimensions) => dimensions,
        Err(err) => panic!("convert_dimension_numbers: {}", err),
    }
}

/// Checked version of [`convert_dimension_numbers`].
pub fn try_convert_dimension_numbers(
    from_dimensions: &[i64],
    from_sizes: &[i64],
    to_sizes: &[i64],
) -> Result<ConvertedDimensionNumbers, FactorError> {
    let requested = |dim: usize| from_dimensions.contains(&(dim as i64));

    let mut dimensions = ConvertedDimensionNumbers::default();
    let common_factors = try_common_factors(from_sizes, to_sizes)?;
    for window in common_factors.windows(2) {
        let ((from_begin, to_begin), (from_end, to_end)) = (window[0], window[1]);

        let any_present = (from_begin..from_end).any(requested);
        let all_present = (from_begin..from_end).all(requested);

        if all_present {
            dimensions
                .to_dimensions
                .extend((to_begin..to_end).map(|d| d as i64));
            dimensions
                .transformed_from_dimensions
                .extend((from_begin..from_end).map(|d| d as i64));
        } else if any_present {
            // A two-dimensional group such as [2, 32] -> [4, 4, 4]:
            // dimension 1 is partly mapped onto target dimensions 1
            // and 2 with a residual size of 2.
            if from_begin + 2 == from_end && requested(from_begin + 1) {
                let mut from_size = from_sizes[from_end - 1];
                let mut has_to_dim = false;
                for to_dim in (to_begin..to_end).rev() {
                    let to_size = to_sizes[to_dim];
                    if to_size == 0 || from_size % to_size != 0 {
                        break;
                    }
                    has_to_dim = true;
                    from_size /= to_size;
                    dimensions.to_dimensions.push(to_dim as i64);
                }
                if has_to_dim {
                    dimensions.split_from_sizes.push(from_size);
                    dimensions
                        .split_from_dimensions
                        .push((from_begin + 1) as i64);
                }
            }
            dimensions.untransformed_from_dimensions.extend(
                (from_begin..from_end)
                    .filter(|&d| requested(d))
                    .map(|d| d as i64),
            );
        }
    }
    dimensions.to_dimensions.sort_unstable();
    tracing::trace!(
        ?from_dimensions,
        ?from_sizes,
        ?to_sizes,
        ?dimensions,
        "converted dimension numbers"
    );
    Ok(dimensions)
}
