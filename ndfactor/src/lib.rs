/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Dimension factorization for reshapes.
//!
//! A reshape reinterprets the elements of a tensor under a different
//! list of extents with the same product. This crate relates the two
//! lists:
//!
//! - [`factor::to_mixed_radix`] turns a linear index into
//!   per-dimension coordinates;
//! - [`factor::common_factors`] finds the groups of dimensions that
//!   correspond exactly between two shapes;
//! - [`convert::convert_dimension_numbers`] maps a set of dimensions
//!   of the source shape to the dimensions of the reshaped one.
//!
//! These are pure functions over plain values and are safe to call
//! from any number of threads.
//!
//! Alongside, the crate provides the small utilities that passes
//! using it rely on: scoped timers ([`timer`]), status annotation
//! ([`status`]), number formatting ([`format`]), multi-line logging
//! ([`logging`]), 4-bit packing ([`pack`]), thread pool selection
//! ([`pool`]) and configuration ([`config`]).

/// Process configuration.
pub mod config;

/// Tracking dimensions through a reshape.
pub mod convert;

/// Factorizations of extents.
pub mod factor;

/// Human-readable and round-trip formatting.
pub mod format;

/// Logging setup and multi-line logging.
pub mod logging;

/// 4-bit packing.
pub mod pack;

/// Borrowed or owned thread pools.
pub mod pool;

/// Status values and context annotation.
pub mod status;

/// Scoped logging timers.
pub mod timer;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;

pub use convert::ConvertedDimensionNumbers;
pub use convert::convert_dimension_numbers;
pub use factor::Boundary;
pub use factor::FactorError;
pub use factor::common_factors;
pub use factor::product;
pub use factor::to_mixed_radix;
pub use status::Status;
