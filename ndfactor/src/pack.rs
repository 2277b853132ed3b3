/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Packing of 4-bit values, two per byte.
//!
//! Element `2k` occupies the high nibble of byte `k` and element
//! `2k + 1` the low nibble.

/// Packs the low nibble of each byte of `input` into `output`.
///
/// # Panics
/// Panics if `output.len() != input.len().div_ceil(2)`.
pub fn pack_int4(input: &[u8], output: &mut [u8]) {
    assert_eq!(
        output.len(),
        input.len().div_ceil(2),
        "pack_int4: output must hold {} nibbles",
        input.len()
    );
    for (i, &byte) in input.iter().enumerate() {
        // High bits may carry garbage.
        let nibble = byte & 0xf;
        if i % 2 == 0 {
            output[i / 2] = nibble << 4;
        } else {
            output[i / 2] |= nibble;
        }
    }
}

/// Unpacks the nibbles of `input` into one byte each in `output`.
///
/// # Panics
/// Panics if `input.len() != output.len().div_ceil(2)`.
pub fn unpack_int4(input: &[u8], output: &mut [u8]) {
    assert_eq!(
        input.len(),
        output.len().div_ceil(2),
        "unpack_int4: input must hold {} nibbles",
        output.len()
    );
    for (i, byte) in output.iter_mut().enumerate() {
        *byte = if i % 2 == 0 {
            (input[i / 2] >> 4) & 0xf
        } else {
            input[i / 2] & 0xf
        };
    }
}
