// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// The ternary expression handler.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads every one of them over five
/// lines, and the edge-of-lattice tables (which predecessor lanes
/// exist, which way a seam stepped) read far better on one line each.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
