// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when validating a [`TreeConfig`](crate::TreeConfig).

use thiserror::Error;

/// Rejected tree configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Nodes must be allowed to hold at least one entry before subdividing.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    /// The tree needs at least one level below the root to subdivide into.
    #[error("max depth must be at least 1")]
    ZeroDepth,
    /// The preset world cell is inverted, degenerate, or contains NaN.
    #[error("world bounds must have a positive extent on both axes")]
    InvalidWorld,
}
