// ABOUTME: Offset/limit pagination used by every list endpoint
// ABOUTME: Clamps caller-supplied skip and limit into a valid range instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_SKIP, MAX_LIMIT};
use serde::{Deserialize, Serialize};

/// Raw `?skip=&limit=` query parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Records to skip
    pub skip: Option<i64>,
    /// Maximum records to return
    pub limit: Option<i64>,
}

/// Clamped page parameters.
///
/// Negative values become zero and `limit` is capped at
/// [`MAX_LIMIT`]. An offset past the end simply yields an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    skip: i64,
    limit: i64,
}

impl PageParams {
    /// Build clamped parameters
    #[must_use]
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: skip.max(0),
            limit: limit.clamp(0, MAX_LIMIT),
        }
    }

    /// Records to skip
    #[must_use]
    pub const fn skip(&self) -> i64 {
        self.skip
    }

    /// Maximum records to return
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Take this page out of an ordered sequence
    pub fn slice<I, T>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(0))
            .collect()
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP, DEFAULT_LIMIT)
    }
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        Self::new(
            query.skip.unwrap_or(DEFAULT_SKIP),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
