// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rate limiting for search requests

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::num::NonZeroU32;

use super::types::SearchError;

const DEFAULT_RPM: NonZeroU32 = match NonZeroU32::new(30) {
    Some(rpm) => rpm,
    None => unreachable!(),
};

/// Outgoing rate limiter for the search provider
pub struct SearchRateLimiter {
    limiter: GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    requests_per_minute: u32,
}

impl SearchRateLimiter {
    /// Create a new rate limiter
    ///
    /// Zero is treated as the default of 30 requests per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_RPM);
        let limiter = GovRateLimiter::direct(Quota::per_minute(rpm));

        Self {
            limiter,
            requests_per_minute: rpm.get(),
        }
    }

    /// Check if a request is allowed right now
    pub fn check(&self) -> Result<(), SearchError> {
        self.limiter
            .check()
            .map_err(|_| SearchError::RateLimited {
                retry_after_secs: (60 / self.requests_per_minute.max(1)).max(1) as u64,
            })
    }

    /// Get the effective requests per minute
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }
}
