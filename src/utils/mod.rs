// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Small helpers shared across modules

use std::error::Error;

/// Render an error together with its `source()` chain.
///
/// reqwest's `Display` stops at "error sending request"; the underlying
/// cause (connection refused, DNS failure, ...) lives further down the chain.
pub fn describe_error(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
