// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context assembly: page texts + question → model request

pub mod assembler;
pub mod types;

pub use assembler::{ContextAssembler, PAGE_SEPARATOR};
pub use types::{ContextPage, ModelRequest, PageContext, INSUFFICIENT_CONTEXT_PROMPT};
