// Copyright 2026 Rowflow Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core types and definitions for Rowflow
//!
//! This module contains the fundamental types used throughout the pipeline:
//!
//! - [`Register`] - Tagged scalar values (64-bit integer or 16-byte string)
//! - [`Tuple`] - An ordered sequence of registers
//! - [`Error`] - Error types for all operations

pub mod error;
pub mod register;
pub mod tuple;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use register::{Char16, Register, RegisterType, MAX_STRING_LEN};
pub use tuple::Tuple;
