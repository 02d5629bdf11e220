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

//! Print sink operator.
//!
//! Renders every incoming tuple to a caller-supplied byte sink: columns
//! joined by a single comma, each tuple terminated by a newline (the last one
//! included). Integers render in decimal, strings as their raw bytes with no
//! quoting. An empty tuple writes nothing, not even a newline.

use std::io::Write;

use crate::core::{Register, Result};
use crate::executor::operator::Operator;

/// Sink that formats tuples into an [`std::io::Write`] target.
///
/// `next()` returns whatever the child returns; the written line is the side
/// effect. `output()` is always empty. Flushing on close is left to the sink.
pub struct PrintOperator<W: Write + Send> {
    input: Box<dyn Operator>,
    sink: W,
}

impl<W: Write + Send> PrintOperator<W> {
    /// Create a print sink over `input` writing to `sink`.
    pub fn new(input: Box<dyn Operator>, sink: W) -> Self {
        Self { input, sink }
    }

    /// Consume the operator and return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write + Send> Operator for PrintOperator<W> {
    fn open(&mut self) -> Result<()> {
        self.input.open()
    }

    fn next(&mut self) -> Result<bool> {
        if !self.input.next()? {
            return Ok(false);
        }

        let regs = self.input.output();
        if !regs.is_empty() {
            for (i, reg) in regs.iter().enumerate() {
                if i > 0 {
                    self.sink.write_all(b",")?;
                }
                match reg {
                    Register::Int64(v) => write!(self.sink, "{}", v)?,
                    Register::Char16(s) => self.sink.write_all(s.as_bytes())?,
                }
            }
            self.sink.write_all(b"\n")?;
        }
        Ok(true)
    }

    fn output(&self) -> &[Register] {
        &[]
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn name(&self) -> &str {
        "Print"
    }
}
