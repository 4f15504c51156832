//! Call History Module
//!
//! Read-side views over the counter and history lists written by
//! [`crate::cache::instrument`].

use std::fmt;

use serde::Serialize;

// == Call Record ==
/// One recorded invocation: the input as logged and the output it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Call History ==
/// Paired input and output logs of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallHistory {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl CallHistory {
    /// Builds a history from raw list elements, decoding lossily.
    pub fn from_raw(inputs: Vec<Vec<u8>>, outputs: Vec<Vec<u8>>) -> Self {
        let decode = |items: Vec<Vec<u8>>| -> Vec<String> {
            items
                .iter()
                .map(|item| String::from_utf8_lossy(item).into_owned())
                .collect()
        };
        Self {
            inputs: decode(inputs),
            outputs: decode(outputs),
        }
    }

    /// Input/output pairs in call order.
    ///
    /// Failed calls are paired with their failure marker. Inputs left
    /// without any output (a store error while recording) are dropped.
    pub fn records(&self) -> Vec<CallRecord> {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(input, output)| CallRecord {
                input: input.clone(),
                output: output.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

// == Replay ==
/// Everything recorded about an operation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    pub qualname: String,
    pub calls: u64,
    pub records: Vec<CallRecord>,
}

impl Replay {
    pub fn new(qualname: &str, calls: u64, history: &CallHistory) -> Self {
        Self {
            qualname: qualname.to_string(),
            calls,
            records: history.records(),
        }
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.qualname, self.calls)?;
        for record in &self.records {
            write!(f, "\n{}({}) -> {}", self.qualname, record.input, record.output)?;
        }
        Ok(())
    }
}
