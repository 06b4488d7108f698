//! Result table and timing samples.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Method, MethodOutput, SentimentLabel};
use crate::{Result, SentimentSyncError};

/// One input sentence with the output of every participating method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceRecord {
    pub text: String,
    pub per_method: BTreeMap<Method, MethodOutput>,
}

impl SentenceRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            per_method: BTreeMap::new(),
        }
    }

    /// Add a method's output (builder style).
    pub fn with(mut self, method: Method, output: impl Into<MethodOutput>) -> Self {
        self.per_method.insert(method, output.into());
        self
    }

    /// Output of `method` for this sentence.
    ///
    /// A method absent from the row reads as the ERROR marker.
    pub fn output(&self, method: Method) -> MethodOutput {
        self.per_method
            .get(&method)
            .copied()
            .unwrap_or(MethodOutput::Error)
    }
}

/// Ordered rows, one per input sentence, sharing one method set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    methods: Vec<Method>,
    rows: Vec<SentenceRecord>,
}

impl ResultTable {
    /// Create an empty table for the given methods (stored in declared order).
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        let mut methods: Vec<Method> = methods.into_iter().collect();
        methods.sort();
        methods.dedup();
        Self {
            methods,
            rows: Vec::new(),
        }
    }

    /// Build a table from complete rows.
    pub fn from_rows(
        methods: impl IntoIterator<Item = Method>,
        rows: impl IntoIterator<Item = SentenceRecord>,
    ) -> Result<Self> {
        let mut table = Self::new(methods);
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    /// Append a row. Its method set must match the table's.
    pub fn push(&mut self, row: SentenceRecord) -> Result<()> {
        if !row.per_method.keys().copied().eq(self.methods.iter().copied()) {
            return Err(SentimentSyncError::Validation(format!(
                "row {} has methods {:?}, table has {:?}",
                self.rows.len() + 1,
                row.per_method.keys().collect::<Vec<_>>(),
                self.methods
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Participating methods in declared order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn rows(&self) -> &[SentenceRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether pairwise comparison applies (two or more methods).
    pub fn is_comparable(&self) -> bool {
        self.methods.len() >= 2
    }

    /// Every unordered pair of participating methods, `i < j` in declared order.
    pub fn method_pairs(&self) -> Vec<(Method, Method)> {
        let mut pairs = Vec::new();
        for (i, a) in self.methods.iter().enumerate() {
            for b in &self.methods[i + 1..] {
                pairs.push((*a, *b));
            }
        }
        pairs
    }

    /// One method's column, in row order.
    pub fn column(&self, method: Method) -> impl Iterator<Item = MethodOutput> + '_ {
        self.rows.iter().map(move |row| row.output(method))
    }

    /// One method's labels; `None` marks ERROR cells.
    pub fn labels(&self, method: Method) -> Vec<Option<SentimentLabel>> {
        self.column(method).map(|cell| cell.label()).collect()
    }

    /// One method's intensities; ERROR cells read as 0.0.
    pub fn intensities(&self, method: Method) -> Vec<f64> {
        self.column(method).map(|cell| cell.intensity()).collect()
    }
}

/// Wall-clock duration of one successful scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSample {
    pub method: Method,
    /// 1-based position of the sentence in the input.
    pub sentence_index: usize,
    pub elapsed_seconds: f64,
}
