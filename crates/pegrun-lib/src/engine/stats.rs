//! Per-parse statistics.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::grammar::SymbolId;

fn duration_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Counters collected during one parse. Symbol-indexed counters are sized to
/// the grammar's symbol table.
#[derive(Debug, Clone, Serialize)]
pub struct ParsingStats {
    /// Bytes consumed by the parse.
    pub bytes_read: usize,
    /// Wall-clock recognition time, in seconds when serialized.
    #[serde(serialize_with = "duration_secs")]
    pub parse_time: Duration,
    /// Deepest offset at which recognition failed.
    pub failure_offset: usize,
    success_by_symbol: Vec<u32>,
    failure_by_symbol: Vec<u32>,
}

impl ParsingStats {
    pub(crate) fn new(symbols: usize) -> ParsingStats {
        ParsingStats {
            bytes_read: 0,
            parse_time: Duration::ZERO,
            failure_offset: 0,
            success_by_symbol: vec![0; symbols],
            failure_by_symbol: vec![0; symbols],
        }
    }

    pub(crate) fn record_success(&mut self, symbol: SymbolId) {
        if let Some(count) = self.success_by_symbol.get_mut(symbol as usize) {
            *count += 1;
        }
    }

    pub(crate) fn record_failure(&mut self, symbol: SymbolId, offset: usize) {
        if let Some(count) = self.failure_by_symbol.get_mut(symbol as usize) {
            *count += 1;
        }
        self.failure_offset = self.failure_offset.max(offset);
    }

    pub fn symbols_count(&self) -> usize {
        self.success_by_symbol.len()
    }

    /// Successful recognitions of one symbol.
    pub fn successes(&self, symbol: SymbolId) -> u32 {
        self.success_by_symbol
            .get(symbol as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Failed recognitions of one symbol.
    pub fn failures(&self, symbol: SymbolId) -> u32 {
        self.failure_by_symbol
            .get(symbol as usize)
            .copied()
            .unwrap_or(0)
    }
}
