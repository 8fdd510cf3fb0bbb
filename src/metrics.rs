//! Observability metrics for FPE operations
//!
//! Tracks performance of the strategy pre/post-passes and the chunk cipher
//! loop. Snapshots are serde-serializable so host applications can export
//! them to their own telemetry pipeline.

use serde::{Deserialize, Serialize};

/// Metrics snapshot for a single encrypt or decrypt call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationMetrics {
    /// Time spent reconciling text against the alphabet (strategy pre- and
    /// post-passes) in microseconds
    pub strategy_time_micros: u64,

    /// Time spent in the chunk cipher loop in microseconds
    pub cipher_time_micros: u64,

    /// Number of segments transformed by the chunk cipher
    pub chunks_ciphered: u32,

    /// Number of sub-minimum segments passed through unencrypted
    pub chunks_passed_through: u32,
}

impl OperationMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        OperationMetrics {
            strategy_time_micros: 0,
            cipher_time_micros: 0,
            chunks_ciphered: 0,
            chunks_passed_through: 0,
        }
    }

    /// Set strategy-pass metrics
    pub fn with_strategy(mut self, time_micros: u64) -> Self {
        self.strategy_time_micros = time_micros;
        self
    }

    /// Set chunk cipher metrics
    pub fn with_cipher(mut self, time_micros: u64, ciphered: u32, passed_through: u32) -> Self {
        self.cipher_time_micros = time_micros;
        self.chunks_ciphered = ciphered;
        self.chunks_passed_through = passed_through;
        self
    }

    /// Total operation time in microseconds
    pub fn total_time_micros(&self) -> u64 {
        self.strategy_time_micros + self.cipher_time_micros
    }
}

impl Default for OperationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
