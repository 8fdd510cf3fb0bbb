//! Common test utilities and fixtures for the fpekit-core test suite.
//!
//! This module provides shared key material, tweaks, and keyset constructors
//! used across strategy, chunking, keyset, and property-based tests.
//! Centralizing test fixtures ensures consistency and reduces duplication.

pub mod fixtures;
