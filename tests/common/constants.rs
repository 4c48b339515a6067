//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (API keys, catalog contents), update only this file.

#![allow(dead_code)] // Each test binary uses its own subset

// ============================================================================
// Test API Keys
// ============================================================================

/// Key allowed to list books only
pub const LIST_ONLY_KEY: &str = "my-super-secret-token-1";

/// Key allowed to read a single book only
pub const GET_ONLY_KEY: &str = "my-super-secret-token-2";

/// Key with the wildcard allow-list
pub const WILDCARD_KEY: &str = "another-valid-key";

/// A key that is not in the permission table at all
pub const UNKNOWN_KEY: &str = "not-a-real-key";

// ============================================================================
// Test Catalog
// ============================================================================

pub const BOOK_1_ID: &str = "1";
pub const BOOK_1_TITLE: &str = "The Hitchhiker's Guide to the Galaxy";

pub const BOOK_2_ID: &str = "2";
pub const BOOK_2_TITLE: &str = "Dune";

/// An id no book in the test catalog carries
pub const MISSING_BOOK_ID: &str = "99";

// ============================================================================
// Timeouts
// ============================================================================

pub const REQUEST_TIMEOUT_SECS: u64 = 10;
