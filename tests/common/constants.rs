//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (user ids, tokens, catalog ids, etc.),
//! update only this file.

// ============================================================================
// Test Users
// ============================================================================

/// User whose stored tokens are valid
pub const USER_1_ID: &str = "user-1";

/// Second user, target of transfers
pub const USER_2_ID: &str = "user-2";

/// User the profile service does not know about
pub const UNKNOWN_USER_ID: &str = "nobody";

/// Current access token of user-1
pub const USER_1_ACCESS: &str = "access-1";

/// Refresh token of user-1
pub const USER_1_REFRESH: &str = "refresh-1";

/// Access token the auth service issues for user-1's refresh token
pub const USER_1_FRESH_ACCESS: &str = "access-1-fresh";

/// Current access token of user-2
pub const USER_2_ACCESS: &str = "access-2";

/// Refresh token of user-2
pub const USER_2_REFRESH: &str = "refresh-2";

// ============================================================================
// Test Catalog
// ============================================================================

/// Track playing on user-1's device
pub const TRACK_1_ID: &str = "track-1";
pub const TRACK_1_URI: &str = "spotify:track:track-1";
pub const TRACK_1_NAME: &str = "Opening Track";

/// Track in user-1's listening history
pub const TRACK_2_ID: &str = "track-2";
pub const TRACK_2_URI: &str = "spotify:track:track-2";
pub const TRACK_2_NAME: &str = "Closing Track";

/// Artist of both tracks
pub const ARTIST_NAME: &str = "The Test Band";

/// Episode of a podcast
pub const EPISODE_URI: &str = "spotify:episode:episode-1";
pub const EPISODE_PUBLISHER: &str = "Test Podcasts";

// ============================================================================
// Relay Configuration
// ============================================================================

/// Prefix of the user-profile service, also where the relay mounts its routes
pub const API_PREFIX: &str = "/api";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
