//! Session-token types shared across Gatehouse services.
//!
//! Provides JWT validation and cookie builders. Token issuance lives in the
//! accounts service behind the `USE_ONLY_IN_ACCOUNTS_SERVICE` feature.

pub mod cookie;
pub mod token;
