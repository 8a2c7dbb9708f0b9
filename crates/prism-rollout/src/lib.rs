//! Prism Rollout - blue-green color detection and relabeling
//!
//! No persisted field says which color of a blue-green deployment is live.
//! This crate reconstructs it from durable facts - application name
//! suffixes and the variables prior operations left behind - and relabels
//! deployed application records accordingly.
//!
//! ## Architectural Boundaries
//!
//! - the workflow engine owns: variables, operation records, history
//! - `prism-rollout` owns: deriving colors and LIVE/IDLE labels from them
//! - `prism-hooks` owns: which lifecycle hooks those labels make due
//!
//! Actual start/stop/route operations happen elsewhere; this crate only
//! decides.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod detector;
pub mod error;
pub mod productization;

// Re-exports
pub use detector::ApplicationColorDetector;
pub use error::{Result, RolloutError};
pub use productization::ProductizationStateUpdater;
