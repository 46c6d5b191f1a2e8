//! Assistant-backed form filling for live web pages.
//!
//! The pipeline: scan the page's forms into a detached snapshot, ship the
//! snapshot (plus any user text) to an assistant service, parse the reply's
//! `field: value` lines, and reconcile the answers back onto the live page
//! through an ordered matching policy.

pub mod assistant;
pub mod browser;
pub mod cli;
pub mod coordinator;
pub mod dom;
pub mod error;
pub mod reconcile;
pub mod reply;
pub mod scan;
pub mod trace;
