//! Action-sequence analytics engine
//!
//! Two independent, pure analyses over the in-memory action log:
//! - `sequence`: empirical next-action transition probabilities
//! - `referral`: transitive referral reach over the referrer graph
//!
//! Neither holds state between calls; each invocation recomputes from the
//! full action collection it is given.

pub mod referral;
pub mod sequence;
