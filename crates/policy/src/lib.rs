//! Ad-copy policy screening: flagged-claim detection and the launch review
//! that gates campaigns carrying unacknowledged warnings.

pub mod filter;
pub mod review;

pub use filter::{check_policy, FLAGGED_WORDS};
pub use review::PolicyReview;
