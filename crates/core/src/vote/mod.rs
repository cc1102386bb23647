//! General assembly: attendance, resolutions and weighted votes.

pub mod error;
pub mod session;
pub mod tally;
pub mod types;

#[cfg(test)]
mod tally_props;

pub use error::VoteError;
pub use session::VoteSession;
pub use tally::VoteTally;
pub use types::{
    Article, Attendance, AttendanceSummary, BallotBook, BallotChoice, Presence, PresenceCount,
    Resolution, ResolutionTally, Voter,
};
