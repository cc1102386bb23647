//! Assembly domain types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use copro_shared::types::{OwnerId, ResolutionId};
use serde::{Deserialize, Serialize};

/// How an owner takes part in the general assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Not taking part.
    #[default]
    Absent,
    /// Attending in person.
    Present,
    /// Represented by another owner.
    Proxy,
    /// Voted by mail before the assembly.
    Correspondence,
}

/// Recorded attendance of one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Presence mode.
    #[serde(default)]
    pub presence: Presence,
    /// Owner holding the proxy, only meaningful with `Presence::Proxy`.
    #[serde(default)]
    pub proxy_holder: Option<OwnerId>,
}

/// An owner as seen by the assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Owner ID.
    pub owner_id: OwnerId,
    /// Owner name.
    pub name: String,
    /// Voting weight.
    pub tantiemes: u32,
    /// Presence mode.
    pub presence: Presence,
    /// Proxy holder, if any.
    pub proxy_holder: Option<OwnerId>,
    /// Whether the voter may cast a ballot.
    pub voter_of_record: bool,
}

/// Majority rule of a resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Article {
    /// Simple majority of the votes expressed.
    #[default]
    #[serde(rename = "24")]
    Art24,
    /// Absolute majority of the whole building.
    #[serde(rename = "25")]
    Art25,
    /// Two-thirds of the whole building.
    #[serde(rename = "26")]
    Art26,
}

impl Article {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Art24 => "Article 24",
            Self::Art25 => "Article 25",
            Self::Art26 => "Article 26",
        }
    }

    /// Whether the base is the whole building rather than the voters of record.
    #[must_use]
    pub const fn uses_total_weight(self) -> bool {
        matches!(self, Self::Art25 | Self::Art26)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Article {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let digits = lower
            .trim_start_matches("article")
            .trim_start_matches("art")
            .trim_start_matches(['.', ' ']);
        match digits {
            "24" => Ok(Self::Art24),
            "25" => Ok(Self::Art25),
            "26" => Ok(Self::Art26),
            _ => Err(format!("Unknown article: {s}")),
        }
    }
}

/// A resolution put to the vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolution ID.
    #[serde(default)]
    pub id: ResolutionId,
    /// Short title.
    pub title: String,
    /// Full text.
    #[serde(default)]
    pub description: String,
    /// Majority rule.
    #[serde(default)]
    pub article: Article,
}

impl Resolution {
    /// Creates a resolution with a fresh ID.
    #[must_use]
    pub fn new(title: impl Into<String>, article: Article) -> Self {
        Self {
            id: ResolutionId::new(),
            title: title.into(),
            description: String::new(),
            article,
        }
    }
}

/// A voter's choice on one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallotChoice {
    /// In favour.
    For,
    /// Opposed.
    Against,
    /// Abstains.
    Abstain,
}

/// Ballots by resolution, then by voter.
pub type BallotBook = BTreeMap<ResolutionId, BTreeMap<OwnerId, BallotChoice>>;

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTally {
    /// Resolution ID.
    pub resolution_id: ResolutionId,
    /// Resolution title.
    pub title: String,
    /// Majority rule applied.
    pub article: Article,
    /// Weight voting for.
    pub votes_for: u64,
    /// Weight voting against.
    pub votes_against: u64,
    /// Weight abstaining.
    pub abstentions: u64,
    /// `votes_for + votes_against`.
    pub expressed: u64,
    /// Weight the majority is measured against.
    pub base: u64,
    /// Weight of every voter of record.
    pub voters_of_record_weight: u64,
    /// Whether the resolution passes.
    pub adopted: bool,
    /// Whether any ballot counted.
    pub has_votes: bool,
}

/// Count and weight of owners in one presence mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceCount {
    /// Number of owners.
    pub count: usize,
    /// Their summed weight.
    pub weight: u64,
}

impl PresenceCount {
    fn add(&mut self, weight: u32) {
        self.count += 1;
        self.weight += u64::from(weight);
    }
}

/// Attendance sheet totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Present in person.
    pub present: PresenceCount,
    /// Represented by proxy (resolved or not).
    pub proxy: PresenceCount,
    /// Voted by mail.
    pub correspondence: PresenceCount,
    /// Absent.
    pub absent: PresenceCount,
    /// Voters of record.
    pub represented: PresenceCount,
}

impl AttendanceSummary {
    pub(crate) fn record(&mut self, voter: &Voter) {
        let bucket = match voter.presence {
            Presence::Present => &mut self.present,
            Presence::Proxy => &mut self.proxy,
            Presence::Correspondence => &mut self.correspondence,
            Presence::Absent => &mut self.absent,
        };
        bucket.add(voter.tantiemes);
        if voter.voter_of_record {
            self.represented.add(voter.tantiemes);
        }
    }
}
