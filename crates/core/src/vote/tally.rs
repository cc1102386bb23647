//! Weighted vote counting under articles 24, 25 and 26.

use std::collections::BTreeMap;

use copro_shared::types::OwnerId;

use super::types::{Article, Attendance, BallotChoice, Presence, Resolution, ResolutionTally, Voter};

/// Vote tally calculations.
pub struct VoteTally;

impl VoteTally {
    /// Whether an owner may vote given the attendance sheet.
    ///
    /// Present and mail voters always count. A proxy counts only when its
    /// holder is another owner attending in person. The sheet must list
    /// eligible owners only, so a holder missing from it never carries a proxy.
    #[must_use]
    pub fn is_voter_of_record(owner_id: OwnerId, attendance: &BTreeMap<OwnerId, Attendance>) -> bool {
        let Some(entry) = attendance.get(&owner_id) else {
            return false;
        };
        match entry.presence {
            Presence::Present | Presence::Correspondence => true,
            Presence::Proxy => entry.proxy_holder.is_some_and(|holder| {
                holder != owner_id
                    && attendance
                        .get(&holder)
                        .is_some_and(|h| h.presence == Presence::Present)
            }),
            Presence::Absent => false,
        }
    }

    /// Applies an article's majority rule.
    ///
    /// - Article 24: `expressed > 0` and `for > expressed / 2`
    /// - Article 25: `for > total_weight / 2`
    /// - Article 26: `for > 2/3 × total_weight`
    #[must_use]
    pub fn is_adopted(article: Article, votes_for: u64, expressed: u64, total_weight: u64) -> bool {
        match article {
            Article::Art24 => expressed > 0 && 2 * votes_for > expressed,
            Article::Art25 => 2 * votes_for > total_weight,
            Article::Art26 => 3 * votes_for > 2 * total_weight,
        }
    }

    /// Counts one resolution.
    ///
    /// Ballots from owners who are not voters of record are ignored. There
    /// is no implicit abstention: voters without a ballot add nothing.
    #[must_use]
    pub fn tally(
        resolution: &Resolution,
        ballots: Option<&BTreeMap<OwnerId, BallotChoice>>,
        voters: &[Voter],
        total_weight: u64,
    ) -> ResolutionTally {
        let eligible: BTreeMap<OwnerId, u64> = voters
            .iter()
            .filter(|v| v.voter_of_record)
            .map(|v| (v.owner_id, u64::from(v.tantiemes)))
            .collect();
        let voters_of_record_weight: u64 = eligible.values().sum();

        let (mut votes_for, mut votes_against, mut abstentions) = (0u64, 0u64, 0u64);
        for (owner_id, choice) in ballots.into_iter().flatten() {
            let Some(weight) = eligible.get(owner_id) else {
                continue;
            };
            match choice {
                BallotChoice::For => votes_for += weight,
                BallotChoice::Against => votes_against += weight,
                BallotChoice::Abstain => abstentions += weight,
            }
        }

        let expressed = votes_for + votes_against;
        let base = if resolution.article.uses_total_weight() {
            total_weight
        } else {
            voters_of_record_weight
        };

        ResolutionTally {
            resolution_id: resolution.id,
            title: resolution.title.clone(),
            article: resolution.article,
            votes_for,
            votes_against,
            abstentions,
            expressed,
            base,
            voters_of_record_weight,
            adopted: Self::is_adopted(resolution.article, votes_for, expressed, total_weight),
            has_votes: votes_for + votes_against + abstentions > 0,
        }
    }
}
