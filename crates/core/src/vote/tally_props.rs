//! Property-based tests for vote tallies.

use std::collections::BTreeMap;

use copro_shared::types::OwnerId;
use proptest::prelude::*;

use super::tally::VoteTally;
use super::types::{Article, BallotChoice, Presence, Resolution, Voter};

fn choice() -> impl Strategy<Value = Option<BallotChoice>> {
    prop_oneof![
        Just(None),
        Just(Some(BallotChoice::For)),
        Just(Some(BallotChoice::Against)),
        Just(Some(BallotChoice::Abstain)),
    ]
}

fn article() -> impl Strategy<Value = Article> {
    prop_oneof![Just(Article::Art24), Just(Article::Art25), Just(Article::Art26)]
}

/// (weight, voter of record, ballot)
fn voters() -> impl Strategy<Value = Vec<(u32, bool, Option<BallotChoice>)>> {
    prop::collection::vec((1u32..500, any::<bool>(), choice()), 0..15)
}

fn build(raw: &[(u32, bool, Option<BallotChoice>)]) -> (Vec<Voter>, BTreeMap<OwnerId, BallotChoice>) {
    let voters: Vec<Voter> = raw
        .iter()
        .map(|&(tantiemes, voter_of_record, _)| Voter {
            owner_id: OwnerId::new(),
            name: String::new(),
            tantiemes,
            presence: if voter_of_record { Presence::Present } else { Presence::Absent },
            proxy_holder: None,
            voter_of_record,
        })
        .collect();
    let ballots = voters
        .iter()
        .zip(raw)
        .filter_map(|(v, &(_, _, c))| c.map(|c| (v.owner_id, c)))
        .collect();
    (voters, ballots)
}

proptest! {
    /// Counted weight never exceeds the weight of voters of record.
    #[test]
    fn prop_counted_weight_bounded(raw in voters(), article in article()) {
        let (voters, ballots) = build(&raw);
        let tally = VoteTally::tally(&Resolution::new("r", article), Some(&ballots), &voters, 10_000);

        prop_assert!(tally.votes_for + tally.votes_against + tally.abstentions <= tally.voters_of_record_weight);
        prop_assert_eq!(tally.expressed, tally.votes_for + tally.votes_against);
    }

    /// Only voters of record contribute.
    #[test]
    fn prop_non_voters_contribute_nothing(raw in voters(), article in article()) {
        let (voters, ballots) = build(&raw);
        let resolution = Resolution::new("r", article);
        let full = VoteTally::tally(&resolution, Some(&ballots), &voters, 10_000);

        let kept: BTreeMap<OwnerId, BallotChoice> = ballots
            .iter()
            .filter(|(id, _)| voters.iter().any(|v| v.owner_id == **id && v.voter_of_record))
            .map(|(id, c)| (*id, *c))
            .collect();
        let trimmed = VoteTally::tally(&resolution, Some(&kept), &voters, 10_000);

        prop_assert_eq!(full, trimmed);
    }

    /// Articles 25 and 26 are measured against the whole building.
    #[test]
    fn prop_absolute_articles_use_total_weight(raw in voters(), total in 1u64..20_000) {
        let (voters, ballots) = build(&raw);
        for article in [Article::Art25, Article::Art26] {
            let tally = VoteTally::tally(&Resolution::new("r", article), Some(&ballots), &voters, total);
            prop_assert_eq!(tally.base, total);
        }
    }

    /// More votes for never turns an adopted resolution down.
    #[test]
    fn prop_adoption_monotonic_in_votes_for(
        article in article(),
        votes_for in 0u64..1_000,
        extra in 0u64..1_000,
        against in 0u64..1_000,
    ) {
        let total = 2_000 + against + extra;
        if VoteTally::is_adopted(article, votes_for, votes_for + against, total) {
            prop_assert!(VoteTally::is_adopted(
                article,
                votes_for + extra,
                votes_for + extra + against,
                total,
            ));
        }
    }
}
