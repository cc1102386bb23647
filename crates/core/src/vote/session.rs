//! General assembly session: attendance sheet, resolutions and ballots.
//!
//! Every mutation returns a new session and leaves the receiver untouched.

use std::collections::BTreeMap;

use copro_shared::types::{OwnerId, ResolutionId};
use serde::{Deserialize, Serialize};

use super::error::VoteError;
use super::tally::VoteTally;
use super::types::{
    Attendance, AttendanceSummary, BallotBook, BallotChoice, Presence, Resolution,
    ResolutionTally, Voter,
};
use crate::owner::Owner;

/// State of one general assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteSession {
    /// Attendance by owner; missing owners are absent.
    pub attendance: BTreeMap<OwnerId, Attendance>,
    /// Resolutions on the agenda, in order.
    pub resolutions: Vec<Resolution>,
    /// Recorded ballots.
    pub ballots: BallotBook,
}

impl VoteSession {
    /// Joins non-common owners with the attendance sheet.
    #[must_use]
    pub fn voters(&self, owners: &[Owner]) -> Vec<Voter> {
        let sheet = self.sheet(owners);
        owners
            .iter()
            .filter(|o| !o.is_common)
            .map(|owner| {
                let attendance = self.attendance.get(&owner.id).copied().unwrap_or_default();
                Voter {
                    owner_id: owner.id,
                    name: owner.name.clone(),
                    tantiemes: owner.tantiemes,
                    presence: attendance.presence,
                    proxy_holder: attendance.proxy_holder,
                    voter_of_record: VoteTally::is_voter_of_record(owner.id, &sheet),
                }
            })
            .collect()
    }

    /// Attendance restricted to current non-common owners.
    fn sheet(&self, owners: &[Owner]) -> BTreeMap<OwnerId, Attendance> {
        self.attendance
            .iter()
            .filter(|(id, _)| owners.iter().any(|o| o.id == **id && !o.is_common))
            .map(|(id, attendance)| (*id, *attendance))
            .collect()
    }

    fn ensure_voter(owners: &[Owner], owner_id: OwnerId) -> Result<(), VoteError> {
        if owners.iter().any(|o| o.id == owner_id && !o.is_common) {
            Ok(())
        } else {
            Err(VoteError::UnknownVoter(owner_id))
        }
    }

    fn ensure_resolution(&self, resolution_id: ResolutionId) -> Result<(), VoteError> {
        if self.resolutions.iter().any(|r| r.id == resolution_id) {
            Ok(())
        } else {
            Err(VoteError::UnknownResolution(resolution_id))
        }
    }

    /// Records how an owner attends.
    ///
    /// A proxy holder, when given, must be another voter attending in person.
    /// A proxy without holder is kept but does not count. Any other presence
    /// clears the holder.
    pub fn set_presence(
        &self,
        owners: &[Owner],
        owner_id: OwnerId,
        presence: Presence,
        proxy_holder: Option<OwnerId>,
    ) -> Result<Self, VoteError> {
        Self::ensure_voter(owners, owner_id)?;

        let proxy_holder = match (presence, proxy_holder) {
            (Presence::Proxy, Some(holder)) => {
                if holder == owner_id {
                    return Err(VoteError::SelfProxy(owner_id));
                }
                let holder_present = Self::ensure_voter(owners, holder).is_ok()
                    && self
                        .attendance
                        .get(&holder)
                        .is_some_and(|a| a.presence == Presence::Present);
                if !holder_present {
                    return Err(VoteError::ProxyHolderNotPresent(holder));
                }
                Some(holder)
            }
            _ => None,
        };

        let mut next = self.clone();
        next.attendance.insert(
            owner_id,
            Attendance {
                presence,
                proxy_holder,
            },
        );
        Ok(next)
    }

    /// Appends a resolution to the agenda.
    #[must_use]
    pub fn add_resolution(&self, resolution: Resolution) -> Self {
        let mut next = self.clone();
        next.resolutions.push(resolution);
        next
    }

    /// Records or replaces a voter's ballot.
    pub fn record_ballot(
        &self,
        owners: &[Owner],
        resolution_id: ResolutionId,
        owner_id: OwnerId,
        choice: BallotChoice,
    ) -> Result<Self, VoteError> {
        self.ensure_resolution(resolution_id)?;
        Self::ensure_voter(owners, owner_id)?;
        if !VoteTally::is_voter_of_record(owner_id, &self.sheet(owners)) {
            return Err(VoteError::NotVoterOfRecord(owner_id));
        }

        let mut next = self.clone();
        next.ballots
            .entry(resolution_id)
            .or_default()
            .insert(owner_id, choice);
        Ok(next)
    }

    /// Removes one voter's ballot. Clearing a missing ballot is a no-op.
    pub fn clear_ballot(&self, resolution_id: ResolutionId, owner_id: OwnerId) -> Result<Self, VoteError> {
        self.ensure_resolution(resolution_id)?;

        let mut next = self.clone();
        if let Some(book) = next.ballots.get_mut(&resolution_id) {
            book.remove(&owner_id);
            if book.is_empty() {
                next.ballots.remove(&resolution_id);
            }
        }
        Ok(next)
    }

    /// Drops every ballot of one resolution.
    pub fn reset_resolution(&self, resolution_id: ResolutionId) -> Result<Self, VoteError> {
        self.ensure_resolution(resolution_id)?;

        let mut next = self.clone();
        next.ballots.remove(&resolution_id);
        Ok(next)
    }

    /// Drops every ballot.
    #[must_use]
    pub fn reset_all(&self) -> Self {
        Self {
            ballots: BallotBook::new(),
            ..self.clone()
        }
    }

    /// Removes an owner from the session.
    ///
    /// Their attendance and ballots go away, and proxies they held lose
    /// their holder.
    #[must_use]
    pub fn without_owner(&self, owner_id: OwnerId) -> Self {
        let mut next = self.clone();
        next.attendance.remove(&owner_id);
        for attendance in next.attendance.values_mut() {
            if attendance.proxy_holder == Some(owner_id) {
                attendance.proxy_holder = None;
            }
        }
        for book in next.ballots.values_mut() {
            book.remove(&owner_id);
        }
        next.ballots.retain(|_, book| !book.is_empty());
        next
    }

    /// Attendance sheet totals.
    #[must_use]
    pub fn attendance_summary(&self, owners: &[Owner]) -> AttendanceSummary {
        self.voters(owners)
            .iter()
            .fold(AttendanceSummary::default(), |mut summary, voter| {
                summary.record(voter);
                summary
            })
    }

    /// Tallies every resolution in agenda order.
    #[must_use]
    pub fn tally_all(&self, owners: &[Owner], total_weight: u64) -> Vec<ResolutionTally> {
        let voters = self.voters(owners);
        self.resolutions
            .iter()
            .map(|r| VoteTally::tally(r, self.ballots.get(&r.id), &voters, total_weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::types::Article;

    fn owners() -> Vec<Owner> {
        let mut common = Owner::new("Parties communes", 0);
        common.is_common = true;
        vec![
            Owner::new("Martin", 100),
            Owner::new("Durand", 200),
            Owner::new("Bernard", 700),
            common,
        ]
    }

    #[test]
    fn test_voters_default_absent_and_skip_common() {
        let owners = owners();
        let voters = VoteSession::default().voters(&owners);

        assert_eq!(voters.len(), 3);
        assert!(voters.iter().all(|v| v.presence == Presence::Absent));
        assert!(voters.iter().all(|v| !v.voter_of_record));
    }

    #[test]
    fn test_proxy_lapses_when_holder_becomes_common() {
        let mut owners = owners();
        let (a, b) = (owners[0].id, owners[1].id);
        let session = VoteSession::default()
            .set_presence(&owners, b, Presence::Present, None)
            .and_then(|s| s.set_presence(&owners, a, Presence::Proxy, Some(b)))
            .unwrap();
        assert!(session.voters(&owners)[0].voter_of_record);

        owners[1].is_common = true;

        let voters = session.voters(&owners);
        assert_eq!(voters.len(), 2);
        assert!(!voters[0].voter_of_record);
        let resolution = Resolution::new("Ravalement", Article::Art24);
        let session = session.add_resolution(resolution.clone());
        assert_eq!(
            session.record_ballot(&owners, resolution.id, a, BallotChoice::For),
            Err(VoteError::NotVoterOfRecord(a))
        );
    }

    #[test]
    fn test_set_presence_proxy_rules() {
        let owners = owners();
        let (a, b, c) = (owners[0].id, owners[1].id, owners[2].id);
        let session = VoteSession::default();

        assert_eq!(
            session.set_presence(&owners, a, Presence::Proxy, Some(a)),
            Err(VoteError::SelfProxy(a))
        );
        assert_eq!(
            session.set_presence(&owners, a, Presence::Proxy, Some(b)),
            Err(VoteError::ProxyHolderNotPresent(b))
        );
        assert_eq!(
            session.set_presence(&owners, owners[3].id, Presence::Present, None),
            Err(VoteError::UnknownVoter(owners[3].id))
        );

        let session = session
            .set_presence(&owners, b, Presence::Present, None)
            .unwrap()
            .set_presence(&owners, a, Presence::Proxy, Some(b))
            .unwrap()
            .set_presence(&owners, c, Presence::Correspondence, Some(b))
            .unwrap();

        assert_eq!(session.attendance[&a].proxy_holder, Some(b));
        assert_eq!(session.attendance[&c].proxy_holder, None);
        assert!(session.voters(&owners).iter().all(|v| v.voter_of_record));
    }

    #[test]
    fn test_record_ballot_rejections() {
        let owners = owners();
        let (a, b) = (owners[0].id, owners[1].id);
        let resolution = Resolution::new("Budget", Article::Art24);
        let rid = resolution.id;
        let session = VoteSession::default()
            .add_resolution(resolution)
            .set_presence(&owners, a, Presence::Proxy, None)
            .unwrap();

        assert_eq!(
            session.record_ballot(&owners, rid, a, BallotChoice::For),
            Err(VoteError::NotVoterOfRecord(a))
        );
        assert!(matches!(
            session.record_ballot(&owners, ResolutionId::new(), b, BallotChoice::For),
            Err(VoteError::UnknownResolution(_))
        ));
    }

    #[test]
    fn test_full_session_tally() {
        let owners = owners();
        let (a, b, c) = (owners[0].id, owners[1].id, owners[2].id);
        let r24 = Resolution::new("Approbation des comptes", Article::Art24);
        let r25 = Resolution::new("Élection du syndic", Article::Art25);
        let (id24, id25) = (r24.id, r25.id);

        let session = VoteSession::default()
            .add_resolution(r24)
            .add_resolution(r25)
            .set_presence(&owners, a, Presence::Present, None)
            .unwrap()
            .set_presence(&owners, b, Presence::Proxy, Some(a))
            .unwrap()
            .record_ballot(&owners, id24, a, BallotChoice::For)
            .unwrap()
            .record_ballot(&owners, id24, b, BallotChoice::Against)
            .unwrap()
            .record_ballot(&owners, id25, a, BallotChoice::For)
            .unwrap()
            .record_ballot(&owners, id25, b, BallotChoice::For)
            .unwrap();

        let tallies = session.tally_all(&owners, 1000);
        assert_eq!(tallies.len(), 2);
        // 100 for, 200 against.
        assert!(!tallies[0].adopted);
        assert_eq!(tallies[0].base, 300);
        // 300 of 1000 is short of the absolute majority.
        assert_eq!(tallies[1].votes_for, 300);
        assert!(!tallies[1].adopted);

        let summary = session.attendance_summary(&owners);
        assert_eq!(summary.present.weight, 100);
        assert_eq!(summary.proxy.count, 1);
        assert_eq!(summary.absent.weight, 700);
        assert_eq!(summary.represented.weight, 300);

        // Holder leaves: the proxy no longer counts.
        let session = session
            .set_presence(&owners, a, Presence::Absent, None)
            .unwrap()
            .set_presence(&owners, c, Presence::Present, None)
            .unwrap();
        let tallies = session.tally_all(&owners, 1000);
        assert!(!tallies[0].has_votes);
    }

    #[test]
    fn test_resets_are_idempotent() {
        let owners = owners();
        let a = owners[0].id;
        let resolution = Resolution::new("Travaux", Article::Art26);
        let rid = resolution.id;
        let session = VoteSession::default()
            .add_resolution(resolution)
            .set_presence(&owners, a, Presence::Present, None)
            .unwrap()
            .record_ballot(&owners, rid, a, BallotChoice::Abstain)
            .unwrap();

        let once = session.reset_resolution(rid).unwrap();
        let twice = once.reset_resolution(rid).unwrap();
        assert!(once.ballots.is_empty());
        assert_eq!(once, twice);
        assert_eq!(session.reset_all(), session.reset_all().reset_all());
        assert!(matches!(
            session.reset_resolution(ResolutionId::new()),
            Err(VoteError::UnknownResolution(_))
        ));
    }

    #[test]
    fn test_clear_ballot_and_without_owner() {
        let owners = owners();
        let (a, b) = (owners[0].id, owners[1].id);
        let resolution = Resolution::new("Budget", Article::Art24);
        let rid = resolution.id;
        let session = VoteSession::default()
            .add_resolution(resolution)
            .set_presence(&owners, a, Presence::Present, None)
            .unwrap()
            .set_presence(&owners, b, Presence::Proxy, Some(a))
            .unwrap()
            .record_ballot(&owners, rid, a, BallotChoice::For)
            .unwrap()
            .record_ballot(&owners, rid, b, BallotChoice::For)
            .unwrap();

        let cleared = session.clear_ballot(rid, b).unwrap();
        assert_eq!(cleared.ballots[&rid].len(), 1);
        assert_eq!(cleared.clear_ballot(rid, b).unwrap(), cleared);

        let removed = session.without_owner(a);
        assert!(!removed.attendance.contains_key(&a));
        assert_eq!(removed.attendance[&b].proxy_holder, None);
        assert_eq!(removed.ballots[&rid].len(), 1);
    }
}
