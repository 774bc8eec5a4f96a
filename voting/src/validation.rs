//! Creation-time and vote-time rules.
//!
//! Each rule set is an ordered list of (predicate, error) pairs evaluated
//! short-circuit: the first predicate that fails decides the error. The order
//! is part of the program's observable behavior.

use std::collections::BTreeSet;

use ballot_types::Timestamp;

use crate::error::VotingError;
use crate::state::{
    ProposalRecord, MAX_CANDIDATES, MAX_CANDIDATE_ID_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
    MIN_CANDIDATES,
};

type Rule<T> = (fn(&T) -> bool, VotingError);

/// Input of a proposal creation, as submitted.
#[derive(Clone, Copy, Debug)]
pub struct ProposalDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub candidate_ids: &'a [String],
    pub closes_at: Timestamp,
    pub now: Timestamp,
}

/// A ballot checked against the proposal it targets.
#[derive(Clone, Copy, Debug)]
pub struct VoteDraft<'a> {
    pub chosen: &'a [String],
    pub proposal: &'a ProposalRecord,
    pub now: Timestamp,
}

fn first_violation<T>(rules: &[Rule<T>], input: &T) -> Result<(), VotingError> {
    match rules.iter().find(|(holds, _)| !holds(input)) {
        Some((_, err)) => Err(*err),
        None => Ok(()),
    }
}

fn all_distinct(ids: &[String]) -> bool {
    let mut seen = BTreeSet::new();
    ids.iter().all(|id| seen.insert(id.as_str()))
}

pub fn validate_proposal(draft: &ProposalDraft<'_>) -> Result<(), VotingError> {
    let rules: [Rule<ProposalDraft<'_>>; 7] = [
        (
            |d| (1..=MAX_TITLE_LEN).contains(&d.title.len()),
            VotingError::TitleTooLong,
        ),
        (
            |d| (1..=MAX_DESCRIPTION_LEN).contains(&d.description.len()),
            VotingError::DescriptionTooLong,
        ),
        (
            |d| d.candidate_ids.len() <= MAX_CANDIDATES,
            VotingError::TooManyCandidates,
        ),
        (
            |d| d.candidate_ids.len() >= MIN_CANDIDATES,
            VotingError::NotEnoughCandidates,
        ),
        (
            |d| all_distinct(d.candidate_ids),
            VotingError::DuplicateCandidates,
        ),
        (
            |d| d.candidate_ids.iter().all(|id| id.len() <= MAX_CANDIDATE_ID_LEN),
            VotingError::CandidateIdTooLong,
        ),
        (|d| d.closes_at > d.now, VotingError::InvalidProposalTime),
    ];
    first_violation(&rules, draft)
}

pub fn validate_vote(draft: &VoteDraft<'_>) -> Result<(), VotingError> {
    let rules: [Rule<VoteDraft<'_>>; 5] = [
        (
            |d| d.proposal.phase(d.now).is_open(),
            VotingError::ProposalClosed,
        ),
        (|d| !d.chosen.is_empty(), VotingError::NotEnoughCandidateVotes),
        (
            |d| d.chosen.len() <= d.proposal.candidates.len(),
            VotingError::TooManyCandidateVotes,
        ),
        (|d| all_distinct(d.chosen), VotingError::DuplicateCandidates),
        (
            |d| d.chosen.iter().all(|id| d.proposal.candidate(id).is_some()),
            VotingError::InvalidCandidateId,
        ),
    ];
    first_violation(&rules, draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Candidate;
    use ballot_types::PublicKey;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn check_proposal(
        title: &str,
        description: &str,
        candidates: &[&str],
        closes_at: i64,
    ) -> Result<(), VotingError> {
        let candidate_ids = ids(candidates);
        validate_proposal(&ProposalDraft {
            title,
            description,
            candidate_ids: &candidate_ids,
            closes_at: Timestamp::new(closes_at),
            now: Timestamp::new(1_000),
        })
    }

    fn proposal(candidates: &[&str]) -> ProposalRecord {
        ProposalRecord {
            title: "t".into(),
            description: "d".into(),
            candidates: candidates.iter().map(|c| Candidate::new(*c)).collect(),
            closes_at: Timestamp::new(2_000),
            proposer: PublicKey([1u8; 32]),
            bump: 255,
        }
    }

    fn check_vote(chosen: &[&str], now: i64) -> Result<(), VotingError> {
        let p = proposal(&["John", "Barry", "Grok"]);
        let chosen = ids(chosen);
        validate_vote(&VoteDraft {
            chosen: &chosen,
            proposal: &p,
            now: Timestamp::new(now),
        })
    }

    #[test]
    fn accepts_valid_proposal() {
        assert_eq!(check_proposal("T", "D", &["A", "B"], 1_001), Ok(()));
    }

    #[test]
    fn title_bounds() {
        assert_eq!(check_proposal(&"x".repeat(100), "D", &["A", "B"], 2_000), Ok(()));
        assert_eq!(
            check_proposal(&"x".repeat(101), "D", &["A", "B"], 2_000),
            Err(VotingError::TitleTooLong)
        );
        assert_eq!(
            check_proposal("", "D", &["A", "B"], 2_000),
            Err(VotingError::TitleTooLong)
        );
    }

    #[test]
    fn lengths_are_bytes_not_chars() {
        // 34 three-byte chars = 102 bytes
        let title = "€".repeat(34);
        assert_eq!(
            check_proposal(&title, "D", &["A", "B"], 2_000),
            Err(VotingError::TitleTooLong)
        );
    }

    #[test]
    fn description_bounds() {
        assert_eq!(check_proposal("T", &"d".repeat(600), &["A", "B"], 2_000), Ok(()));
        assert_eq!(
            check_proposal("T", &"d".repeat(601), &["A", "B"], 2_000),
            Err(VotingError::DescriptionTooLong)
        );
        assert_eq!(
            check_proposal("T", "", &["A", "B"], 2_000),
            Err(VotingError::DescriptionTooLong)
        );
    }

    #[test]
    fn candidate_count_bounds() {
        let twelve: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let twelve: Vec<&str> = twelve.iter().map(String::as_str).collect();
        assert_eq!(check_proposal("T", "D", &twelve, 2_000), Ok(()));

        let thirteen: Vec<String> = (0..13).map(|i| format!("c{i}")).collect();
        let thirteen: Vec<&str> = thirteen.iter().map(String::as_str).collect();
        assert_eq!(
            check_proposal("T", "D", &thirteen, 2_000),
            Err(VotingError::TooManyCandidates)
        );
        assert_eq!(
            check_proposal("T", "D", &["A"], 2_000),
            Err(VotingError::NotEnoughCandidates)
        );
    }

    #[test]
    fn duplicate_candidates_are_case_sensitive() {
        assert_eq!(
            check_proposal("T", "D", &["A", "B", "A"], 2_000),
            Err(VotingError::DuplicateCandidates)
        );
        assert_eq!(check_proposal("T", "D", &["A", "a"], 2_000), Ok(()));
    }

    #[test]
    fn candidate_id_length() {
        let ok = "c".repeat(50);
        let long = "c".repeat(51);
        assert_eq!(check_proposal("T", "D", &[ok.as_str(), "B"], 2_000), Ok(()));
        assert_eq!(
            check_proposal("T", "D", &[long.as_str(), "B"], 2_000),
            Err(VotingError::CandidateIdTooLong)
        );
    }

    #[test]
    fn deadline_must_be_in_the_future() {
        assert_eq!(
            check_proposal("T", "D", &["A", "B"], 1_000),
            Err(VotingError::InvalidProposalTime)
        );
        assert_eq!(
            check_proposal("T", "D", &["A", "B"], 999),
            Err(VotingError::InvalidProposalTime)
        );
    }

    #[test]
    fn first_failing_proposal_rule_wins() {
        // Everything wrong at once reports the title.
        assert_eq!(
            check_proposal(&"x".repeat(101), "", &["A"], 0),
            Err(VotingError::TitleTooLong)
        );
        // Duplicates are reported before over-long ids.
        let long = "c".repeat(51);
        assert_eq!(
            check_proposal("T", "D", &[long.as_str(), long.as_str()], 2_000),
            Err(VotingError::DuplicateCandidates)
        );
        // Too many candidates beats duplicates.
        let many = ["A"; 13];
        assert_eq!(
            check_proposal("T", "D", &many, 2_000),
            Err(VotingError::TooManyCandidates)
        );
    }

    #[test]
    fn accepts_valid_votes() {
        assert_eq!(check_vote(&["John"], 1_500), Ok(()));
        assert_eq!(check_vote(&["Grok", "John", "Barry"], 1_500), Ok(()));
    }

    #[test]
    fn vote_rules() {
        assert_eq!(check_vote(&[], 1_500), Err(VotingError::NotEnoughCandidateVotes));
        assert_eq!(
            check_vote(&["John", "Barry", "Grok", "John"], 1_500),
            Err(VotingError::TooManyCandidateVotes)
        );
        assert_eq!(
            check_vote(&["John", "John"], 1_500),
            Err(VotingError::DuplicateCandidates)
        );
        assert_eq!(
            check_vote(&["NonExistentCandidate"], 1_500),
            Err(VotingError::InvalidCandidateId)
        );
        assert_eq!(check_vote(&["john"], 1_500), Err(VotingError::InvalidCandidateId));
    }

    #[test]
    fn closed_check_comes_first() {
        assert_eq!(check_vote(&["John"], 2_000), Err(VotingError::ProposalClosed));
        assert_eq!(check_vote(&[], 2_001), Err(VotingError::ProposalClosed));
    }
}
