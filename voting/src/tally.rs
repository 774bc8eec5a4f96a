//! Tally arithmetic and ranking.

use crate::error::VotingError;
use crate::state::Candidate;

/// Candidates by descending vote count. Ties keep creation order.
pub fn ranked(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut out = candidates.to_vec();
    out.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
    out
}

/// The candidate strictly ahead of every other, if there is one.
///
/// A tie for first place, including an all-zero tally, has no leader.
pub fn leader(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    let mut runner_up = 0u64;
    for c in candidates {
        match best {
            Some(b) if c.vote_count <= b.vote_count => {
                runner_up = runner_up.max(c.vote_count);
            }
            _ => {
                if let Some(b) = best {
                    runner_up = runner_up.max(b.vote_count);
                }
                best = Some(c);
            }
        }
    }
    best.filter(|b| b.vote_count > runner_up)
}

/// Count one admitted ballot: every chosen candidate gains exactly one vote.
///
/// Either all chosen counts are incremented or, on overflow, none are.
pub fn apply_vote(candidates: &mut [Candidate], chosen: &[String]) -> Result<(), VotingError> {
    let mut next = Vec::with_capacity(chosen.len());
    for (i, c) in candidates.iter().enumerate() {
        if chosen.iter().any(|id| *id == c.id) {
            let bumped = c
                .vote_count
                .checked_add(1)
                .ok_or(VotingError::TallyOverflow)?;
            next.push((i, bumped));
        }
    }
    for (i, count) in next {
        candidates[i].vote_count = count;
    }
    Ok(())
}

/// Total ballots-worth of choices recorded across all candidates.
pub fn total_choices(candidates: &[Candidate]) -> u64 {
    candidates
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.vote_count))
}
