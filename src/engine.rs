use crate::defs::*;
use crate::error::{Error, Result};
use itertools::Itertools;

// the derived figures for one district; borrows the district's records
// from the index and is recomputed on every selection
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult<'a> {
    pub district: &'a DistrictId,
    pub winner: &'a CandidateRecord,
    pub total_votes: u64,
    pub party_totals: PartyTotals,
    pub uncontested: bool,
    pub ranked_others: Vec<&'a CandidateRecord>,
}

/// Finds the single elected candidate in a district.
///
/// Fails with `InvariantViolation` when there are no candidates, no
/// elected candidate, or more than one; the winner is never guessed.
pub fn find_winner(candidates: &[CandidateRecord]) -> Result<(usize, &CandidateRecord)> {
    let mut elected = candidates.iter().enumerate().filter(|(_, c)| c.elected);
    match (elected.next(), elected.next()) {
        (Some(winner), None) => Ok(winner),
        (first, second) => {
            let found = first.iter().count() + second.iter().count() + elected.count();
            Err(Error::InvariantViolation {
                district: candidates
                    .first()
                    .map(|c| c.district.clone())
                    .unwrap_or_default(),
                elected: found,
            })
        }
    }
}

pub fn aggregate(candidates: &[CandidateRecord]) -> Result<AggregationResult> {
    let (winner_idx, winner) = find_winner(candidates)?;

    let overflow = || Error::VoteOverflow(winner.district.clone());
    let mut party_totals = PartyTotals::default();
    for candidate in candidates {
        party_totals
            .add(candidate.bucket(), candidate.votes)
            .ok_or_else(overflow)?;
    }
    let total_votes = party_totals.total().ok_or_else(overflow)?;

    // sorted_by is stable: equal vote counts keep their load order
    let ranked_others: Vec<&CandidateRecord> = candidates
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != winner_idx)
        .map(|(_, c)| c)
        .sorted_by(|a, b| b.votes.cmp(&a.votes))
        .collect();

    Ok(AggregationResult {
        district: &winner.district,
        winner,
        total_votes,
        party_totals,
        uncontested: winner.votes == total_votes,
        ranked_others,
    })
}
