use log::{debug, info};
use snafu::{ensure, OptionExt};

use std::{
    collections::HashSet,
    ops::{Add, AddAssign},
};

use crate::ballot::{Ballot, ProposalId, ProposalSet};
use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct VoteCount(u64);

impl VoteCount {
    const EMPTY: VoteCount = VoteCount(0);
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

impl Add for VoteCount {
    type Output = VoteCount;
    fn add(self: VoteCount, rhs: VoteCount) -> VoteCount {
        VoteCount(self.0 + rhs.0)
    }
}

/// Head-to-head counts for every pair of proposals of a poll.
///
/// Only ballots ranking both proposals of a pair count for that pair. A
/// ballot that ranks one of them and leaves the other out says nothing
/// about the pair.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairwiseMatrix {
    proposals: ProposalSet,
    // prefers[a * n + b]: the number of ballots ranking a above b
    prefers: Vec<VoteCount>,
    num_ballots: u64,
}

impl PairwiseMatrix {
    /// Counts all the pairwise preferences of the ballots.
    ///
    /// The ballots are checked again against the proposal set: a ballot
    /// built for another poll is an error, not a silent miscount.
    pub fn compute(proposals: &ProposalSet, ballots: &[Ballot]) -> TallyResult<PairwiseMatrix> {
        ensure!(
            !proposals.is_empty(),
            InvalidInputSnafu {
                reason: "the poll has no proposals",
            }
        );
        let n = proposals.len();
        let mut prefers: Vec<VoteCount> = vec![VoteCount::EMPTY; n * n];
        for (bidx, ballot) in ballots.iter().enumerate() {
            let ranks = resolve(proposals, ballot, bidx)?;
            for (i, ProposalId(hi)) in ranks.iter().enumerate() {
                for ProposalId(lo) in ranks[i + 1..].iter() {
                    prefers[hi * n + lo] += VoteCount(1);
                }
            }
        }
        let res = PairwiseMatrix {
            proposals: proposals.clone(),
            prefers,
            num_ballots: ballots.len() as u64,
        };
        debug!("PairwiseMatrix::compute: pairs: {:?}", res.pairs());
        Ok(res)
    }

    pub fn num_ballots(&self) -> u64 {
        self.num_ballots
    }

    pub fn proposals(&self) -> &ProposalSet {
        &self.proposals
    }

    /// The number of ballots preferring `a` over `b`, and `b` over `a`.
    pub fn counts(&self, a: &str, b: &str) -> Option<(u64, u64)> {
        let ida = self.proposals.position(a)?;
        let idb = self.proposals.position(b)?;
        if ida == idb {
            return None;
        }
        Some((self.prefers(ida, idb).0, self.prefers(idb, ida).0))
    }

    /// The outcome of `a` against `b`.
    pub fn outcome(&self, a: &str, b: &str) -> Option<PairwiseOutcome> {
        self.counts(a, b).map(|(pa, pb)| match pa.cmp(&pb) {
            std::cmp::Ordering::Greater => PairwiseOutcome::Win,
            std::cmp::Ordering::Less => PairwiseOutcome::Loss,
            std::cmp::Ordering::Equal => PairwiseOutcome::Tie,
        })
    }

    /// All the unordered pairs, following the declaration order.
    pub fn pairs(&self) -> Vec<PairCount> {
        let labels = self.proposals.labels();
        let n = labels.len();
        let mut res: Vec<PairCount> = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                res.push(PairCount {
                    a: labels[a].clone(),
                    b: labels[b].clone(),
                    prefer_a: self.prefers(ProposalId(a), ProposalId(b)).0,
                    prefer_b: self.prefers(ProposalId(b), ProposalId(a)).0,
                });
            }
        }
        res
    }

    /// The number of pairs that have a strict winner.
    pub fn strict_defeats(&self) -> u64 {
        self.pairs()
            .iter()
            .filter(|p| p.prefer_a != p.prefer_b)
            .count() as u64
    }

    /// Copeland-style scores: one point for each other proposal that this
    /// proposal beats or ties.
    ///
    /// Ties credit both sides with a full point. This includes pairs that no
    /// ballot compares (0 against 0), so a poll without any ballot gives
    /// every proposal the maximum score.
    pub fn scores(&self) -> ScoreMap {
        let labels = self.proposals.labels();
        let n = labels.len();
        let mut scores: Vec<(String, u32)> = Vec::with_capacity(n);
        for a in 0..n {
            let mut score: u32 = 0;
            for b in 0..n {
                if a == b {
                    continue;
                }
                let pa = self.prefers(ProposalId(a), ProposalId(b));
                let pb = self.prefers(ProposalId(b), ProposalId(a));
                debug_assert!((pa + pb).0 <= self.num_ballots);
                if pa >= pb {
                    score += 1;
                }
            }
            scores.push((labels[a].clone(), score));
        }
        ScoreMap::new(scores)
    }

    fn prefers(&self, a: ProposalId, b: ProposalId) -> VoteCount {
        self.prefers[a.0 * self.proposals.len() + b.0]
    }
}

// The proposals of a ballot, from the most preferred to the least preferred.
fn resolve(proposals: &ProposalSet, ballot: &Ballot, bidx: usize) -> TallyResult<Vec<ProposalId>> {
    let mut seen: HashSet<ProposalId> = HashSet::new();
    let mut res: Vec<ProposalId> = Vec::with_capacity(ballot.len());
    for label in ballot.choices() {
        let pid = proposals.position(label).context(InvalidInputSnafu {
            reason: format!(
                "ballot #{} references proposal {:?} outside of the poll",
                bidx + 1,
                label
            ),
        })?;
        ensure!(
            seen.insert(pid),
            InvalidInputSnafu {
                reason: format!("ballot #{} ranks {:?} more than once", bidx + 1, label),
            }
        );
        res.push(pid);
    }
    Ok(res)
}

/// Runs the pairwise count and returns the Copeland-style score of every
/// proposal.
pub fn copeland_scores(proposals: &ProposalSet, ballots: &[Ballot]) -> TallyResult<ScoreMap> {
    info!(
        "copeland_scores: {:?} proposals, {:?} ballots",
        proposals.len(),
        ballots.len()
    );
    let matrix = PairwiseMatrix::compute(proposals, ballots)?;
    let scores = matrix.scores();
    info!("copeland_scores: scores: {:?}", scores);
    Ok(scores)
}
