/*!

Pairwise tally engine for ranked-choice polls.

Each voter ranks some or all of the proposals of a poll. For every pair of
proposals, the engine counts the ballots ranking one above the other, and
a proposal scores one point for every other proposal it beats **or ties**.
With `n` proposals, scores range from `0` to `n - 1`.

Two rules make this count different from a textbook Copeland method:

- **A tie gives a full point to both sides.** This includes the pairs that
  no ballot compares (0 against 0): a poll without ballots gives every
  proposal the score `n - 1`.
- **A partial ballot is silent about the proposals it leaves out.** An
  unranked proposal is not assumed to be ranked last.

```
use poll_tally::*;

let proposals = build_proposal_set(&["P1", "P2", "P3"])?;
let ballots = vec![
    build_ballot(&proposals, &["P1", "P3", "P2"])?,
    build_ballot(&proposals, &["P2", "P1", "P3"])?,
    build_ballot(&proposals, &["P2", "P1", "P3"])?,
    build_ballot(&proposals, &["P2", "P1", "P3"])?,
    build_ballot(&proposals, &["P3", "P1", "P2"])?,
];
let scores = run_poll_tally("condorcet", &proposals, &ballots)?;
assert_eq!(scores.get("P1"), Some(1));
assert_eq!(scores.get("P2"), Some(2));
assert_eq!(scores.get("P3"), Some(0));
# Ok::<(), TallyError>(())
```
*/

mod ballot;
pub mod builder;
mod config;
mod pairwise;
mod strategy;

use log::info;

pub use crate::ballot::{build_ballot, build_proposal_set, Ballot, ProposalSet};
pub use crate::config::*;
pub use crate::pairwise::{copeland_scores, PairwiseMatrix};
pub use crate::strategy::{
    CalculatorRegistry, CondorcetCalculator, PollResultsCalculator, CONDORCET,
};

/// Runs the tally of a poll with the calculators available by default.
///
/// Arguments:
/// * `poll_type` the tally method, for example `"condorcet"`
/// * `proposals` the proposals of the poll
/// * `ballots` the ballots cast, built against `proposals`
pub fn run_poll_tally(
    poll_type: &str,
    proposals: &ProposalSet,
    ballots: &[Ballot],
) -> TallyResult<ScoreMap> {
    info!(
        "run_poll_tally: poll type {:?}, {:?} proposals, {:?} ballots",
        poll_type,
        proposals.len(),
        ballots.len()
    );
    CalculatorRegistry::default().tally(poll_type, proposals, ballots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ballots_give_maximum_scores() {
        for n in 1..6 {
            let labels: Vec<String> = (1..=n).map(|i| format!("P{}", i)).collect();
            let ps = build_proposal_set(labels.as_slice()).unwrap();
            let scores = run_poll_tally(CONDORCET, &ps, &[]).unwrap();
            assert_eq!(scores.len(), n);
            assert!(scores.iter().all(|(_, s)| s as usize == n - 1));
        }
    }

    #[test]
    fn empty_poll_fails_whatever_the_ballots() {
        let ps = build_proposal_set::<&str>(&[]).unwrap();
        let other = build_proposal_set(&["A"]).unwrap();
        let ballots = vec![build_ballot(&other, &["A"]).unwrap()];
        assert!(matches!(
            run_poll_tally(CONDORCET, &ps, &ballots),
            Err(TallyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn borda_is_not_supported() {
        let ps = build_proposal_set(&["A", "B"]).unwrap();
        assert!(matches!(
            run_poll_tally("borda", &ps, &[]),
            Err(TallyError::UnsupportedPollType { .. })
        ));
    }

    #[test]
    fn single_proposal() {
        let ps = build_proposal_set(&["Only"]).unwrap();
        let ballots = vec![build_ballot(&ps, &["Only"]).unwrap()];
        let scores = run_poll_tally(CONDORCET, &ps, &ballots).unwrap();
        assert_eq!(scores.get("Only"), Some(0));
        assert_eq!(scores.winners(), vec!["Only".to_string()]);
    }
}
