pub use crate::config::*;

use crate::ballot::{build_ballot, build_proposal_set, Ballot, ProposalSet};
use crate::strategy::CalculatorRegistry;

/// A builder for adding ballots to a poll.
///
/// The proposals are declared first. Each ballot is validated as soon as it
/// is added, so a poll that reaches `tally` is known to be consistent.
///
/// ```
/// pub use poll_tally::builder::Builder;
/// pub use poll_tally::CalculatorRegistry;
/// # use poll_tally::TallyError;
///
/// let mut builder = Builder::new().proposals(&["Anna", "Bob", "Clara"])?;
///
/// builder.add_ballot(&["Bob", "Anna"])?;
/// builder.add_ballot(&["Clara"])?;
///
/// let scores = builder.tally(&CalculatorRegistry::default(), "condorcet")?;
/// assert_eq!(scores.get("Bob"), Some(2));
/// assert_eq!(scores.get("Anna"), Some(1));
///
/// # Ok::<(), TallyError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _proposals: Option<ProposalSet>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _proposals: None,
            _ballots: Vec::new(),
        }
    }

    /// Declares the proposals. Any ballot added before is dropped.
    pub fn proposals<S: AsRef<str>>(self, labels: &[S]) -> TallyResult<Builder> {
        Ok(Builder {
            _proposals: Some(build_proposal_set(labels)?),
            _ballots: Vec::new(),
        })
    }

    /// Adds the ranking of one voter, from the most preferred proposal to
    /// the least preferred one. Proposals may be left out.
    pub fn add_ballot<S: AsRef<str>>(&mut self, ranked: &[S]) -> TallyResult<()> {
        let proposals = self._proposals.as_ref().ok_or(TallyError::InvalidInput {
            reason: "proposals must be declared before adding ballots".to_string(),
        })?;
        let ballot = build_ballot(proposals, ranked)?;
        self._ballots.push(ballot);
        Ok(())
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self._ballots
    }

    /// Runs the calculator registered for `poll_type`.
    pub fn tally(&self, registry: &CalculatorRegistry, poll_type: &str) -> TallyResult<ScoreMap> {
        let calculator = registry.get(poll_type)?;
        let proposals = self._proposals.as_ref().ok_or(TallyError::InvalidInput {
            reason: "the poll has no proposals".to_string(),
        })?;
        calculator.compute(proposals, &self._ballots)
    }
}
