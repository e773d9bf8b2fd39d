use log::debug;
use snafu::OptionExt;

use std::collections::BTreeMap;

use crate::ballot::{Ballot, ProposalSet};
use crate::config::*;
use crate::pairwise::copeland_scores;

/// The key of the pairwise (Copeland-style) calculator.
pub const CONDORCET: &str = "condorcet";

/// A method that turns the ballots of a poll into one score per proposal.
///
/// Implementations are pure: the same inputs always give the same scores.
pub trait PollResultsCalculator: Send + Sync {
    fn compute(&self, proposals: &ProposalSet, ballots: &[Ballot]) -> TallyResult<ScoreMap>;
}

/// Counts, for each proposal, the other proposals it beats or ties head-to-head.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct CondorcetCalculator;

impl PollResultsCalculator for CondorcetCalculator {
    fn compute(&self, proposals: &ProposalSet, ballots: &[Ballot]) -> TallyResult<ScoreMap> {
        copeland_scores(proposals, ballots)
    }
}

/// The calculators available, by poll type.
///
/// ```
/// use poll_tally::*;
///
/// let registry = CalculatorRegistry::default();
/// assert!(registry.get("condorcet").is_ok());
/// assert!(registry.get("borda").is_err());
/// ```
pub struct CalculatorRegistry {
    calculators: BTreeMap<String, Box<dyn PollResultsCalculator>>,
}

impl CalculatorRegistry {
    /// A registry without any calculator.
    pub fn empty() -> CalculatorRegistry {
        CalculatorRegistry {
            calculators: BTreeMap::new(),
        }
    }

    /// Registers a calculator, replacing any previous one with the same key.
    pub fn register<C>(&mut self, poll_type: &str, calculator: C)
    where
        C: PollResultsCalculator + 'static,
    {
        debug!("register: poll type {:?}", poll_type);
        self.calculators
            .insert(poll_type.to_string(), Box::new(calculator));
    }

    pub fn get(&self, poll_type: &str) -> TallyResult<&dyn PollResultsCalculator> {
        self.calculators
            .get(poll_type)
            .map(|c| c.as_ref())
            .context(UnsupportedPollTypeSnafu { poll_type })
    }

    /// The registered poll types, in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        self.calculators.keys().map(|k| k.as_str()).collect()
    }

    /// Looks up the calculator of a poll type and runs it.
    pub fn tally(
        &self,
        poll_type: &str,
        proposals: &ProposalSet,
        ballots: &[Ballot],
    ) -> TallyResult<ScoreMap> {
        self.get(poll_type)?.compute(proposals, ballots)
    }
}

impl Default for CalculatorRegistry {
    fn default() -> CalculatorRegistry {
        let mut res = CalculatorRegistry::empty();
        res.register(CONDORCET, CondorcetCalculator);
        res
    }
}
