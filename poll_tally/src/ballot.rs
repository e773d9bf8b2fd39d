use log::debug;
use snafu::ensure;

use std::collections::{HashMap, HashSet};

use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub(crate) struct ProposalId(pub(crate) usize);

/// The proposals of a poll, in the order they were declared.
///
/// The order only matters for presenting results. It carries no preference.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ProposalSet {
    labels: Vec<String>,
    index: HashMap<String, ProposalId>,
}

impl ProposalSet {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub(crate) fn position(&self, label: &str) -> Option<ProposalId> {
        self.index.get(label).cloned()
    }
}

/// One voter's ranking, from most to least preferred.
///
/// A ballot may leave out some proposals. It never contains the same
/// proposal twice.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    choices: Vec<String>,
}

impl Ballot {
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// The 0-based rank of a proposal, if the voter ranked it.
    pub fn rank_of(&self, label: &str) -> Option<usize> {
        self.choices.iter().position(|c| c == label)
    }
}

/// Builds the proposal set of a poll.
///
/// Fails if a label is empty or declared twice. An empty list is accepted
/// here but no calculator will tally it.
pub fn build_proposal_set<S: AsRef<str>>(labels: &[S]) -> TallyResult<ProposalSet> {
    let mut ordered: Vec<String> = Vec::with_capacity(labels.len());
    let mut index: HashMap<String, ProposalId> = HashMap::new();
    for (idx, l) in labels.iter().enumerate() {
        let label = l.as_ref();
        ensure!(
            !label.is_empty(),
            InvalidInputSnafu {
                reason: format!("proposal #{} has an empty label", idx + 1),
            }
        );
        ensure!(
            !index.contains_key(label),
            InvalidInputSnafu {
                reason: format!("proposal {:?} is declared more than once", label),
            }
        );
        index.insert(label.to_string(), ProposalId(idx));
        ordered.push(label.to_string());
    }
    debug!("build_proposal_set: {:?}", ordered);
    Ok(ProposalSet {
        labels: ordered,
        index,
    })
}

/// Builds one ballot against a proposal set.
///
/// Partial rankings are accepted. Unknown or repeated labels are rejected.
pub fn build_ballot<S: AsRef<str>>(
    proposals: &ProposalSet,
    ranked_labels: &[S],
) -> TallyResult<Ballot> {
    let mut seen: HashSet<&str> = HashSet::new();
    for l in ranked_labels.iter() {
        let label = l.as_ref();
        ensure!(
            proposals.contains(label),
            InvalidInputSnafu {
                reason: format!("ballot references unknown proposal {:?}", label),
            }
        );
        ensure!(
            seen.insert(label),
            InvalidInputSnafu {
                reason: format!("ballot ranks proposal {:?} more than once", label),
            }
        );
    }
    Ok(Ballot {
        choices: ranked_labels.iter().map(|l| l.as_ref().to_string()).collect(),
    })
}
