// ********* Errors ***********

use snafu::Snafu;

/// Errors that prevent a tally from producing any score.
///
/// Validation errors are raised before any counting happens: a poll is
/// either fully valid or it produces no result at all.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    /// Malformed or inconsistent proposal/ballot data: empty proposal set,
    /// empty or duplicated labels, references outside the proposal set.
    #[snafu(display("Invalid poll input: {reason}"))]
    InvalidInput { reason: String },
    /// No calculator is registered under the requested poll type.
    #[snafu(display("Unsupported poll type {poll_type:?}"))]
    UnsupportedPollType { poll_type: String },
}

pub type TallyResult<T> = Result<T, TallyError>;

// ******** Output data structures *********

/// The result of one head-to-head comparison, seen from the first proposal.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PairwiseOutcome {
    Win,
    Loss,
    /// Equal counts, including the 0-0 case. Both sides get credit for it.
    Tie,
}

/// The raw counts for one unordered pair of proposals.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairCount {
    pub a: String,
    pub b: String,
    /// Ballots ranking `a` above `b`.
    pub prefer_a: u64,
    /// Ballots ranking `b` above `a`.
    pub prefer_b: u64,
}

/// The score of every proposal of a poll, in declaration order.
///
/// Scores range from 0 to (number of proposals - 1).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreMap {
    scores: Vec<(String, u32)>,
}

impl ScoreMap {
    pub(crate) fn new(scores: Vec<(String, u32)>) -> ScoreMap {
        ScoreMap { scores }
    }

    pub fn get(&self, proposal: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(name, _)| name == proposal)
            .map(|(_, score)| *score)
    }

    /// Iterates over the scores in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn max_score(&self) -> Option<u32> {
        self.scores.iter().map(|(_, score)| *score).max()
    }

    /// The proposals from the best score to the worst.
    /// Proposals with the same score keep their declaration order.
    pub fn ranking(&self) -> Vec<(String, u32)> {
        let mut res = self.scores.clone();
        // sort_by_key is stable
        res.sort_by_key(|(_, score)| std::cmp::Reverse(*score));
        res
    }

    /// All the proposals sharing the highest score.
    pub fn winners(&self) -> Vec<String> {
        match self.max_score() {
            Some(top) => self
                .scores
                .iter()
                .filter(|(_, score)| *score == top)
                .map(|(name, _)| name.clone())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> ScoreMap {
        ScoreMap::new(vec![
            ("P1".to_string(), 1),
            ("P2".to_string(), 2),
            ("P3".to_string(), 0),
            ("P4".to_string(), 2),
        ])
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let ranking: Vec<String> = scores().ranking().into_iter().map(|p| p.0).collect();
        assert_eq!(ranking, vec!["P2", "P4", "P1", "P3"]);
    }

    #[test]
    fn winners_share_top_score() {
        assert_eq!(scores().winners(), vec!["P2".to_string(), "P4".to_string()]);
        assert_eq!(scores().max_score(), Some(2));
        assert!(ScoreMap::new(vec![]).winners().is_empty());
    }

    #[test]
    fn lookup_by_label() {
        let s = scores();
        assert_eq!(s.get("P3"), Some(0));
        assert_eq!(s.get("P5"), None);
        assert_eq!(s.len(), 4);
        assert_eq!(s.iter().next(), Some(("P1", 1)));
    }

    #[test]
    fn error_messages() {
        let e = TallyError::UnsupportedPollType {
            poll_type: "borda".to_string(),
        };
        assert_eq!(e.to_string(), "Unsupported poll type \"borda\"");
    }
}
