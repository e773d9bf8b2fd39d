use log::{debug, info, warn};

use poll_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::poll::config_reader::*;

pub mod config_reader;

#[derive(Debug, Snafu)]
pub enum PollError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid poll: {source}"))]
    InvalidPoll { source: TallyError },
    #[snafu(display("Invalid vote #{index}: {source}"))]
    InvalidVote { source: TallyError, index: usize },
    #[snafu(display("Tally failed: {source}"))]
    Tally { source: TallyError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PollResult<T> = Result<T, PollError>;

fn to_tally_inputs(doc: &PollDocument) -> PollResult<(ProposalSet, Vec<Ballot>)> {
    let proposals = build_proposal_set(doc.proposals.as_slice()).context(InvalidPollSnafu {})?;
    let mut ballots: Vec<Ballot> = Vec::with_capacity(doc.votes.len());
    for (idx, vote) in doc.votes.iter().enumerate() {
        match build_ballot(&proposals, vote.proposals.as_slice()) {
            Ok(b) => ballots.push(b),
            Err(e) => {
                warn!("Rejecting vote #{} from user {:?}: {}", idx + 1, vote.user, e);
                return Err(e).context(InvalidVoteSnafu { index: idx + 1 });
            }
        }
    }
    debug!("to_tally_inputs: {:?} ballots", ballots.len());
    Ok((proposals, ballots))
}

fn build_summary_js(
    doc: &PollDocument,
    poll_type: &str,
    scores: &ScoreMap,
    matrix: &PairwiseMatrix,
) -> JSValue {
    let c = OutputConfig {
        name: doc.name.clone(),
        poll_type: poll_type.to_string(),
        status: doc.status,
        ballots: matrix.num_ballots() as usize,
    };
    let results: Vec<JSValue> = scores
        .ranking()
        .into_iter()
        .map(|(proposal, score)| json!({"proposal": proposal, "score": score}))
        .collect();
    let pairwise: Vec<JSValue> = matrix
        .pairs()
        .into_iter()
        .map(|p| json!({"a": p.a, "b": p.b, "preferA": p.prefer_a, "preferB": p.prefer_b}))
        .collect();
    json!({
        "config": c,
        "results": results,
        "winners": scores.winners(),
        "pairwise": pairwise,
    })
}

/// Computes the summary of a poll document.
///
/// `poll_type` overrides the type of the document, which itself defaults to
/// the pairwise count.
pub fn tabulate(doc: &PollDocument, poll_type: Option<&str>) -> PollResult<JSValue> {
    let poll_type: &str = poll_type
        .or(doc.poll_type.as_deref())
        .unwrap_or(CONDORCET);
    info!("tabulate: poll {:?}, type {:?}", doc.name, poll_type);
    match doc.status {
        Some(PollStatus::Active) => {
            warn!("The poll is still active: the results are provisional");
        }
        Some(PollStatus::InPreparation) => {
            warn!("The poll has not been opened to votes yet");
        }
        _ => {}
    }

    let (proposals, ballots) = to_tally_inputs(doc)?;
    let registry = CalculatorRegistry::default();
    let scores = registry
        .tally(poll_type, &proposals, &ballots)
        .context(TallySnafu {})?;
    let matrix = PairwiseMatrix::compute(&proposals, &ballots).context(TallySnafu {})?;

    for (rank, (name, score)) in scores.ranking().iter().enumerate() {
        info!("{:>3} {:>4} {}", rank + 1, score, name);
    }

    Ok(build_summary_js(doc, poll_type, &scores, &matrix))
}

pub fn run_poll(
    input_path: &str,
    poll_type: Option<&str>,
    out_path: Option<&str>,
    check_summary_path: Option<&str>,
) -> PollResult<()> {
    let doc = read_poll(input_path)?;
    let result_js = tabulate(&doc, poll_type)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    match out_path {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
fn test_wrapper(test_name: &str) {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = format!("{}/tests/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let res = run_poll(
        format!("{}/{}_poll.json", test_dir, test_name).as_str(),
        None,
        None,
        Some(format!("{}/{}_expected_summary.json", test_dir, test_name).as_str()),
    );
    if let Err(e) = res {
        panic!("test {} failed: {}", test_name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(proposals: &[&str], votes: &[&[&str]]) -> PollDocument {
        PollDocument {
            name: Some("test".to_string()),
            description: None,
            status: Some(PollStatus::Finished),
            poll_type: None,
            proposals: proposals.iter().map(|s| s.to_string()).collect(),
            votes: votes
                .iter()
                .map(|v| PollVote {
                    user: None,
                    proposals: v.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn condorcet_basic() {
        test_wrapper("condorcet_basic");
    }

    #[test]
    fn no_votes() {
        test_wrapper("no_votes");
    }

    #[test]
    fn partial_ballots() {
        test_wrapper("partial_ballots");
    }

    #[test]
    fn summary_layout() {
        let js = tabulate(&doc(&["A", "B"], &[&["B", "A"]]), None).unwrap();
        assert_eq!(js["config"]["type"], json!("condorcet"));
        assert_eq!(js["config"]["ballots"], json!(1));
        assert_eq!(
            js["results"],
            json!([{"proposal": "B", "score": 1}, {"proposal": "A", "score": 0}])
        );
        assert_eq!(js["winners"], json!(["B"]));
        assert_eq!(
            js["pairwise"],
            json!([{"a": "A", "b": "B", "preferA": 0, "preferB": 1}])
        );
    }

    #[test]
    fn unknown_proposal_in_vote() {
        let res = tabulate(&doc(&["A", "B"], &[&["A", "B"], &["C"]]), None);
        assert!(matches!(res, Err(PollError::InvalidVote { index: 2, .. })));
    }

    #[test]
    fn duplicated_proposal() {
        let res = tabulate(&doc(&["A", "B", "A"], &[]), None);
        assert!(matches!(res, Err(PollError::InvalidPoll { .. })));
    }

    #[test]
    fn empty_poll() {
        let res = tabulate(&doc(&[], &[]), None);
        assert!(matches!(
            res,
            Err(PollError::Tally {
                source: TallyError::InvalidInput { .. }
            })
        ));
    }

    #[test]
    fn unsupported_poll_type() {
        let mut d = doc(&["A", "B"], &[]);
        d.poll_type = Some("borda".to_string());
        let res = tabulate(&d, None);
        assert!(matches!(
            res,
            Err(PollError::Tally {
                source: TallyError::UnsupportedPollType { .. }
            })
        ));
        // The command line option takes precedence.
        assert!(tabulate(&d, Some("condorcet")).is_ok());
    }

    #[test]
    fn reference_mismatch() {
        let test_dir = format!("{}/tests/no_votes", env!("CARGO_MANIFEST_DIR"));
        let res = run_poll(
            format!("{}/no_votes_poll.json", test_dir).as_str(),
            None,
            None,
            Some(format!("{}/../condorcet_basic/condorcet_basic_expected_summary.json", test_dir).as_str()),
        );
        assert!(matches!(res, Err(PollError::Whatever { .. })));
    }

    #[test]
    fn missing_input() {
        let res = run_poll("/nonexistent/poll.json", None, None, None);
        assert!(matches!(res, Err(PollError::OpeningJson { .. })));
    }
}
