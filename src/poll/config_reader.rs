use crate::poll::*;

use serde::{Deserialize, Serialize};

/// The lifecycle of a poll, as recorded by the application that collected the votes.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PollStatus {
    InPreparation,
    Active,
    Finished,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollVote {
    /// The voter, for reference only. It plays no role in the tally.
    pub user: Option<String>,
    /// The proposals, from the most preferred to the least preferred.
    pub proposals: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<PollStatus>,
    #[serde(rename = "type")]
    pub poll_type: Option<String>,
    pub proposals: Vec<String>,
    #[serde(default)]
    pub votes: Vec<PollVote>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub poll_type: String,
    pub status: Option<PollStatus>,
    pub ballots: usize,
}

pub fn read_poll(path: &str) -> PollResult<PollDocument> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let doc: PollDocument = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_poll: {:?}", doc);
    Ok(doc)
}

pub fn read_summary(path: &str) -> PollResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_document() {
        let doc: PollDocument = serde_json::from_str(r#"{"proposals": ["A", "B"]}"#).unwrap();
        assert_eq!(doc.proposals, vec!["A".to_string(), "B".to_string()]);
        assert!(doc.votes.is_empty());
        assert_eq!(doc.poll_type, None);
        assert_eq!(doc.status, None);
    }

    #[test]
    fn parse_full_document() {
        let doc: PollDocument = serde_json::from_str(
            r#"{
                "name": "Lunch",
                "description": "Where do we eat?",
                "status": "finished",
                "type": "condorcet",
                "proposals": ["Pizza", "Sushi"],
                "votes": [
                    {"user": "XWiki.Alice", "proposals": ["Sushi", "Pizza"]},
                    {"proposals": ["Pizza"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.status, Some(PollStatus::Finished));
        assert_eq!(doc.poll_type.as_deref(), Some("condorcet"));
        assert_eq!(doc.votes.len(), 2);
        assert_eq!(doc.votes[0].user.as_deref(), Some("XWiki.Alice"));
        assert_eq!(doc.votes[1].user, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let res: Result<PollDocument, _> =
            serde_json::from_str(r#"{"status": "closed", "proposals": []}"#);
        assert!(res.is_err());
    }
}
