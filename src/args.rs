use clap::Parser;

/// This is a tabulation program for ranked-choice polls, using a pairwise (Copeland-style) count.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The poll document in JSON format: its proposals and the ballots of the voters.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default condorcet) The tally method. Setting this option overrides the type
    /// that may be specified in the poll document.
    #[clap(long, value_parser)]
    pub poll_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the poll will be written in JSON format to the given
    /// location. By default, it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the outcome of a poll in JSON format. If provided, the
    /// program will check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging on the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
