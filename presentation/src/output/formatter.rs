//! Output formatter trait

use concord_domain::{
    Ballot, BallotOption, ConsensusEntry, OptionId, Suggestion, SuggestionMode, UserVote,
};

/// Renders engine results
///
/// Results carry option ids only; `options` supplies the labels.
pub trait OutputFormatter {
    /// Ranked suggestions for one mode
    fn format_suggestions(
        &self,
        mode: SuggestionMode,
        suggestions: &[Suggestion],
        options: &[BallotOption],
    ) -> String;

    /// Options every session in the room approved
    fn format_consensus(&self, entries: &[ConsensusEntry], options: &[BallotOption]) -> String;

    /// Ballots with their options
    fn format_ballots(&self, ballots: &[(Ballot, Vec<BallotOption>)]) -> String;

    /// One session's votes
    fn format_votes(&self, votes: &[UserVote], options: &[BallotOption]) -> String;
}

/// Label of `id` among `options`, or `#id` when it is gone
pub fn label_of(options: &[BallotOption], id: OptionId) -> String {
    options
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| format!("#{}", id))
}
