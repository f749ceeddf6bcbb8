//! Console output formatter for voting results

use crate::output::formatter::{OutputFormatter, label_of};
use colored::Colorize;
use concord_domain::{
    Ballot, BallotOption, ConsensusEntry, OutputFormat, Suggestion, SuggestionMode, UserVote,
};
use serde_json::{Value, json};

/// Formats engine results for console display, as text or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    format: OutputFormat,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn to_json(value: Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn polarity_mark(polarity: bool) -> String {
        if polarity {
            "yes".green().bold().to_string()
        } else {
            "no".red().bold().to_string()
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_suggestions(
        &self,
        mode: SuggestionMode,
        suggestions: &[Suggestion],
        options: &[BallotOption],
    ) -> String {
        if self.is_json() {
            let items: Vec<Value> = suggestions
                .iter()
                .map(|s| json!({ "id": s.id, "label": label_of(options, s.id), "score": s.score }))
                .collect();
            return Self::to_json(json!({ "mode": mode, "suggestions": items }));
        }

        let mut output = Self::section_header(&format!("Suggestions ({})", mode));
        if suggestions.is_empty() {
            output.push_str(&format!("  {}\n", "Nothing left to suggest".dimmed()));
            return output;
        }
        let width = suggestions
            .iter()
            .map(|s| label_of(options, s.id).chars().count())
            .max()
            .unwrap_or(0);
        for (rank, suggestion) in suggestions.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {:<width$}  {}\n",
                rank + 1,
                label_of(options, suggestion.id),
                format!("{:.3}", suggestion.score).yellow(),
                width = width
            ));
        }
        output
    }

    fn format_consensus(&self, entries: &[ConsensusEntry], options: &[BallotOption]) -> String {
        if self.is_json() {
            let items: Vec<Value> = entries
                .iter()
                .map(|e| {
                    json!({ "id": e.id, "label": label_of(options, e.id), "approvals": e.approvals })
                })
                .collect();
            return Self::to_json(json!({ "consensus": items }));
        }

        let mut output = Self::section_header("Consensus");
        if entries.is_empty() {
            output.push_str(&format!("  {}\n", "No option approved by everyone yet".dimmed()));
            return output;
        }
        for entry in entries {
            output.push_str(&format!(
                "  {} {} {}\n",
                "*".green().bold(),
                label_of(options, entry.id).bold(),
                format!("({} approvals)", entry.approvals).dimmed()
            ));
        }
        output
    }

    fn format_ballots(&self, ballots: &[(Ballot, Vec<BallotOption>)]) -> String {
        if self.is_json() {
            let items: Vec<Value> = ballots
                .iter()
                .map(|(ballot, options)| {
                    json!({ "id": ballot.id, "label": ballot.label, "options": options })
                })
                .collect();
            return Self::to_json(Value::Array(items));
        }

        let mut output = Self::section_header("Ballots");
        if ballots.is_empty() {
            output.push_str(&format!("  {}\n", "No ballots configured".dimmed()));
        }
        for (ballot, options) in ballots {
            output.push_str(&format!(
                "  {} {}\n",
                format!("[{}]", ballot.id).dimmed(),
                ballot.label.yellow().bold()
            ));
            for option in options {
                output.push_str(&format!(
                    "      {} {}\n",
                    format!("{:>3}", option.id).dimmed(),
                    option.label
                ));
            }
        }
        output
    }

    fn format_votes(&self, votes: &[UserVote], options: &[BallotOption]) -> String {
        if self.is_json() {
            let items: Vec<Value> = votes
                .iter()
                .map(|v| {
                    json!({
                        "id": v.id,
                        "option": v.option,
                        "label": label_of(options, v.option),
                        "polarity": v.polarity,
                    })
                })
                .collect();
            return Self::to_json(Value::Array(items));
        }

        let mut output = Self::section_header("Votes");
        if votes.is_empty() {
            output.push_str(&format!("  {}\n", "No votes yet".dimmed()));
        }
        for vote in votes {
            output.push_str(&format!(
                "  {} {:<4} {}\n",
                format!("#{:<3}", vote.id).dimmed(),
                Self::polarity_mark(vote.polarity),
                label_of(options, vote.option)
            ));
        }
        output
    }
}
