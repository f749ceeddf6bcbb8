//! Parsing of REPL input lines

use concord_domain::{ModePreference, OptionId, SuggestionMode, VoteId};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Answer the pending suggestion
    Answer(bool),
    /// Skip the pending suggestion for this round
    Skip,
    /// Change how the next option is picked
    Mode(ModePreference),
    /// List ranked suggestions without voting
    List(SuggestionMode),
    Consensus,
    Votes,
    /// Delete one of the active session's votes
    Undo(VoteId),
    Options,
    Add(String),
    Remove(OptionId),
    /// Add a participant to the room and switch to them
    Join,
    /// Switch to the n-th participant (1-based)
    Switch(usize),
    Sessions,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "y" | "yes" => Self::Answer(true),
            "n" | "no" => Self::Answer(false),
            "s" | "skip" => Self::Skip,
            "/mode" => Self::Mode(rest.parse()?),
            "/suggest" => Self::List(SuggestionMode::Suggest),
            "/explore" => Self::List(SuggestionMode::Explore),
            "/consensus" | "/c" => Self::Consensus,
            "/votes" => Self::Votes,
            "/undo" => Self::Undo(Self::argument(rest)?),
            "/options" | "/o" => Self::Options,
            "/add" if !rest.is_empty() => Self::Add(rest.to_string()),
            "/add" => return Err("Usage: /add <label>".to_string()),
            "/remove" => Self::Remove(Self::argument(rest)?),
            "/join" => Self::Join,
            "/switch" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| "Usage: /switch <participant number>".to_string())?;
                Self::Switch(n)
            }
            "/sessions" | "/who" => Self::Sessions,
            "/help" | "/h" | "/?" => Self::Help,
            "/quit" | "/exit" | "/q" => Self::Quit,
            _ => {
                return Err(format!(
                    "Unknown input: {}\nAnswer y/n, or type /help for available commands",
                    line
                ));
            }
        };
        Ok(command)
    }

    fn argument<T: std::str::FromStr<Err = concord_domain::DomainError>>(
        rest: &str,
    ) -> Result<T, String> {
        if rest.is_empty() {
            return Err("Missing id argument".to_string());
        }
        rest.parse().map_err(|e: concord_domain::DomainError| e.to_string())
    }
}
