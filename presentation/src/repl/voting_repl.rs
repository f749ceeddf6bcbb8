//! REPL (Read-Eval-Print Loop) for interactive voting

use super::command::ReplCommand;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::{OutputFormatter, label_of};
use colored::Colorize;
use concord_application::{
    CorrelationRepository, GetSuggestionsInput, VotingEngine, VotingRepository,
};
use concord_domain::{
    Ballot, BallotOption, DomainError, ModePreference, OptionId, Room, SessionId, SuggestionMode,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// What the loop does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading; print the text if non-empty
    Continue(String),
    Quit,
}

/// One participant sharing the terminal
#[derive(Debug)]
struct Participant {
    session: SessionId,
    /// Answers given so far, drives mode alternation
    round: usize,
    pending: Option<OptionId>,
    skipped: HashSet<OptionId>,
}

impl Participant {
    fn new(session: SessionId) -> Self {
        Self {
            session,
            round: 0,
            pending: None,
            skipped: HashSet::new(),
        }
    }
}

/// The room the REPL is voting in
#[derive(Debug)]
struct Table {
    ballot: Ballot,
    room: Room,
    participants: Vec<Participant>,
    active: usize,
}

impl Table {
    fn participant(&self) -> &Participant {
        &self.participants[self.active]
    }

    fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participants[self.active]
    }
}

/// Interactive voting REPL
///
/// Several participants can share one terminal: `/join` adds a session to
/// the room and `/switch` moves between them.
pub struct VotingRepl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> {
    engine: Arc<VotingEngine<V, C>>,
    formatter: ConsoleFormatter,
    config: ReplConfig,
    table: Option<Table>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> VotingRepl<V, C> {
    pub fn new(
        engine: Arc<VotingEngine<V, C>>,
        formatter: ConsoleFormatter,
        config: ReplConfig,
    ) -> Self {
        Self {
            engine,
            formatter,
            config,
            table: None,
        }
    }

    pub fn mode(&self) -> ModePreference {
        self.config.mode
    }

    /// Run the interactive REPL
    pub async fn run(&mut self, ballot: Option<&str>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let Some(ballot) = self.choose_ballot(&mut rl, ballot).await? else {
            return Ok(());
        };
        if let Err(e) = self.enter(ballot).await {
            eprintln!("Error: {}", e);
            return Ok(());
        }

        self.print_welcome();

        loop {
            let prompt = self.prompt().await;
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    let command = match ReplCommand::parse(line) {
                        Ok(command) => command,
                        Err(message) => {
                            println!("{}", message);
                            continue;
                        }
                    };
                    match self.execute(command).await {
                        Ok(Flow::Continue(output)) => {
                            if !output.is_empty() {
                                println!("{}", output);
                            }
                        }
                        Ok(Flow::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Resolve the ballot to vote on, asking when it is ambiguous.
    ///
    /// A label that matches no ballot creates one. Returns `None` when the
    /// user leaves before choosing.
    async fn choose_ballot(
        &self,
        rl: &mut DefaultEditor,
        label: Option<&str>,
    ) -> RlResult<Option<Ballot>> {
        let mut label = label.map(str::to_string);

        loop {
            let result = match label.take() {
                Some(label) => self.find_or_create_ballot(&label).await.map(Some),
                None => self.only_ballot().await,
            };
            match result {
                Ok(Some(ballot)) => return Ok(Some(ballot)),
                Ok(None) => {}
                Err(e) => eprintln!("Error: {}", e),
            }

            match self.engine.ballots().await {
                Ok(listing) if !listing.is_empty() => {
                    println!("{}", self.formatter.format_ballots(&listing));
                }
                _ => println!("No ballots yet; enter a label to create one."),
            }

            match rl.readline("ballot> ") {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => label = Some(self.ballot_label_for(line.trim()).await),
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err),
            }
        }
    }

    /// The single existing ballot, if there is exactly one
    async fn only_ballot(&self) -> Result<Option<Ballot>, DomainError> {
        let mut listing = self.engine.ballots().await?;
        Ok(match listing.len() {
            1 => listing.pop().map(|(ballot, _)| ballot),
            _ => None,
        })
    }

    /// Map a typed ballot id to its label; anything else is a label
    async fn ballot_label_for(&self, input: &str) -> String {
        let listing = self.engine.ballots().await.unwrap_or_default();
        listing
            .into_iter()
            .find(|(ballot, _)| ballot.id.to_string() == input)
            .map(|(ballot, _)| ballot.label)
            .unwrap_or_else(|| input.to_string())
    }

    async fn find_or_create_ballot(&self, label: &str) -> Result<Ballot, DomainError> {
        match self.engine.find_ballot(label).await? {
            Some(ballot) => Ok(ballot),
            None => {
                info!("Creating ballot '{}' from the REPL", label);
                self.engine.create_ballot(label).await
            }
        }
    }

    /// Open a fresh room on `ballot` with one participant
    pub async fn enter(&mut self, ballot: Ballot) -> Result<(), DomainError> {
        let room = self.engine.open_room(ballot.id).await?;
        let session = self.engine.join_room(room.id).await?;
        debug!(
            "Entered room {} on ballot '{}' as session {}",
            room.id, ballot.label, session.id
        );
        self.table = Some(Table {
            ballot,
            room,
            participants: vec![Participant::new(session.id)],
            active: 0,
        });
        Ok(())
    }

    fn table(&self) -> Result<&Table, DomainError> {
        self.table
            .as_ref()
            .ok_or_else(|| DomainError::invalid_argument("No ballot selected"))
    }

    fn table_mut(&mut self) -> Result<&mut Table, DomainError> {
        self.table
            .as_mut()
            .ok_or_else(|| DomainError::invalid_argument("No ballot selected"))
    }

    /// Session token of the active participant
    pub fn active_session(&self) -> Option<SessionId> {
        self.table.as_ref().map(|t| t.participant().session)
    }

    async fn options(&self) -> Result<Vec<BallotOption>, DomainError> {
        let ballot = self.table()?.ballot.id;
        self.engine.options(ballot).await
    }

    /// The option the active participant is asked about next.
    ///
    /// Picks the top suggestion in the mode of the current round, falling
    /// back to the other mode when the first one has nothing left.
    pub async fn next_option(&mut self) -> Result<Option<BallotOption>, DomainError> {
        let options = self.options().await?;
        let mode = self.config.mode;
        let table = self.table()?;
        let participant = table.participant();

        let pending = participant
            .pending
            .and_then(|id| options.iter().find(|o| o.id == id));
        if let Some(option) = pending {
            return Ok(Some(option.clone()));
        }

        let (session, round) = (participant.session, participant.round);
        let primary = mode.mode_for_round(round);
        let fallback = match primary {
            SuggestionMode::Suggest => SuggestionMode::Explore,
            SuggestionMode::Explore => SuggestionMode::Suggest,
        };

        let mut picked = None;
        for mode in [primary, fallback] {
            let ranked = self
                .engine
                .suggestions(GetSuggestionsInput::new(session, mode))
                .await?;
            let skipped = &self.table()?.participant().skipped;
            picked = ranked
                .iter()
                .find(|s| !skipped.contains(&s.id))
                .or_else(|| ranked.first())
                .map(|s| s.id);
            if picked.is_some() {
                debug!("Next option for session {} in {} mode", session, mode);
                break;
            }
        }

        self.table_mut()?.participant_mut().pending = picked;
        Ok(picked.and_then(|id| options.into_iter().find(|o| o.id == id)))
    }

    async fn prompt(&mut self) -> String {
        let tag = match &self.table {
            Some(table) => format!("[{}/{}]", table.active + 1, table.participants.len()),
            None => String::new(),
        };
        match self.next_option().await {
            Ok(Some(option)) => format!("{} {}? [y/n] > ", tag, option.label),
            Ok(None) => format!("{} (nothing left) > ", tag),
            Err(e) => {
                eprintln!("Error: {}", e);
                format!("{} > ", tag)
            }
        }
    }

    /// Apply one command for the active participant
    pub async fn execute(&mut self, command: ReplCommand) -> Result<Flow, DomainError> {
        let output = match command {
            ReplCommand::Answer(polarity) => self.answer(polarity).await?,
            ReplCommand::Skip => {
                let participant = self.table_mut()?.participant_mut();
                if let Some(pending) = participant.pending.take() {
                    participant.skipped.insert(pending);
                    participant.round += 1;
                }
                String::new()
            }
            ReplCommand::Mode(mode) => {
                self.config.mode = mode;
                for participant in &mut self.table_mut()?.participants {
                    participant.pending = None;
                }
                format!("Mode: {}", mode)
            }
            ReplCommand::List(mode) => {
                let session = self.table()?.participant().session;
                let input = GetSuggestionsInput::new(session, mode).with_limit(self.config.limit);
                let suggestions = self.engine.suggestions(input).await?;
                let options = self.options().await?;
                self.formatter
                    .format_suggestions(mode, &suggestions, &options)
            }
            ReplCommand::Consensus => {
                let session = self.table()?.participant().session;
                let entries = self.engine.consensus(session).await?;
                let options = self.options().await?;
                self.formatter.format_consensus(&entries, &options)
            }
            ReplCommand::Votes => {
                let session = self.table()?.participant().session;
                let votes = self.engine.votes(session).await?;
                let options = self.options().await?;
                self.formatter.format_votes(&votes, &options)
            }
            ReplCommand::Undo(id) => {
                let session = self.table()?.participant().session;
                let vote = self.engine.delete_vote(session, id).await?;
                let options = self.options().await?;
                self.table_mut()?.participant_mut().pending = None;
                format!(
                    "Removed vote #{} on {}",
                    vote.id,
                    label_of(&options, vote.option)
                )
            }
            ReplCommand::Options => {
                let ballot = self.table()?.ballot.clone();
                let options = self.options().await?;
                self.formatter.format_ballots(&[(ballot, options)])
            }
            ReplCommand::Add(label) => {
                let ballot = self.table()?.ballot.id;
                let option = self.engine.create_option(ballot, &label).await?;
                format!("Added option {} (#{})", option.label.bold(), option.id)
            }
            ReplCommand::Remove(id) => {
                let options = self.options().await?;
                if !options.iter().any(|o| o.id == id) {
                    return Err(DomainError::invalid_argument(format!(
                        "Option {} is not on this ballot",
                        id
                    )));
                }
                let removed = self.engine.delete_option(id).await?;
                for participant in &mut self.table_mut()?.participants {
                    participant.skipped.remove(&id);
                    if participant.pending == Some(id) {
                        participant.pending = None;
                    }
                }
                format!("Removed option {}", removed.label)
            }
            ReplCommand::Join => {
                let room = self.table()?.room.id;
                let session = self.engine.join_room(room).await?;
                let table = self.table_mut()?;
                table.participants.push(Participant::new(session.id));
                table.active = table.participants.len() - 1;
                format!(
                    "Participant {} joined (token {})",
                    table.active + 1,
                    session.id
                )
            }
            ReplCommand::Switch(n) => {
                let table = self.table_mut()?;
                if n == 0 || n > table.participants.len() {
                    return Err(DomainError::invalid_argument(format!(
                        "No participant {}; there are {}",
                        n,
                        table.participants.len()
                    )));
                }
                table.active = n - 1;
                format!("Now voting as participant {}", n)
            }
            ReplCommand::Sessions => {
                let table = self.table()?;
                table
                    .participants
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let marker = if i == table.active { "*" } else { " " };
                        format!(
                            "{} {} token {} ({} answered)",
                            marker,
                            i + 1,
                            p.session,
                            p.round
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            ReplCommand::Help => Self::help_text(),
            ReplCommand::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(output))
    }

    async fn answer(&mut self, polarity: bool) -> Result<String, DomainError> {
        let Some(option) = self.next_option().await? else {
            return Ok("Nothing left to vote on. Add options with /add <label>".to_string());
        };
        let session = self.table()?.participant().session;
        let output = self.engine.vote(session, option.id, polarity).await?;

        let participant = self.table_mut()?.participant_mut();
        participant.pending = None;
        participant.skipped.remove(&option.id);
        participant.round += 1;

        if !self.config.show_hints {
            return Ok(String::new());
        }
        let verdict = if polarity {
            "yes".green().bold()
        } else {
            "no".red().bold()
        };
        Ok(format!(
            "{} {} {}",
            verdict,
            option.label,
            format!("({} correlations updated)", output.rows_updated).dimmed()
        ))
    }

    fn print_welcome(&self) {
        if !self.config.show_hints {
            return;
        }
        let Some(table) = &self.table else {
            return;
        };
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             Concord - Voting Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Ballot: {}   Room: {}   Mode: {}",
            table.ballot.label.bold(),
            table.room.id,
            self.config.mode
        );
        println!();
        println!("Answer y / n to each option, or s to skip it.");
        println!("Type /help for commands.");
        println!();
    }

    fn help_text() -> String {
        [
            "",
            "Answers:",
            "  y, yes / n, no    - Approve or reject the current option",
            "  s, skip           - Ask about something else first",
            "",
            "Commands:",
            "  /mode <m>         - suggest, explore or mixed",
            "  /suggest          - List likely approvals",
            "  /explore          - List the most telling options",
            "  /consensus, /c    - Options everyone approved",
            "  /votes            - Your votes",
            "  /undo <vote id>   - Remove one of your votes",
            "  /options, /o      - Options on this ballot",
            "  /add <label>      - Add an option",
            "  /remove <id>      - Remove an option and its votes",
            "  /join             - Add a participant to the room",
            "  /switch <n>       - Vote as participant n",
            "  /sessions, /who   - List participants",
            "  /help, /h, /?     - Show this help",
            "  /quit, /exit, /q  - Exit",
            "",
        ]
        .join("\n")
    }
}
