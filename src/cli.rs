use crate::error::AppError;
use crate::game_state::{GameState, GuessOutcome, MAX_ATTEMPTS};
use crate::generation::{GENERATIONS, Generation};
use crate::play::{
    GameInterface, UserAction, check_guess_length, game_over_message, ignore_message,
    target_summary,
};
use crate::pokeapi::{DEFAULT_API_BASE, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_SECS, ProviderConfig};
use crate::reveal::{self, RevealMode};
use crate::scorer::LetterVerdict;
use crate::session::{SessionConfig, SessionView};
use clap::Parser;
use log::LevelFilter;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Guess the Pokémon from a progressively revealed picture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generation to draw Pokémon from (1-9)
    #[arg(short, long, default_value_t = 1)]
    pub generation: u8,

    /// How the picture is revealed
    #[arg(short, long, value_enum, default_value_t = RevealMode::Blur)]
    pub mode: RevealMode,

    /// Language of the names to guess
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Line-oriented mode instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn session_config(&self) -> Result<SessionConfig, AppError> {
        let generation =
            Generation::by_id(self.generation).ok_or(AppError::UnknownGeneration(self.generation))?;
        Ok(SessionConfig { generation })
    }

    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.api_base.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    #[must_use]
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

enum Command {
    Exit,
    Restart,
    Generation(Option<Generation>),
    ToggleMode,
    Help,
    Guess(String),
    Empty,
}

fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "" => Command::Empty,
        "exit" | "quit" => Command::Exit,
        "next" | "restart" => Command::Restart,
        "mode" => Command::ToggleMode,
        "help" => Command::Help,
        _ => {
            if let Some(arg) = lower.strip_prefix("gen ") {
                let generation = arg.trim().parse::<u8>().ok().and_then(Generation::by_id);
                Command::Generation(generation)
            } else {
                Command::Guess(trimmed.to_string())
            }
        }
    }
}

fn marks(verdicts: &[LetterVerdict]) -> String {
    verdicts.iter().map(|v| v.to_char()).collect()
}

/// `PIKACKU` over `GGGGGXG`.
#[must_use]
pub fn format_attempt(guess: &str, verdicts: &[LetterVerdict]) -> String {
    format!("{}\n{}", guess.to_uppercase(), marks(verdicts))
}

fn format_board(state: &GameState) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (guess, verdicts)) in state.scored_attempts().into_iter().enumerate() {
        lines.push(format!(
            "{}. {}  {}",
            i + 1,
            guess.to_uppercase(),
            marks(&verdicts)
        ));
    }
    lines
}

fn help_lines() -> Vec<String> {
    let mut lines = vec![
        "Commands: <name> to guess, 'next' for a new Pokémon, 'mode' to switch reveal,".to_string(),
        "          'gen N' to change generation, 'exit' to quit.".to_string(),
        "Feedback: G = right letter, right place; Y = elsewhere in the name; X = not in the name."
            .to_string(),
    ];
    for g in &GENERATIONS {
        lines.push(format!("  gen {}: {} (#{}-#{})", g.id, g, g.start_id, g.end_id));
    }
    lines
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and a writer for line-based play
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            writer: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            log::warn!("Failed to write to output: {e}");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(e) => {
                log::error!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_session(&mut self, view: &SessionView<'_>, mode: RevealMode) {
        if view.loading {
            self.say(&format!("Loading a Pokémon from {}...", view.generation));
            return;
        }
        if let Some(error) = view.error {
            self.say(&format!("Error: {error}"));
            self.say("Type 'next' to try again or 'exit' to quit.");
            return;
        }
        let state = view.state;
        let Some(target) = state.target() else {
            return;
        };

        for line in format_board(state) {
            self.say(&line);
        }
        let picture = reveal::describe(mode, state.reveal_level(), state.is_over());
        if let Some(message) = game_over_message(state) {
            self.say(&message);
            for line in target_summary(target) {
                self.say(&format!("  {line}"));
            }
            self.say("Type 'next' to play again, 'gen N' to change generation, or 'exit'.");
        } else {
            self.say(&format!(
                "[{}] {} | picture: {} | attempts {}/{} | name has {} letters",
                view.generation.name,
                mode.label(),
                picture,
                state.attempts().len(),
                MAX_ATTEMPTS,
                target.name_len()
            ));
            self.say("Your guess (or 'help'):");
        }
    }

    fn display_outcome(&mut self, guess: &str, outcome: &GuessOutcome) {
        match outcome {
            GuessOutcome::Accepted { verdicts, .. } => {
                self.say(&format_attempt(guess, verdicts));
            }
            GuessOutcome::Ignored(reason) => self.say(ignore_message(*reason)),
        }
    }

    fn read_action(&mut self, view: &SessionView<'_>) -> Option<UserAction> {
        let Some(input) = self.read_line() else {
            return Some(UserAction::Exit);
        };

        match parse_command(&input) {
            Command::Exit => Some(UserAction::Exit),
            Command::Restart => Some(UserAction::Restart),
            Command::ToggleMode => Some(UserAction::ToggleMode),
            Command::Generation(Some(generation)) => Some(UserAction::ChangeGeneration(generation)),
            Command::Generation(None) => {
                self.say("Unknown generation. Use 'gen 1' to 'gen 9'.");
                None
            }
            Command::Help => {
                for line in help_lines() {
                    self.say(&line);
                }
                None
            }
            Command::Empty => None,
            Command::Guess(guess) => {
                if !view.state.is_over()
                    && let Err(message) = check_guess_length(&guess, view.state)
                {
                    self.say(&message);
                    return None;
                }
                Some(UserAction::Guess(guess))
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use std::io::Cursor;

    fn pikachu_state() -> GameState {
        GameState::with_target(Target::named(25, "pikachu", "Pikachu"))
    }

    fn view(state: &GameState) -> SessionView<'_> {
        SessionView {
            state,
            generation: Generation::default(),
            loading: false,
            error: None,
        }
    }

    fn interface(input: &str) -> CliInterface<Cursor<String>, Vec<u8>> {
        CliInterface::with_writer(Cursor::new(input.to_string()), Vec::new())
    }

    fn output(interface: CliInterface<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pokeguess"]);
        assert_eq!(cli.generation, 1);
        assert_eq!(cli.mode, RevealMode::Blur);
        assert_eq!(cli.language, "fr");
        assert!(!cli.plain);
        assert_eq!(cli.log_level_filter(), LevelFilter::Info);
        assert_eq!(cli.provider_config(), ProviderConfig::default());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::parse_from([
            "pokeguess",
            "-g",
            "3",
            "--mode",
            "zoom",
            "--language",
            "en",
            "--plain",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.session_config().unwrap().generation.region, "Hoenn");
        assert_eq!(cli.mode, RevealMode::Zoom);
        assert_eq!(cli.provider_config().language, "en");
        assert!(cli.plain);
        assert_eq!(cli.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_generation_rejected() {
        let cli = Cli::parse_from(["pokeguess", "--generation", "12"]);
        assert!(matches!(
            cli.session_config(),
            Err(AppError::UnknownGeneration(12))
        ));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let cli = Cli::parse_from(["pokeguess", "--log-level", "loud"]);
        assert_eq!(cli.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_read_commands() {
        let state = pikachu_state();
        let mut ui = interface("exit\nNEXT\nmode\ngen 2\n");
        assert_eq!(ui.read_action(&view(&state)), Some(UserAction::Exit));
        assert_eq!(ui.read_action(&view(&state)), Some(UserAction::Restart));
        assert_eq!(ui.read_action(&view(&state)), Some(UserAction::ToggleMode));
        assert_eq!(
            ui.read_action(&view(&state)),
            Some(UserAction::ChangeGeneration(GENERATIONS[1]))
        );
    }

    #[test]
    fn test_read_guess_trims_and_keeps_case() {
        let state = pikachu_state();
        let mut ui = interface("  PikaChu  \n");
        assert_eq!(
            ui.read_action(&view(&state)),
            Some(UserAction::Guess("PikaChu".to_string()))
        );
    }

    #[test]
    fn test_wrong_length_guess_rejected() {
        let state = pikachu_state();
        let mut ui = interface("pika\n");
        assert_eq!(ui.read_action(&view(&state)), None);
        assert!(output(ui).contains("exactly 7 letters"));
    }

    #[test]
    fn test_unknown_generation_command() {
        let state = pikachu_state();
        let mut ui = interface("gen 42\n");
        assert_eq!(ui.read_action(&view(&state)), None);
        assert!(output(ui).contains("Unknown generation"));
    }

    #[test]
    fn test_eof_exits() {
        let state = pikachu_state();
        let mut ui = interface("");
        assert_eq!(ui.read_action(&view(&state)), Some(UserAction::Exit));
    }

    #[test]
    fn test_help_and_blank_lines_are_not_actions() {
        let state = pikachu_state();
        let mut ui = interface("\nhelp\n");
        assert_eq!(ui.read_action(&view(&state)), None);
        assert_eq!(ui.read_action(&view(&state)), None);
        assert!(output(ui).contains("gen 9: Generation IX (Paldea)"));
    }

    #[test]
    fn test_display_board_and_outcome() {
        let mut state = pikachu_state();
        let outcome = state.submit_guess("pikacku");
        let mut ui = interface("");
        ui.display_outcome("pikacku", &outcome);
        ui.display_session(&view(&state), RevealMode::Blur);
        let text = output(ui);
        assert!(text.contains("PIKACKU\nGGGGGXG"));
        assert!(text.contains("1. PIKACKU  GGGGGXG"));
        assert!(text.contains("picture: blur 16px"));
        assert!(text.contains("attempts 1/5"));
    }

    #[test]
    fn test_display_win_shows_summary() {
        let mut state = pikachu_state();
        state.submit_guess("pikachu");
        let mut ui = interface("");
        ui.display_session(&view(&state), RevealMode::Zoom);
        let text = output(ui);
        assert!(text.contains("Congratulations! You guessed Pikachu in 1 attempt!"));
        assert!(text.contains("Name: Pikachu (#25)"));
    }

    #[test]
    fn test_display_loading_and_error() {
        let state = GameState::new();
        let mut ui = interface("");
        ui.display_session(
            &SessionView {
                loading: true,
                ..view(&state)
            },
            RevealMode::Blur,
        );
        ui.display_session(
            &SessionView {
                error: Some("offline"),
                ..view(&state)
            },
            RevealMode::Blur,
        );
        let text = output(ui);
        assert!(text.contains("Loading a Pokémon from Generation I (Kanto)..."));
        assert!(text.contains("Error: offline"));
    }

    #[test]
    fn test_ignored_outcome_message() {
        let mut ui = interface("");
        ui.display_outcome("x", &GuessOutcome::Ignored(crate::game_state::IgnoreReason::Finished));
        assert!(output(ui).contains("The game is over"));
    }

    #[test]
    fn test_board_and_attempt_share_marks() {
        let mut state = pikachu_state();
        state.submit_guess("pikacku");
        let verdicts = crate::scorer::score("pikacku", "Pikachu");
        assert_eq!(marks(&verdicts), "GGGGGXG");
        assert_eq!(format_board(&state), vec!["1. PIKACKU  GGGGGXG".to_string()]);
        assert!(format_attempt("pikacku", &verdicts).ends_with(&marks(&verdicts)));
    }

    #[test]
    fn test_format_attempt() {
        let verdicts = crate::scorer::score("evoli", "Évoli");
        assert_eq!(format_attempt("evoli", &verdicts), "EVOLI\nGGGGG");
    }
}
