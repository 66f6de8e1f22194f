//! TUI (Terminal User Interface) front end
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders a `SessionView` and turns key presses into
//!   `UserAction`s for the game loop
//!
//! # Screens
//! The screen is picked from the session on every frame:
//! - `Loading` while a target is being fetched (arrows still switch generation)
//! - `Failed` when the last fetch failed
//! - `Playing` → `GameOver` once the game reaches a terminal status

use crate::game_state::{GameState, GuessOutcome, MAX_ATTEMPTS};
use crate::generation::Generation;
use crate::play::{
    GameInterface, UserAction, check_guess_length, game_over_message, ignore_message,
    target_summary,
};
use crate::reveal::{self, RevealMode};
use crate::scorer::LetterVerdict;
use crate::session::SessionView;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Whether a typed character can go into a guess. Names use more than
/// letters (`Porygon2`, `Nidoran♀`, `Type:0`), so only terminal noise is
/// rejected.
fn accepts_char(c: char) -> bool {
    c != '\u{FFFD}' && !c.is_control()
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum CellState {
    Empty,
    Entered,
    Scored(LetterVerdict),
}

impl CellState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Scored(LetterVerdict::Correct) => (Color::Green, Color::Black),
            Self::Scored(LetterVerdict::Present) => (Color::Yellow, Color::Black),
            Self::Scored(LetterVerdict::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    Loading,
    Failed,
    Playing,
    GameOver,
}

impl Screen {
    fn of(view: &SessionView<'_>) -> Self {
        if view.loading {
            Self::Loading
        } else if view.error.is_some() {
            Self::Failed
        } else if view.state.is_over() {
            Self::GameOver
        } else {
            Self::Playing
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: &'a SessionView<'a>,
    screen: Screen,
    mode: RevealMode,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, view: &SessionView<'_>, mode: RevealMode) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view,
            screen: Screen::of(view),
            mode,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_height = ROW_SPACING * MAX_ATTEMPTS as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(4),            // Picture reveal
                Constraint::Length(board_height), // Attempts
                Constraint::Min(6),               // Info panel
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.view.generation);
        Self::render_picture(f, chunks[1], ctx);
        Self::render_board(f, chunks[2], ctx.view.state, ctx.screen);
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.screen);
    }

    fn render_title(f: &mut Frame, area: Rect, generation: Generation) {
        let title = Paragraph::new(format!("WHO'S THAT POKÉMON?  {generation}"))
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_picture(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let state = ctx.view.state;
        let over = state.is_over();
        let label = format!(
            "{} - {}",
            ctx.mode.label(),
            reveal::describe(ctx.mode, state.reveal_level(), over)
        );
        let gauge = Gauge::default()
            .block(Block::default().title("Picture").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .ratio(reveal::revealed_fraction(state.reveal_level(), over))
            .label(label);
        f.render_widget(gauge, area);
    }

    fn render_board(f: &mut Frame, area: Rect, state: &GameState, screen: Screen) {
        let block = Block::default()
            .title(format!(
                "Attempts {}/{}",
                state.attempts().len(),
                MAX_ATTEMPTS
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(target) = state.target() else {
            return;
        };
        let width = target.name_len();
        let scored = state.scored_attempts();

        for row in 0..MAX_ATTEMPTS {
            let cells: Vec<(char, CellState)> = if let Some((guess, verdicts)) = scored.get(row) {
                guess
                    .chars()
                    .zip(verdicts.iter().copied())
                    .map(|(c, v)| (c, CellState::Scored(v)))
                    .collect()
            } else if row == scored.len() && screen == Screen::Playing {
                state
                    .current_attempt()
                    .chars()
                    .map(|c| (c, CellState::Entered))
                    .collect()
            } else {
                Vec::new()
            };
            Self::render_row(f, inner, row, &cells, width);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_row(
        f: &mut Frame,
        area: Rect,
        row_index: usize,
        cells: &[(char, CellState)],
        width: usize,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..width.max(cells.len()) {
            let (letter, state) = cells.get(i).copied().unwrap_or((' ', CellState::Empty));
            let (bg_color, fg_color) = state.colors();
            let letter = letter.to_uppercase().next().unwrap_or(letter);
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        let state = ctx.view.state;

        match ctx.screen {
            Screen::Loading => {
                lines.push(Line::from(vec![Span::styled(
                    format!("Loading a Pokémon from {}...", ctx.view.generation),
                    INFO_STYLE,
                )]));
                lines.push(Line::from(ctx.view.generation.description));
            }
            Screen::Failed => {
                if let Some(error) = ctx.view.error {
                    lines.push(Line::from(vec![Span::styled(
                        format!("Error: {error}"),
                        ERROR_STYLE,
                    )]));
                }
            }
            Screen::GameOver => {
                if let Some(message) = game_over_message(state) {
                    lines.push(Line::from(vec![Span::styled(message, SUCCESS_STYLE)]));
                }
                if let Some(target) = state.target() {
                    for line in target_summary(target) {
                        lines.push(Line::from(format!("  {line}")));
                    }
                }
                lines.push(Line::from(""));
            }
            Screen::Playing => {
                if let Some(target) = state.target() {
                    lines.push(Line::from(vec![Span::styled(
                        format!(
                            "The name has {} letters. {} attempts left.",
                            target.name_len(),
                            state.remaining_attempts()
                        ),
                        INFO_STYLE,
                    )]));
                }
            }
        }

        // Messages
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        // Error messages
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, screen: Screen) {
        let text = match screen {
            Screen::Loading => "←/→: Change generation | ESC: Quit",
            Screen::Failed => "ENTER: Try again | ←/→: Change generation | ESC: Quit",
            Screen::Playing => {
                "Type the name | ENTER: Guess | TAB: Blur/Zoom | ←/→: Generation | F5: New | ESC: Quit"
            }
            Screen::GameOver => {
                "ENTER/N: New game | TAB: Blur/Zoom | ←/→: Generation | ESC: Quit"
            }
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, view: &SessionView<'_>) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout so background fetches get applied between keys
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        // Filter out non-key events (mouse, focus, paste, resize)
        let Event::Key(key) = event else {
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out invalid characters that come from terminal focus events (alt-tab)
        if let KeyCode::Char(c) = key.code
            && !accepts_char(c)
        {
            debug_log!(
                "handle_input() - Ignoring invalid character from escape sequence: {:?}",
                c
            );
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        match key.code {
            KeyCode::Esc => return Ok(Some(UserAction::Exit)),
            KeyCode::Left => {
                return Ok(Some(UserAction::ChangeGeneration(
                    view.generation.previous(),
                )));
            }
            KeyCode::Right => {
                return Ok(Some(UserAction::ChangeGeneration(view.generation.next())));
            }
            KeyCode::F(5) => return Ok(Some(UserAction::Restart)),
            KeyCode::Tab => return Ok(Some(UserAction::ToggleMode)),
            _ => {}
        }

        Ok(match Screen::of(view) {
            Screen::Loading => None,
            Screen::Failed => (key.code == KeyCode::Enter).then_some(UserAction::Restart),
            Screen::GameOver => Self::handle_game_over_input(key),
            Screen::Playing => self.handle_guess_input(key, view.state),
        })
    }

    fn handle_guess_input(&mut self, key: KeyEvent, state: &GameState) -> Option<UserAction> {
        self.error_message.clear();
        let draft = state.current_attempt();
        let max_len = state.target().map_or(0, |t| t.name_len());

        match key.code {
            KeyCode::Char(c) if accepts_char(c) => {
                // Ignore characters with Alt or Control (Shift is ok for uppercase)
                if Self::has_modifier_keys(&key) {
                    debug_log!(
                        "handle_guess_input() - Ignoring character with modifier: {:?}",
                        key.modifiers
                    );
                    return None;
                }
                if draft.chars().count() >= max_len {
                    self.error_message = format!("The name only has {max_len} letters!");
                    return None;
                }
                let mut next = draft.to_string();
                next.push(c);
                Some(UserAction::Draft(next))
            }
            KeyCode::Backspace if !draft.is_empty() => {
                let mut next = draft.to_string();
                next.pop();
                Some(UserAction::Draft(next))
            }
            KeyCode::Enter => match check_guess_length(draft, state) {
                Ok(()) => {
                    info_log!("handle_guess_input() - Submitting guess: '{}'", draft);
                    Some(UserAction::Guess(draft.to_string()))
                }
                Err(message) => {
                    self.error_message = message;
                    None
                }
            },
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') | KeyCode::Enter => Some(UserAction::Restart),
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_session(&mut self, view: &SessionView<'_>, mode: RevealMode) {
        self.status = match Screen::of(view) {
            Screen::Loading => format!("Loading {}...", view.generation.name),
            Screen::Failed => "Could not load a Pokémon".to_string(),
            Screen::Playing => format!(
                "{} | {} | attempt {}/{}",
                view.generation.name,
                mode.label(),
                view.state.attempts().len() + 1,
                MAX_ATTEMPTS
            ),
            Screen::GameOver => "Game over".to_string(),
        };
        if let Err(e) = self.draw(view, mode) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn display_outcome(&mut self, guess: &str, outcome: &GuessOutcome) {
        self.message = match outcome {
            GuessOutcome::Accepted { verdicts, .. } => {
                let correct = verdicts.iter().filter(|v| **v == LetterVerdict::Correct).count();
                let present = verdicts.iter().filter(|v| **v == LetterVerdict::Present).count();
                format!(
                    "{}: {correct} well placed, {present} misplaced",
                    guess.to_uppercase()
                )
            }
            GuessOutcome::Ignored(reason) => ignore_message(*reason).to_string(),
        };
    }

    fn read_action(&mut self, view: &SessionView<'_>) -> Option<UserAction> {
        match self.handle_input(view) {
            Ok(action) => {
                if matches!(action, Some(UserAction::Restart | UserAction::ChangeGeneration(_))) {
                    self.message.clear();
                    self.error_message.clear();
                }
                action
            }
            Err(e) => {
                log::error!("read_action() - Input error, exiting: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
    }

    fn polls_while_loading(&self) -> bool {
        true
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
