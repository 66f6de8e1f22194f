//! Front-end agnostic game loop.
//!
//! A front end implements [`GameInterface`]; [`game_loop`] drives it against
//! a [`SessionController`], applying background fetch results as they come in.

use crate::game_state::{GameState, GameStatus, GuessOutcome, IgnoreReason};
use crate::generation::Generation;
use crate::reveal::RevealMode;
use crate::session::{FetchResult, SessionController, SessionView};
use crate::target::{Target, TargetProvider};
use crate::{debug_log, info_log};
use tokio::sync::mpsc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// The text being typed changed.
    Draft(String),
    Restart,
    ChangeGeneration(Generation),
    ToggleMode,
    Exit,
}

pub trait GameInterface {
    fn display_session(&mut self, view: &SessionView<'_>, mode: RevealMode);
    fn display_outcome(&mut self, guess: &str, outcome: &GuessOutcome);
    /// `None` means no complete action yet (invalid input or nothing typed).
    fn read_action(&mut self, view: &SessionView<'_>) -> Option<UserAction>;
    fn display_exit_message(&mut self);

    /// Interfaces that poll for input keep reading while a target loads, so
    /// the player can supersede a slow fetch. Blocking ones wait instead.
    fn polls_while_loading(&self) -> bool {
        false
    }
}

#[must_use]
pub fn ignore_message(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NoTarget => "No Pokémon loaded yet.",
        IgnoreReason::Finished => "The game is over. Start a new one to keep playing.",
        IgnoreReason::Empty => "Type a name before submitting.",
        IgnoreReason::Loading => "Still loading the next Pokémon...",
        IgnoreReason::LoadFailed => "Loading failed. Restart to try again.",
    }
}

/// Final message once the game has ended, `None` while it is still running.
#[must_use]
pub fn game_over_message(state: &GameState) -> Option<String> {
    let name = state.target().map_or("?", |t| t.display_name.as_str());
    match state.status() {
        GameStatus::InProgress => None,
        GameStatus::Won => {
            let n = state.attempts().len();
            let plural = if n > 1 { "s" } else { "" };
            Some(format!("Congratulations! You guessed {name} in {n} attempt{plural}!"))
        }
        GameStatus::Lost => Some(format!("Game over. The Pokémon was {name}.")),
    }
}

/// Info card lines shown when the game ends.
#[must_use]
pub fn target_summary(target: &Target) -> Vec<String> {
    let mut lines = vec![
        format!("Name: {} (#{})", target.display_name, target.id),
        format!("Height: {}m", target.height_m()),
        format!("Weight: {}kg", target.weight_kg()),
    ];
    if !target.types.is_empty() {
        lines.push(format!("Types: {}", target.types.join(", ")));
    }
    if let Some(url) = target.image_url() {
        lines.push(format!("Image: {url}"));
    }
    lines
}

/// Guesses must be as long as the name, like the letter grid they fill.
#[must_use]
pub fn check_guess_length(guess: &str, state: &GameState) -> Result<(), String> {
    let Some(target) = state.target() else {
        return Ok(());
    };
    let expected = target.name_len();
    let got = guess.chars().count();
    if got == expected {
        Ok(())
    } else {
        Err(format!("Guess must be exactly {expected} letters (got {got})."))
    }
}

fn apply_pending<P: TargetProvider + ?Sized + 'static>(
    controller: &mut SessionController<P>,
    rx: &mut mpsc::UnboundedReceiver<FetchResult>,
) {
    while let Ok((ticket, result)) = rx.try_recv() {
        controller.complete_request(ticket, result);
    }
}

pub async fn game_loop<P, I>(
    controller: &mut SessionController<P>,
    interface: &mut I,
    mut mode: RevealMode,
) where
    P: TargetProvider + ?Sized + 'static,
    I: GameInterface,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    controller.spawn_request(&tx);

    loop {
        apply_pending(controller, &mut rx);
        interface.display_session(&controller.view(), mode);

        if controller.is_loading() && !interface.polls_while_loading() {
            if let Some((ticket, result)) = rx.recv().await {
                controller.complete_request(ticket, result);
            }
            continue;
        }

        let Some(action) = interface.read_action(&controller.view()) else {
            // Let background fetches make progress between polls
            tokio::task::yield_now().await;
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Guess(guess) => {
                let outcome = controller.submit_guess(&guess);
                interface.display_outcome(&guess, &outcome);
            }
            UserAction::Draft(draft) => controller.update_current_attempt(&draft),
            UserAction::Restart => {
                info_log!("game_loop() - restart requested");
                controller.spawn_request(&tx);
            }
            UserAction::ChangeGeneration(generation) => {
                info_log!("game_loop() - switching to {}", generation);
                controller.change_category_in_background(generation, &tx);
            }
            UserAction::ToggleMode => mode = mode.toggle(),
        }
    }
}
