// Library interface for pokeguess
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod generation;
pub mod logging;
pub mod play;
pub mod pokeapi;
pub mod reveal;
pub mod scorer;
pub mod session;
pub mod target;
pub mod tui;

// Re-export commonly used items for easier testing
pub use error::{AppError, ProviderError};
pub use game_state::{GameState, GameStatus, GuessOutcome, IgnoreReason, MAX_ATTEMPTS};
pub use generation::{DEFAULT_GENERATION, GENERATIONS, Generation};
pub use play::{GameInterface, UserAction, game_loop};
pub use scorer::{LetterVerdict, matches_target, normalize, score};
pub use session::{FetchTicket, SessionConfig, SessionController, SessionView};
pub use target::{Target, TargetProvider};
