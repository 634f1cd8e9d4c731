pub mod engine;
pub mod grid;
pub mod outcome;
pub mod queries;
pub mod setup;
pub mod types;


pub use engine::{apply_command, on_turn_begin, on_turn_end, Applied, Command, Rejection};
pub use outcome::evaluate;
pub use setup::create_initial_state;
pub use types::*;
