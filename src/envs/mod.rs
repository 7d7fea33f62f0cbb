//! Small reference environments used by the CLI and the test suite

pub mod two_state;

pub use two_state::{ChainState, TwoStateChain};
