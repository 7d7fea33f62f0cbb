//! Two-state, two-action toy problem
//!
//! From state `A`, action 0 pays +1 and moves to the terminal state `B`;
//! action 1 pays -1 and stays in `A`. The optimal values are Q(A,0) = 1 and
//! Q(A,1) = -1 + γ.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, Step},
    types::Action,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChainState {
    A,
    B,
}

#[derive(Debug, Clone)]
pub struct TwoStateChain {
    state: ChainState,
}

impl TwoStateChain {
    pub const ADVANCE: Action = 0;
    pub const STAY: Action = 1;

    pub fn new() -> Self {
        Self {
            state: ChainState::A,
        }
    }

    pub fn state(&self) -> ChainState {
        self.state
    }
}

impl Default for TwoStateChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for TwoStateChain {
    type State = ChainState;

    fn reset(&mut self) -> ChainState {
        self.state = ChainState::A;
        self.state
    }

    fn step(&mut self, action: Action) -> Result<Step<ChainState>> {
        if self.state == ChainState::B {
            return Err(Error::InvalidAction {
                action,
                context: "terminal state B".to_string(),
            });
        }
        match action {
            Self::ADVANCE => {
                self.state = ChainState::B;
                Ok(Step {
                    next_state: ChainState::B,
                    reward: 1.0,
                    done: true,
                })
            }
            Self::STAY => Ok(Step {
                next_state: ChainState::A,
                reward: -1.0,
                done: false,
            }),
            other => Err(Error::InvalidAction {
                action: other,
                context: "two-state chain".to_string(),
            }),
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        vec![Self::ADVANCE, Self::STAY]
    }

    fn name(&self) -> &str {
        "two-state-chain"
    }
}
