//! Q-learning and SARSA temporal difference learning
//!
//! This module implements tabular temporal difference (TD) control. TD
//! methods bootstrap value estimates from successor states, so every
//! environment step yields an update.
//!
//! ## Algorithms
//!
//! - **Q-learning**: Off-policy TD control that learns optimal Q* values
//! - **SARSA**: On-policy TD control that learns Q^π for the followed policy
//! - **Q-learning with ε scheduling**: Q-learning whose exploration rate
//!   decays over episodes
//!
//! ## Key Differences
//!
//! | Aspect | Q-learning | SARSA |
//! |--------|------------|-------|
//! | Policy | Off-policy (learns Q*) | On-policy (learns Q^π) |
//! | Update | Uses max_a Q(s',a') | Uses actual Q(s',a') |
//! | Exploration | Can be reckless | More conservative |
//! | Convergence | To optimal policy | To followed policy |
//!
//! ## Usage Example
//!
//! ```
//! use tabular_rl::{
//!     ports::{Agent, Transition},
//!     q_learning::{QLearningAgent, SarsaAgent},
//! };
//!
//! let mut q_agent = QLearningAgent::new(
//!     0.5,          // learning_rate
//!     0.1,          // epsilon
//!     0.99,         // gamma
//!     vec![0, 1, 2],
//! )?;
//! q_agent.update(&Transition::new("a", 0, 1.0, "b").terminal());
//! assert_eq!(q_agent.get_value(&"a", 0), 0.5);
//!
//! let sarsa_agent: SarsaAgent<&str> = SarsaAgent::new(0.5, 0.1, 0.99, vec![0, 1, 2])?;
//! assert!(sarsa_agent.requires_next_action());
//! # Ok::<(), tabular_rl::Error>(())
//! ```

pub mod agent;
pub mod eps_scheduling;
pub mod policy;
pub mod q_table;
pub mod schedule;
pub mod serialization;

// Public re-exports
pub use agent::{QLearningAgent, SarsaAgent};
pub use eps_scheduling::QLearningAgentEpsScheduling;
pub use policy::{ActionSpace, EpsilonGreedy};
pub use q_table::ValueTable;
pub use schedule::{
    ConstantEpsilon, EpsilonSchedule, ExponentialDecay, LinearDecay, Schedule, ScheduleConfig,
};
pub use serialization::{Algorithm, SavedAgent, TrainedAgent, TrainingMetadata};
