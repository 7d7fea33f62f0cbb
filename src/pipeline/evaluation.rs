//! Greedy evaluation of a trained agent

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Agent, Environment},
};

/// Outcome of greedy rollouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub episodes: usize,
    pub mean_reward: f64,
    pub mean_steps: f64,
    /// Episodes that ended in a terminal state before the step cap
    pub completed: usize,
}

/// Roll out `episodes` episodes with ε forced to 0 and no learning.
///
/// The agent's exploration rate is restored afterwards, including on error.
pub fn evaluate<E, A>(
    env: &mut E,
    agent: &mut A,
    episodes: usize,
    max_steps: usize,
) -> Result<EvaluationResult>
where
    E: Environment,
    A: Agent<E::State> + ?Sized,
{
    let saved_epsilon = agent.epsilon();
    agent.set_epsilon(0.0)?;
    let outcome = rollouts(env, agent, episodes, max_steps);
    agent.set_epsilon(saved_epsilon)?;
    outcome
}

fn rollouts<E, A>(
    env: &mut E,
    agent: &mut A,
    episodes: usize,
    max_steps: usize,
) -> Result<EvaluationResult>
where
    E: Environment,
    A: Agent<E::State> + ?Sized,
{
    let mut total_reward = 0.0;
    let mut total_steps = 0;
    let mut completed = 0;

    for _ in 0..episodes {
        let mut state = env.reset();
        for _ in 0..max_steps {
            let action = agent.get_action(&state)?;
            let step = env.step(action)?;
            total_reward += step.reward;
            total_steps += 1;
            if step.done {
                completed += 1;
                break;
            }
            state = step.next_state;
        }
    }

    let denominator = episodes.max(1) as f64;
    Ok(EvaluationResult {
        episodes,
        mean_reward: total_reward / denominator,
        mean_steps: total_steps as f64 / denominator,
        completed,
    })
}
