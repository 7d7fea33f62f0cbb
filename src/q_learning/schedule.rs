//! Episode-indexed exploration schedules
//!
//! A schedule is a pure function from the number of completed episodes to
//! the ε used for the next episode.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Epsilon,
};

/// Exploration rate as a function of completed episodes
pub trait EpsilonSchedule {
    fn epsilon(&self, episode: usize) -> f64;
}

impl<F> EpsilonSchedule for F
where
    F: Fn(usize) -> f64,
{
    fn epsilon(&self, episode: usize) -> f64 {
        self(episode)
    }
}

fn check_bounds(initial: f64, floor: f64) -> Result<()> {
    Epsilon::new(initial)?;
    Epsilon::new(floor)?;
    if floor > initial {
        return Err(Error::InvalidHyperparameter {
            name: "floor",
            value: floor,
            expected: "a floor no greater than the initial epsilon",
        });
    }
    Ok(())
}

/// The same ε for every episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantEpsilon {
    epsilon: f64,
}

impl ConstantEpsilon {
    pub fn new(epsilon: f64) -> Result<Self> {
        Epsilon::new(epsilon)?;
        Ok(Self { epsilon })
    }
}

impl EpsilonSchedule for ConstantEpsilon {
    fn epsilon(&self, _episode: usize) -> f64 {
        self.epsilon
    }
}

/// ε = max(floor, initial - step * episode)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecay {
    initial: f64,
    step: f64,
    floor: f64,
}

impl LinearDecay {
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `initial` and `floor`
    /// lie in [0, 1] with `floor <= initial`, and `step` is finite and
    /// non-negative.
    pub fn new(initial: f64, step: f64, floor: f64) -> Result<Self> {
        check_bounds(initial, floor)?;
        if !(step >= 0.0 && step.is_finite()) {
            return Err(Error::InvalidHyperparameter {
                name: "step",
                value: step,
                expected: "a finite non-negative decrement",
            });
        }
        Ok(Self {
            initial,
            step,
            floor,
        })
    }
}

impl EpsilonSchedule for LinearDecay {
    fn epsilon(&self, episode: usize) -> f64 {
        (self.initial - self.step * episode as f64).max(self.floor)
    }
}

/// ε = max(floor, initial * decay_rate^episode)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    initial: f64,
    decay_rate: f64,
    floor: f64,
}

impl ExponentialDecay {
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `initial` and `floor`
    /// lie in [0, 1] with `floor <= initial`, and `decay_rate` is in (0, 1].
    pub fn new(initial: f64, decay_rate: f64, floor: f64) -> Result<Self> {
        check_bounds(initial, floor)?;
        if !(decay_rate > 0.0 && decay_rate <= 1.0) {
            return Err(Error::InvalidHyperparameter {
                name: "decay_rate",
                value: decay_rate,
                expected: "a value in (0, 1]",
            });
        }
        Ok(Self {
            initial,
            decay_rate,
            floor,
        })
    }
}

impl EpsilonSchedule for ExponentialDecay {
    fn epsilon(&self, episode: usize) -> f64 {
        (self.initial * self.decay_rate.powf(episode as f64)).max(self.floor)
    }
}

/// Serializable description of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleConfig {
    Constant {
        epsilon: f64,
    },
    Linear {
        initial: f64,
        step: f64,
        floor: f64,
    },
    Exponential {
        initial: f64,
        decay_rate: f64,
        floor: f64,
    },
}

/// Validated schedule built from a [`ScheduleConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleConfig", into = "ScheduleConfig")]
pub enum Schedule {
    Constant(ConstantEpsilon),
    Linear(LinearDecay),
    Exponential(ExponentialDecay),
}

impl Default for Schedule {
    /// Exponential decay from 0.25 to 0.01, halving roughly every 70 episodes
    fn default() -> Self {
        Schedule::Exponential(ExponentialDecay {
            initial: 0.25,
            decay_rate: 0.99,
            floor: 0.01,
        })
    }
}

impl TryFrom<ScheduleConfig> for Schedule {
    type Error = Error;

    fn try_from(config: ScheduleConfig) -> Result<Self> {
        Ok(match config {
            ScheduleConfig::Constant { epsilon } => {
                Schedule::Constant(ConstantEpsilon::new(epsilon)?)
            }
            ScheduleConfig::Linear {
                initial,
                step,
                floor,
            } => Schedule::Linear(LinearDecay::new(initial, step, floor)?),
            ScheduleConfig::Exponential {
                initial,
                decay_rate,
                floor,
            } => Schedule::Exponential(ExponentialDecay::new(initial, decay_rate, floor)?),
        })
    }
}

impl From<Schedule> for ScheduleConfig {
    fn from(schedule: Schedule) -> Self {
        match schedule {
            Schedule::Constant(s) => ScheduleConfig::Constant { epsilon: s.epsilon },
            Schedule::Linear(s) => ScheduleConfig::Linear {
                initial: s.initial,
                step: s.step,
                floor: s.floor,
            },
            Schedule::Exponential(s) => ScheduleConfig::Exponential {
                initial: s.initial,
                decay_rate: s.decay_rate,
                floor: s.floor,
            },
        }
    }
}

impl EpsilonSchedule for Schedule {
    fn epsilon(&self, episode: usize) -> f64 {
        match self {
            Schedule::Constant(s) => s.epsilon(episode),
            Schedule::Linear(s) => s.epsilon(episode),
            Schedule::Exponential(s) => s.epsilon(episode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_non_increasing_within(schedule: &dyn EpsilonSchedule, floor: f64, initial: f64) {
        let mut previous = schedule.epsilon(0);
        assert_eq!(previous, initial);
        for episode in 1..2_000 {
            let current = schedule.epsilon(episode);
            assert!(current <= previous, "episode {episode}: {current} > {previous}");
            assert!((floor..=initial).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_exponential_decay_is_monotone_and_bounded() {
        let schedule = ExponentialDecay::new(0.9, 0.995, 0.05).unwrap();
        assert_non_increasing_within(&schedule, 0.05, 0.9);
        assert_eq!(schedule.epsilon(100_000), 0.05);
    }

    #[test]
    fn test_linear_decay_is_monotone_and_bounded() {
        let schedule = LinearDecay::new(1.0, 0.001, 0.1).unwrap();
        assert_non_increasing_within(&schedule, 0.1, 1.0);
        assert!((schedule.epsilon(500) - 0.5).abs() < 1e-12);
        assert_eq!(schedule.epsilon(5_000), 0.1);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(ExponentialDecay::new(1.2, 0.9, 0.0).is_err());
        assert!(ExponentialDecay::new(0.5, 0.0, 0.0).is_err());
        assert!(ExponentialDecay::new(0.5, 1.1, 0.0).is_err());
        assert!(ExponentialDecay::new(0.1, 0.9, 0.2).is_err());
        assert!(LinearDecay::new(0.5, -0.1, 0.0).is_err());
        assert!(ConstantEpsilon::new(-0.5).is_err());
    }

    #[test]
    fn test_closure_schedule() {
        let halving = |episode: usize| 0.8 / (1 << episode.min(10)) as f64;
        assert_eq!(halving.epsilon(0), 0.8);
        assert_eq!(halving.epsilon(2), 0.2);
    }

    #[test]
    fn test_schedule_config_json() {
        let schedule: Schedule = serde_json::from_str(
            r#"{ "kind": "linear", "initial": 0.5, "step": 0.1, "floor": 0.0 }"#,
        )
        .unwrap();
        assert!((schedule.epsilon(3) - 0.2).abs() < 1e-12);

        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains(r#""kind":"linear""#));

        let invalid = serde_json::from_str::<Schedule>(
            r#"{ "kind": "exponential", "initial": 0.5, "decay_rate": 2.0, "floor": 0.0 }"#,
        );
        assert!(invalid.is_err());
    }
}
