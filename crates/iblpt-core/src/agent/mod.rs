//! Cognitive agent: memory, activation, valuation, blending and choice policy
//! composed into one trial-by-trial state machine.
//!
//! Both model variants use this single type; they differ only in the
//! [`Valuation`](crate::valuation::Valuation) carried by their parameters.

mod policy;

pub use policy::{prefer, ChoicePolicy};

use rand::Rng;

use crate::activation::ActivationConfig;
use crate::blending::blended_value;
use crate::error::IblResult;
use crate::memory::Memory;
use crate::types::{Choice, GambleProblem, Instance, ModelParameters};

/// Mutable state of one simulated participant.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub memory: Memory,
    pub last_choice: Option<Choice>,
    /// Index of the trial about to be played, starting at 1.
    pub trial: u32,
}

impl AgentState {
    /// Fresh state: seeded memory, no previous choice, trial 1.
    pub fn new() -> Self {
        Self {
            memory: Memory::seeded(),
            last_choice: None,
            trial: 1,
        }
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new()
    }
}

/// A simulated decision maker.
#[derive(Debug, Clone)]
pub struct Agent {
    params: ModelParameters,
    activation: ActivationConfig,
    policy: ChoicePolicy,
    state: AgentState,
}

impl Agent {
    /// Create an agent in its reset state.
    pub fn new(params: ModelParameters) -> Self {
        Self {
            activation: ActivationConfig::from(&params),
            policy: ChoicePolicy::new(params.inertia),
            params,
            state: AgentState::new(),
        }
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Discard all experience.
    pub fn reset(&mut self) {
        self.state = AgentState::new();
    }

    /// Blended value of `option` given the current memory.
    pub fn blended_value<R: Rng>(&self, option: Choice, rng: &mut R) -> IblResult<f64> {
        blended_value(
            option,
            &self.state.memory,
            self.state.trial,
            &self.activation,
            &self.params.valuation,
            rng,
        )
    }

    /// Choose an option for the current trial and remember it as the last choice.
    pub fn choose<R: Rng>(&mut self, rng: &mut R) -> IblResult<Choice> {
        let state = &self.state;
        let choice = self.policy.choose(state.last_choice, rng, |option, rng| {
            blended_value(
                option,
                &state.memory,
                state.trial,
                &self.activation,
                &self.params.valuation,
                rng,
            )
        })?;
        self.state.last_choice = Some(choice);
        Ok(choice)
    }

    /// Record the outcome of `choice` and advance to the next trial.
    pub fn update(&mut self, choice: Choice, outcome: f64) {
        self.state
            .memory
            .record(Instance::new(choice, outcome, self.state.trial));
        self.state.trial += 1;
    }

    /// Play one trial of `problem`: choose, draw the payoff, learn from it.
    pub fn step<R: Rng>(&mut self, problem: &GambleProblem, rng: &mut R) -> IblResult<Choice> {
        let choice = self.choose(rng)?;
        let outcome = problem.sample_outcome(choice, rng);
        self.update(choice, outcome);
        Ok(choice)
    }

    /// Reset, then play `trials` consecutive trials of `problem`.
    pub fn run_n<R: Rng>(
        &mut self,
        problem: &GambleProblem,
        trials: usize,
        rng: &mut R,
    ) -> IblResult<Vec<Choice>> {
        self.reset();
        let mut choices = Vec::with_capacity(trials);
        for _ in 0..trials {
            choices.push(self.step(problem, rng)?);
        }
        Ok(choices)
    }
}
