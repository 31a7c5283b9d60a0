//! This module is used for tests.
use crate::{BoxSpace, RenderMode, ResetOptions, SimInfo, SimStep, Simulation, StateProcessor};
use anyhow::Result;
use ndarray::{arr1, s, Array1, Array2, Array3};
use std::{
    cell::RefCell,
    collections::VecDeque,
    f32::consts::PI,
    sync::{Arc, Mutex},
};

/// Length of raw states of [`DummySimulation`], as in Gymnasium's lunar lander.
pub const DUMMY_STATE_DIM: usize = 8;

/// Calls received by a [`DummySimulation`].
#[derive(Clone, Debug, Default)]
pub struct DummyCalls {
    /// Options of every reset.
    pub resets: Vec<ResetOptions>,

    /// Actions of every step.
    pub actions: Vec<Array1<f32>>,

    /// Modes of every render.
    pub renders: Vec<RenderMode>,

    /// Seeds given to the space samplers.
    pub space_seeds: Vec<u64>,

    /// Set when the simulation is closed.
    pub closed: bool,
}

/// Scripted simulation.
///
/// Raw states are taken from a queue on every reset and step, rewards and
/// termination flags from another one on every step. Zeros and non-terminal
/// outcomes are used once the queues are empty.
#[derive(Debug)]
pub struct DummySimulation {
    action_space: BoxSpace,
    observation_space: BoxSpace,
    states: VecDeque<Array1<f32>>,
    outcomes: VecDeque<(f32, bool, bool)>,
    calls: Arc<Mutex<DummyCalls>>,
}

impl Default for DummySimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl DummySimulation {
    /// Constructs a simulation with the spaces of Gymnasium's continuous lunar lander.
    pub fn new() -> Self {
        let low = arr1(&[-2.5, -2.5, -10.0, -10.0, -2.0 * PI, -10.0, 0.0, 0.0]);
        let high = arr1(&[2.5, 2.5, 10.0, 10.0, 2.0 * PI, 10.0, 1.0, 1.0]);
        Self {
            action_space: BoxSpace::symmetric(2, 1.0),
            observation_space: BoxSpace::new(low, high).expect("valid lunar lander bounds"),
            states: VecDeque::new(),
            outcomes: VecDeque::new(),
            calls: Arc::new(Mutex::new(DummyCalls::default())),
        }
    }

    /// Queues a raw state.
    pub fn state(mut self, state: Array1<f32>) -> Self {
        self.states.push_back(state);
        self
    }

    /// Queues the reward and flags of a step.
    pub fn outcome(mut self, reward: f32, is_terminated: bool, is_truncated: bool) -> Self {
        self.outcomes.push_back((reward, is_terminated, is_truncated));
        self
    }

    /// Shared record of the calls, readable after the simulation is dropped.
    pub fn calls(&self) -> Arc<Mutex<DummyCalls>> {
        self.calls.clone()
    }

    fn next_state(&mut self) -> Array1<f32> {
        self.states
            .pop_front()
            .unwrap_or_else(|| Array1::zeros(DUMMY_STATE_DIM))
    }

    fn record(&self, f: impl FnOnce(&mut DummyCalls)) {
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut calls);
    }
}

impl Simulation for DummySimulation {
    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    fn seed_spaces(&mut self, seed: u64) -> Result<()> {
        self.action_space.seed(seed);
        self.observation_space.seed(seed);
        self.record(|c| c.space_seeds.push(seed));
        Ok(())
    }

    fn sample_action(&mut self) -> Result<Array1<f32>> {
        Ok(self.action_space.sample())
    }

    fn sample_observation(&mut self) -> Result<Array1<f32>> {
        Ok(self.observation_space.sample())
    }

    fn reset(&mut self, options: &ResetOptions) -> Result<(Array1<f32>, SimInfo)> {
        self.record(|c| c.resets.push(options.clone()));
        Ok((self.next_state(), SimInfo::default()))
    }

    fn step(&mut self, act: &Array1<f32>) -> Result<SimStep> {
        self.record(|c| c.actions.push(act.clone()));
        let (reward, is_terminated, is_truncated) =
            self.outcomes.pop_front().unwrap_or((0.0, false, false));
        let state = self.next_state();
        Ok(SimStep::new(
            state,
            reward,
            is_terminated,
            is_truncated,
            SimInfo::default(),
        ))
    }

    fn render(&mut self, mode: RenderMode) -> Result<Option<Array3<u8>>> {
        self.record(|c| c.renders.push(mode));
        Ok(match mode {
            RenderMode::Human => None,
            RenderMode::RgbArray => Some(Array3::zeros((4, 6, 3))),
        })
    }

    fn close(&mut self) -> Result<()> {
        self.record(|c| c.closed = true);
        Ok(())
    }
}

/// Processor returning the first `n` components of each row.
#[derive(Clone, Debug)]
pub struct FirstComponents {
    n: usize,
}

impl FirstComponents {
    /// Keeps `n` components.
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl StateProcessor for FirstComponents {
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>> {
        Ok(batch.slice(s![.., ..self.n]).to_owned())
    }
}

/// Processor remembering the shape of its last input and returning its first row.
#[derive(Debug, Default)]
pub struct ShapeOnlyProcessor {
    last_shape: RefCell<Option<Vec<usize>>>,
}

impl ShapeOnlyProcessor {
    /// Shape of the last batch given to the processor.
    pub fn last_shape(&self) -> Option<Vec<usize>> {
        self.last_shape.borrow().clone()
    }
}

impl StateProcessor for ShapeOnlyProcessor {
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>> {
        self.last_shape.replace(Some(batch.shape().to_vec()));
        Ok(batch)
    }
}
