//! Environment adapter.
use crate::{
    error::ReducedEnvError, BoxSpace, ExternalModelProjector, FixedSixSelector,
    ObservationReducer, RandomSource, ReducedLanderEnvConfig, RenderMode, ResetOptions,
    Simulation, StateProcessor, RAW_STATE_DIM,
};
use anyhow::Result;
use log::{info, trace, warn};
use ndarray::{Array1, Array3};

/// Episode step budget declared by the adapter. It is not enforced.
pub const MAX_EPISODE_STEPS: usize = 500;

/// Speed along either axis above which the lander is considered unsafe.
pub const VELOCITY_LIMIT: f32 = 2.0;

/// Result of [`ReducedLanderEnv::step`].
///
/// The information payload of the simulation is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedStep {
    /// Observation after the step.
    pub obs: Array1<f32>,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if the episode is truncated.
    pub is_truncated: bool,
}

/// A lunar lander environment with reduced-dimension observations.
///
/// `R` converts raw states of the simulation `S` into observations. Use
/// [`ReducedLanderEnv::new`] to take the first six components of the raw state
/// and [`ReducedLanderEnv::with_processor`] to project it with a pre-trained model.
#[derive(Debug)]
pub struct ReducedLanderEnv<S, R> {
    sim: S,

    reducer: R,

    action_space: BoxSpace,

    observation_space: BoxSpace,

    max_episode_steps: usize,

    /// Reset on every episode, never incremented.
    step_counter: usize,

    /// Termination flag of the last step.
    done: bool,

    rng: RandomSource,
}

impl<S: Simulation> ReducedLanderEnv<S, FixedSixSelector> {
    /// Observations are `[x, y, vx, vy, angle, angular_velocity]`.
    pub fn new(sim: S) -> Self {
        Self::from_reducer(sim, FixedSixSelector)
    }

    /// Builds the adapter from a configuration.
    ///
    /// `reduced_dim` of the configuration is ignored, as there is no processor.
    pub fn from_config(sim: S, config: &ReducedLanderEnvConfig) -> Result<Self> {
        if let Some(dim) = config.reduced_dim {
            warn!(
                "reduced_dim = {} is ignored without a state processor, observations have {} components",
                dim, RAW_STATE_DIM
            );
        }
        let mut env = Self::new(sim);
        env.seed(config.seed)?;
        Ok(env)
    }
}

impl<S: Simulation, P: StateProcessor> ReducedLanderEnv<S, ExternalModelProjector<P>> {
    /// Observations are outputs of `processor`, declared to have `reduced_dim` components.
    pub fn with_processor(sim: S, processor: P, reduced_dim: usize) -> Result<Self> {
        let reducer = ExternalModelProjector::new(processor, reduced_dim)?;
        Ok(Self::from_reducer(sim, reducer))
    }

    /// Builds the adapter with a processor from a configuration.
    ///
    /// The configuration must give `reduced_dim`.
    pub fn from_config_with_processor(
        sim: S,
        processor: P,
        config: &ReducedLanderEnvConfig,
    ) -> Result<Self> {
        let reduced_dim = config
            .reduced_dim
            .ok_or(ReducedEnvError::MissingReducedDim)?;
        let mut env = Self::with_processor(sim, processor, reduced_dim)?;
        env.seed(config.seed)?;
        Ok(env)
    }
}

impl<S: Simulation, R: ObservationReducer> ReducedLanderEnv<S, R> {
    /// Constructs the adapter with any observation reducer.
    pub fn from_reducer(sim: S, reducer: R) -> Self {
        let action_space = sim.action_space().clone();
        let observation_space = BoxSpace::symmetric(reducer.dim(), 1.0);
        info!(
            "Initialize ReducedLanderEnv: action space {:?}, observation dim {}",
            action_space.shape(),
            observation_space.dim()
        );

        Self {
            sim,
            reducer,
            action_space,
            observation_space,
            max_episode_steps: MAX_EPISODE_STEPS,
            step_counter: 0,
            done: false,
            rng: RandomSource::default(),
        }
    }

    /// Replaces the random source reseeded by [`ReducedLanderEnv::seed`].
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    /// Starts a new episode and returns its first observation.
    ///
    /// `options` are passed to the simulation as they are.
    pub fn reset(&mut self, options: &ResetOptions) -> Result<Array1<f32>> {
        trace!("ReducedLanderEnv::reset()");
        let (state, _info) = self.sim.reset(options)?;
        self.step_counter = 0;
        self.done = false;
        self.reducer.reduce(state)
    }

    /// Runs a step of the simulation.
    pub fn step(&mut self, act: &Array1<f32>) -> Result<ReducedStep> {
        trace!("ReducedLanderEnv::step()");
        let step = self.sim.step(act)?;
        self.done = step.is_terminated;
        let obs = self.reducer.reduce(step.state)?;

        Ok(ReducedStep {
            obs,
            reward: step.reward,
            is_terminated: step.is_terminated,
            is_truncated: step.is_truncated,
        })
    }

    /// Renders the simulation.
    pub fn render(&mut self, mode: RenderMode) -> Result<Option<Array3<u8>>> {
        trace!("ReducedLanderEnv::render({:?})", mode);
        self.sim.render(mode)
    }

    /// Closes the simulation.
    pub fn close(mut self) -> Result<()> {
        trace!("ReducedLanderEnv::close()");
        self.sim.close()
    }

    /// Seeds the random source and the samplers of the simulation's spaces.
    ///
    /// Does nothing for `None`. The random source may be shared with other
    /// owners of the handle, which observe the reseed.
    pub fn seed(&mut self, seed: Option<u64>) -> Result<()> {
        if let Some(seed) = seed {
            trace!("ReducedLanderEnv::seed({})", seed);
            self.rng.reseed(seed);
            self.sim.seed_spaces(seed)?;
        }
        Ok(())
    }

    /// Returns the termination flag of the last step.
    ///
    /// `_state` is not used.
    pub fn predict_done(&self, _state: &Array1<f32>) -> bool {
        self.done
    }

    /// Returns `true` if `|vx|` or `|vy|` exceeds [`VELOCITY_LIMIT`].
    ///
    /// `state` must be `[x, y, vx, vy, angle, angular_velocity]`.
    pub fn is_unsafe(&self, state: &Array1<f32>) -> Result<bool> {
        if state.len() != RAW_STATE_DIM {
            return Err(ReducedEnvError::StateArity(state.len()).into());
        }
        let (vx, vy) = (state[2], state[3]);
        Ok(vx.abs() > VELOCITY_LIMIT || vy.abs() > VELOCITY_LIMIT)
    }

    /// Samples an action with the sampler of the simulation.
    pub fn sample_action(&mut self) -> Result<Array1<f32>> {
        self.sim.sample_action()
    }

    /// Samples a raw state with the sampler of the simulation.
    pub fn sample_observation(&mut self) -> Result<Array1<f32>> {
        self.sim.sample_observation()
    }

    /// Action space, copied from the simulation.
    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    /// Observation space, `[-1, 1]^dim` where `dim` is declared by the reducer.
    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// Declared step budget of an episode.
    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    /// Always 0: reset sets it and nothing increments it.
    pub fn step_counter(&self) -> usize {
        self.step_counter
    }

    /// Handle to the random source.
    pub fn random_source(&self) -> &RandomSource {
        &self.rng
    }

    /// The wrapped simulation.
    pub fn sim(&self) -> &S {
        &self.sim
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{DummySimulation, FirstComponents, DUMMY_STATE_DIM};
    use ndarray::arr1;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn raw(i: f32) -> Array1<f32> {
        Array1::from_iter((0..DUMMY_STATE_DIM).map(|j| i + 0.1 * j as f32))
    }

    fn check_unsafe(state: &[f32]) -> bool {
        ReducedLanderEnv::new(DummySimulation::new())
            .is_unsafe(&arr1(state))
            .unwrap()
    }

    #[test]
    fn test_spaces() -> Result<()> {
        init();
        let env = ReducedLanderEnv::new(DummySimulation::new());
        assert_eq!(env.observation_space(), &BoxSpace::symmetric(6, 1.0));
        assert_eq!(env.action_space(), env.sim().action_space());

        let env =
            ReducedLanderEnv::with_processor(DummySimulation::new(), FirstComponents::new(3), 3)?;
        assert_eq!(env.observation_space(), &BoxSpace::symmetric(3, 1.0));
        Ok(())
    }

    #[test]
    fn test_reset_returns_first_six() -> Result<()> {
        init();
        let sim = DummySimulation::new().state(raw(1.0));
        let mut env = ReducedLanderEnv::new(sim);
        let obs = env.reset(&ResetOptions::default())?;
        assert_eq!(obs, arr1(&[1.0, 1.1, 1.2, 1.3, 1.4, 1.5]));
        Ok(())
    }

    #[test]
    fn test_reset_forwards_options() -> Result<()> {
        init();
        let sim = DummySimulation::new();
        let calls = sim.calls();
        let mut env = ReducedLanderEnv::new(sim);
        let options = ResetOptions::default()
            .seed(3)
            .option("wind_power", 5.0)
            .option("enable_wind", true);
        env.reset(&options)?;
        assert_eq!(calls.lock().unwrap().resets, vec![options]);
        Ok(())
    }

    #[test]
    fn test_step() -> Result<()> {
        init();
        let sim = DummySimulation::new()
            .state(raw(0.0))
            .state(raw(2.0))
            .outcome(-1.5, false, true);
        let calls = sim.calls();
        let mut env = ReducedLanderEnv::new(sim);
        env.reset(&ResetOptions::default())?;

        let act = arr1(&[0.5, -0.5]);
        let step = env.step(&act)?;
        assert_eq!(
            step,
            ReducedStep {
                obs: arr1(&[2.0, 2.1, 2.2, 2.3, 2.4, 2.5]),
                reward: -1.5,
                is_terminated: false,
                is_truncated: true,
            }
        );
        assert_eq!(calls.lock().unwrap().actions, vec![act]);
        Ok(())
    }

    #[test]
    fn test_predict_done() -> Result<()> {
        init();
        let sim = DummySimulation::new()
            .outcome(0.0, false, false)
            .outcome(100.0, true, false);
        let mut env = ReducedLanderEnv::new(sim);
        let state = Array1::zeros(6);
        assert!(!env.predict_done(&state));

        env.reset(&ResetOptions::default())?;
        assert!(!env.predict_done(&state));

        env.step(&arr1(&[0.0, 0.0]))?;
        assert!(!env.predict_done(&state));

        env.step(&arr1(&[0.0, 0.0]))?;
        assert!(env.predict_done(&state));
        // The argument is ignored.
        assert!(env.predict_done(&Array1::zeros(0)));

        env.reset(&ResetOptions::default())?;
        assert!(!env.predict_done(&state));
        Ok(())
    }

    #[test]
    fn test_truncation_does_not_set_done() -> Result<()> {
        init();
        let sim = DummySimulation::new().outcome(0.0, false, true);
        let mut env = ReducedLanderEnv::new(sim);
        env.reset(&ResetOptions::default())?;
        env.step(&arr1(&[0.0, 0.0]))?;
        assert!(!env.predict_done(&Array1::zeros(6)));
        Ok(())
    }

    #[test]
    fn test_is_unsafe() {
        assert!(check_unsafe(&[0.0, 0.0, 2.1, 0.0, 0.0, 0.0]));
        assert!(!check_unsafe(&[0.0, 0.0, 2.0, 0.0, 0.0, 0.0]));
        assert!(check_unsafe(&[0.0, 0.0, 0.0, -2.1, 0.0, 0.0]));
        assert!(!check_unsafe(&[0.0, 0.0, 0.0, -2.0, 0.0, 0.0]));
        assert!(!check_unsafe(&[9.0, 9.0, 1.9, -1.9, 9.0, 9.0]));
        assert!(check_unsafe(&[0.0, 0.0, -3.0, 3.0, 0.0, 0.0]));
    }

    #[test]
    fn test_is_unsafe_arity() {
        let env = ReducedLanderEnv::new(DummySimulation::new());
        for n in [5, 8].iter() {
            let err = env.is_unsafe(&Array1::zeros(*n)).unwrap_err();
            assert_eq!(
                err.downcast_ref::<ReducedEnvError>(),
                Some(&ReducedEnvError::StateArity(*n))
            );
        }
    }

    #[test]
    fn test_processor_dim() -> Result<()> {
        init();
        let sim = DummySimulation::new().state(raw(1.0)).state(raw(2.0));
        let mut env = ReducedLanderEnv::with_processor(sim, FirstComponents::new(3), 3)?;

        let obs = env.reset(&ResetOptions::default())?;
        assert_eq!(obs, arr1(&[1.0, 1.1, 1.2]));
        assert_eq!(obs.len(), env.observation_space().dim());

        let step = env.step(&arr1(&[0.0, 0.0]))?;
        assert_eq!(step.obs, arr1(&[2.0, 2.1, 2.2]));
        Ok(())
    }

    #[test]
    fn test_short_raw_state_propagates() {
        let sim = DummySimulation::new().state(Array1::zeros(4));
        let mut env = ReducedLanderEnv::new(sim);
        assert!(env.reset(&ResetOptions::default()).is_err());
    }

    #[test]
    fn test_seed_none_is_noop() -> Result<()> {
        let rng = RandomSource::seed_from_u64(5);
        let reference = RandomSource::seed_from_u64(5);
        let sim = DummySimulation::new();
        let calls = sim.calls();
        let mut env = ReducedLanderEnv::new(sim).with_random_source(rng.clone());

        env.seed(None)?;
        assert_eq!(rng.uniform(), reference.uniform());
        assert!(calls.lock().unwrap().space_seeds.is_empty());
        Ok(())
    }

    #[test]
    fn test_seed_reproducible() -> Result<()> {
        let sample = || -> Result<(Array1<f32>, Array1<f32>, f32)> {
            let mut env = ReducedLanderEnv::new(DummySimulation::new());
            env.seed(Some(42))?;
            let a1 = env.sample_action()?;
            let a2 = env.sample_action()?;
            Ok((a1, a2, env.random_source().uniform()))
        };
        let (a1, a2, u) = sample()?;
        let (b1, b2, v) = sample()?;
        assert_eq!(a1, b1);
        assert_eq!(a2, b2);
        assert_ne!(a1, a2);
        assert_eq!(u, v);
        Ok(())
    }

    #[test]
    fn test_seed_reaches_both_spaces() -> Result<()> {
        let sim = DummySimulation::new();
        let calls = sim.calls();
        let mut env = ReducedLanderEnv::new(sim);
        env.seed(Some(42))?;
        let o1 = env.sample_observation()?;
        env.seed(Some(42))?;
        let o2 = env.sample_observation()?;
        assert_eq!(o1, o2);
        assert!(env.sim().observation_space().contains(&o1));
        assert_eq!(calls.lock().unwrap().space_seeds, vec![42, 42]);
        Ok(())
    }

    #[test]
    fn test_step_budget_not_enforced() -> Result<()> {
        let mut env = ReducedLanderEnv::new(DummySimulation::new());
        env.reset(&ResetOptions::default())?;
        for _ in 0..MAX_EPISODE_STEPS + 10 {
            let step = env.step(&arr1(&[0.0, 0.0]))?;
            assert!(!step.is_truncated);
        }
        assert_eq!(env.max_episode_steps(), 500);
        assert_eq!(env.step_counter(), 0);
        Ok(())
    }

    #[test]
    fn test_render_and_close() -> Result<()> {
        let sim = DummySimulation::new();
        let calls = sim.calls();
        let mut env = ReducedLanderEnv::new(sim);
        assert!(env.render(RenderMode::default())?.is_none());
        let frame = env.render(RenderMode::RgbArray)?;
        assert_eq!(frame.map(|f| f.shape().to_vec()), Some(vec![4, 6, 3]));
        env.close()?;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.renders, vec![RenderMode::Human, RenderMode::RgbArray]);
        assert!(calls.closed);
        Ok(())
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let config = ReducedLanderEnvConfig::default().reduced_dim(4).seed(7);
        let sim = DummySimulation::new();
        let calls = sim.calls();
        let env = ReducedLanderEnv::from_config(sim, &config)?;
        assert_eq!(env.observation_space().dim(), 6);
        assert_eq!(calls.lock().unwrap().space_seeds, vec![7]);

        let env = ReducedLanderEnv::from_config_with_processor(
            DummySimulation::new(),
            FirstComponents::new(4),
            &config,
        )?;
        assert_eq!(env.observation_space().dim(), 4);
        Ok(())
    }

    #[test]
    fn test_from_config_missing_reduced_dim() {
        let config = ReducedLanderEnvConfig::default();
        let err = ReducedLanderEnv::from_config_with_processor(
            DummySimulation::new(),
            FirstComponents::new(4),
            &config,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReducedEnvError>(),
            Some(&ReducedEnvError::MissingReducedDim)
        );
    }
}
