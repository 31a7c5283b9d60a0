//! Wrapper of Gymnasium's lunar lander implemented in Python.
use crate::{
    util::{array1_to_pyobj, pyany_to_array1, pyobj_to_array1, pyobj_to_box_space, pyobj_to_frame},
    GymLanderConfig,
};
use anyhow::Result;
use log::{info, trace, warn};
use ndarray::{Array1, Array3};
use pyo3::{
    types::{IntoPyDict, PyDict, PyTuple},
    PyObject, Python,
};
use reddim_core::{BoxSpace, OptionValue, RenderMode, ResetOptions, SimInfo, SimStep, Simulation};
use std::time::Duration;

/// Lunar lander in [Gymnasium](https://gymnasium.farama.org).
#[derive(Debug)]
pub struct GymLander {
    env: PyObject,

    action_space: BoxSpace,

    observation_space: BoxSpace,

    render_mode: Option<RenderMode>,

    wait: Duration,
}

impl GymLander {
    /// Builds the environment with `gymnasium.make()`.
    pub fn build(config: &GymLanderConfig) -> Result<Self> {
        Python::with_gil(|py| {
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Initialize GymLander");
            info!("Python version = {}", ver);

            let gym = py.import("gymnasium")?;
            let kwargs = PyDict::new(py);
            kwargs.set_item("continuous", config.continuous)?;
            if let Some(mode) = config.render_mode {
                kwargs.set_item("render_mode", mode.as_str())?;
            }
            let env = gym
                .getattr("make")?
                .call((config.name.as_str(),), Some(kwargs))?;
            let env: PyObject = env.into();

            let action_space = pyobj_to_box_space(&env.getattr(py, "action_space")?)?;
            let observation_space = pyobj_to_box_space(&env.getattr(py, "observation_space")?)?;
            info!("Action space = {:?}", action_space);
            info!("Observation space = {:?}", observation_space);

            Ok(Self {
                env,
                action_space,
                observation_space,
                render_mode: config.render_mode,
                wait: config.wait,
            })
        })
    }

    fn sample_space(&self, name: &str) -> Result<Array1<f32>> {
        let sample = Python::with_gil(|py| -> Result<_> {
            Ok(self.env.getattr(py, name)?.call_method0(py, "sample")?)
        })?;
        pyobj_to_array1(&sample)
    }
}

impl Simulation for GymLander {
    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// Calls `seed()` of the action and observation spaces in Python.
    fn seed_spaces(&mut self, seed: u64) -> Result<()> {
        trace!("GymLander::seed_spaces({})", seed);
        Python::with_gil(|py| {
            for name in ["action_space", "observation_space"].iter() {
                self.env
                    .getattr(py, *name)?
                    .call_method1(py, "seed", (seed,))?;
            }
            Ok(())
        })
    }

    fn sample_action(&mut self) -> Result<Array1<f32>> {
        self.sample_space("action_space")
    }

    fn sample_observation(&mut self) -> Result<Array1<f32>> {
        self.sample_space("observation_space")
    }

    /// Calls `env.reset(seed=..., options=...)`; keyword arguments are omitted when not set.
    fn reset(&mut self, options: &ResetOptions) -> Result<(Array1<f32>, SimInfo)> {
        trace!("GymLander::reset()");
        Python::with_gil(|py| {
            let kwargs = PyDict::new(py);
            if let Some(seed) = options.seed {
                kwargs.set_item("seed", seed)?;
            }
            if !options.options.is_empty() {
                let dict = PyDict::new(py);
                for (key, value) in options.options.iter() {
                    match value {
                        OptionValue::Bool(v) => dict.set_item(key, *v)?,
                        OptionValue::Int(v) => dict.set_item(key, *v)?,
                        OptionValue::Float(v) => dict.set_item(key, *v)?,
                        OptionValue::Str(v) => dict.set_item(key, v.as_str())?,
                    }
                }
                kwargs.set_item("options", dict)?;
            }
            let ret = self.env.call_method(py, "reset", (), Some(kwargs))?;
            let ret: &PyTuple = ret.extract(py)?;
            let state = pyany_to_array1(ret.get_item(0))?;
            Ok((state, SimInfo::default()))
        })
    }

    fn step(&mut self, act: &Array1<f32>) -> Result<SimStep> {
        trace!("GymLander::step()");
        let act = array1_to_pyobj(act);
        let step = Python::with_gil(|py| -> Result<_> {
            let ret = self.env.call_method(py, "step", (act,), None)?;
            let step: &PyTuple = ret.extract(py)?;
            let state = pyany_to_array1(step.get_item(0))?;
            let reward: f32 = step.get_item(1).extract()?;
            let is_terminated = step.get_item(2).is_true()?;
            let is_truncated = step.get_item(3).is_true()?;
            Ok(SimStep::new(
                state,
                reward,
                is_terminated,
                is_truncated,
                SimInfo::default(),
            ))
        })?;

        if self.render_mode == Some(RenderMode::Human) && self.wait > Duration::from_millis(0) {
            std::thread::sleep(self.wait);
        }

        Ok(step)
    }

    /// Calls `env.render()`.
    ///
    /// Gymnasium fixes the render mode when the environment is made; `mode` is
    /// only compared with it.
    fn render(&mut self, mode: RenderMode) -> Result<Option<Array3<u8>>> {
        trace!("GymLander::render({:?})", mode);
        if self.render_mode != Some(mode) {
            warn!(
                "render mode {:?} requested, environment was made with {:?}",
                mode, self.render_mode
            );
        }
        let frame = Python::with_gil(|py| self.env.call_method0(py, "render"))?;
        pyobj_to_frame(&frame)
    }

    fn close(&mut self) -> Result<()> {
        trace!("GymLander::close()");
        Python::with_gil(|py| self.env.call_method0(py, "close"))?;
        Ok(())
    }
}
