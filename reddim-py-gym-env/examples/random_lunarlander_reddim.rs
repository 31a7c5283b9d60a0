use anyhow::Result;
use log::info;
use ndarray::Array1;
use reddim_core::{RandomSource, ReducedLanderEnv, RenderMode, ResetOptions};
use reddim_py_gym_env::{GymLander, GymLanderConfig};
use std::time::Duration;

const N_EPISODES: usize = 5;

fn random_action(rng: &RandomSource, dim: usize) -> Array1<f32> {
    Array1::from_iter((0..dim).map(|_| rng.uniform_in(-1.0, 1.0)))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let gym_config = GymLanderConfig::default()
        .render_mode(Some(RenderMode::Human))
        .wait(Duration::from_millis(10));
    let rng = RandomSource::default();

    let sim = GymLander::build(&gym_config)?;
    let mut env = ReducedLanderEnv::new(sim).with_random_source(rng.clone());
    env.seed(Some(42))?;
    let act_dim = env.action_space().dim();

    for ix in 0..N_EPISODES {
        let mut obs = env.reset(&ResetOptions::default().seed(ix as u64))?;
        let mut episode_return = 0f32;
        let mut n_unsafe = 0usize;
        let mut n_steps = 0usize;

        loop {
            if env.is_unsafe(&obs)? {
                n_unsafe += 1;
            }
            let step = env.step(&random_action(&rng, act_dim))?;
            episode_return += step.reward;
            n_steps += 1;
            obs = step.obs;
            if env.predict_done(&obs) || step.is_truncated {
                break;
            }
        }

        info!(
            "Episode {}: return = {:.2}, steps = {}, unsafe steps = {}",
            ix, episode_return, n_steps, n_unsafe
        );
    }

    env.close()
}
