//! Small, fast configurations for tests.

use thunt_core::TaskParams;
use thunt_engine::GameConfig;
use thunt_model::TaskModel;

/// `d = 2`, `n_h = 1`: 4 nodes, 16 states.
pub fn small_params() -> TaskParams {
    TaskParams::new(2, 1).unwrap()
}

/// The model for [`small_params`], built without a cache.
pub fn small_model() -> TaskModel {
    TaskModel::build(&small_params()).unwrap()
}

/// One round of `n_trials` trials with a fixed seed.
pub fn game_config(params: TaskParams, n_trials: usize, seed: u64) -> GameConfig {
    let mut config = GameConfig::new(params);
    config.n_trials = n_trials;
    config.seed = seed;
    config
}
