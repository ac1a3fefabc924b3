//! Build (or load) a model in a cache directory and play a few games.
//!
//! ```text
//! cargo run -p thunt-engine --example quickstart -- [cache_dir]
//! ```

use std::io;

use thunt_cache::{DirStore, ModelCache};
use thunt_core::TaskParams;
use thunt_engine::{GameConfig, GameSimulator, JsonLinesSink, RandomAgent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "thunt-cache".to_string());
    let params = TaskParams::new(3, 2)?;

    let mut cache = ModelCache::new(DirStore::new(&dir));
    let model = cache.load_model(&params)?;
    let stats = cache.stats();
    eprintln!(
        "{} states, {} artifacts built, {} loaded from {dir}",
        model.states().len(),
        stats.builds,
        stats.hits
    );

    let mut config = GameConfig::new(params);
    config.n_rounds = 2;
    config.n_trials = 6;
    config.tau = Some(0.5);
    config.seed = 7;
    let mut sim = GameSimulator::new(&model, config, RandomAgent::new())?;

    let mut sink = JsonLinesSink::new(io::stdout().lock());
    sim.run_games(3, &mut sink)?;
    eprintln!("wrote {} trial records", sink.lines());
    Ok(())
}
