//! Whole-pipeline checks through the facade.

use thunt::prelude::*;
use thunt_test_utils::{FlakyStore, RecordingRenderer};

#[test]
fn renderer_sees_only_fresh_builds() {
    let params = TaskParams::new(2, 1).unwrap();
    let renderer = RecordingRenderer::new();
    let mut cache =
        ModelCache::new(MemoryStore::new()).with_renderer(Box::new(renderer.clone()));

    cache.load_model(&params).unwrap();
    assert_eq!(
        renderer.names(),
        vec![
            "S",
            "O",
            "A",
            "phi_drill",
            "phi_north",
            "phi_east",
            "phi_south",
            "phi_west",
            "omega_drill",
            "omega_step"
        ]
    );
    let rendered = renderer.rendered();
    assert!(rendered.iter().all(|r| r.destination == "dim-2_hide-1"));
    let phi_east = &rendered[5];
    assert_eq!(phi_east.shape, (16, 16));
    assert_eq!(phi_east.dense.iter().sum::<f64>(), 16.0);

    cache.load_model(&params).unwrap();
    assert_eq!(renderer.rendered().len(), 10);
}

#[test]
fn render_failure_does_not_fail_the_build() {
    let params = TaskParams::new(2, 1).unwrap();
    let mut renderer = RecordingRenderer::new();
    renderer.fail = true;
    let mut cache = ModelCache::new(MemoryStore::new()).with_renderer(Box::new(renderer));
    assert!(cache.load_model(&params).is_ok());
}

#[test]
fn failed_saves_still_return_the_model() {
    let params = TaskParams::new(2, 1).unwrap();
    let mut store = FlakyStore::new(MemoryStore::new());
    store.fail_saves = true;
    let mut cache = ModelCache::new(store);
    let model = cache.load_model(&params).unwrap();
    assert_eq!(model, TaskModel::build(&params).unwrap());
    assert_eq!(cache.stats().save_failures, 10);
    assert!(cache.store().inner().is_empty());
}

#[test]
fn unreadable_store_always_rebuilds() {
    let params = TaskParams::new(2, 1).unwrap();
    let mut store = FlakyStore::new(MemoryStore::new());
    store.fail_loads = true;
    let mut cache = ModelCache::new(store);
    cache.load_model(&params).unwrap();
    cache.load_model(&params).unwrap();
    let stats = cache.stats();
    assert_eq!(stats.builds, 20);
    assert_eq!(stats.corrupt, 20);
    assert_eq!(stats.hits, 0);
    assert_eq!(cache.store().loads, 20);
}

#[test]
fn disk_cache_then_simulate() {
    let dir = tempfile::tempdir().unwrap();
    let params = TaskParams::new(3, 1).unwrap();
    let model = ModelCache::new(DirStore::new(dir.path()))
        .load_model(&params)
        .unwrap();

    let mut config = GameConfig::new(params);
    config.n_trials = 12;
    config.tau = Some(1.0);
    let agent = FnAgent::new("valenced", |view: &TrialView<'_>, _: &mut dyn RngCore| {
        let valences = view
            .legal
            .iter()
            .map(|a| if a.is_step() { 1.0 } else { 0.0 })
            .collect();
        Decision::with_valences(view.legal[0], valences)
    });
    let mut sim = GameSimulator::new(&model, config, agent).unwrap();
    let t = sim.play_game().unwrap();
    assert_eq!(t.agent, "valenced");
    assert_eq!(t.len(), 12);
    let grid = GridWorld::new(3).unwrap();
    for r in &t.records {
        let n = r.valences.as_ref().map(Vec::len);
        assert_eq!(n, Some(grid.legal_actions(r.s1).len()));
    }
}
