use nest_core::nestgen::derive_level_seed;
use nest_core::{GeneratedNest, NestConfig, NestGenerator, SeededRandom, generate_nest};

fn generate(seed: u64, config: NestConfig) -> GeneratedNest {
    NestGenerator::new(config)
        .expect("config should be valid")
        .generate(&mut SeededRandom::new(seed))
}

#[test]
fn identical_seed_and_config_produce_identical_nests() {
    for seed in [0_u64, 1, 12_345, 987_654_321] {
        let left = generate(seed, NestConfig::default());
        let right = generate(seed, NestConfig::default());

        assert_eq!(left.graph.len(), right.graph.len(), "seed={seed}");
        for (a, b) in left.graph.rooms().iter().zip(right.graph.rooms()) {
            assert_eq!(a.rect, b.rect, "seed={seed}");
            assert_eq!(a.connections, b.connections, "seed={seed}");
        }
        assert_eq!(left.canonical_bytes(), right.canonical_bytes(), "seed={seed}");
    }
}

#[test]
fn generator_carries_no_state_between_calls() {
    let generator = NestGenerator::new(NestConfig::default()).expect("default config is valid");
    let first = generator.generate(&mut SeededRandom::new(42));
    let _unrelated = generator.generate(&mut SeededRandom::new(7));
    let again = generator.generate(&mut SeededRandom::new(42));
    assert_eq!(first, again);
}

#[test]
fn config_changes_alter_the_layout() {
    let shipped = generate(2_026, NestConfig::default());
    let wide = generate(2_026, NestConfig { corridor_width: 96.0, ..NestConfig::default() });
    assert_ne!(shipped.fingerprint(), wide.fingerprint());
}

#[test]
fn run_helper_replays_a_level_from_its_run_seed() {
    let config = NestConfig::default();
    let helper = generate_nest(555, 3, &config).expect("default config is valid");
    let manual = generate(derive_level_seed(555, 3), config);
    assert_eq!(helper.fingerprint(), manual.fingerprint());
}

#[test]
fn zero_depth_limit_yields_only_the_queen() {
    for seed in 0..32 {
        let nest = generate(seed, NestConfig { max_depth: 0, ..NestConfig::default() });
        assert_eq!(nest.graph.len(), 1, "seed={seed}");
        assert_eq!(nest.graph.corridors().count(), 0);
        assert!(nest.spawn_points.is_empty());
        assert!(nest.enemy_spawns().is_empty());
    }
}

#[test]
fn zero_branch_probability_matches_zero_depth_limit() {
    for seed in 0..32 {
        let config = NestConfig { branch_probability: 0.0, max_depth: 9, ..NestConfig::default() };
        let never_branch = generate(seed, config);
        let no_depth = generate(seed, NestConfig { max_depth: 0, ..NestConfig::default() });

        assert_eq!(never_branch.graph, no_depth.graph, "seed={seed}");
        assert_eq!(never_branch.spawn_points, no_depth.spawn_points);
        assert_eq!(never_branch.bounds, no_depth.bounds);
        assert_eq!(never_branch.grid, no_depth.grid);
        assert_eq!(never_branch.stats.branch_attempts, 0);
    }
}
