use std::collections::HashSet;

use nest_core::nestgen::verify;
use nest_core::{NestConfig, NestGenerator, RoomKind, SeededRandom};
use proptest::prelude::*;

fn arbitrary_config() -> impl Strategy<Value = NestConfig> {
    (
        0_u32..=6,
        0.0_f64..=1.0,
        0.0_f64..=0.2,
        100.0_f64..=260.0,
        0.0_f64..=200.0,
        16.0_f64..=96.0,
        40.0_f64..=150.0,
        0.0_f64..=150.0,
        prop_oneof![Just(8.0_f64), Just(16.0), Just(20.0)],
    )
        .prop_map(|(max_depth, probability, decay, room, spread, corridor, length, extra, tile)| {
            NestConfig {
                room_min_size: room,
                room_max_size: room + spread,
                corridor_width: corridor,
                corridor_min_length: length,
                corridor_max_length: length + extra,
                branch_probability: probability,
                depth_decay: decay,
                max_depth,
                tile_size: tile,
            }
        })
        .prop_filter("config must validate", |config| config.validate().is_ok())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_nest_satisfies_structural_invariants(
        seed in any::<u64>(),
        config in arbitrary_config(),
    ) {
        let nest = NestGenerator::new(config.clone())
            .expect("strategy only yields valid configs")
            .generate(&mut SeededRandom::new(seed));
        prop_assert_eq!(verify(&nest, &config), Ok(()));
    }

    #[test]
    fn depth_limit_bounds_every_room(seed in any::<u64>(), config in arbitrary_config()) {
        let nest = NestGenerator::new(config.clone())
            .expect("strategy only yields valid configs")
            .generate(&mut SeededRandom::new(seed));
        for room in nest.graph.rooms() {
            prop_assert!(room.depth <= config.max_depth);
        }
        let queens = nest.graph.rooms().iter().filter(|room| room.kind == RoomKind::Queen).count();
        prop_assert_eq!(queens, 1);
    }

    #[test]
    fn spawn_points_only_land_in_normal_rooms(seed in any::<u64>()) {
        let nest = NestGenerator::new(NestConfig::default())
            .expect("default config is valid")
            .generate(&mut SeededRandom::new(seed));
        let normal_ids: HashSet<_> = nest.graph.normal_rooms().map(|room| room.id).collect();
        for spawn in &nest.spawn_points {
            prop_assert!(normal_ids.contains(&spawn.room));
        }
        for enemy in nest.enemy_spawns() {
            prop_assert!(normal_ids.contains(&enemy.room));
        }
    }

    #[test]
    fn edge_count_matches_a_tree(seed in any::<u64>()) {
        let nest = NestGenerator::new(NestConfig::default())
            .expect("default config is valid")
            .generate(&mut SeededRandom::new(seed));
        let endpoints: usize = nest.graph.rooms().iter().map(|room| room.connections.len()).sum();
        prop_assert_eq!(endpoints / 2, nest.graph.len() - 1);
        prop_assert_eq!(nest.graph.corridors().count() * 2 + 1, nest.graph.len());
    }
}
