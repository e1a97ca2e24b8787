use engram_cache::PheromoneCache;
use engram_core::config::CacheConfig;
use proptest::prelude::*;

const MAX_ITEMS: usize = 8;
const MAX_TOKENS: usize = 200;

fn small_config() -> CacheConfig {
    CacheConfig {
        max_items: MAX_ITEMS,
        max_tokens: MAX_TOKENS,
        ..CacheConfig::default()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Promote { slot: u8, tokens: usize },
    Reinforce { slot: u8 },
    Evaporate,
    Lookup { x: f32, y: f32 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..24, 1usize..60).prop_map(|(slot, tokens)| Op::Promote { slot, tokens }),
        (0u8..24).prop_map(|slot| Op::Reinforce { slot }),
        Just(Op::Evaporate),
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y)| Op::Lookup { x, y }),
    ]
}

fn embedding_for_slot(slot: u8) -> Vec<f32> {
    let angle = slot as f32 * 0.26;
    vec![angle.cos(), angle.sin()]
}

proptest! {
    // Capacity and pheromone bounds hold after every operation, not just at
    // quiescence.
    #[test]
    fn invariants_hold_under_arbitrary_operation_sequences(
        ops in proptest::collection::vec(arb_op(), 1..120),
    ) {
        let cfg = small_config();
        let (pmin, pmax) = (cfg.pheromone_min, cfg.pheromone_max);
        let cache = PheromoneCache::new(cfg);
        let mut seen_keys: Vec<String> = Vec::new();

        for op in &ops {
            match op {
                Op::Promote { slot, tokens } => {
                    let key = format!("slot-{slot}");
                    cache.promote(&key, "content", embedding_for_slot(*slot), *tokens);
                    if !seen_keys.contains(&key) {
                        seen_keys.push(key);
                    }
                }
                Op::Reinforce { slot } => {
                    cache.reinforce(&format!("slot-{slot}"));
                }
                Op::Evaporate => cache.evaporate_tick(),
                Op::Lookup { x, y } => {
                    cache.lookup(&[*x, *y]);
                }
            }

            let stats = cache.stats();
            prop_assert!(stats.item_count <= MAX_ITEMS, "item count {}", stats.item_count);
            prop_assert!(stats.total_tokens <= MAX_TOKENS, "token total {}", stats.total_tokens);
            prop_assert!(cache.check_invariants().is_ok());
            for key in &seen_keys {
                if let Some(p) = cache.pheromone(key) {
                    prop_assert!((pmin..=pmax).contains(&p), "pheromone {p} for {key}");
                }
            }
        }
    }

    // Evaporation applied n times with no intervening hits is exactly n
    // subtractive steps, clamped at the floor.
    #[test]
    fn repeated_evaporation_is_linear_until_the_floor(ticks in 1usize..40) {
        let cfg = small_config();
        let expected = (cfg.pheromone_initial - ticks as f64 * cfg.evap_rate)
            .max(cfg.pheromone_min);
        let cache = PheromoneCache::new(cfg);
        cache.promote("a", "content", vec![1.0, 0.0], 5);

        for _ in 0..ticks {
            cache.evaporate_tick();
        }
        let got = cache.pheromone("a").unwrap();
        prop_assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
    }
}
