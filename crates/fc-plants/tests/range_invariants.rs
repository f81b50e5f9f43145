//! Range invariants of the plant models under arbitrary inputs.

use fc_plants::{Buffer, Cache, OnOffSpeedSystem, Plant, SpeedSystem};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cache_output_in_unit_interval(size in -1.0e6_f64..1.0e6_f64) {
        let mut cache = Cache::default();
        let rate = cache.step(size).unwrap();
        prop_assert!((0.0..=1.0).contains(&rate));
    }

    #[test]
    fn buffer_queue_bounded_by_admitted_work(
        seed in any::<u64>(),
        max_wip in 1_u64..20,
        max_flow in 1_u64..20,
        inputs in prop::collection::vec(-50.0_f64..50.0, 1..300),
    ) {
        let mut buffer = Buffer::new(max_wip, max_flow, seed).unwrap();
        for (i, u) in inputs.iter().enumerate() {
            let queued = buffer.work(*u).unwrap();
            let steps = (i + 1) as u64;
            // nothing leaves the system that was never admitted
            prop_assert!(queued + buffer.ready_pool() <= steps * max_wip);
        }
    }

    #[test]
    fn speed_never_negative(powers in prop::collection::vec(-100.0_f64..100.0, 1..200)) {
        let mut sys = SpeedSystem::default();
        for p in powers {
            let v = sys.step(p).unwrap();
            prop_assert!(v >= 0.0);
            prop_assert_eq!(v, (v * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn on_off_speed_changes_by_at_most_one(settings in prop::collection::vec(-1.0_f64..1.0, 1..200)) {
        let mut sys = OnOffSpeedSystem::default();
        let mut last = sys.initial_output();
        for s in settings {
            let v = sys.step(s).unwrap();
            prop_assert!(v >= 0.0);
            prop_assert!((v - last).abs() <= 1.0);
            last = v;
        }
    }
}

#[test]
fn seeded_buffers_are_bit_for_bit_reproducible() {
    let run = |seed| {
        let mut buffer = Buffer::new(10, 10, seed).unwrap();
        (0..5000)
            .map(|_| buffer.step(5.0).unwrap().to_bits())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(2024), run(2024));
}

#[test]
fn plants_can_be_boxed() {
    let mut plants: Vec<Box<dyn Plant>> = vec![
        Box::new(Cache::default()),
        Box::new(SpeedSystem::default()),
        Box::new(OnOffSpeedSystem::default()),
        Box::new(Buffer::new(10, 10, 1).unwrap()),
    ];
    for plant in plants.iter_mut() {
        assert!(plant.step(1.0).unwrap() >= 0.0);
    }
    assert_eq!(plants[0].name(), "cache");
}
