//! Property tests for the canonical-form engine.
//!
//! These verify the algebraic contract over randomly generated
//! configurations: idempotence, maximality, round-trip, orbit-stabilizer,
//! and equivalence closure.

use proptest::prelude::*;

use orbit_kernel::{
    orbit_size, stabilizer_of, CanonicalEngine, Cell, Config, DedupStore, GroupAction,
    InMemoryStore, SitePermutation, WithinCellOrder,
};

/// Random configuration on a canonical cell of volume 1..=7, arity up to 3.
fn arb_config() -> impl Strategy<Value = Config> {
    (1usize..=7).prop_flat_map(|volume| {
        proptest::collection::vec(0u8..3, volume)
            .prop_map(move |occupation| Config::new(Cell::of_volume(volume), occupation))
    })
}

/// Two configurations sharing one cell, so one acting range covers both.
fn arb_config_pair() -> impl Strategy<Value = (Config, Config)> {
    (1usize..=7).prop_flat_map(|volume| {
        (
            proptest::collection::vec(0u8..3, volume),
            proptest::collection::vec(0u8..3, volume),
        )
            .prop_map(move |(a, b)| {
                (
                    Config::new(Cell::of_volume(volume), a),
                    Config::new(Cell::of_volume(volume), b),
                )
            })
    })
}

/// A configuration together with one action of its own dihedral range.
fn arb_config_and_action() -> impl Strategy<Value = (Config, SitePermutation)> {
    arb_config().prop_flat_map(|config| {
        let volume = config.volume();
        (Just(config), 0..2 * volume).prop_map(move |(config, index)| {
            let action = SitePermutation::full_range(volume)[index];
            (config, action)
        })
    })
}

proptest! {
    #[test]
    fn prop_canonical_form_is_idempotent(config in arb_config()) {
        let once = config.canonical_form().unwrap();
        let twice = once.canonical_form().unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_canonical_form_is_maximal(config in arb_config()) {
        let canonical = config.canonical_form().unwrap();
        prop_assert!(canonical.is_canonical().unwrap());

        // No action image is strictly greater.
        let range = config.permutation_range();
        for action in &range {
            let image = action.apply(&canonical);
            prop_assert!(image.occupation() <= canonical.occupation());
        }
    }

    #[test]
    fn prop_reduce_round_trips(config in arb_config()) {
        let outcome = config.reduce().unwrap();
        prop_assert_eq!(
            outcome.to_canonical.apply(&config),
            outcome.representative.clone()
        );
        prop_assert_eq!(outcome.from_canonical.clone(), outcome.to_canonical.inverse());
        prop_assert_eq!(
            outcome.from_canonical.apply(&outcome.representative),
            config
        );
    }

    #[test]
    fn prop_orbit_stabilizer_relation(config in arb_config()) {
        let range = config.permutation_range();
        let engine = CanonicalEngine::new(&range, WithinCellOrder).unwrap();
        let orbit = orbit_size(&engine, &config);
        let stabilizer = stabilizer_of(&engine, &config);
        prop_assert_eq!(engine.group_order(), orbit * stabilizer.len());
    }

    #[test]
    fn prop_orbit_members_are_equivalent((config, action) in arb_config_and_action()) {
        let range = config.permutation_range();
        let engine = CanonicalEngine::new(&range, WithinCellOrder).unwrap();
        let moved = action.apply(&config);

        prop_assert!(engine.is_equivalent(&config, &moved));
        prop_assert_eq!(
            config.canonical_form().unwrap(),
            moved.canonical_form().unwrap()
        );
    }

    #[test]
    fn prop_equivalence_closure((a, b) in arb_config_pair()) {
        let range = a.permutation_range();
        let engine = CanonicalEngine::new(&range, WithinCellOrder).unwrap();

        let equivalent = engine.is_equivalent(&a, &b);
        let same_canonical = a.canonical_form().unwrap() == b.canonical_form().unwrap();
        prop_assert_eq!(equivalent, same_canonical);
    }

    #[test]
    fn prop_orbit_mates_deduplicate_to_one_entry((config, action) in arb_config_and_action()) {
        let moved = action.apply(&config);
        let mut store = InMemoryStore::new();

        let first = store.insert(config.canonical_form().unwrap());
        let second = store.insert(moved.canonical_form().unwrap());

        prop_assert!(first.was_new);
        prop_assert!(!second.was_new);
        prop_assert_eq!(first.handle, second.handle);
        prop_assert_eq!(store.size(), 1);
    }

    #[test]
    fn prop_stabilizer_actions_fix_the_object(config in arb_config()) {
        for action in config.invariant_subgroup().unwrap() {
            prop_assert_eq!(action.apply(&config), config.clone());
        }
    }
}
