//! Property tests for oracle replay over random trees

use deptrans_core::*;
use proptest::prelude::*;
use proptest::sample::Index;

/// A random tree: each token, taken in shuffled order, attaches to the root
/// or to a token placed before it. Crossing arcs come out naturally.
fn arb_tree() -> impl Strategy<Value = Sentence> {
    (1usize..14).prop_flat_map(|n| {
        (
            Just((1..=n).collect::<Vec<_>>()).prop_shuffle(),
            prop::collection::vec(any::<Index>(), n),
        )
            .prop_map(move |(order, picks)| {
                let mut sentence = Sentence::from_forms((1..=n).map(|i| format!("w{i}")));
                for (k, &dep) in order.iter().enumerate() {
                    let pick = picks[k].index(k + 1);
                    let head = if pick == 0 { 0 } else { order[pick - 1] };
                    sentence
                        .set_head(dep, head, format!("rel{}", (dep + head) % 4))
                        .unwrap();
                }
                sentence
            })
    })
}

proptest! {
    #[test]
    fn prop_oracle_replay_reproduces_gold(gold in arb_tree()) {
        let mut state = ParserState::new(gold.clone());
        prop_assert!(state.save_gold().unwrap());

        let limit = max_transitions(gold.len());
        let mut steps = 0;
        while !state.is_terminal() {
            let cursor = state.input_cursor();
            let label = state.derive_label().unwrap();
            state.apply(&label).unwrap();
            steps += 1;

            prop_assert!(state.input_cursor() >= cursor);
            if label.list() == ListAction::Shift {
                prop_assert_eq!(state.input_cursor(), cursor + 1);
                prop_assert!(state.pass_list().is_empty());
            }
            prop_assert!(steps <= limit);
        }

        prop_assert_eq!(state.sentence(), &gold);
        prop_assert!(state.attachment_counts().unwrap().is_exact());
    }

    #[test]
    fn prop_reduce_only_removes_attached_nodes(gold in arb_tree()) {
        let mut state = ParserState::new(gold);
        state.save_gold().unwrap();

        while !state.is_terminal() {
            let label = state.derive_label().unwrap();
            let top = state.top_id().unwrap();
            state.apply(&label).unwrap();
            if label.list() == ListAction::Reduce {
                prop_assert!(state.sentence().get(top).unwrap().has_head());
            }
        }
    }

    #[test]
    fn prop_labels_round_trip_through_strings(gold in arb_tree()) {
        let mut state = ParserState::new(gold);
        state.save_gold().unwrap();

        while !state.is_terminal() {
            let label = state.derive_label().unwrap();
            let parsed: DepLabel = label.to_string().parse().unwrap();
            prop_assert_eq!(&parsed, &label);
            state.apply(&parsed).unwrap();
        }
    }
}
