//! End-to-end oracle replay tests

use deptrans_core::*;

fn build(forms: &[&str], arcs: &[(usize, usize, &str)]) -> Sentence {
    let mut sentence = Sentence::from_forms(forms.iter().copied());
    for &(dep, head, rel) in arcs {
        sentence.set_head(dep, head, rel).unwrap();
    }
    sentence
}

/// Run the oracle to termination and return the transitions it produced
fn replay(state: &mut ParserState) -> Vec<String> {
    let mut transitions = Vec::new();
    while !state.is_terminal() {
        let label = state.derive_label().unwrap();
        state.apply(&label).unwrap();
        transitions.push(label.to_string());
    }
    transitions
}

#[test]
fn test_the_dog_barks() {
    let gold = build(
        &["The", "dog", "barks"],
        &[(1, 2, "det"), (2, 3, "nsubj"), (3, 0, "root")],
    );
    let mut state = ParserState::new(gold.clone());
    assert_eq!(state.stack(), &[0]);
    assert_eq!(state.input_cursor(), 1);
    assert!(state.save_gold().unwrap());

    let transitions = replay(&mut state);
    assert_eq!(
        transitions,
        vec!["N-S", "L-R-det", "N-S", "L-R-nsubj", "R-S-root"]
    );
    assert_eq!(state.input_cursor(), 4);
    assert_eq!(state.sentence(), &gold);

    let mut counts = AttachmentCounts::default();
    state.evaluate(&mut counts).unwrap();
    assert_eq!(
        counts,
        AttachmentCounts {
            labeled: 3,
            unlabeled: 3,
            total: 3
        }
    );
}

#[test]
fn test_crossing_arcs_use_the_pass_list() {
    // 1 <- 3 and 2 <- 4 cross each other
    let gold = build(
        &["w1", "w2", "w3", "w4"],
        &[(1, 3, "a"), (2, 4, "b"), (3, 0, "root"), (4, 3, "c")],
    );
    let mut state = ParserState::new(gold.clone());
    state.save_gold().unwrap();

    let transitions = replay(&mut state);
    assert_eq!(
        transitions,
        vec!["N-S", "N-S", "N-P", "L-R-a", "R-S-root", "R-P-c", "L-R-b", "N-S"]
    );
    assert_eq!(state.sentence(), &gold);
}

#[test]
fn test_non_projective_sentence_is_reproduced() {
    // A hearing is scheduled on the issue today
    let gold = build(
        &["A", "hearing", "is", "scheduled", "on", "the", "issue", "today"],
        &[
            (1, 2, "det"),
            (2, 3, "nsubj"),
            (3, 0, "root"),
            (4, 3, "xcomp"),
            (5, 2, "prep"),
            (6, 7, "det"),
            (7, 5, "pobj"),
            (8, 4, "tmod"),
        ],
    );
    let mut state = ParserState::new(gold.clone());
    state.save_gold().unwrap();

    let transitions = replay(&mut state);
    assert!(transitions.len() <= max_transitions(gold.len()));
    assert_eq!(state.sentence(), &gold);

    let counts = state.attachment_counts().unwrap();
    assert!(counts.is_exact());
    assert_eq!(counts.total, 8);
}

#[test]
fn test_degenerate_sentence_reports_no_arcs() {
    let mut state = ParserState::new(Sentence::from_forms(["x", "y"]));
    assert!(!state.save_gold().unwrap());
}

#[test]
fn test_save_then_restore_is_identity() {
    let gold = build(&["a", "b", "c"], &[(1, 0, "root"), (3, 1, "obj")]);
    let mut state = ParserState::new(gold.clone());
    state.save_gold().unwrap();
    state.restore_gold().unwrap();
    assert_eq!(state.sentence(), &gold);
}

#[test]
fn test_decoding_with_external_labels() {
    let mut state = ParserState::new(Sentence::from_forms(["The", "dog", "barks"]));
    for label in ["N-S", "L-R-det", "N-S", "L-R-nsubj", "R-S-root"] {
        let label: DepLabel = label.parse().unwrap();
        state.apply(&label).unwrap();
    }
    assert!(state.is_terminal());

    let sentence = state.into_sentence();
    assert_eq!(sentence.heads(), vec![Some(2), Some(3), Some(0)]);
    assert_eq!(sentence.get(2).unwrap().label(), "nsubj");
}
