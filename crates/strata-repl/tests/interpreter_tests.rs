//! Interpreter tests

use pretty_assertions::assert_eq;
use strata_repl::*;

// Helper: run lines in order on a fresh state, collecting outputs
fn run(lines: &[&str]) -> (Vec<String>, SessionState) {
    run_on(SessionState::default(), lines)
}

fn run_on(mut state: SessionState, lines: &[&str]) -> (Vec<String>, SessionState) {
    let mut outputs = Vec::new();
    for line in lines {
        let eval = execute(line, &state);
        outputs.push(eval.output);
        state = eval.state;
    }
    (outputs, state)
}

// Helper: output of the last line
fn last(lines: &[&str]) -> String {
    run(lines).0.pop().unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════
// Key/Value
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_kv_put_returns_post_size() {
    let (out, _) = run(&[
        "db.kv_put('a', 1)",
        "db.kv_put('b', 2)",
        "db.kv_put('a', 3)",
    ]);
    assert_eq!(out, vec!["1", "2", "2"]);
}

#[test]
fn test_kv_put_then_get_number() {
    assert_eq!(last(&["db.kv_put('n', 42)", "db.kv_get('n')"]), "42");
}

#[test]
fn test_kv_put_then_get_string() {
    assert_eq!(
        last(&["db.kv_put('greeting', \"hello\")", "db.kv_get('greeting')"]),
        "'hello'"
    );
}

#[test]
fn test_kv_put_then_get_object_is_pretty() {
    let out = last(&[
        "db.kv_put('user', {'name': 'Ada', 'langs': ['en', 'fr']})",
        "db.kv_get('user')",
    ]);
    assert_eq!(
        out,
        "{\n  'name': 'Ada',\n  'langs': [\n    'en',\n    'fr'\n  ]\n}"
    );
}

#[test]
fn test_kv_put_unparseable_value_stored_as_string() {
    assert_eq!(
        last(&["db.kv_put('v', True)", "db.kv_get('v')"]),
        "'True'"
    );
}

#[test]
fn test_kv_get_missing_is_none() {
    assert_eq!(last(&["db.kv_get('nope')"]), "None");
}

#[test]
fn test_kv_list_in_insertion_order() {
    let out = last(&[
        "db.kv_put('z', 1)",
        "db.kv_put('a', 2)",
        "db.kv_put('m', 3)",
        "db.kv_list()",
    ]);
    assert_eq!(out, "['z','a','m']");
}

#[test]
fn test_kv_list_empty() {
    assert_eq!(last(&["db.kv_list()"]), "[]");
}

#[test]
fn test_kv_delete_present_and_absent() {
    let (out, state) = run(&[
        "db.kv_put('a', 1)",
        "db.kv_delete('a')",
        "db.kv_delete('a')",
        "db.kv_get('a')",
    ]);
    assert_eq!(out, vec!["1", "true", "false", "None"]);
    assert!(state.branch().is_empty());
}

#[test]
fn test_kv_delete_absent_leaves_branch_unchanged() {
    let (_, before) = run(&["db.kv_put('a', 1)", "db.kv_put('b', 2)"]);
    let eval = execute("db.kv_delete('zzz')", &before);
    assert_eq!(eval.output, "false");
    assert_eq!(eval.state, before);
}

// ═══════════════════════════════════════════════════════════════════════
// State Cells
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_state_set_versions_increase() {
    let (out, _) = run(&["db.state_set('c', 1)", "db.state_set('c', 2)"]);
    assert_eq!(out, vec!["1", "2"]);
}

#[test]
fn test_state_cas_with_stale_version_fails() {
    let (out, state) = run(&[
        "db.state_set('c', 1)",
        "db.state_set('c', 2)",
        "db.state_cas('c', 3, expected=1)",
        "db.state_get('c')",
    ]);
    assert_eq!(out[2], "RuntimeError: CAS failed");
    assert_eq!(out[3], "2");
    assert_eq!(state.cell("c").map(|c| c.version), Some(2));
}

#[test]
fn test_state_cas_with_current_version_succeeds() {
    let (out, _) = run(&[
        "db.state_set('c', 1)",
        "db.state_cas('c', 10, expected=1)",
        "db.state_get('c')",
    ]);
    assert_eq!(out, vec!["1", "2", "10"]);
}

#[test]
fn test_state_cas_on_missing_cell_fails() {
    assert_eq!(
        last(&["db.state_cas('ghost', 1, expected=0)"]),
        "RuntimeError: CAS failed"
    );
}

#[test]
fn test_state_cas_keeps_quoted_text() {
    let out = last(&[
        "db.state_set('status', 'idle')",
        "db.state_cas('status', 'busy', expected=1)",
        "db.state_get('status')",
    ]);
    assert_eq!(out, "'busy'");
}

#[test]
fn test_state_get_returns_bare_value() {
    assert_eq!(last(&["db.state_set('s', 'ready')", "db.state_get('s')"]), "ready");
    assert_eq!(last(&["db.state_set('x', 0x1f)", "db.state_get('x')"]), "31");
    assert_eq!(last(&["db.state_get('missing')"]), "None");
}

#[test]
fn test_state_get_array_is_comma_joined() {
    assert_eq!(last(&["db.state_set('a', [1, 2])", "db.state_get('a')"]), "1,2");
}

// ═══════════════════════════════════════════════════════════════════════
// Event Logs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_event_append_sequence_numbers() {
    let (out, _) = run(&[
        "db.event_append('click', {'x': 1})",
        "db.event_append('click', {'x': 2})",
        "db.event_append('click', {'x': 3})",
    ]);
    assert_eq!(out, vec!["0", "1", "2"]);
}

#[test]
fn test_event_list_in_order() {
    let out = last(&[
        "db.event_append('login', 'ada')",
        "db.event_append('login', 'bob')",
        "db.event_list('login')",
    ]);
    assert_eq!(
        out,
        "[\n  {\n    'seq': 0,\n    'value': 'ada'\n  },\n  {\n    'seq': 1,\n    'value': 'bob'\n  }\n]"
    );
}

#[test]
fn test_event_list_unknown_type_is_empty() {
    assert_eq!(last(&["db.event_list('nothing')"]), "[]");
}

#[test]
fn test_event_len_sums_types() {
    assert_eq!(
        last(&[
            "db.event_append('a', 1)",
            "db.event_append('b', 1)",
            "db.event_append('a', 2)",
            "db.event_len()",
        ]),
        "3"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Vector Collections
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_vector_create_and_list() {
    let (out, _) = run(&[
        "db.vector_create_collection('docs', 384)",
        "db.vector_create_collection('images', 512)",
        "db.vector_list_collections()",
    ]);
    assert_eq!(out[0], "1");
    assert_eq!(out[1], "1");
    assert_eq!(
        out[2],
        "[\n  {\n    'name': 'docs',\n    'dimension': 384,\n    'count': 0\n  },\n  {\n    'name': 'images',\n    'dimension': 512,\n    'count': 0\n  }\n]"
    );
}

#[test]
fn test_vector_list_empty() {
    assert_eq!(last(&["db.vector_list_collections()"]), "[]");
}

// ═══════════════════════════════════════════════════════════════════════
// Help, Names and Assignments
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_help_both_spellings() {
    assert_eq!(last(&["help()"]), HELP_TEXT);
    assert_eq!(last(&["db.help()"]), HELP_TEXT);
}

#[test]
fn test_help_does_not_change_state() {
    let (_, state) = run(&["help()"]);
    assert_eq!(state, SessionState::default());
}

#[test]
fn test_unknown_method_is_name_error() {
    assert_eq!(
        last(&["db.kv_scan('a')"]),
        "NameError: name 'db.kv_scan' is not defined"
    );
}

#[test]
fn test_assignment_evaluates_rhs_silently() {
    let (out, state) = run(&["seq = db.event_append('t', 1)", "db.event_len()"]);
    assert_eq!(out, vec!["", "1"]);
    assert_eq!(state.events("t").len(), 1);
}

#[test]
fn test_execute_never_mutates_input() {
    let (_, state) = run(&["db.kv_put('a', 1)"]);
    let snapshot = state.clone();
    for line in [
        "db.kv_put('b', 2)",
        "db.kv_delete('a')",
        "db.branch_create('dev')",
        "db.state_set('c', 1)",
        "db.event_append('e', 1)",
        "db.vector_create_collection('v', 3)",
    ] {
        let _ = execute(line, &state);
    }
    assert_eq!(state, snapshot);
}
