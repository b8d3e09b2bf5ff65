use super::*;

fn lexicon() -> WordResult {
    WordResult::new(
        "lexicon",
        vec!["a dictionary".to_string(), "a vocabulary".to_string()],
    )
}

#[test]
fn starts_connected_with_empty_query() {
    let state = LookupState::new();

    assert_eq!(state.query(), "");
    assert!(state.is_connected());
    assert_eq!(
        state.display_state(),
        DisplayState::Content(ContentState::EmptyQuery)
    );
}

#[test]
fn non_empty_query_loads_until_matching_response() {
    let mut state = LookupState::new();

    let request = state.set_query("lexicon");

    assert_eq!(
        request,
        Some(LookupRequest {
            query: "lexicon".to_string()
        })
    );
    assert!(state.is_loading());
    assert_eq!(state.content_state(), ContentState::Loading);

    assert!(!state.on_lookup_succeeded("lexico", lexicon()));
    assert!(state.is_loading());

    assert!(state.on_lookup_succeeded("lexicon", lexicon()));
    assert!(!state.is_loading());
    assert_eq!(state.content_state(), ContentState::Word(lexicon()));
}

#[test]
fn empty_query_clears_word_and_loading_without_request() {
    let mut state = LookupState::new();
    state.set_query("lexicon");
    state.on_lookup_succeeded("lexicon", lexicon());
    state.set_query("lexicons");

    assert_eq!(state.set_query(""), None);
    assert!(state.word().is_none());
    assert!(!state.is_loading());
    assert_eq!(state.content_state(), ContentState::EmptyQuery);
}

#[test]
fn stale_callbacks_leave_state_untouched() {
    let mut state = LookupState::new();
    state.set_query("serendipity");
    state.set_query("ephemeral");
    let before = state.clone();

    assert!(!state.on_lookup_succeeded(
        "serendipity",
        WordResult::new("serendipity", vec!["happy accident".to_string()])
    ));
    assert!(!state.on_lookup_failed("serendipity", &LookupError::transport("reset")));
    assert_eq!(state, before);

    let ephemeral = WordResult::new("ephemeral", vec!["lasting a short time".to_string()]);
    assert!(state.on_lookup_succeeded("ephemeral", ephemeral.clone()));
    assert_eq!(state.word(), Some(&ephemeral));
    assert!(!state.is_loading());
}

#[test]
fn responses_after_clearing_query_are_discarded() {
    let mut state = LookupState::new();
    state.set_query("lexicon");
    state.set_query("");

    assert!(!state.on_lookup_succeeded("lexicon", lexicon()));
    assert!(state.word().is_none());
    assert_eq!(state.content_state(), ContentState::EmptyQuery);
}

#[test]
fn not_found_and_transport_failures_both_show_no_results() {
    for reason in [
        LookupError::not_found("qwzx"),
        LookupError::transport("connection refused"),
    ] {
        let mut state = LookupState::new();
        state.set_query("lexicon");
        state.on_lookup_succeeded("lexicon", lexicon());
        state.set_query("qwzx");

        assert!(state.on_lookup_failed("qwzx", &reason));
        assert!(state.word().is_none());
        assert_eq!(state.content_state(), ContentState::NoResults);
    }
}

#[test]
fn offline_overlay_takes_precedence_and_restores_on_reconnect() {
    let mut state = LookupState::new();
    state.set_query("lexicon");
    state.on_lookup_succeeded("lexicon", lexicon());

    assert!(state.on_connectivity_changed(false));
    assert_eq!(state.display_state(), DisplayState::Offline);
    assert_eq!(state.word(), Some(&lexicon()));

    assert!(state.on_connectivity_changed(true));
    assert_eq!(
        state.display_state(),
        DisplayState::Content(ContentState::Word(lexicon()))
    );
}

#[test]
fn offline_overlay_hides_loading_and_does_not_touch_it() {
    let mut state = LookupState::new();
    state.set_query("lexicon");

    state.on_connectivity_changed(false);
    assert_eq!(state.display_state(), DisplayState::Offline);
    assert!(state.is_loading());

    assert!(state.on_lookup_succeeded("lexicon", lexicon()));
    assert_eq!(state.display_state(), DisplayState::Offline);
}

#[test]
fn repeated_connectivity_value_reports_no_change() {
    let mut state = LookupState::new();

    assert!(!state.on_connectivity_changed(true));
    assert!(state.on_connectivity_changed(false));
    assert!(!state.on_connectivity_changed(false));
}
