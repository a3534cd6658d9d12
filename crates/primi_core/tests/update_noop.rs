use primi_core::{update, ClientState, Msg};

#[test]
fn update_is_noop() {
    let state = ClientState::new("http://localhost:8100");
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
