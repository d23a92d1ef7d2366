use super::*;
use pretty_assertions::assert_eq;

#[test]
fn push_pop_active() {
    let mut stack = StackState::new("cond");
    assert!(!stack.active());
    stack.push(true);
    assert!(stack.active());
    stack.push(false);
    assert!(!stack.active());
    assert!(!stack.pop());
    assert!(stack.pop());
    assert!(!stack.pop());
    assert_eq!(format!("{stack:?}"), "cond[]");
}

#[test]
fn lexpop_folds_into_new_top() {
    let mut stack = StackState::new("cmdarg");
    stack.push(false);
    stack.push(true);
    assert!(stack.lexpop());
    assert_eq!(format!("{stack:?}"), "cmdarg[1]");

    let mut stack = StackState::new("cmdarg");
    stack.push(true);
    assert!(stack.lexpop());
    assert!(stack.active());
}

#[test]
fn debug_shows_bits() {
    let mut stack = StackState::new("cond");
    stack.push(true);
    stack.push(false);
    assert_eq!(format!("{stack:?}"), "cond[10]");
    stack.clear();
    assert_eq!(format!("{stack:?}"), "cond[]");
}
