use super::*;

/// Recurse the way nested `;` calls do: each level owns a fresh register
/// file and borrows its caller's mutably.
fn nested_calls(depth: u32, outer: &mut [i32; 26]) -> Result<u32, String> {
    outer[0] = outer[0].wrapping_add(1);
    if depth == 0 {
        return Ok(0);
    }
    let mut local = [0i32; 26];
    let below = ensure_sufficient_stack(|| nested_calls(depth - 1, &mut local))?;
    Ok(below + 1)
}

#[test]
fn shallow_call_chain() {
    let mut globals = [0; 26];
    assert_eq!(nested_calls(10, &mut globals), Ok(10));
    assert_eq!(globals[0], 1);
}

#[test]
fn deep_call_chain_grows_the_stack() {
    let mut globals = [0; 26];
    assert_eq!(nested_calls(200_000, &mut globals), Ok(200_000));
}

#[test]
fn errors_propagate_through_the_closure() {
    let result: Result<i32, String> =
        ensure_sufficient_stack(|| Err("division by zero".to_string()));
    assert_eq!(result, Err("division by zero".to_string()));
}
