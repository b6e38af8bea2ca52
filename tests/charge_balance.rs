//! End-to-end enumeration scenarios through the public API.

use oxiguess::{
    BacktrackingSolver, ChargeBalanceSolver, ChargeSolutions, CompoundInput, GuessError, IonId,
};

fn solve(input: CompoundInput, max_results: usize) -> ChargeSolutions {
    let compound = input.validate().unwrap();
    ChargeBalanceSolver::new(compound).get_all(max_results).unwrap()
}

/// One cation and one anion element, each with states ±1..=±5: five solutions.
fn five_solution_compound() -> CompoundInput {
    CompoundInput::new()
        .with_element("Ti", 1.0, Some(1.54), &[1, 2, 3, 4, 5])
        .with_element("N", 1.0, Some(3.04), &[-1, -2, -3, -4, -5])
}

#[test]
fn single_element_with_only_charged_states_has_no_solution() {
    let input = CompoundInput::new().with_element("Mg", 1.0, Some(1.31), &[2]);
    let solutions = solve(input, 100);
    assert!(solutions.is_empty());
    assert!(!solutions.truncated);
    assert!(!solutions.exhausted);
}

#[test]
fn binary_ionic_compound_has_exactly_one_solution() {
    let input = CompoundInput::new()
        .with_element("Na", 1.0, Some(0.93), &[1])
        .with_element("Cl", 1.0, Some(3.16), &[-1]);
    let solutions = solve(input, 100);

    assert_eq!(solutions.len(), 1);
    let solution = &solutions.solutions[0];
    assert_eq!(solution.quantity(&IonId::new("Na", 1)), Some(1));
    assert_eq!(solution.quantity(&IonId::new("Cl", -1)), Some(1));
    assert_eq!(solution.to_string(), "Na+: 1, Cl-: 1");
}

#[test]
fn two_candidate_states_give_two_solutions() {
    let input = CompoundInput::new()
        .with_element("Fe", 1.0, Some(1.83), &[2, 3])
        .with_element("N", 1.0, Some(3.04), &[-2, -3]);
    let solutions = solve(input, 100);

    assert_eq!(solutions.len(), 2);
    let mut rendered: Vec<String> = solutions.iter().map(|s| s.to_string()).collect();
    rendered.sort();
    assert_eq!(rendered, vec!["Fe2+: 1, N2-: 1", "Fe3+: 1, N3-: 1"]);
}

#[test]
fn max_results_bounds_the_list_and_flags_truncation() {
    let all = solve(five_solution_compound(), 100);
    assert_eq!(all.len(), 5);
    assert!(!all.truncated);

    let one = solve(five_solution_compound(), 1);
    assert_eq!(one.len(), 1);
    assert!(one.truncated);

    let exact = solve(five_solution_compound(), 5);
    assert_eq!(exact.len(), 5);
    assert!(!exact.truncated);
}

#[test]
fn electronegativity_violation_leaves_no_solution() {
    // Charge balance alone allows Mg- with O+; the ordering forbids it.
    let input = CompoundInput::new()
        .with_element("Mg", 1.0, Some(1.31), &[-1])
        .with_element("O", 1.0, Some(3.44), &[1]);
    assert!(solve(input, 100).is_empty());
}

#[test]
fn mixed_valence_magnetite() {
    let input = CompoundInput::new()
        .with_element("Fe", 3.0, Some(1.83), &[2, 3])
        .with_element("O", 4.0, Some(3.44), &[-2]);
    let solutions = solve(input, 100);
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions.solutions[0].to_string(), "Fe2+: 1, Fe3+: 2, O2-: 4");
}

#[test]
fn zero_state_ion_balances_a_lone_atom() {
    let input = CompoundInput::new().with_element("Pd", 1.0, Some(2.20), &[0, 2, 4]);
    let solutions = solve(input, 100);
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions.solutions[0].to_string(), "Pd0+: 1");
}

#[test]
fn step_budget_exhaustion_is_reported() {
    let compound = five_solution_compound().validate().unwrap();
    let mut solver =
        ChargeBalanceSolver::with_engine(compound, Box::new(BacktrackingSolver::with_step_limit(1)));
    let solutions = solver.get_all(100).unwrap();
    assert!(solutions.is_empty());
    assert!(solutions.exhausted);
}

#[test]
fn non_integral_counts_fail_before_solving() {
    let input = CompoundInput::new()
        .with_element("Fe", 2.5, Some(1.83), &[2, 3])
        .with_element("O", 3.0, Some(3.44), &[-2]);
    assert!(matches!(
        input.validate(),
        Err(GuessError::NonIntegralCount { symbol, .. }) if symbol == "Fe"
    ));
}

#[test]
fn zero_max_results_is_rejected() {
    let compound = five_solution_compound().validate().unwrap();
    assert!(matches!(
        ChargeBalanceSolver::new(compound).get_all(0),
        Err(GuessError::InvalidConfiguration(_))
    ));
}
