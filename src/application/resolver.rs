// Composition resolver: formula + oxidation policy -> element amounts and candidate ions

use tracing::debug;

use crate::domain::{
    error::{Error, Result},
    species::CompoundInput,
    value_objects::OxidationPolicy,
};
use crate::infrastructure::{formula::parse_formula, periodic_table};

/// Resolves `formula` into element amounts and candidate ions under `policy`.
///
/// Amounts are passed through unchanged; integrality is checked later by
/// [`CompoundInput::validate`].
///
/// # Errors
///
/// - [`Error::FormulaParse`] when the formula is malformed
/// - [`Error::UnknownElement`] when a symbol has no periodic-table entry
pub fn resolve(formula: &str, policy: OxidationPolicy) -> Result<CompoundInput> {
    let mut input = CompoundInput::new();
    for (symbol, amount) in parse_formula(formula)? {
        let data =
            periodic_table::lookup(&symbol).ok_or_else(|| Error::UnknownElement(symbol.clone()))?;
        let states = data.permitted_oxidation_states(policy);
        debug!(element = %symbol, amount, ?states, %policy, "resolved element");
        input = input.with_element(&symbol, amount, data.electronegativity, states);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_iron_oxide_with_common_states() {
        let input = resolve("Fe2O3", OxidationPolicy::Common).unwrap();
        assert_eq!(input.amounts, vec![("Fe".to_string(), 2.0), ("O".to_string(), 3.0)]);

        let (symbol, fe_ions) = &input.candidates[0];
        assert_eq!(symbol, "Fe");
        let states: Vec<i32> = fe_ions.iter().map(|ion| ion.oxidation_state()).collect();
        assert_eq!(states, vec![2, 3]);
        assert_eq!(fe_ions[0].electronegativity, Some(1.83));

        let compound = input.validate().unwrap();
        assert_eq!(compound.n_atoms(), 5);
    }

    #[test]
    fn policy_changes_candidates() {
        let shannon = resolve("FeO", OxidationPolicy::Shannon).unwrap();
        let all = resolve("FeO", OxidationPolicy::All).unwrap();
        assert_eq!(shannon.candidates[0].1.len(), 4);
        assert_eq!(all.candidates[0].1.len(), 2);

        // No ICSD states for technetium: every known state is offered
        let technetium = resolve("TcO2", OxidationPolicy::All).unwrap();
        assert_eq!(technetium.candidates[0].1.len(), 9);
    }

    #[test]
    fn noble_gas_has_no_candidates() {
        let input = resolve("Ar", OxidationPolicy::Shannon).unwrap();
        assert!(input.candidates[0].1.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn fractional_amounts_fail_validation() {
        let input = resolve("Li0.5CoO2", OxidationPolicy::Common).unwrap();
        assert!(matches!(
            input.validate(),
            Err(Error::NonIntegralCount { symbol, .. }) if symbol == "Li"
        ));
    }

    #[test]
    fn unknown_element_is_an_error() {
        assert!(matches!(
            resolve("Qq2", OxidationPolicy::Common),
            Err(Error::UnknownElement(_))
        ));
    }
}
