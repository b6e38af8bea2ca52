//! Formula-level guessing through the resolver.

use oxiguess::{guess_oxidation_states, resolve, GuessConfig, GuessError, OxidationPolicy};

fn common() -> GuessConfig {
    GuessConfig::default().with_policy(OxidationPolicy::Common)
}

#[test]
fn magnetite_from_formula() {
    let solutions = guess_oxidation_states("Fe3O4", &common()).unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions.solutions[0].to_string(), "Fe2+: 1, Fe3+: 2, O2-: 4");
}

#[test]
fn grouped_formula_resolves() {
    let solutions = guess_oxidation_states("Ca3(PO4)2", &common()).unwrap();
    assert!(solutions
        .iter()
        .any(|s| s.to_string() == "Ca2+: 3, P5+: 2, O2-: 8"));
}

#[test]
fn all_policy_prefers_icsd_states() {
    let config = GuessConfig::default().with_policy(OxidationPolicy::All);

    let hematite = guess_oxidation_states("Fe2O3", &config).unwrap();
    assert_eq!(hematite.len(), 1);
    assert_eq!(hematite.solutions[0].to_string(), "Fe3+: 2, O2-: 3");

    let hausmannite = guess_oxidation_states("Mn3O4", &config).unwrap();
    let mut rendered: Vec<String> = hausmannite.iter().map(|s| s.to_string()).collect();
    rendered.sort();
    assert_eq!(rendered, vec!["Mn2+: 1, Mn3+: 2, O2-: 4", "Mn2+: 2, Mn4+: 1, O2-: 4"]);
}

#[test]
fn noble_gas_has_no_assignment() {
    let solutions = guess_oxidation_states("Ar", &GuessConfig::default()).unwrap();
    assert!(solutions.is_empty());
}

#[test]
fn unknown_policy_name_is_rejected() {
    let err = "icsd".parse::<OxidationPolicy>().unwrap_err();
    assert!(matches!(err, GuessError::UnrecognizedOption { .. }));
    assert!(err.to_string().contains("icsd"));
}

#[test]
fn fractional_formula_is_a_validation_error() {
    assert!(matches!(
        guess_oxidation_states("Li0.5CoO2", &common()),
        Err(GuessError::NonIntegralCount { .. })
    ));
}

#[test]
fn malformed_formula_is_reported() {
    assert!(matches!(
        guess_oxidation_states("Fe2(O3", &common()),
        Err(GuessError::FormulaParse { .. })
    ));
    assert!(matches!(
        resolve("Zz", OxidationPolicy::Common),
        Err(GuessError::UnknownElement(_))
    ));
}

#[test]
fn config_file_settings_drive_the_guess() {
    let config = GuessConfig::from_toml_str(
        r#"
        policy = "common"
        max_results = 1
        "#,
    )
    .unwrap();
    let solutions = guess_oxidation_states("Fe3O4", &config).unwrap();
    assert_eq!(solutions.len(), 1);
    assert!(!solutions.truncated);
}
