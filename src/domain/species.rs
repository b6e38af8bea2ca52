// Elements, ionic species and the validated compound they form
// CompoundInput is checked once by validate(); the resulting Compound is immutable

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};

/// Amounts closer than this to an integer are accepted as that integer.
pub const AMOUNT_TOLERANCE: f64 = 1e-8;

/// Identifier of an ionic species: element symbol plus oxidation state.
///
/// Renders as `Fe3+`, `Na+`, `Cl-`, `O2-`; a zero state renders as `Pd0+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IonId {
    symbol: String,
    oxidation_state: i32,
}

impl IonId {
    pub fn new(symbol: impl Into<String>, oxidation_state: i32) -> Self {
        Self {
            symbol: symbol.into(),
            oxidation_state,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn oxidation_state(&self) -> i32 {
        self.oxidation_state
    }
}

impl fmt::Display for IonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.oxidation_state < 0 { '-' } else { '+' };
        match self.oxidation_state.unsigned_abs() {
            1 => write!(f, "{}{}", self.symbol, sign),
            magnitude => write!(f, "{}{}{}", self.symbol, magnitude, sign),
        }
    }
}

impl FromStr for IonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::MalformedIonSet(format!("invalid ion identifier '{s}'"));

        let (body, sign) = match s.strip_suffix('+') {
            Some(body) => (body, 1),
            None => (s.strip_suffix('-').ok_or_else(invalid)?, -1),
        };
        let split = body
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(body.len());
        let (symbol, digits) = body.split_at(split);
        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        let magnitude: i32 = if digits.is_empty() {
            1
        } else {
            digits.parse().map_err(|_| invalid())?
        };
        Ok(Self::new(symbol, sign * magnitude))
    }
}

/// One candidate ionic species of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Ion {
    pub id: IonId,
    /// Pauling electronegativity of the parent element, if known.
    pub electronegativity: Option<f64>,
}

impl Ion {
    pub fn new(symbol: impl Into<String>, oxidation_state: i32, electronegativity: Option<f64>) -> Self {
        Self {
            id: IonId::new(symbol, oxidation_state),
            electronegativity,
        }
    }

    pub fn symbol(&self) -> &str {
        self.id.symbol()
    }

    pub fn oxidation_state(&self) -> i32 {
        self.id.oxidation_state()
    }
}

/// An element of the compound with its exact atom count.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub electronegativity: Option<f64>,
    pub count: u32,
}

impl Element {
    /// True when `self` is strictly less electronegative than `other`.
    ///
    /// Elements without a known electronegativity are never ordered.
    pub fn less_electronegative_than(&self, other: &Element) -> bool {
        match (self.electronegativity, other.electronegativity) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

/// Raw resolver output: element amounts and per-element candidate ions.
#[derive(Debug, Clone, Default)]
pub struct CompoundInput {
    pub amounts: Vec<(String, f64)>,
    pub candidates: Vec<(String, Vec<Ion>)>,
}

impl CompoundInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount(mut self, symbol: impl Into<String>, amount: f64) -> Self {
        self.amounts.push((symbol.into(), amount));
        self
    }

    pub fn with_candidates(mut self, symbol: impl Into<String>, ions: Vec<Ion>) -> Self {
        self.candidates.push((symbol.into(), ions));
        self
    }

    /// Adds an element together with one candidate ion per oxidation state.
    pub fn with_element(
        self,
        symbol: &str,
        amount: f64,
        electronegativity: Option<f64>,
        oxidation_states: &[i32],
    ) -> Self {
        let ions = oxidation_states
            .iter()
            .map(|&state| Ion::new(symbol, state, electronegativity))
            .collect();
        self.with_amount(symbol, amount).with_candidates(symbol, ions)
    }

    /// Checks amounts and candidate sets and builds an immutable [`Compound`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidComposition`] for an empty composition, a duplicate
    ///   element, a negative or non-finite amount, or a total atom count
    ///   beyond `u32::MAX`
    /// - [`Error::NonIntegralCount`] when an amount is not an exact integer
    /// - [`Error::MalformedIonSet`] when candidates are missing, belong to an
    ///   element outside the composition, carry the wrong symbol, disagree on
    ///   electronegativity, or repeat an oxidation state
    pub fn validate(&self) -> Result<Compound> {
        if self.amounts.is_empty() {
            return Err(Error::InvalidComposition(
                "composition contains no elements".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut counts = Vec::with_capacity(self.amounts.len());
        for (symbol, amount) in &self.amounts {
            if !seen.insert(symbol.as_str()) {
                return Err(Error::InvalidComposition(format!(
                    "element {symbol} is listed more than once"
                )));
            }
            counts.push((symbol, integral_count(symbol, *amount)?));
        }

        for (symbol, _) in &self.candidates {
            if !seen.contains(symbol.as_str()) {
                return Err(Error::MalformedIonSet(format!(
                    "candidate ions given for {symbol}, which is not in the composition"
                )));
            }
        }

        counts
            .iter()
            .try_fold(0u32, |total, &(_, count)| total.checked_add(count))
            .ok_or_else(|| {
                Error::InvalidComposition(format!(
                    "total atom count exceeds {} atoms per formula unit",
                    u32::MAX
                ))
            })?;

        let mut elements = Vec::new();
        let mut ions = Vec::new();
        for (symbol, count) in counts {
            if count == 0 {
                continue;
            }
            let mut candidates = self.candidates.iter().filter(|(s, _)| s == symbol);
            let group = match (candidates.next(), candidates.next()) {
                (Some((_, group)), None) => group,
                (None, _) => {
                    return Err(Error::MalformedIonSet(format!(
                        "no candidate ion set for element {symbol}"
                    )))
                }
                (Some(_), Some(_)) => {
                    return Err(Error::MalformedIonSet(format!(
                        "more than one candidate ion set for element {symbol}"
                    )))
                }
            };

            let electronegativity = check_group(symbol, group)?;
            elements.push(Element {
                symbol: symbol.clone(),
                electronegativity,
                count,
            });
            ions.push(group.clone());
        }

        if elements.is_empty() {
            return Err(Error::InvalidComposition(
                "every element amount is zero".to_string(),
            ));
        }
        Ok(Compound { elements, ions })
    }
}

fn integral_count(symbol: &str, amount: f64) -> Result<u32> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidComposition(format!(
            "amount of {symbol} must be a finite non-negative number, got {amount}"
        )));
    }
    let rounded = amount.round();
    if (amount - rounded).abs() > AMOUNT_TOLERANCE {
        return Err(Error::NonIntegralCount {
            symbol: symbol.to_string(),
            amount,
        });
    }
    if rounded > f64::from(u32::MAX) {
        return Err(Error::InvalidComposition(format!(
            "amount of {symbol} is too large: {amount}"
        )));
    }
    Ok(rounded as u32)
}

/// Returns the electronegativity shared by every ion of the group.
fn check_group(symbol: &str, group: &[Ion]) -> Result<Option<f64>> {
    let mut states = HashSet::new();
    for ion in group {
        if ion.symbol() != symbol {
            return Err(Error::MalformedIonSet(format!(
                "ion {} listed under element {symbol}",
                ion.id
            )));
        }
        if !states.insert(ion.oxidation_state()) {
            return Err(Error::MalformedIonSet(format!(
                "duplicate candidate ion {}",
                ion.id
            )));
        }
    }

    let electronegativity = group.first().and_then(|ion| ion.electronegativity);
    if group.iter().any(|ion| ion.electronegativity != electronegativity) {
        return Err(Error::MalformedIonSet(format!(
            "candidate ions of {symbol} disagree on electronegativity"
        )));
    }
    Ok(electronegativity)
}

/// Validated compound: elements in input order, each with its candidate ions.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    elements: Vec<Element>,
    ions: Vec<Vec<Ion>>,
}

impl Compound {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Candidate ions of the element at `index`.
    pub fn ions_of(&self, index: usize) -> &[Ion] {
        &self.ions[index]
    }

    /// All candidate ions, grouped by element in element order.
    pub fn ions(&self) -> impl Iterator<Item = &Ion> {
        self.ions.iter().flatten()
    }

    pub fn num_ions(&self) -> usize {
        self.ions.iter().map(Vec::len).sum()
    }

    /// Total atoms in one formula unit.
    pub fn n_atoms(&self) -> u32 {
        self.elements.iter().map(|e| e.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ion_ids_render_like_species_strings() {
        assert_eq!(IonId::new("Fe", 3).to_string(), "Fe3+");
        assert_eq!(IonId::new("Na", 1).to_string(), "Na+");
        assert_eq!(IonId::new("Cl", -1).to_string(), "Cl-");
        assert_eq!(IonId::new("O", -2).to_string(), "O2-");
        assert_eq!(IonId::new("Pd", 0).to_string(), "Pd0+");
    }

    #[test]
    fn ion_ids_parse_back() {
        for id in ["Fe3+", "Na+", "Cl-", "O2-", "Pd0+", "Mn7+"] {
            assert_eq!(id.parse::<IonId>().unwrap().to_string(), id);
        }
        assert!("Fe3".parse::<IonId>().is_err());
        assert!("3+".parse::<IonId>().is_err());
    }

    #[test]
    fn validate_builds_compound_in_input_order() {
        let compound = CompoundInput::new()
            .with_element("Fe", 2.0, Some(1.83), &[2, 3])
            .with_element("O", 3.0, Some(3.44), &[-2])
            .validate()
            .unwrap();

        assert_eq!(compound.elements().len(), 2);
        assert_eq!(compound.elements()[0].symbol, "Fe");
        assert_eq!(compound.elements()[1].count, 3);
        assert_eq!(compound.num_ions(), 3);
        assert_eq!(compound.n_atoms(), 5);
    }

    #[test]
    fn validate_rejects_fractional_amount() {
        let err = CompoundInput::new()
            .with_element("Fe", 0.5, Some(1.83), &[2])
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::NonIntegralCount { ref symbol, .. } if symbol == "Fe"));
    }

    #[test]
    fn validate_accepts_amount_within_tolerance() {
        let compound = CompoundInput::new()
            .with_element("Na", 1.0 + 1e-10, Some(0.93), &[1])
            .validate()
            .unwrap();
        assert_eq!(compound.elements()[0].count, 1);
    }

    #[test]
    fn validate_rejects_missing_and_foreign_candidates() {
        let missing = CompoundInput::new().with_amount("Na", 1.0).validate();
        assert!(matches!(missing, Err(Error::MalformedIonSet(_))));

        let foreign = CompoundInput::new()
            .with_element("Na", 1.0, Some(0.93), &[1])
            .with_candidates("Cl", vec![Ion::new("Cl", -1, Some(3.16))])
            .validate();
        assert!(matches!(foreign, Err(Error::MalformedIonSet(_))));

        let mislabeled = CompoundInput::new()
            .with_amount("Na", 1.0)
            .with_candidates("Na", vec![Ion::new("K", 1, Some(0.82))])
            .validate();
        assert!(matches!(mislabeled, Err(Error::MalformedIonSet(_))));
    }

    #[test]
    fn validate_rejects_duplicate_states() {
        let err = CompoundInput::new()
            .with_element("Cu", 1.0, Some(1.90), &[2, 2])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Cu2+"));
    }

    #[test]
    fn zero_amount_elements_are_dropped() {
        let compound = CompoundInput::new()
            .with_element("Na", 1.0, Some(0.93), &[1])
            .with_element("K", 0.0, Some(0.82), &[1])
            .with_element("Cl", 1.0, Some(3.16), &[-1])
            .validate()
            .unwrap();
        let symbols: Vec<_> = compound.elements().iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["Na", "Cl"]);

        let all_zero = CompoundInput::new()
            .with_element("K", 0.0, Some(0.82), &[1])
            .validate();
        assert!(matches!(all_zero, Err(Error::InvalidComposition(_))));
    }

    #[test]
    fn total_atom_count_must_fit() {
        let huge = CompoundInput::new()
            .with_element("Na", 3e9, Some(0.93), &[1])
            .with_element("Cl", 3e9, Some(3.16), &[-1])
            .validate();
        assert!(matches!(huge, Err(Error::InvalidComposition(msg)) if msg.contains("total atom count")));

        let at_limit = CompoundInput::new()
            .with_element("Na", f64::from(u32::MAX - 1), Some(0.93), &[1])
            .with_element("Cl", 1.0, Some(3.16), &[-1])
            .validate()
            .unwrap();
        assert_eq!(at_limit.n_atoms(), u32::MAX);
    }

    #[test]
    fn unknown_electronegativity_is_never_ordered() {
        let ar = Element { symbol: "Ar".into(), electronegativity: None, count: 1 };
        let f = Element { symbol: "F".into(), electronegativity: Some(3.98), count: 1 };
        assert!(!ar.less_electronegative_than(&f));
        assert!(!f.less_electronegative_than(&ar));
    }
}
