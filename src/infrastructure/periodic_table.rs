// Periodic table data: Pauling electronegativity and oxidation-state lists for H through Pu
// Lists: common states, every known state, ICSD-observed states, states with a Shannon radius

use crate::domain::value_objects::OxidationPolicy;

/// Static data for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Pauling electronegativity; `None` where it is undefined.
    pub electronegativity: Option<f64>,
    pub common_oxidation_states: &'static [i32],
    /// Every known oxidation state.
    pub oxidation_states: &'static [i32],
    /// States observed in the Inorganic Crystal Structure Database; empty when none are tabulated.
    pub icsd_oxidation_states: &'static [i32],
    pub shannon_oxidation_states: &'static [i32],
}

impl ElementData {
    /// Candidate oxidation states under `policy`.
    pub fn permitted_oxidation_states(&self, policy: OxidationPolicy) -> &'static [i32] {
        match policy {
            OxidationPolicy::Common => self.common_oxidation_states,
            OxidationPolicy::All if self.icsd_oxidation_states.is_empty() => self.oxidation_states,
            OxidationPolicy::All => self.icsd_oxidation_states,
            OxidationPolicy::Shannon => self.shannon_oxidation_states,
        }
    }
}

const fn el(
    atomic_number: u8,
    symbol: &'static str,
    electronegativity: Option<f64>,
    common_oxidation_states: &'static [i32],
    oxidation_states: &'static [i32],
    icsd_oxidation_states: &'static [i32],
    shannon_oxidation_states: &'static [i32],
) -> ElementData {
    ElementData {
        atomic_number,
        symbol,
        electronegativity,
        common_oxidation_states,
        oxidation_states,
        icsd_oxidation_states,
        shannon_oxidation_states,
    }
}

#[rustfmt::skip]
static ELEMENTS: [ElementData; 94] = [
    el(1, "H", Some(2.20), &[-1, 1], &[-1, 1], &[-1, 1], &[1]),
    el(2, "He", None, &[], &[], &[], &[]),
    el(3, "Li", Some(0.98), &[1], &[1], &[1], &[1]),
    el(4, "Be", Some(1.57), &[2], &[1, 2], &[2], &[2]),
    el(5, "B", Some(2.04), &[3], &[-5, -1, 1, 2, 3], &[-3, 3], &[3]),
    el(6, "C", Some(2.55), &[-4, 4], &[-4, -3, -2, -1, 1, 2, 3, 4], &[-4, 2], &[4]),
    el(7, "N", Some(3.04), &[-3, 3, 5], &[-3, -2, -1, 1, 2, 3, 4, 5], &[-3, -2, -1, 1, 3, 5], &[-3, 3, 5]),
    el(8, "O", Some(3.44), &[-2], &[-2, -1, 1, 2], &[-2], &[-2]),
    el(9, "F", Some(3.98), &[-1], &[-1], &[-1], &[-1, 7]),
    el(10, "Ne", None, &[], &[], &[], &[]),
    el(11, "Na", Some(0.93), &[1], &[-1, 1], &[1], &[1]),
    el(12, "Mg", Some(1.31), &[2], &[1, 2], &[2], &[2]),
    el(13, "Al", Some(1.61), &[3], &[-2, -1, 1, 2, 3], &[3], &[3]),
    el(14, "Si", Some(1.90), &[-4, 4], &[-4, -3, -2, -1, 1, 2, 3, 4], &[-4, 4], &[4]),
    el(15, "P", Some(2.19), &[-3, 3, 5], &[-3, -2, -1, 1, 2, 3, 4, 5], &[-3, 3, 4, 5], &[3, 5]),
    el(16, "S", Some(2.58), &[-2, 2, 4, 6], &[-2, -1, 1, 2, 3, 4, 5, 6], &[-2], &[-2, 4, 6]),
    el(17, "Cl", Some(3.16), &[-1, 1, 3, 5, 7], &[-1, 1, 2, 3, 4, 5, 6, 7], &[-1], &[-1, 5, 7]),
    el(18, "Ar", None, &[], &[], &[], &[]),
    el(19, "K", Some(0.82), &[1], &[-1, 1], &[1], &[1]),
    el(20, "Ca", Some(1.00), &[2], &[1, 2], &[2], &[2]),
    el(21, "Sc", Some(1.36), &[3], &[1, 2, 3], &[3], &[3]),
    el(22, "Ti", Some(1.54), &[4], &[-2, -1, 1, 2, 3, 4], &[2, 3, 4], &[2, 3, 4]),
    el(23, "V", Some(1.63), &[5], &[-3, -1, 1, 2, 3, 4, 5], &[2, 3, 4, 5], &[2, 3, 4, 5]),
    el(24, "Cr", Some(1.66), &[3, 6], &[-4, -2, -1, 1, 2, 3, 4, 5, 6], &[2, 3, 4, 5, 6], &[2, 3, 4, 5, 6]),
    el(25, "Mn", Some(1.55), &[2, 4, 7], &[-3, -2, -1, 1, 2, 3, 4, 5, 6, 7], &[2, 3, 4, 7], &[2, 3, 4, 5, 6, 7]),
    el(26, "Fe", Some(1.83), &[2, 3], &[-4, -2, -1, 1, 2, 3, 4, 5, 6, 7], &[2, 3], &[2, 3, 4, 6]),
    el(27, "Co", Some(1.88), &[2, 3], &[-3, -1, 1, 2, 3, 4, 5], &[1, 2, 3, 4], &[2, 3, 4]),
    el(28, "Ni", Some(1.91), &[2], &[-2, -1, 1, 2, 3, 4], &[1, 2, 3, 4], &[2, 3, 4]),
    el(29, "Cu", Some(1.90), &[2], &[-2, 1, 2, 3, 4], &[1, 2, 3], &[1, 2, 3]),
    el(30, "Zn", Some(1.65), &[2], &[-2, 1, 2], &[2], &[2]),
    el(31, "Ga", Some(1.81), &[3], &[-5, -4, -3, -2, -1, 1, 2, 3], &[2, 3], &[3]),
    el(32, "Ge", Some(2.01), &[-4, 2, 4], &[-4, -3, -2, -1, 1, 2, 3, 4], &[-4, 2, 3, 4], &[2, 4]),
    el(33, "As", Some(2.18), &[-3, 3, 5], &[-3, -2, -1, 1, 2, 3, 4, 5], &[-3, 2, 3, 5], &[3, 5]),
    el(34, "Se", Some(2.55), &[-2, 2, 4, 6], &[-2, -1, 1, 2, 3, 4, 5, 6], &[-2, -1, 4, 6], &[-2, 4, 6]),
    el(35, "Br", Some(2.96), &[-1, 1, 3, 5], &[-1, 1, 3, 4, 5, 7], &[-1, 5], &[-1, 3, 5, 7]),
    el(36, "Kr", Some(3.00), &[2], &[2], &[], &[]),
    el(37, "Rb", Some(0.82), &[1], &[-1, 1], &[1], &[1]),
    el(38, "Sr", Some(0.95), &[2], &[1, 2], &[2], &[2]),
    el(39, "Y", Some(1.22), &[3], &[1, 2, 3], &[3], &[3]),
    el(40, "Zr", Some(1.33), &[4], &[-2, 1, 2, 3, 4], &[2, 3, 4], &[4]),
    el(41, "Nb", Some(1.60), &[5], &[-3, -1, 1, 2, 3, 4, 5], &[2, 3, 4, 5], &[3, 4, 5]),
    el(42, "Mo", Some(2.16), &[4, 6], &[-4, -2, -1, 1, 2, 3, 4, 5, 6], &[2, 3, 4, 5, 6], &[3, 4, 5, 6]),
    el(43, "Tc", Some(1.90), &[4, 7], &[-3, -1, 1, 2, 3, 4, 5, 6, 7], &[], &[4, 5, 7]),
    el(44, "Ru", Some(2.20), &[3, 4], &[-4, -2, 1, 2, 3, 4, 5, 6, 7, 8], &[2, 3, 4, 5, 6], &[3, 4, 5, 7, 8]),
    el(45, "Rh", Some(2.28), &[3], &[-3, -1, 1, 2, 3, 4, 5, 6], &[3, 4], &[3, 4, 5]),
    el(46, "Pd", Some(2.20), &[0, 2, 4], &[2, 4], &[2, 4], &[1, 2, 3, 4]),
    el(47, "Ag", Some(1.93), &[1], &[-2, -1, 1, 2, 3, 4], &[1, 2, 3], &[1, 2, 3]),
    el(48, "Cd", Some(1.69), &[2], &[-2, 1, 2], &[2], &[2]),
    el(49, "In", Some(1.78), &[3], &[-5, -2, -1, 1, 2, 3], &[1, 2, 3], &[3]),
    el(50, "Sn", Some(1.96), &[-4, 2, 4], &[-4, -3, -2, -1, 1, 2, 3, 4], &[2, 3, 4], &[2, 4]),
    el(51, "Sb", Some(2.05), &[-3, 3, 5], &[-3, -2, -1, 1, 2, 3, 4, 5], &[-3, -2, -1, 3, 5], &[3, 5]),
    el(52, "Te", Some(2.10), &[-2, 2, 4, 6], &[-2, -1, 1, 2, 3, 4, 5, 6], &[-2, -1, 4, 6], &[-2, 4, 6]),
    el(53, "I", Some(2.66), &[-1, 1, 3, 5, 7], &[-1, 1, 3, 4, 5, 6, 7], &[-1, 5], &[-1, 5, 7]),
    el(54, "Xe", Some(2.60), &[2, 4, 6], &[2, 4, 6, 8], &[], &[8]),
    el(55, "Cs", Some(0.79), &[1], &[-1, 1], &[1], &[1]),
    el(56, "Ba", Some(0.89), &[2], &[2], &[2], &[2]),
    el(57, "La", Some(1.10), &[3], &[2, 3], &[2, 3], &[3]),
    el(58, "Ce", Some(1.12), &[3, 4], &[2, 3, 4], &[3, 4], &[3, 4]),
    el(59, "Pr", Some(1.13), &[3], &[2, 3, 4], &[3, 4], &[3, 4]),
    el(60, "Nd", Some(1.14), &[3], &[2, 3], &[2, 3], &[2, 3]),
    el(61, "Pm", Some(1.13), &[3], &[3], &[3], &[3]),
    el(62, "Sm", Some(1.17), &[3], &[2, 3], &[2, 3], &[2, 3]),
    el(63, "Eu", Some(1.20), &[2, 3], &[2, 3], &[2, 3], &[2, 3]),
    el(64, "Gd", Some(1.20), &[3], &[1, 2, 3], &[3], &[3]),
    el(65, "Tb", Some(1.10), &[3], &[1, 3, 4], &[3, 4], &[3, 4]),
    el(66, "Dy", Some(1.22), &[3], &[2, 3], &[3], &[2, 3]),
    el(67, "Ho", Some(1.23), &[3], &[3], &[3], &[3]),
    el(68, "Er", Some(1.24), &[3], &[3], &[3], &[3]),
    el(69, "Tm", Some(1.25), &[3], &[2, 3], &[3], &[2, 3]),
    el(70, "Yb", Some(1.10), &[3], &[2, 3], &[2, 3], &[2, 3]),
    el(71, "Lu", Some(1.27), &[3], &[3], &[3], &[3]),
    el(72, "Hf", Some(1.30), &[4], &[2, 3, 4], &[4], &[4]),
    el(73, "Ta", Some(1.50), &[5], &[-3, -1, 1, 2, 3, 4, 5], &[3, 4, 5], &[3, 4, 5]),
    el(74, "W", Some(2.36), &[4, 6], &[-4, -2, -1, 1, 2, 3, 4, 5, 6], &[2, 3, 4, 5, 6], &[4, 5, 6]),
    el(75, "Re", Some(1.90), &[4], &[-3, -1, 1, 2, 3, 4, 5, 6, 7], &[3, 4, 5, 6, 7], &[4, 5, 6, 7]),
    el(76, "Os", Some(2.20), &[4], &[-4, -2, -1, 1, 2, 3, 4, 5, 6, 7, 8], &[], &[4, 5, 6, 7, 8]),
    el(77, "Ir", Some(2.20), &[3, 4], &[-3, -1, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[3, 4, 5], &[3, 4, 5]),
    el(78, "Pt", Some(2.28), &[2, 4], &[-3, -2, -1, 1, 2, 3, 4, 5, 6], &[2, 4], &[2, 4]),
    el(79, "Au", Some(2.54), &[3], &[-3, -2, -1, 1, 2, 3, 5], &[1, 3, 5], &[1, 3, 5]),
    el(80, "Hg", Some(2.00), &[1, 2], &[-2, 1, 2, 4], &[1, 2], &[1, 2]),
    el(81, "Tl", Some(1.62), &[1, 3], &[-5, -2, -1, 1, 2, 3], &[1, 3], &[1, 3]),
    el(82, "Pb", Some(2.33), &[2, 4], &[-4, -2, -1, 1, 2, 3, 4], &[2, 4], &[2, 4]),
    el(83, "Bi", Some(2.02), &[3], &[-3, -2, -1, 1, 2, 3, 4, 5], &[1, 2, 3, 5], &[3, 5]),
    el(84, "Po", Some(2.00), &[-2, 2, 4], &[-2, 2, 4, 5, 6], &[], &[4, 6]),
    el(85, "At", Some(2.20), &[-1, 1], &[-1, 1, 3, 5, 7], &[], &[7]),
    el(86, "Rn", Some(2.20), &[2], &[2, 6], &[], &[]),
    el(87, "Fr", Some(0.70), &[1], &[1], &[], &[1]),
    el(88, "Ra", Some(0.90), &[2], &[2], &[], &[2]),
    el(89, "Ac", Some(1.10), &[3], &[3], &[], &[3]),
    el(90, "Th", Some(1.30), &[4], &[1, 2, 3, 4], &[4], &[4]),
    el(91, "Pa", Some(1.50), &[5], &[3, 4, 5], &[], &[3, 4, 5]),
    el(92, "U", Some(1.38), &[6], &[1, 2, 3, 4, 5, 6], &[3, 4, 5, 6], &[3, 4, 5, 6]),
    el(93, "Np", Some(1.36), &[5], &[2, 3, 4, 5, 6, 7], &[], &[2, 3, 4, 5, 6, 7]),
    el(94, "Pu", Some(1.28), &[4], &[2, 3, 4, 5, 6, 7, 8], &[], &[3, 4, 5, 6]),
];

/// Looks up an element by its case-sensitive symbol.
pub fn lookup(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// All elements in atomic-number order.
pub fn elements() -> &'static [ElementData] {
    &ELEMENTS
}
