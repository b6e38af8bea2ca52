// Charge-balance constraint model: variable table plus the four constraint families
// (non-negativity, neutrality, electronegativity ordering, atom counts)

use super::models::{Constraint, ConstraintModel, Formula, LinearExpr, VarId, Variable};
use super::species::{Compound, IonId};

/// Variables of one charge model, indexed like the compound they came from.
#[derive(Debug, Clone)]
pub struct VariableTable {
    /// One per candidate ion, in [`Compound::ions`] order.
    pub quantities: Vec<VarId>,
    /// Element index for each entry of `quantities`.
    pub ion_elements: Vec<usize>,
    pub positive: Vec<VarId>,
    pub negative: Vec<VarId>,
    pub element_counts: Vec<VarId>,
}

impl VariableTable {
    fn declare(compound: &Compound, model: &mut ConstraintModel) -> Self {
        let n_atoms = i64::from(compound.n_atoms());
        let elements = compound.elements();

        let mut quantities = Vec::with_capacity(compound.num_ions());
        let mut ion_elements = Vec::with_capacity(compound.num_ions());
        for (index, _) in elements.iter().enumerate() {
            for ion in compound.ions_of(index) {
                let var = model.add_variable(
                    Variable::integer(format!("n_{}", ion.id)).with_bounds(0, n_atoms),
                );
                quantities.push(var);
                ion_elements.push(index);
            }
        }

        let positive = elements
            .iter()
            .map(|e| model.add_variable(Variable::binary(format!("pos_{}", e.symbol))))
            .collect();
        let negative = elements
            .iter()
            .map(|e| model.add_variable(Variable::binary(format!("neg_{}", e.symbol))))
            .collect();
        let element_counts = elements
            .iter()
            .map(|e| {
                model.add_variable(Variable::integer(format!("m_{}", e.symbol)).with_bounds(0, n_atoms))
            })
            .collect();

        Self {
            quantities,
            ion_elements,
            positive,
            negative,
            element_counts,
        }
    }
}

/// Builds the charge-balance constraint model for one compound.
pub struct ChargeModelBuilder<'a> {
    compound: &'a Compound,
    model: ConstraintModel,
    vars: VariableTable,
}

impl<'a> ChargeModelBuilder<'a> {
    pub fn new(compound: &'a Compound) -> Self {
        let mut model = ConstraintModel::new();
        let vars = VariableTable::declare(compound, &mut model);
        Self {
            compound,
            model,
            vars,
        }
    }

    /// Every ion quantity is at least zero.
    pub fn non_negativity_constraints(&mut self) -> &mut Self {
        for (ion, &q) in self.compound.ions().zip(&self.vars.quantities) {
            self.model.add_constraint(
                Constraint::new(LinearExpr::var(q).geq(0))
                    .with_name(format!("non_negativity[{}]", ion.id)),
            );
        }
        self
    }

    /// Σ quantity × oxidation state = 0.
    pub fn charge_constraints(&mut self) -> &mut Self {
        let expr = self
            .compound
            .ions()
            .zip(&self.vars.quantities)
            .fold(LinearExpr::new(), |expr, (ion, &q)| {
                expr.with_term(q, i64::from(ion.oxidation_state()))
            });
        self.model
            .add_constraint(Constraint::new(expr.equals(0)).with_name("charge_balance"));
        self
    }

    /// Sign flags per element and the electronegativity ordering between them.
    pub fn electronegativity_constraints(&mut self) -> &mut Self {
        let vars = &self.vars;

        for ((ion, &q), &element) in self
            .compound
            .ions()
            .zip(&vars.quantities)
            .zip(&vars.ion_elements)
        {
            let (flag, label) = match ion.oxidation_state() {
                s if s > 0 => (vars.positive[element], "positive"),
                s if s < 0 => (vars.negative[element], "negative"),
                _ => continue,
            };
            self.model.add_constraint(
                Constraint::new(Formula::implies(
                    LinearExpr::var(q).geq(1).into(),
                    Formula::Var(flag),
                ))
                .with_name(format!("{label}_flag[{}]", ion.id)),
            );
        }

        let elements = self.compound.elements();
        for (i, element) in elements.iter().enumerate() {
            self.model.add_constraint(
                Constraint::new(Formula::not(Formula::And(vec![
                    Formula::Var(vars.negative[i]),
                    Formula::Var(vars.positive[i]),
                ])))
                .with_name(format!("single_sign[{}]", element.symbol)),
            );
        }

        for (i, e1) in elements.iter().enumerate() {
            for (j, e2) in elements.iter().enumerate() {
                if e1.less_electronegative_than(e2) {
                    self.model.add_constraint(
                        Constraint::new(Formula::implies(
                            Formula::Var(vars.negative[i]),
                            Formula::not(Formula::Var(vars.positive[j])),
                        ))
                        .with_name(format!("electronegativity[{},{}]", e1.symbol, e2.symbol)),
                    );
                }
            }
        }
        self
    }

    /// Element-count bindings and per-element quantity sums.
    pub fn element_quantity_constraints(&mut self) -> &mut Self {
        for (element, &m) in self
            .compound
            .elements()
            .iter()
            .zip(&self.vars.element_counts)
        {
            self.model.add_constraint(
                Constraint::new(LinearExpr::var(m).equals(i64::from(element.count)))
                    .with_name(format!("element_count[{}]", element.symbol)),
            );
        }

        for (index, element) in self.compound.elements().iter().enumerate() {
            let group = self
                .vars
                .quantities
                .iter()
                .zip(&self.vars.ion_elements)
                .filter(|&(_, &e)| e == index)
                .map(|(&q, _)| q);
            let expr = LinearExpr::sum(group).with_term(self.vars.element_counts[index], -1);
            self.model.add_constraint(
                Constraint::new(expr.equals(0))
                    .with_name(format!("element_quantity[{}]", element.symbol)),
            );
        }
        self
    }

    /// Adds all four constraint families.
    pub fn with_all_constraints(mut self) -> Self {
        self.non_negativity_constraints()
            .charge_constraints()
            .electronegativity_constraints()
            .element_quantity_constraints();
        self
    }

    pub fn build(self) -> ChargeModel {
        ChargeModel {
            ion_ids: self.compound.ions().map(|ion| ion.id.clone()).collect(),
            model: self.model,
            vars: self.vars,
        }
    }
}

/// A finished charge model plus the bookkeeping needed to read solutions.
#[derive(Debug, Clone)]
pub struct ChargeModel {
    pub model: ConstraintModel,
    pub vars: VariableTable,
    pub ion_ids: Vec<IonId>,
}

impl ChargeModel {
    pub fn build(compound: &Compound) -> Self {
        ChargeModelBuilder::new(compound).with_all_constraints().build()
    }

    /// Forbids `quantities × multiplier` as a full quantity assignment.
    pub fn exclusion(&self, quantities: &[u32], multiplier: u32) -> Formula {
        let equalities = self
            .vars
            .quantities
            .iter()
            .zip(quantities)
            .map(|(&q, &n)| {
                LinearExpr::var(q)
                    .equals(i64::from(n) * i64::from(multiplier))
                    .into()
            })
            .collect();
        Formula::not(Formula::And(equalities))
    }
}
