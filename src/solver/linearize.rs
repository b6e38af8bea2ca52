// Linearization of a ConstraintModel into an integer linear program
// Boolean structure is reified into 0-1 columns with big-M rows derived from variable bounds

use crate::domain::{
    models::{ConstraintModel, Formula, LinearConstraint, LinearExpr},
    value_objects::ConstraintType,
};

/// Integer column with finite bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub lower: f64,
    pub upper: f64,
}

/// `Σ coeff·column (≤ | = | ≥) bound`
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub terms: Vec<(usize, f64)>,
    pub constraint_type: ConstraintType,
    pub bound: f64,
}

/// Integer feasibility problem handed to a MIP backend.
///
/// The first `num_model_variables` columns are the model's own variables,
/// in model order; the rest are reification helpers.
#[derive(Debug, Clone, Default)]
pub struct LinearProgram {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub num_model_variables: usize,
    /// A top-level constraint folded to `false`.
    pub trivially_infeasible: bool,
}

impl LinearProgram {
    pub fn from_model(model: &ConstraintModel) -> Self {
        let mut linearizer = Linearizer {
            model,
            program: LinearProgram {
                columns: model
                    .variables
                    .iter()
                    .map(|v| Column {
                        lower: v.lower_bound as f64,
                        upper: v.upper_bound as f64,
                    })
                    .collect(),
                rows: Vec::new(),
                num_model_variables: model.num_variables(),
                trivially_infeasible: false,
            },
        };
        for constraint in &model.constraints {
            linearizer.assert(&constraint.formula);
        }
        linearizer.program
    }

    pub fn num_helper_columns(&self) -> usize {
        self.columns.len() - self.num_model_variables
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lit {
    Const(bool),
    /// Value of the column, or `1 - column` when negated
    Col { col: usize, negated: bool },
}

impl Lit {
    fn negate(self) -> Self {
        match self {
            Lit::Const(b) => Lit::Const(!b),
            Lit::Col { col, negated } => Lit::Col {
                col,
                negated: !negated,
            },
        }
    }
}

/// Row under construction with a constant kept aside.
#[derive(Default)]
struct RowBuilder {
    terms: Vec<(usize, f64)>,
    constant: f64,
}

impl RowBuilder {
    fn from_expr(expr: &LinearExpr) -> Self {
        Self {
            terms: expr
                .terms
                .iter()
                .map(|&(v, c)| (v.index(), c as f64))
                .collect(),
            constant: expr.constant as f64,
        }
    }

    fn column(mut self, col: usize, coefficient: f64) -> Self {
        self.terms.push((col, coefficient));
        self
    }

    fn lit(mut self, lit: Lit, coefficient: f64) -> Self {
        match lit {
            Lit::Const(b) => self.constant += if b { coefficient } else { 0.0 },
            Lit::Col { col, negated: false } => self.terms.push((col, coefficient)),
            Lit::Col { col, negated: true } => {
                self.constant += coefficient;
                self.terms.push((col, -coefficient));
            }
        }
        self
    }

    fn finish(self, constraint_type: ConstraintType, bound: f64) -> Row {
        Row {
            terms: self.terms,
            constraint_type,
            bound: bound - self.constant,
        }
    }
}

struct Linearizer<'m> {
    model: &'m ConstraintModel,
    program: LinearProgram,
}

impl Linearizer<'_> {
    fn assert(&mut self, formula: &Formula) {
        match formula {
            Formula::Const(true) => {}
            Formula::Const(false) => self.program.trivially_infeasible = true,
            Formula::Atom(c) => {
                let row = RowBuilder::from_expr(&c.expr).finish(c.constraint_type, c.bound as f64);
                self.program.rows.push(row);
            }
            Formula::And(fs) => fs.iter().for_each(|f| self.assert(f)),
            _ => {
                let lit = self.reify(formula);
                self.require(lit);
            }
        }
    }

    fn require(&mut self, lit: Lit) {
        match lit {
            Lit::Const(true) => {}
            Lit::Const(false) => self.program.trivially_infeasible = true,
            lit => {
                let row = RowBuilder::default()
                    .lit(lit, 1.0)
                    .finish(ConstraintType::GreaterThanOrEqual, 1.0);
                self.program.rows.push(row);
            }
        }
    }

    fn reify(&mut self, formula: &Formula) -> Lit {
        match formula {
            Formula::Const(b) => Lit::Const(*b),
            Formula::Var(v) => Lit::Col {
                col: v.index(),
                negated: false,
            },
            Formula::Not(f) => self.reify(f).negate(),
            Formula::Atom(c) => self.reify_atom(c),
            Formula::And(fs) => {
                let lits: Vec<Lit> = fs.iter().map(|f| self.reify(f)).collect();
                self.and(lits)
            }
            Formula::Or(fs) => {
                let lits: Vec<Lit> = fs.iter().map(|f| self.reify(f)).collect();
                self.or(lits)
            }
            Formula::Implies(p, c) => {
                let premise = self.reify(p).negate();
                let conclusion = self.reify(c);
                self.or(vec![premise, conclusion])
            }
        }
    }

    fn new_binary(&mut self) -> usize {
        self.program.columns.push(Column {
            lower: 0.0,
            upper: 1.0,
        });
        self.program.columns.len() - 1
    }

    fn and(&mut self, lits: Vec<Lit>) -> Lit {
        if lits.contains(&Lit::Const(false)) {
            return Lit::Const(false);
        }
        let lits: Vec<Lit> = lits.into_iter().filter(|l| *l != Lit::Const(true)).collect();
        match lits.as_slice() {
            [] => return Lit::Const(true),
            [single] => return *single,
            _ => {}
        }

        // d ≤ lᵢ for all i, d ≥ Σ lᵢ - (n - 1)
        let d = self.new_binary();
        let mut sum = RowBuilder::default().column(d, 1.0);
        for &lit in &lits {
            let row = RowBuilder::default()
                .column(d, 1.0)
                .lit(lit, -1.0)
                .finish(ConstraintType::LessThanOrEqual, 0.0);
            self.program.rows.push(row);
            sum = sum.lit(lit, -1.0);
        }
        let n = lits.len() as f64;
        self.program
            .rows
            .push(sum.finish(ConstraintType::GreaterThanOrEqual, -(n - 1.0)));
        Lit::Col {
            col: d,
            negated: false,
        }
    }

    fn or(&mut self, lits: Vec<Lit>) -> Lit {
        if lits.contains(&Lit::Const(true)) {
            return Lit::Const(true);
        }
        let lits: Vec<Lit> = lits.into_iter().filter(|l| *l != Lit::Const(false)).collect();
        match lits.as_slice() {
            [] => return Lit::Const(false),
            [single] => return *single,
            _ => {}
        }

        // d ≥ lᵢ for all i, d ≤ Σ lᵢ
        let d = self.new_binary();
        let mut sum = RowBuilder::default().column(d, 1.0);
        for &lit in &lits {
            let row = RowBuilder::default()
                .column(d, 1.0)
                .lit(lit, -1.0)
                .finish(ConstraintType::GreaterThanOrEqual, 0.0);
            self.program.rows.push(row);
            sum = sum.lit(lit, -1.0);
        }
        self.program
            .rows
            .push(sum.finish(ConstraintType::LessThanOrEqual, 0.0));
        Lit::Col {
            col: d,
            negated: false,
        }
    }

    fn reify_atom(&mut self, constraint: &LinearConstraint) -> Lit {
        let expr = &constraint.expr;
        let bound = constraint.bound;
        match constraint.constraint_type {
            ConstraintType::LessThanOrEqual => self.reify_leq(expr, bound),
            ConstraintType::GreaterThanOrEqual => self.reify_leq(&expr.negated(), -bound),
            ConstraintType::Equal => {
                let below = self.reify_leq(expr, bound);
                let above = self.reify_leq(&expr.negated(), -bound);
                self.and(vec![below, above])
            }
        }
    }

    /// Binary `d` with `d = 1 ⇔ expr ≤ bound`.
    fn reify_leq(&mut self, expr: &LinearExpr, bound: i64) -> Lit {
        let model = self.model;
        let (lo, hi) = expr.range(|v| {
            let var = model.variable(v);
            (var.lower_bound, var.upper_bound)
        });
        if hi <= bound {
            return Lit::Const(true);
        }
        if lo > bound {
            return Lit::Const(false);
        }

        let d = self.new_binary();
        // d = 1 ⇒ expr ≤ bound
        let upper = RowBuilder::from_expr(expr)
            .column(d, (hi - bound) as f64)
            .finish(ConstraintType::LessThanOrEqual, hi as f64);
        // d = 0 ⇒ expr ≥ bound + 1
        let lower = RowBuilder::from_expr(expr)
            .column(d, (bound + 1 - lo) as f64)
            .finish(ConstraintType::GreaterThanOrEqual, (bound + 1) as f64);
        self.program.rows.push(upper);
        self.program.rows.push(lower);
        Lit::Col {
            col: d,
            negated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Variable};

    fn row_holds(row: &Row, values: &[f64]) -> bool {
        let lhs: f64 = row.terms.iter().map(|&(c, k)| k * values[c]).sum();
        match row.constraint_type {
            ConstraintType::LessThanOrEqual => lhs <= row.bound + 1e-9,
            ConstraintType::Equal => (lhs - row.bound).abs() < 1e-9,
            ConstraintType::GreaterThanOrEqual => lhs >= row.bound - 1e-9,
        }
    }

    #[test]
    fn plain_atoms_become_rows_without_helpers() {
        let mut model = ConstraintModel::new();
        let x = model.add_variable(Variable::integer("x").with_bounds(0, 4));
        model.add_constraint(Constraint::new(LinearExpr::var(x).with_constant(1).equals(3)));
        let program = LinearProgram::from_model(&model);
        assert_eq!(program.num_helper_columns(), 0);
        assert_eq!(program.rows.len(), 1);
        assert_eq!(program.rows[0].bound, 2.0);
    }

    #[test]
    fn reified_implication_matches_truth_table() {
        let mut model = ConstraintModel::new();
        let q = model.add_variable(Variable::integer("q").with_bounds(0, 3));
        let flag = model.add_variable(Variable::binary("flag"));
        let implication = Formula::implies(LinearExpr::var(q).geq(1).into(), Formula::Var(flag));
        model.add_constraint(Constraint::new(implication.clone()));
        let program = LinearProgram::from_model(&model);
        assert_eq!(program.num_helper_columns(), 2);

        // Every model assignment is feasible iff some helper assignment satisfies all rows.
        for qv in 0..=3 {
            for fv in 0..=1 {
                let feasible = (0..4).any(|bits: u32| {
                    let values = [qv as f64, fv as f64, (bits & 1) as f64, (bits >> 1) as f64];
                    program.rows.iter().all(|row| row_holds(row, &values))
                });
                assert_eq!(feasible, implication.is_satisfied(&[qv, fv]), "q={qv} flag={fv}");
            }
        }
    }

    #[test]
    fn constant_false_marks_program_infeasible() {
        let mut model = ConstraintModel::new();
        let x = model.add_variable(Variable::integer("x").with_bounds(0, 2));
        model.add_constraint(Constraint::new(Formula::not(LinearExpr::var(x).geq(0).into())));
        assert!(LinearProgram::from_model(&model).trivially_infeasible);
    }
}
