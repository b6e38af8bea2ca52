use std::fmt;

use super::value_objects::{ConstraintType, VariableType};

/// Index of a variable inside a [`ConstraintModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Decision variable with a finite domain
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub name: String,
}

impl Variable {
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Integer,
            lower_bound: 0,
            upper_bound: 0,
            name: name.into(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0,
            upper_bound: 1,
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: i64, upper: i64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_binary(&self) -> bool {
        self.variable_type == VariableType::Binary
    }

    pub fn domain_size(&self) -> u64 {
        if self.upper_bound < self.lower_bound {
            0
        } else {
            self.upper_bound.abs_diff(self.lower_bound) + 1
        }
    }
}

/// Integer linear expression `Σ cᵢ·xᵢ + constant`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, i64)>,
    pub constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(var: VarId) -> Self {
        Self::new().with_term(var, 1)
    }

    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        vars.into_iter()
            .fold(Self::new(), |expr, var| expr.with_term(var, 1))
    }

    pub fn with_term(mut self, var: VarId, coefficient: i64) -> Self {
        if coefficient != 0 {
            self.terms.push((var, coefficient));
        }
        self
    }

    pub fn with_constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|&(v, c)| (v, -c)).collect(),
            constant: -self.constant,
        }
    }

    pub fn leq(self, bound: i64) -> LinearConstraint {
        LinearConstraint::new(self, ConstraintType::LessThanOrEqual, bound)
    }

    pub fn equals(self, bound: i64) -> LinearConstraint {
        LinearConstraint::new(self, ConstraintType::Equal, bound)
    }

    pub fn geq(self, bound: i64) -> LinearConstraint {
        LinearConstraint::new(self, ConstraintType::GreaterThanOrEqual, bound)
    }

    /// Evaluates the expression under a complete assignment.
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(v, c)| acc + c * values[v.index()])
    }

    /// Tightest `[min, max]` reachable when each variable stays within `bounds`.
    pub fn range(&self, bounds: impl Fn(VarId) -> (i64, i64)) -> (i64, i64) {
        self.terms
            .iter()
            .fold((self.constant, self.constant), |(lo, hi), &(v, c)| {
                let (vl, vu) = bounds(v);
                if c >= 0 {
                    (lo + c * vl, hi + c * vu)
                } else {
                    (lo + c * vu, hi + c * vl)
                }
            })
    }
}

/// `expr (≤ | = | ≥) bound`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub constraint_type: ConstraintType,
    pub bound: i64,
}

impl LinearConstraint {
    pub fn new(expr: LinearExpr, constraint_type: ConstraintType, bound: i64) -> Self {
        Self {
            expr,
            constraint_type,
            bound,
        }
    }

    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.constraint_type {
            ConstraintType::LessThanOrEqual => lhs <= self.bound,
            ConstraintType::Equal => lhs == self.bound,
            ConstraintType::GreaterThanOrEqual => lhs >= self.bound,
        }
    }
}

/// Boolean combination of linear atoms and binary variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Const(bool),
    Atom(LinearConstraint),
    /// Binary variable equals 1
    Var(VarId),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn not(formula: Formula) -> Self {
        Formula::Not(Box::new(formula))
    }

    pub fn implies(premise: Formula, conclusion: Formula) -> Self {
        Formula::Implies(Box::new(premise), Box::new(conclusion))
    }

    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        match self {
            Formula::Const(b) => *b,
            Formula::Atom(c) => c.is_satisfied(values),
            Formula::Var(v) => values[v.index()] != 0,
            Formula::Not(f) => !f.is_satisfied(values),
            Formula::And(fs) => fs.iter().all(|f| f.is_satisfied(values)),
            Formula::Or(fs) => fs.iter().any(|f| f.is_satisfied(values)),
            Formula::Implies(p, c) => !p.is_satisfied(values) || c.is_satisfied(values),
        }
    }

    /// Calls `visit` for every variable the formula mentions.
    pub fn for_each_var(&self, visit: &mut impl FnMut(VarId)) {
        match self {
            Formula::Const(_) => {}
            Formula::Atom(c) => c.expr.terms.iter().for_each(|&(v, _)| visit(v)),
            Formula::Var(v) => visit(*v),
            Formula::Not(f) => f.for_each_var(visit),
            Formula::And(fs) | Formula::Or(fs) => fs.iter().for_each(|f| f.for_each_var(visit)),
            Formula::Implies(p, c) => {
                p.for_each_var(visit);
                c.for_each_var(visit);
            }
        }
    }
}

impl From<LinearConstraint> for Formula {
    fn from(constraint: LinearConstraint) -> Self {
        Formula::Atom(constraint)
    }
}

/// Named top-level constraint
#[derive(Debug, Clone)]
pub struct Constraint {
    pub formula: Formula,
    pub name: String,
}

impl Constraint {
    pub fn new(formula: impl Into<Formula>) -> Self {
        Self {
            formula: formula.into(),
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Conjunction of constraints over a table of bounded variables.
///
/// Constraints are only ever appended; the whole model is handed to an
/// engine on every check.
#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
}

impl ConstraintModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, variable: Variable) -> VarId {
        self.variables.push(variable);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_binary_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_binary()).count()
    }

    /// True when `values` respects every bound and every constraint.
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        values.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(values)
                .all(|(v, &x)| v.lower_bound <= x && x <= v.upper_bound)
            && self
                .constraints
                .iter()
                .all(|c| c.formula.is_satisfied(values))
    }
}

/// Value of every model variable, as returned by an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<i64>,
}

impl Assignment {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    pub fn is_true(&self, var: VarId) -> bool {
        self.value(var) != 0
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
