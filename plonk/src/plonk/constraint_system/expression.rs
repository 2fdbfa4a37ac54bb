use crate::errors::Result;
use crate::plonk::constraint_system::{Rotation, Variable};
use ark_std::{boxed::Box, fmt};
use blueprint_algebra::prelude::*;

/// A polynomial expression over variables and field constants.
///
/// A gate constraint holds when its expression evaluates to zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Expression<F> {
    /// A field constant.
    Constant(F),
    /// A table cell.
    Var(Variable),
    /// `-e`
    Negate(Box<Expression<F>>),
    /// `a + b`
    Add(Box<Expression<F>>, Box<Expression<F>>),
    /// `a - b`
    Sub(Box<Expression<F>>, Box<Expression<F>>),
    /// `a * b`
    Mul(Box<Expression<F>>, Box<Expression<F>>),
    /// `e^k`
    Pow(Box<Expression<F>>, u64),
}

impl<F: Scalar> Expression<F> {
    /// A constant expression.
    pub fn constant(value: F) -> Self {
        Expression::Constant(value)
    }

    /// The constant zero.
    pub fn zero() -> Self {
        Expression::Constant(F::zero())
    }

    /// The constant one.
    pub fn one() -> Self {
        Expression::Constant(F::one())
    }

    /// Raise to a fixed power.
    pub fn pow(self, exponent: u64) -> Self {
        Expression::Pow(Box::new(self), exponent)
    }

    /// Evaluate at `row`; `lookup` is handed each variable with the row it resolves to.
    pub fn evaluate<L>(&self, row: usize, rows_amount: usize, lookup: &L) -> Result<F>
    where
        L: Fn(&Variable, usize) -> F,
    {
        Ok(match self {
            Expression::Constant(c) => *c,
            Expression::Var(var) => lookup(var, var.resolve_row(row, rows_amount)?),
            Expression::Negate(e) => -e.evaluate(row, rows_amount, lookup)?,
            Expression::Add(a, b) => {
                a.evaluate(row, rows_amount, lookup)? + b.evaluate(row, rows_amount, lookup)?
            }
            Expression::Sub(a, b) => {
                a.evaluate(row, rows_amount, lookup)? - b.evaluate(row, rows_amount, lookup)?
            }
            Expression::Mul(a, b) => {
                a.evaluate(row, rows_amount, lookup)? * b.evaluate(row, rows_amount, lookup)?
            }
            Expression::Pow(e, k) => e.evaluate(row, rows_amount, lookup)?.pow(&[*k]),
        })
    }

    /// Sort the operands of every `+` and `*` node so that expressions equal up
    /// to commutation compare equal.
    pub fn canonical(&self) -> Self {
        match self {
            Expression::Constant(_) | Expression::Var(_) => self.clone(),
            Expression::Negate(e) => Expression::Negate(Box::new(e.canonical())),
            Expression::Add(a, b) => {
                let (a, b) = Self::sorted(a.canonical(), b.canonical());
                Expression::Add(Box::new(a), Box::new(b))
            }
            Expression::Mul(a, b) => {
                let (a, b) = Self::sorted(a.canonical(), b.canonical());
                Expression::Mul(Box::new(a), Box::new(b))
            }
            Expression::Sub(a, b) => {
                Expression::Sub(Box::new(a.canonical()), Box::new(b.canonical()))
            }
            Expression::Pow(e, k) => Expression::Pow(Box::new(e.canonical()), *k),
        }
    }

    fn sorted(a: Self, b: Self) -> (Self, Self) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// The total degree in the variables.
    pub fn degree(&self) -> u64 {
        match self {
            Expression::Constant(_) => 0,
            Expression::Var(_) => 1,
            Expression::Negate(e) => e.degree(),
            Expression::Add(a, b) | Expression::Sub(a, b) => a.degree().max(b.degree()),
            Expression::Mul(a, b) => a.degree() + b.degree(),
            Expression::Pow(e, k) => e.degree() * k,
        }
    }

    /// Call `f` on every variable occurrence, left to right.
    pub fn visit_variables<V: FnMut(&Variable)>(&self, f: &mut V) {
        match self {
            Expression::Constant(_) => {}
            Expression::Var(var) => f(var),
            Expression::Negate(e) | Expression::Pow(e, _) => e.visit_variables(f),
            Expression::Add(a, b) | Expression::Sub(a, b) | Expression::Mul(a, b) => {
                a.visit_variables(f);
                b.visit_variables(f);
            }
        }
    }

    /// The distinct variables, in order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.visit_variables(&mut |var| vars.push(*var));
        vars.sort();
        vars.dedup();
        vars
    }

    /// The smallest and largest relative rotation used, if any.
    pub fn rotation_window(&self) -> Option<(i32, i32)> {
        let mut window: Option<(i32, i32)> = None;
        self.visit_variables(&mut |var| {
            if let Rotation::Relative(offset) = var.rotation {
                window = Some(match window {
                    None => (offset, offset),
                    Some((lo, hi)) => (lo.min(offset), hi.max(offset)),
                });
            }
        });
        window
    }
}

impl<F: Scalar> From<Variable> for Expression<F> {
    fn from(var: Variable) -> Self {
        Expression::Var(var)
    }
}

impl<F: Scalar> Add for Expression<F> {
    type Output = Expression<F>;

    fn add(self, rhs: Self) -> Self::Output {
        Expression::Add(Box::new(self), Box::new(rhs))
    }
}

impl<F: Scalar> Sub for Expression<F> {
    type Output = Expression<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        Expression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl<F: Scalar> Mul for Expression<F> {
    type Output = Expression<F>;

    fn mul(self, rhs: Self) -> Self::Output {
        Expression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl<F: Scalar> Neg for Expression<F> {
    type Output = Expression<F>;

    fn neg(self) -> Self::Output {
        Expression::Negate(Box::new(self))
    }
}

impl<F: Scalar> Sum for Expression<F> {
    fn sum<I: Iterator<Item = Expression<F>>>(iter: I) -> Self {
        iter.reduce(|acc, e| acc + e).unwrap_or_else(Self::zero)
    }
}

impl<F: Scalar> fmt::Display for Expression<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(c) => write!(f, "{}", c),
            Expression::Var(var) => write!(f, "{}", var),
            Expression::Negate(e) => write!(f, "-({})", e),
            Expression::Add(a, b) => write!(f, "({} + {})", a, b),
            Expression::Sub(a, b) => write!(f, "({} - {})", a, b),
            Expression::Mul(a, b) => write!(f, "{} * {}", a, b),
            Expression::Pow(e, k) => write!(f, "({})^{}", e, k),
        }
    }
}
