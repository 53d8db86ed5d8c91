//! The dependency engine: variables, stored expressions and clocks.
//!
//! A [`Database`] is built fresh on every full parse. Initialization
//! registers variables, expressions and dependency lists; after that only
//! variable *values* change, through clicks, ticks, submodule outputs and
//! [`Database::reevaluate`].
//!
//! # Clocks
//!
//! A clock statement `q <= expr` stores its expression into the companion
//! dependent `q.d`. `q` itself is independent and only changes when its
//! clock commits `q.d` into it, so no amount of re-evaluation moves a
//! register. Primary clocks commit on [`Database::tick_primary`]; clocks
//! bound to an alternate clock variable commit when that variable rises.

use rustc_hash::FxHashMap;
use vb_parse::Namespace;

use crate::expr::Assignment;
use crate::{CycleDetection, Settings, Variable, VariableKind};

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("'{name}' is already registered as {existing}.")]
    KindConflict {
        name: String,
        existing: VariableKind,
    },
    #[error("'{name}' cannot depend on itself.")]
    SelfDependency { name: String },
    #[error("'{name}' is already assigned by another statement.")]
    MultipleDrivers { name: String },
    #[error("'{name}' has a circular dependency: {path}.")]
    Cycle {
        name: String,
        path: String,
        /// Line of the statement assigning `name`.
        line: u32,
    },
    #[error("'{name}' is not a variable.")]
    Unknown { name: String },
}

/// Name of the companion variable holding a register's next value.
pub fn next_value_name(register: &str) -> String {
    format!("{register}.d")
}

/// An assignment and the variables it writes.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StoredExpression {
    /// Written variables, most significant first. Clock statements write
    /// the `.d` companions of their registers.
    pub stores: Vec<String>,
    pub assignment: Assignment,
    pub line: u32,
}

#[derive(Clone, Eq, PartialEq, Debug)]
struct ClockBinding {
    registers: Vec<String>,
    alt: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Database {
    /// Registration order.
    variables: Vec<Variable>,
    index: FxHashMap<String, usize>,
    namespace: Namespace,
    expressions: Vec<StoredExpression>,
    /// Stored variable name -> index of the expression writing it.
    producers: FxHashMap<String, usize>,
    dependencies: FxHashMap<String, Vec<String>>,
    /// Assigned variable -> line of the statement assigning it.
    drivers: FxHashMap<String, u32>,
    /// Alternate clock name -> last sampled value.
    alt_clocks: Vec<(String, bool)>,
    clocks: Vec<ClockBinding>,
    /// Dependency order of `expressions`, set by `check_cycles`.
    order: Option<Vec<usize>>,
    cycle_detection: CycleDetection,
    settle_limit: Option<usize>,
}

impl Database {
    pub fn new(settings: &Settings) -> Self {
        Database {
            cycle_detection: settings.cycle_detection,
            settle_limit: settings.settle_limit,
            ..Database::default()
        }
    }

    // === Namespace ===

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Bit names claimed for a vector, most significant first.
    pub fn components(&self, name: &str) -> Option<Vec<String>> {
        self.namespace.components(name)
    }

    // === Variables ===

    /// Register a variable. Returns `false` if it already exists with the
    /// same kind.
    pub fn add_variable(
        &mut self,
        kind: VariableKind,
        name: &str,
        value: bool,
    ) -> Result<bool, DatabaseError> {
        if let Some(existing) = self.variable(name) {
            if existing.kind != kind {
                return Err(DatabaseError::KindConflict {
                    name: name.to_owned(),
                    existing: existing.kind,
                });
            }
            return Ok(false);
        }
        self.index.insert(name.to_owned(), self.variables.len());
        self.variables.push(Variable {
            name: name.to_owned(),
            value,
            kind,
        });
        Ok(true)
    }

    /// Register `name` as independent unless it already exists in any form.
    pub fn ensure_independent(&mut self, name: &str, value: bool) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.add_variable(VariableKind::Independent, name, value)
            .unwrap_or(false)
    }

    /// Register `name` as dependent, promoting it if it was independent.
    pub fn ensure_dependent(&mut self, name: &str) {
        if self.make_dependent(name).is_err() {
            self.ensure_independent(name, false);
            let _ = self.make_dependent(name);
        }
    }

    /// Promote an existing variable to dependent in place.
    pub fn make_dependent(&mut self, name: &str) -> Result<(), DatabaseError> {
        let variable = self.variable_mut(name)?;
        variable.kind = VariableKind::Dependent;
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&index| &self.variables[index])
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Variable, DatabaseError> {
        match self.index.get(name) {
            Some(&index) => Ok(&mut self.variables[index]),
            None => Err(DatabaseError::Unknown {
                name: name.to_owned(),
            }),
        }
    }

    /// All variables in registration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// `Some(value)`, or `None` when `name` was never registered.
    pub fn value(&self, name: &str) -> Option<bool> {
        self.variable(name).map(|variable| variable.value)
    }

    /// Current value, `false` for unknown names.
    pub fn get_value(&self, name: &str) -> bool {
        self.value(name).unwrap_or(false)
    }

    pub fn set_value(&mut self, name: &str, value: bool) -> Result<(), DatabaseError> {
        self.variable_mut(name)?.value = value;
        Ok(())
    }

    /// Toggle a variable and return its new value.
    pub fn flip_value(&mut self, name: &str) -> Result<bool, DatabaseError> {
        let variable = self.variable_mut(name)?;
        variable.value = !variable.value;
        Ok(variable.value)
    }

    // === Dependencies ===

    /// Record what `dependent` is computed from.
    pub fn try_add_dependency_list(
        &mut self,
        dependent: &str,
        inputs: Vec<String>,
    ) -> Result<(), DatabaseError> {
        if inputs.iter().any(|input| input == dependent) {
            return Err(DatabaseError::SelfDependency {
                name: dependent.to_owned(),
            });
        }
        self.dependencies.insert(dependent.to_owned(), inputs);
        Ok(())
    }

    pub fn dependencies(&self, dependent: &str) -> Option<&[String]> {
        self.dependencies.get(dependent).map(Vec::as_slice)
    }

    /// Claim `name` for the statement on `line`. A variable can only be
    /// assigned by one statement.
    pub fn claim_driver(&mut self, name: &str, line: u32) -> Result<(), DatabaseError> {
        if self.drivers.contains_key(name) {
            return Err(DatabaseError::MultipleDrivers {
                name: name.to_owned(),
            });
        }
        self.drivers.insert(name.to_owned(), line);
        Ok(())
    }

    // === Expressions ===

    pub fn add_expression(
        &mut self,
        stores: Vec<String>,
        assignment: Assignment,
        line: u32,
    ) -> usize {
        let index = self.expressions.len();
        for store in &stores {
            self.producers.insert(store.clone(), index);
        }
        self.expressions.push(StoredExpression {
            stores,
            assignment,
            line,
        });
        self.order = None;
        index
    }

    pub fn expression(&self, index: usize) -> Option<&StoredExpression> {
        self.expressions.get(index)
    }

    pub fn expressions(&self) -> &[StoredExpression] {
        &self.expressions
    }

    /// Re-run every stored expression against current values.
    ///
    /// With full cycle detection the expressions run once in dependency
    /// order. Otherwise they run in source order until nothing changes or
    /// the settle limit is hit.
    pub fn reevaluate(&mut self) {
        if self.cycle_detection == CycleDetection::Full {
            if let Some(order) = self.order.take() {
                for &index in &order {
                    self.apply(index);
                }
                self.order = Some(order);
                return;
            }
        }

        let limit = self
            .settle_limit
            .unwrap_or(self.expressions.len() + 1)
            .max(1);
        for pass in 0..limit {
            let mut changed = false;
            for index in 0..self.expressions.len() {
                changed |= self.apply(index);
            }
            if !changed {
                tracing::trace!(passes = pass + 1, "expressions settled");
                return;
            }
        }
        tracing::warn!(limit, "expressions did not settle within the pass limit");
    }

    /// Evaluate one expression and store its values. Returns whether any
    /// stored value changed.
    fn apply(&mut self, index: usize) -> bool {
        let Some(stored) = self.expressions.get(index) else {
            return false;
        };
        let lookup = |name: &str| self.get_value(name);
        let values = stored.assignment.evaluate(&lookup);
        let updates: Vec<(usize, bool)> = stored
            .stores
            .iter()
            .zip(values)
            .filter_map(|(store, value)| self.index.get(store).map(|&slot| (slot, value)))
            .collect();

        let mut changed = false;
        for (slot, value) in updates {
            let variable = &mut self.variables[slot];
            if variable.value != value {
                tracing::trace!(name = %variable.name, value, "reevaluated");
                variable.value = value;
                changed = true;
            }
        }
        changed
    }

    /// Reject dependency cycles between expressions and remember an
    /// evaluation order with every input computed before it is read.
    pub fn check_cycles(&mut self) -> Result<(), DatabaseError> {
        let edges: Vec<Vec<usize>> = self
            .expressions
            .iter()
            .map(|stored| {
                stored
                    .assignment
                    .rhs
                    .variables()
                    .iter()
                    .filter_map(|input| self.producers.get(input).copied())
                    .collect()
            })
            .collect();

        let mut sort = TopoSort {
            edges: &edges,
            state: vec![Visit::New; edges.len()],
            stack: Vec::new(),
            order: Vec::with_capacity(edges.len()),
        };
        for index in 0..edges.len() {
            if let Err(cycle) = sort.visit(index) {
                let names: Vec<&str> = cycle
                    .iter()
                    .map(|&index| self.expression_name(index))
                    .collect();
                let first = cycle.first().copied().unwrap_or(index);
                return Err(DatabaseError::Cycle {
                    name: self.expression_name(first).to_owned(),
                    path: names.join(" -> "),
                    line: self.expressions[first].line,
                });
            }
        }
        self.order = Some(sort.order);
        Ok(())
    }

    fn expression_name(&self, index: usize) -> &str {
        self.expressions[index]
            .stores
            .first()
            .map_or("", String::as_str)
    }

    // === Clocks ===

    /// Bind a clock statement's registers to the primary clock (`alt` is
    /// `None`) or to an alternate clock variable.
    pub fn add_clock(&mut self, registers: Vec<String>, alt: Option<String>) -> usize {
        if let Some(alt) = &alt {
            if !self.alt_clocks.iter().any(|(name, _)| name == alt) {
                let sampled = self.get_value(alt);
                self.alt_clocks.push((alt.clone(), sampled));
            }
        }
        self.clocks.push(ClockBinding { registers, alt });
        self.clocks.len() - 1
    }

    /// Copy each register's pending `.d` value into the register.
    pub fn commit_clock(&mut self, index: usize) {
        let Some(binding) = self.clocks.get(index) else {
            return;
        };
        let updates: Vec<(String, bool)> = binding
            .registers
            .iter()
            .map(|register| (register.clone(), self.get_value(&next_value_name(register))))
            .collect();
        for (register, value) in updates {
            let _ = self.set_value(&register, value);
        }
    }

    /// Commit every clock on the primary clock.
    pub fn tick_primary(&mut self) {
        let primary: Vec<usize> = (0..self.clocks.len())
            .filter(|&index| self.clocks[index].alt.is_none())
            .collect();
        for index in primary {
            self.commit_clock(index);
        }
    }

    /// Sample the current value of every alternate clock.
    pub fn update_alt_clocks(&mut self) {
        for index in 0..self.alt_clocks.len() {
            let sampled = self.get_value(&self.alt_clocks[index].0);
            self.alt_clocks[index].1 = sampled;
        }
    }

    /// Commit the clocks whose alternate clock rose since the last sample.
    /// Returns whether any fired.
    pub fn tick_alt_clocks(&mut self) -> bool {
        let rising: Vec<String> = self
            .alt_clocks
            .iter()
            .filter(|(name, last)| !*last && self.get_value(name))
            .map(|(name, _)| name.clone())
            .collect();
        if rising.is_empty() {
            return false;
        }
        let fired: Vec<usize> = (0..self.clocks.len())
            .filter(|&index| {
                self.clocks[index]
                    .alt
                    .as_ref()
                    .is_some_and(|alt| rising.contains(alt))
            })
            .collect();
        tracing::debug!(?rising, clocks = fired.len(), "alternate clocks fired");
        for index in fired {
            self.commit_clock(index);
        }
        true
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Visit {
    New,
    Active,
    Done,
}

/// Depth-first topological sort that reports the first cycle it meets.
struct TopoSort<'e> {
    edges: &'e [Vec<usize>],
    state: Vec<Visit>,
    stack: Vec<usize>,
    order: Vec<usize>,
}

impl TopoSort<'_> {
    /// On a cycle, returns its members starting and ending with the same
    /// expression.
    fn visit(&mut self, index: usize) -> Result<(), Vec<usize>> {
        match self.state[index] {
            Visit::Done => return Ok(()),
            Visit::Active => {
                let start = self
                    .stack
                    .iter()
                    .position(|&on_stack| on_stack == index)
                    .unwrap_or(0);
                let mut cycle = self.stack[start..].to_vec();
                cycle.push(index);
                return Err(cycle);
            }
            Visit::New => {}
        }
        self.state[index] = Visit::Active;
        self.stack.push(index);
        for &input in &self.edges[index] {
            vb_stack::ensure_sufficient_stack(|| self.visit(input))?;
        }
        self.stack.pop();
        self.state[index] = Visit::Done;
        self.order.push(index);
        Ok(())
    }
}
