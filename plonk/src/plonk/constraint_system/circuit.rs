use crate::errors::{PlonkError, Result};
use crate::plonk::constraint_system::{
    CopyConstraint, Expression, Gate, LookupConstraint, LookupGate, LookupTable, Variable,
};
use ark_std::collections::{BTreeMap, BTreeSet};
use blueprint_algebra::prelude::*;

/// The constraint system: gates, lookup gates, copy constraints and lookup tables.
///
/// Gates and lookup gates share one selector space. Registering a gate whose
/// canonical form is already present returns the existing selector, so every
/// placement of a component shape reuses the same selector column.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Circuit<F> {
    gates: Vec<Gate<F>>,
    lookup_gates: Vec<LookupGate<F>>,
    copy_constraints: Vec<CopyConstraint>,
    /// The pairs of `copy_constraints`, rebuilt after deserialization.
    #[serde(skip)]
    copy_index: BTreeSet<CopyConstraint>,
    lookup_tables: Vec<LookupTable<F>>,
    table_ids: BTreeMap<String, usize>,
    selectors_amount: usize,
}

impl<F: PartialEq> PartialEq for Circuit<F> {
    fn eq(&self, other: &Self) -> bool {
        self.gates == other.gates
            && self.lookup_gates == other.lookup_gates
            && self.copy_constraints == other.copy_constraints
            && self.lookup_tables == other.lookup_tables
            && self.table_ids == other.table_ids
            && self.selectors_amount == other.selectors_amount
    }
}

impl<F: Scalar> Default for Circuit<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> Circuit<F> {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self {
            gates: Vec::new(),
            lookup_gates: Vec::new(),
            copy_constraints: Vec::new(),
            copy_index: BTreeSet::new(),
            lookup_tables: Vec::new(),
            table_ids: BTreeMap::new(),
            selectors_amount: 0,
        }
    }

    /// Reserve a selector column without attaching a gate to it.
    pub fn allocate_selector(&mut self) -> usize {
        self.selectors_amount += 1;
        self.selectors_amount - 1
    }

    /// Register a gate and return its selector.
    pub fn add_gate(&mut self, constraints: Vec<Expression<F>>) -> usize {
        assert!(!constraints.is_empty(), "a gate needs at least one constraint");
        let constraints: Vec<Expression<F>> = constraints.iter().map(|c| c.canonical()).collect();
        if let Some(gate) = self.gates.iter().find(|g| g.constraints == constraints) {
            log::debug!("gate reuses selector {}", gate.selector_index);
            return gate.selector_index;
        }
        let selector_index = self.allocate_selector();
        log::debug!(
            "gate {} with {} constraints gets selector {}",
            self.gates.len(),
            constraints.len(),
            selector_index
        );
        self.gates.push(Gate {
            selector_index,
            constraints,
        });
        selector_index
    }

    /// Register a lookup gate and return its selector.
    ///
    /// Panics if a constraint names an unknown table or its tuple width differs
    /// from the table's.
    pub fn add_lookup_gate(&mut self, constraints: Vec<LookupConstraint<F>>) -> usize {
        assert!(
            !constraints.is_empty(),
            "a lookup gate needs at least one constraint"
        );
        let constraints: Vec<LookupConstraint<F>> = constraints
            .iter()
            .map(|c| {
                let table = self.lookup_tables.get(c.table_id).unwrap_or_else(|| {
                    panic!("lookup constraint names unregistered table {}", c.table_id)
                });
                assert_eq!(
                    c.lookup_input.len(),
                    table.width(),
                    "lookup into {} has the wrong tuple width",
                    table.name()
                );
                LookupConstraint::new(
                    c.table_id,
                    c.lookup_input.iter().map(|e| e.canonical()).collect(),
                )
            })
            .collect();
        if let Some(gate) = self
            .lookup_gates
            .iter()
            .find(|g| g.constraints == constraints)
        {
            log::debug!("lookup gate reuses selector {}", gate.selector_index);
            return gate.selector_index;
        }
        let selector_index = self.allocate_selector();
        log::debug!(
            "lookup gate {} with {} constraints gets selector {}",
            self.lookup_gates.len(),
            constraints.len(),
            selector_index
        );
        self.lookup_gates.push(LookupGate {
            selector_index,
            constraints,
        });
        selector_index
    }

    /// Require two absolute cells to hold the same value.
    ///
    /// A cell copied to itself is dropped, as is a pair that is already present.
    pub fn add_copy_constraint(&mut self, left: Variable, right: Variable) {
        let copy = CopyConstraint::new(left, right);
        if copy.is_trivial() {
            return;
        }
        if self.copy_index.len() != self.copy_constraints.len() {
            self.copy_index = self.copy_constraints.iter().copied().collect();
        }
        if self.copy_index.insert(copy) {
            self.copy_constraints.push(copy);
        }
    }

    /// Register a lookup table and return its id.
    ///
    /// Registering an identical table again returns the existing id; a
    /// different table under a taken name panics.
    pub fn register_lookup_table(&mut self, table: LookupTable<F>) -> usize {
        if let Some(&id) = self.table_ids.get(table.name()) {
            assert!(
                self.lookup_tables[id] == table,
                "lookup table {} is already registered with a different definition",
                table.name()
            );
            return id;
        }
        if let LookupTable::Dynamic { tag_selector, .. } = &table {
            assert!(
                *tag_selector < self.selectors_amount,
                "dynamic table {} is tagged by unallocated selector {}",
                table.name(),
                tag_selector
            );
        }
        let id = self.lookup_tables.len();
        log::debug!("lookup table {} registered as {}", table.name(), id);
        self.table_ids.insert(table.name().into(), id);
        self.lookup_tables.push(table);
        id
    }

    /// The id of the table registered under `name`.
    pub fn table_id(&self, name: &str) -> Option<usize> {
        self.table_ids.get(name).copied()
    }

    /// The name of table `id`.
    pub fn table_name(&self, id: usize) -> Option<&str> {
        self.lookup_tables.get(id).map(|t| t.name())
    }

    /// Table `id`.
    pub fn lookup_table(&self, id: usize) -> Result<&LookupTable<F>> {
        self.lookup_tables
            .get(id)
            .ok_or(PlonkError::UnknownTable(id))
    }

    /// The gate attached to `selector_index`.
    pub fn gate_by_selector(&self, selector_index: usize) -> Result<&Gate<F>> {
        self.gates
            .iter()
            .find(|g| g.selector_index == selector_index)
            .ok_or(PlonkError::UnknownSelector(selector_index))
    }

    /// The number of selector columns in use.
    pub fn selectors_amount(&self) -> usize {
        self.selectors_amount
    }

    /// The largest gate degree, selector included.
    pub fn max_degree(&self) -> u64 {
        self.gates.iter().map(|g| g.degree()).max().unwrap_or(0)
    }

    /// The gates, in registration order.
    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    /// The lookup gates, in registration order.
    pub fn lookup_gates(&self) -> &[LookupGate<F>] {
        &self.lookup_gates
    }

    /// The copy constraints, in registration order.
    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    /// The lookup tables, indexed by table id.
    pub fn lookup_tables(&self) -> &[LookupTable<F>] {
        &self.lookup_tables
    }
}
