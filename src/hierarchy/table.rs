use std::fmt;

use indexmap::IndexMap;

use crate::shape::{TypeId, TypeShape, VariableSite};

/// Binding table of a single type: declared parameter name to resolved shape
///
/// Entries keep the declaration order of the parameters. A table is filled once by the
/// walker and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    bindings: IndexMap<String, TypeShape>,
}

impl VariableTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        VariableTable::default()
    }

    /// Pair declared parameters with their actual arguments, positionally
    pub(crate) fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, TypeShape)>,
    {
        VariableTable {
            bindings: pairs.into_iter().collect(),
        }
    }

    /// The binding of the parameter `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeShape> {
        self.bindings.get(name)
    }

    /// Count of bound parameters
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the type declares no parameters
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in parameter declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeShape)> {
        self.bindings
            .iter()
            .map(|(name, shape)| (name.as_str(), shape))
    }
}

impl fmt::Display for VariableTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, shape)) in self.bindings.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} -> {shape}")?;
        }
        f.write_str("}")
    }
}

/// The binding tables of a root type and all of its ancestors
///
/// Types are kept in discovery order: the root first, then ancestors depth-first with the
/// supertype before the superinterfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedHierarchy {
    tables: IndexMap<TypeId, VariableTable>,
}

impl MappedHierarchy {
    /// Create an empty hierarchy
    #[must_use]
    pub fn new() -> Self {
        MappedHierarchy::default()
    }

    pub(crate) fn insert(&mut self, type_id: TypeId, table: VariableTable) {
        self.tables.insert(type_id, table);
    }

    /// The binding table of `type_id`, `None` if the type was not visited
    #[must_use]
    pub fn table(&self, type_id: &TypeId) -> Option<&VariableTable> {
        self.tables.get(type_id)
    }

    /// Returns `true` if `type_id` is part of the hierarchy
    #[must_use]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.tables.contains_key(type_id)
    }

    /// The binding of a type variable
    ///
    /// Method variables are never bound and always yield `None`.
    ///
    /// ## Arguments
    /// * 'site'    - Where the variable is declared
    /// * 'name'    - The variable name
    #[must_use]
    pub fn binding(&self, site: &VariableSite, name: &str) -> Option<&TypeShape> {
        match site {
            VariableSite::Type(type_id) => self.tables.get(type_id)?.get(name),
            VariableSite::Method { .. } => None,
        }
    }

    /// Visited types in discovery order
    pub fn types(&self) -> impl Iterator<Item = &TypeId> {
        self.tables.keys()
    }

    /// All tables in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&TypeId, &VariableTable)> {
        self.tables.iter()
    }

    /// Count of visited types
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no type was visited (array roots)
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
