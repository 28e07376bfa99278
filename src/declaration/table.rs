//! In-memory declaration table.
//!
//! [`DeclarationTable`] stores pre-extracted [`TypeDeclaration`]s and serves them through the
//! [`DeclarationProvider`] trait. Storage is a lock-free `SkipMap`, so tables can be filled
//! from several threads and iteration is always ordered by type name.

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;

use crate::{
    declaration::{DeclarationProvider, FieldDeclaration, MethodDeclaration, TypeDeclaration},
    shape::{TypeId, TypeShape},
    Error::TypeNotFound,
    Result,
};

/// Reference to a stored `TypeDeclaration`
pub type TypeDeclarationRc = Arc<TypeDeclaration>;

/// Thread-safe table of type declarations, keyed by [`TypeId`]
#[derive(Default)]
pub struct DeclarationTable {
    declarations: SkipMap<TypeId, TypeDeclarationRc>,
}

impl DeclarationTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        DeclarationTable {
            declarations: SkipMap::new(),
        }
    }

    /// Insert a declaration, replacing a previous one with the same id
    ///
    /// ## Arguments
    /// * 'declaration' - The declaration to store
    pub fn insert(&self, declaration: TypeDeclaration) -> TypeDeclarationRc {
        let declaration = Arc::new(declaration);
        self.declarations
            .insert(declaration.id.clone(), declaration.clone());
        declaration
    }

    /// Look up a declaration
    #[must_use]
    pub fn get(&self, type_id: &TypeId) -> Option<TypeDeclarationRc> {
        self.declarations
            .get(type_id)
            .map(|entry| entry.value().clone())
    }

    /// Returns `true` if `type_id` is declared
    #[must_use]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.declarations.contains_key(type_id)
    }

    /// Count of declared types
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// All declared type ids, ordered by name
    pub fn type_ids(&self) -> Vec<TypeId> {
        self.declarations
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Wrap the table into a shareable provider handle
    #[must_use]
    pub fn into_provider(self) -> Arc<dyn DeclarationProvider> {
        Arc::new(self)
    }

    fn require(&self, type_id: &TypeId) -> Result<TypeDeclarationRc> {
        self.get(type_id)
            .ok_or_else(|| TypeNotFound(type_id.clone()))
    }
}

impl DeclarationProvider for DeclarationTable {
    fn declared_parameters(&self, type_id: &TypeId) -> Result<Vec<String>> {
        Ok(self.require(type_id)?.parameters.clone())
    }

    fn supertype_expression(&self, type_id: &TypeId) -> Result<Option<TypeShape>> {
        Ok(self.require(type_id)?.supertype.clone())
    }

    fn superinterface_expressions(&self, type_id: &TypeId) -> Result<Vec<TypeShape>> {
        Ok(self.require(type_id)?.interfaces.clone())
    }

    fn field(&self, type_id: &TypeId, name: &str) -> Option<FieldDeclaration> {
        self.get(type_id)?.field(name).cloned()
    }

    fn method(&self, type_id: &TypeId, name: &str) -> Option<MethodDeclaration> {
        self.get(type_id)?.method(name).cloned()
    }
}
