//! # genscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the genscope library. Import this module to get quick access to everything needed
//! to declare types, resolve hierarchies and render member signatures.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all genscope operations
pub use crate::Error;

/// The result type used throughout genscope
pub use crate::Result;

/// Options shared by every module of a context
pub use crate::ResolverOptions;

// ================================================================================================
// Shapes
// ================================================================================================

/// The type shape model and its parser
pub use crate::shape::{parse_shape, ShapeParser, TypeId, TypeShape, VariableScope, VariableSite};

// ================================================================================================
// Declarations
// ================================================================================================

/// Declarations and their provider
pub use crate::declaration::{
    DeclarationProvider, DeclarationTable, FieldDeclaration, MethodDeclaration, TypeBuilder,
    TypeDeclaration,
};

// ================================================================================================
// Hierarchy Resolution
// ================================================================================================

/// Walker, binding tables and hierarchy storage
pub use crate::hierarchy::{
    CachedHierarchyStorage, HierarchyStorage, HierarchyWalker, MappedHierarchy, VariableMapper,
    VariableTable,
};

// ================================================================================================
// Rendering
// ================================================================================================

/// Resolver chain and picker
pub use crate::render::{
    FirstMatchPicker, RenderScope, ResolverPicker, ResolverStorage, ShapeResolver,
    StandardResolverStorage,
};

// ================================================================================================
// Contexts
// ================================================================================================

/// Resolving context, member rendering and the module registry
pub use crate::context::{
    HierarchyStorageFactory, MemberResolver, ModuleKind, ModuleRegistry, ModuleSeed,
    ResolvedMethod, ResolverPickerFactory, ResolverStorageFactory, ResolvingContext,
    VariableMapperFactory,
};
