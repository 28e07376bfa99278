use tracing::trace;

use crate::{
    declaration::DeclarationProvider,
    hierarchy::{MappedHierarchy, VariableTable},
    shape::{TypeId, TypeShape, VariableSite},
    Error::{ArityMismatch, ConflictingDiamondBinding, CyclicHierarchy, UnsupportedShape},
    Result,
};

/// Builds the binding tables of a root type and all of its ancestors
///
/// This is the replaceable "variable mapper" module of a
/// [`crate::context::ResolvingContext`].
pub trait VariableMapper: Send + Sync {
    /// Walk the supertype graph of `root` and bind every ancestor's type parameters
    ///
    /// ## Arguments
    /// * 'root'        - The root type, optionally carrying explicit type arguments
    /// * 'provider'    - Source of the declarations being walked
    ///
    /// # Errors
    /// Returns an error if an argument count does not match, a diamond is bound
    /// inconsistently, the graph is cyclic or a type is unknown to `provider`
    fn map_type_variables(
        &self,
        root: &TypeShape,
        provider: &dyn DeclarationProvider,
    ) -> Result<MappedHierarchy>;

    /// Name of the implementation, used in log output
    fn module_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Default [`VariableMapper`], a depth-first walk over supertype and superinterface
/// expressions
///
/// The supertype is walked before the superinterfaces, which keep their declared order.
/// Every visited type receives a table, including types without parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct HierarchyWalker;

impl HierarchyWalker {
    /// Create a new walker
    #[must_use]
    pub fn new() -> Self {
        HierarchyWalker
    }

    fn visit(
        &self,
        type_id: &TypeId,
        arguments: &[TypeShape],
        provider: &dyn DeclarationProvider,
        hierarchy: &mut MappedHierarchy,
        path: &mut Vec<TypeId>,
    ) -> Result<()> {
        if path.contains(type_id) {
            return Err(CyclicHierarchy(type_id.clone()));
        }

        let table = bind_arguments(type_id, arguments, provider)?;
        if let Some(recorded) = hierarchy.table(type_id) {
            if recorded != &table {
                return Err(ConflictingDiamondBinding {
                    type_id: type_id.clone(),
                    first: recorded.to_string(),
                    second: table.to_string(),
                });
            }
            return Ok(());
        }

        trace!(type_id = %type_id, bindings = %table, "bound ancestor");

        let site = VariableSite::Type(type_id.clone());
        let expressions = provider
            .supertype_expression(type_id)?
            .into_iter()
            .chain(provider.superinterface_expressions(type_id)?);

        let mut ancestors = Vec::new();
        for expression in expressions {
            if let Some(variable) = undeclared_variable(&expression, &site, &table) {
                return Err(UnsupportedShape(format!(
                    "supertype '{}' of '{}' references '{}', which '{}' does not declare",
                    expression, type_id, variable, type_id
                )));
            }
            let resolved = expression.substitute(&|declared_on: &VariableSite, name: &str| {
                if declared_on == &site {
                    table.get(name).cloned()
                } else {
                    None
                }
            });
            match resolved {
                TypeShape::Named {
                    type_id,
                    type_arguments,
                } => ancestors.push((type_id, type_arguments)),
                other => {
                    return Err(UnsupportedShape(format!(
                        "{} supertype '{}' of '{}'",
                        other.kind(),
                        other,
                        type_id
                    )))
                }
            }
        }

        hierarchy.insert(type_id.clone(), table);
        path.push(type_id.clone());
        for (ancestor, ancestor_arguments) in &ancestors {
            self.visit(ancestor, ancestor_arguments, provider, hierarchy, path)?;
        }
        path.pop();

        Ok(())
    }
}

impl VariableMapper for HierarchyWalker {
    fn map_type_variables(
        &self,
        root: &TypeShape,
        provider: &dyn DeclarationProvider,
    ) -> Result<MappedHierarchy> {
        let mut hierarchy = MappedHierarchy::new();
        match root {
            TypeShape::Named {
                type_id,
                type_arguments,
            } => {
                let mut path = Vec::new();
                self.visit(type_id, type_arguments, provider, &mut hierarchy, &mut path)?;
            }
            // Arrays have no generic ancestors
            TypeShape::Array(_) => {}
            other => {
                return Err(UnsupportedShape(format!(
                    "{} '{}' can not be a hierarchy root",
                    other.kind(),
                    other
                )))
            }
        }
        Ok(hierarchy)
    }
}

/// Pair the declared parameters of `type_id` with `arguments`
///
/// Empty arguments mean raw usage: every parameter is bound to a variable referencing
/// itself.
fn bind_arguments(
    type_id: &TypeId,
    arguments: &[TypeShape],
    provider: &dyn DeclarationProvider,
) -> Result<VariableTable> {
    let parameters = provider.declared_parameters(type_id)?;

    if arguments.is_empty() {
        return Ok(VariableTable::from_pairs(parameters.into_iter().map(|name| {
            let unbound = TypeShape::variable(type_id.clone(), name.clone());
            (name, unbound)
        })));
    }

    if arguments.len() != parameters.len() {
        return Err(ArityMismatch {
            type_id: type_id.clone(),
            expected: parameters.len(),
            actual: arguments.len(),
        });
    }

    Ok(VariableTable::from_pairs(
        parameters.into_iter().zip(arguments.iter().cloned()),
    ))
}

/// First variable in `expression` that is not a parameter of the type owning `site`
fn undeclared_variable<'s>(
    expression: &'s TypeShape,
    site: &VariableSite,
    table: &VariableTable,
) -> Option<&'s TypeShape> {
    match expression {
        TypeShape::Named { type_arguments, .. } => type_arguments
            .iter()
            .find_map(|argument| undeclared_variable(argument, site, table)),
        TypeShape::Array(element) => undeclared_variable(element, site, table),
        TypeShape::Variable { declared_on, name } => {
            if declared_on == site && table.get(name).is_some() {
                None
            } else {
                Some(expression)
            }
        }
        TypeShape::Wildcard {
            upper_bounds,
            lower_bounds,
        } => upper_bounds
            .iter()
            .chain(lower_bounds)
            .find_map(|bound| undeclared_variable(bound, site, table)),
    }
}
