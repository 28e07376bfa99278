//! The built-in shape resolvers, one per shape kind.

use crate::{
    render::RenderScope,
    shape::TypeShape,
    Error::UnsupportedShape,
    Result,
};

/// Renders one kind of [`TypeShape`]
///
/// Resolvers recurse into nested shapes through [`RenderScope::render`], so nested shapes
/// go through the same picker and chain as the outermost one.
pub trait ShapeResolver: Send + Sync {
    /// Returns `true` if this resolver claims `shape`
    fn can_resolve(&self, shape: &TypeShape) -> bool;

    /// Render `shape` within `scope`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] if `shape` is not of the claimed kind, or
    /// any error raised while rendering nested shapes
    fn resolve(&self, shape: &TypeShape, scope: &RenderScope<'_>) -> Result<String>;
}

fn mismatch(resolver: &str, shape: &TypeShape) -> crate::Error {
    UnsupportedShape(format!(
        "{resolver} resolver can not render {} '{shape}'",
        shape.kind()
    ))
}

/// `element[]`
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayResolver;

impl ShapeResolver for ArrayResolver {
    fn can_resolve(&self, shape: &TypeShape) -> bool {
        shape.is_array()
    }

    fn resolve(&self, shape: &TypeShape, scope: &RenderScope<'_>) -> Result<String> {
        match shape {
            TypeShape::Array(element) => Ok(format!("{}[]", scope.render(element)?)),
            other => Err(mismatch("array", other)),
        }
    }
}

/// `Base<A, B>`
#[derive(Debug, Default, Clone, Copy)]
pub struct ParameterizedResolver;

impl ShapeResolver for ParameterizedResolver {
    fn can_resolve(&self, shape: &TypeShape) -> bool {
        shape.is_parameterized()
    }

    fn resolve(&self, shape: &TypeShape, scope: &RenderScope<'_>) -> Result<String> {
        let TypeShape::Named {
            type_id,
            type_arguments,
        } = shape
        else {
            return Err(mismatch("parameterized", shape));
        };

        let mut rendered = scope.render(&TypeShape::named(type_id.clone()))?;
        if type_arguments.is_empty() {
            return Ok(rendered);
        }

        let arguments = type_arguments
            .iter()
            .map(|argument| scope.render(argument))
            .collect::<Result<Vec<_>>>()?;
        rendered.push('<');
        rendered.push_str(&arguments.join(", "));
        rendered.push('>');
        Ok(rendered)
    }
}

/// Type variables, substituted with their binding in the scope's hierarchy
///
/// A variable bound to another variable is free and renders as that variable's name.
/// Variables without any binding (method variables, variables of types outside the
/// hierarchy) render as their own name.
#[derive(Debug, Default, Clone, Copy)]
pub struct VariableResolver;

impl ShapeResolver for VariableResolver {
    fn can_resolve(&self, shape: &TypeShape) -> bool {
        shape.is_variable()
    }

    fn resolve(&self, shape: &TypeShape, scope: &RenderScope<'_>) -> Result<String> {
        let TypeShape::Variable { declared_on, name } = shape else {
            return Err(mismatch("variable", shape));
        };

        match scope.hierarchy().binding(declared_on, name) {
            Some(TypeShape::Variable { name: free, .. }) => Ok(free.clone()),
            Some(bound) => scope.render_binding(declared_on, name, bound),
            None => Ok(name.clone()),
        }
    }
}

/// `?`, `? extends A & B`, `? super L`
#[derive(Debug, Default, Clone, Copy)]
pub struct WildcardResolver;

impl WildcardResolver {
    fn render_bounds(
        rendered: &mut String,
        marker: &str,
        bounds: &[TypeShape],
        scope: &RenderScope<'_>,
    ) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let bounds = bounds
            .iter()
            .map(|bound| scope.render(bound))
            .collect::<Result<Vec<_>>>()?;
        rendered.push_str(marker);
        rendered.push_str(&bounds.join(" & "));
        Ok(())
    }
}

impl ShapeResolver for WildcardResolver {
    fn can_resolve(&self, shape: &TypeShape) -> bool {
        shape.is_wildcard()
    }

    fn resolve(&self, shape: &TypeShape, scope: &RenderScope<'_>) -> Result<String> {
        let TypeShape::Wildcard {
            upper_bounds,
            lower_bounds,
        } = shape
        else {
            return Err(mismatch("wildcard", shape));
        };

        let mut rendered = String::from("?");
        Self::render_bounds(&mut rendered, " extends ", upper_bounds, scope)?;
        Self::render_bounds(&mut rendered, " super ", lower_bounds, scope)?;
        Ok(rendered)
    }
}

/// Named types without arguments, qualified or short
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainResolver {
    short_names: bool,
}

impl PlainResolver {
    /// Create a resolver rendering qualified names
    #[must_use]
    pub fn new() -> Self {
        PlainResolver { short_names: false }
    }

    /// Create a resolver rendering names without their qualifying path
    #[must_use]
    pub fn short() -> Self {
        PlainResolver { short_names: true }
    }
}

impl ShapeResolver for PlainResolver {
    fn can_resolve(&self, shape: &TypeShape) -> bool {
        shape.is_plain()
    }

    fn resolve(&self, shape: &TypeShape, _scope: &RenderScope<'_>) -> Result<String> {
        match shape {
            TypeShape::Named { type_id, .. } if self.short_names => {
                Ok(type_id.short_name().to_string())
            }
            TypeShape::Named { type_id, .. } => Ok(type_id.to_string()),
            other => Err(mismatch("plain", other)),
        }
    }
}
