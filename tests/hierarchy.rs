//! Integration tests for hierarchy resolution and rendering through a resolving context.
//!
//! The declarations mirror small pieces of the Java class library plus a few purpose-built
//! generic types that rename, reorder and partially bind their parameters.

use genscope::{prelude::*, Error, Result};

fn declarations() -> Result<DeclarationTable> {
    let table = DeclarationTable::new();
    let declarations = [
        TypeBuilder::new("java.lang.Object"),
        TypeBuilder::new("java.lang.Comparable").parameters(["T"]),
        TypeBuilder::new("java.lang.Iterable").parameters(["T"]),
        TypeBuilder::new("java.util.Collection")
            .parameters(["E"])
            .implements("java.lang.Iterable<E>"),
        TypeBuilder::new("java.util.List")
            .parameters(["E"])
            .implements("java.util.Collection<E>"),
        TypeBuilder::new("java.util.Map").parameters(["K", "V"]),
        TypeBuilder::new("demo.Container")
            .parameters(["T"])
            .field("items", "java.util.List<T>"),
        TypeBuilder::new("demo.Entry")
            .parameters(["X"])
            .extends("java.lang.Object")
            .implements("java.lang.Comparable<X>"),
        TypeBuilder::new("demo.Pair")
            .parameters(["A", "B"])
            .extends("demo.Entry<B>")
            .implements("demo.Container<A>"),
        // Swaps the order of its parameters
        TypeBuilder::new("demo.Flipped")
            .parameters(["P", "Q"])
            .extends("demo.Pair<Q, P>"),
        // Binds one parameter, keeps the other free
        TypeBuilder::new("demo.Keyed")
            .parameters(["V"])
            .extends("demo.Pair<java.lang.String, V>")
            .implements("java.util.Map<java.lang.String, V>"),
        // Binds an ancestor parameter to a nested generic of its own parameter
        TypeBuilder::new("demo.Nested")
            .parameters(["N"])
            .extends("demo.Pair<java.util.List<N[]>, ? extends N>"),
        TypeBuilder::new("demo.StringList").implements("java.util.List<java.lang.String>"),
    ];

    for declaration in declarations {
        table.insert(declaration.build()?);
    }
    Ok(table)
}

fn context() -> Result<std::sync::Arc<ResolvingContext>> {
    let registry = ModuleRegistry::new(declarations()?.into_provider());
    Ok(registry.context())
}

fn binding(hierarchy: &MappedHierarchy, type_id: &str, name: &str) -> Option<String> {
    hierarchy
        .table(&TypeId::new(type_id))
        .and_then(|table| table.get(name))
        .map(ToString::to_string)
}

#[test]
fn test_pair_propagates_to_every_ancestor() -> Result<()> {
    let context = context()?;
    let hierarchy = context.resolve_with_arguments(
        &TypeId::new("demo.Pair"),
        vec![
            TypeShape::named("java.lang.Integer"),
            TypeShape::named("java.lang.String"),
        ],
    )?;

    assert_eq!(binding(&hierarchy, "demo.Pair", "A").as_deref(), Some("java.lang.Integer"));
    assert_eq!(binding(&hierarchy, "demo.Pair", "B").as_deref(), Some("java.lang.String"));
    assert_eq!(binding(&hierarchy, "demo.Entry", "X").as_deref(), Some("java.lang.String"));
    assert_eq!(
        binding(&hierarchy, "java.lang.Comparable", "T").as_deref(),
        Some("java.lang.String")
    );
    assert_eq!(
        binding(&hierarchy, "demo.Container", "T").as_deref(),
        Some("java.lang.Integer")
    );
    assert!(hierarchy.table(&TypeId::new("java.lang.Object")).is_some());

    Ok(())
}

#[test]
fn test_reordered_parameters() -> Result<()> {
    let context = context()?;
    let root = TypeShape::parameterized(
        "demo.Flipped",
        vec![
            TypeShape::named("java.lang.Integer"),
            TypeShape::named("java.lang.String"),
        ],
    );
    let hierarchy = context.resolve_shape(&root)?;

    assert_eq!(binding(&hierarchy, "demo.Pair", "A").as_deref(), Some("java.lang.String"));
    assert_eq!(binding(&hierarchy, "demo.Entry", "X").as_deref(), Some("java.lang.Integer"));

    let rendered = context.render_member(
        &root,
        &TypeId::new("demo.Container"),
        &TypeShape::parameterized(
            "java.util.List",
            vec![TypeShape::variable("demo.Container", "T")],
        ),
    )?;
    assert_eq!(rendered, "java.util.List<java.lang.String>");

    Ok(())
}

#[test]
fn test_partial_binding_keeps_free_variables() -> Result<()> {
    let context = context()?;
    let root = TypeShape::named("demo.Keyed");
    let hierarchy = context.resolve_shape(&root)?;

    assert_eq!(binding(&hierarchy, "demo.Pair", "A").as_deref(), Some("java.lang.String"));
    assert_eq!(binding(&hierarchy, "demo.Pair", "B").as_deref(), Some("V"));
    assert_eq!(binding(&hierarchy, "java.util.Map", "V").as_deref(), Some("V"));

    let value = TypeShape::variable("demo.Entry", "X");
    assert_eq!(
        context.render_member(&root, &TypeId::new("demo.Entry"), &value)?,
        "V"
    );

    Ok(())
}

#[test]
fn test_nested_generic_arguments() -> Result<()> {
    let context = context()?;
    let root = TypeShape::parameterized("demo.Nested", vec![TypeShape::named("java.lang.Long")]);

    let items = TypeShape::parameterized(
        "java.util.List",
        vec![TypeShape::variable("demo.Container", "T")],
    );
    assert_eq!(
        context.render_member(&root, &TypeId::new("demo.Container"), &items)?,
        "java.util.List<java.util.List<java.lang.Long[]>>"
    );
    assert_eq!(
        context.render_member(
            &root,
            &TypeId::new("java.lang.Comparable"),
            &TypeShape::variable("java.lang.Comparable", "T")
        )?,
        "? extends java.lang.Long"
    );

    Ok(())
}

#[test]
fn test_raw_and_bound_field_rendering() -> Result<()> {
    let context = context()?;
    let items = TypeShape::parameterized(
        "java.util.List",
        vec![TypeShape::variable("demo.Container", "T")],
    );
    let container = TypeId::new("demo.Container");

    let raw = context.render_member(&TypeShape::named("demo.Container"), &container, &items)?;
    assert_eq!(raw, "java.util.List<T>");

    let bound = context.render_member(
        &TypeShape::parameterized(
            "demo.Pair",
            vec![
                TypeShape::named("java.lang.Integer"),
                TypeShape::named("java.lang.String"),
            ],
        ),
        &container,
        &items,
    )?;
    assert_eq!(bound, "java.util.List<java.lang.Integer>");

    // Raw usage of the subclass renders the subclass parameter name
    let raw_pair = context.render_member(&TypeShape::named("demo.Pair"), &container, &items)?;
    assert_eq!(raw_pair, "java.util.List<A>");

    Ok(())
}

#[test]
fn test_non_generic_root_binds_interfaces() -> Result<()> {
    let context = context()?;
    let hierarchy = context.resolve_type(&TypeId::new("demo.StringList"))?;

    assert!(hierarchy.table(&TypeId::new("demo.StringList")).is_some_and(VariableTable::is_empty));
    assert_eq!(
        binding(&hierarchy, "java.lang.Iterable", "T").as_deref(),
        Some("java.lang.String")
    );
    Ok(())
}

#[test]
fn test_wildcard_rendering() -> Result<()> {
    let context = context()?;
    let hierarchy = context.resolve_type(&TypeId::new("java.lang.Object"))?;

    let bounded = parse_shape("java.util.Set<? extends java.lang.Number>", &VariableScope::empty())?;
    assert_eq!(
        context.render(&hierarchy, &bounded)?,
        "java.util.Set<? extends java.lang.Number>"
    );

    let unbounded = parse_shape("java.util.Set<?>", &VariableScope::empty())?;
    assert_eq!(context.render(&hierarchy, &unbounded)?, "java.util.Set<?>");

    let lower = parse_shape("java.util.List<? super java.lang.Integer>[]", &VariableScope::empty())?;
    assert_eq!(
        context.render(&hierarchy, &lower)?,
        "java.util.List<? super java.lang.Integer>[]"
    );

    Ok(())
}

#[test]
fn test_rendering_is_deterministic() -> Result<()> {
    let first = context()?;
    let second = context()?;
    let root = TypeShape::parameterized("demo.Keyed", vec![TypeShape::named("java.lang.Long")]);
    let shape = TypeShape::array(TypeShape::variable("demo.Entry", "X"));
    let declaring = TypeId::new("demo.Entry");

    let rendered = first.render_member(&root, &declaring, &shape)?;
    assert_eq!(rendered, "java.lang.Long[]");
    assert_eq!(rendered, first.render_member(&root, &declaring, &shape)?);
    assert_eq!(rendered, second.render_member(&root, &declaring, &shape)?);

    Ok(())
}

#[test]
fn test_resolution_errors() -> Result<()> {
    let context = context()?;

    let result = context.resolve_with_arguments(
        &TypeId::new("demo.Pair"),
        vec![TypeShape::named("java.lang.Integer")],
    );
    assert!(matches!(
        result,
        Err(Error::ArityMismatch { expected: 2, actual: 1, .. })
    ));

    let result = context.resolve_type(&TypeId::new("demo.Unknown"));
    assert!(matches!(result, Err(Error::TypeNotFound(_))));

    let result = context.resolve_shape(&TypeShape::unbounded());
    assert!(matches!(result, Err(Error::UnsupportedShape(_))));

    let arrays = context.resolve_shape(&TypeShape::array(TypeShape::named("demo.Pair")))?;
    assert!(arrays.is_empty());

    Ok(())
}

#[test]
fn test_self_referential_argument_is_rejected() -> Result<()> {
    let context = context()?;
    let container = TypeId::new("demo.Container");
    let element = TypeShape::variable("demo.Container", "T");
    let root = TypeShape::parameterized(
        "demo.Container",
        vec![TypeShape::parameterized("java.util.List", vec![element.clone()])],
    );

    let result = context.render_member(&root, &container, &element);
    assert!(matches!(result, Err(Error::UnsupportedShape(_))));

    // Free variables of other types stay legal arguments
    let foreign = TypeShape::parameterized(
        "demo.Container",
        vec![TypeShape::variable("demo.Entry", "X")],
    );
    assert_eq!(context.render_member(&foreign, &container, &element)?, "X");

    Ok(())
}

#[test]
fn test_foreign_variable_in_supertype_is_rejected() -> Result<()> {
    let table = DeclarationTable::new();
    table.insert(TypeBuilder::new("demo.Entry").parameters(["X"]).build()?);
    table.insert(
        TypeBuilder::new("demo.Pair")
            .parameters(["A"])
            .extends(TypeShape::parameterized(
                "demo.Entry",
                vec![TypeShape::variable("demo.Other", "Q")],
            ))
            .build()?,
    );
    let context = ModuleRegistry::new(table.into_provider()).context();

    let root = TypeShape::parameterized("demo.Pair", vec![TypeShape::named("java.lang.Integer")]);
    let result = context.render_member(
        &root,
        &TypeId::new("demo.Entry"),
        &TypeShape::variable("demo.Entry", "X"),
    );
    assert!(matches!(result, Err(Error::UnsupportedShape(_))));

    Ok(())
}
