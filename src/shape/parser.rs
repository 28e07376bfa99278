use crate::{
    shape::{TypeId, TypeShape, VariableSite},
    Result,
};

/// Maximum nesting depth of a parsed type expression
const MAX_RECURSION_DEPTH: usize = 64;

/// The type variables visible while parsing a type expression
///
/// Identifiers that match a visible variable become [`TypeShape::Variable`], every other
/// identifier becomes a [`TypeShape::Named`]. Method variables shadow type variables of the
/// same name.
#[derive(Debug, Clone, Default)]
pub struct VariableScope {
    type_site: Option<(TypeId, Vec<String>)>,
    method_site: Option<(VariableSite, Vec<String>)>,
}

impl VariableScope {
    /// A scope without any variables
    #[must_use]
    pub fn empty() -> Self {
        VariableScope::default()
    }

    /// A scope exposing the type parameters of `type_id`
    ///
    /// ## Arguments
    /// * 'type_id'     - The declaring type
    /// * 'parameters'  - The declared parameter names
    pub fn for_type<I, S>(type_id: impl Into<TypeId>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariableScope {
            type_site: Some((
                type_id.into(),
                parameters.into_iter().map(Into::into).collect(),
            )),
            method_site: None,
        }
    }

    /// Extend the scope with the type parameters of a generic method
    ///
    /// ## Arguments
    /// * 'owner'       - The type declaring the method
    /// * 'method'      - The method name
    /// * 'parameters'  - The method's own type parameter names
    #[must_use]
    pub fn with_method<I, S>(
        mut self,
        owner: impl Into<TypeId>,
        method: impl Into<String>,
        parameters: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parameters: Vec<String> = parameters.into_iter().map(Into::into).collect();
        self.method_site = if parameters.is_empty() {
            None
        } else {
            Some((
                VariableSite::Method {
                    owner: owner.into(),
                    method: method.into(),
                },
                parameters,
            ))
        };
        self
    }

    /// The declaration site of `name`, if it is a visible variable
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VariableSite> {
        if let Some((site, names)) = &self.method_site {
            if names.iter().any(|candidate| candidate == name) {
                return Some(site.clone());
            }
        }

        match &self.type_site {
            Some((type_id, names)) if names.iter().any(|candidate| candidate == name) => {
                Some(VariableSite::Type(type_id.clone()))
            }
            _ => None,
        }
    }
}

/// Parser for textual type expressions
///
/// # Grammar
///
/// ```text
/// shape := base ("[]")*
/// base  := "?" [("extends" | "super") shape ("&" shape)*]
///        | ident ["<" shape ("," shape)* ">"]
/// ident := (letter | "_" | "$") (letter | digit | "_" | "$" | ".")*
/// ```
///
/// # Example
///
/// ```rust
/// use genscope::shape::{ShapeParser, TypeShape, VariableScope};
///
/// let scope = VariableScope::for_type("demo.Pair", ["A", "B"]);
/// let shape = ShapeParser::new("java.util.Map<A, B[]>", &scope).parse()?;
///
/// assert_eq!(
///     shape,
///     TypeShape::parameterized(
///         "java.util.Map",
///         vec![
///             TypeShape::variable("demo.Pair", "A"),
///             TypeShape::array(TypeShape::variable("demo.Pair", "B")),
///         ],
///     )
/// );
/// # Ok::<(), genscope::Error>(())
/// ```
pub struct ShapeParser<'a> {
    input: &'a str,
    position: usize,
    depth: usize,
    scope: &'a VariableScope,
}

impl<'a> ShapeParser<'a> {
    /// Create a new `ShapeParser`
    ///
    /// ## Arguments
    /// * 'input'   - The type expression
    /// * 'scope'   - The variables visible to the expression
    #[must_use]
    pub fn new(input: &'a str, scope: &'a VariableScope) -> Self {
        ShapeParser {
            input,
            position: 0,
            depth: 0,
            scope,
        }
    }

    /// Parse the whole input as a single type expression
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the input is empty, has trailing characters or
    /// does not follow the grammar.
    pub fn parse(mut self) -> Result<TypeShape> {
        let shape = self.parse_shape()?;
        self.skip_whitespace();
        if self.position < self.input.len() {
            return Err(malformed_error!(
                "Unexpected trailing input at {} in '{}'",
                self.position,
                self.input
            ));
        }
        Ok(shape)
    }

    fn parse_shape(&mut self) -> Result<TypeShape> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(malformed_error!(
                "Type expression nested deeper than {} levels",
                MAX_RECURSION_DEPTH
            ));
        }

        let mut shape = self.parse_base()?;
        while self.consume("[]") {
            shape = TypeShape::array(shape);
        }

        self.depth -= 1;
        Ok(shape)
    }

    fn parse_base(&mut self) -> Result<TypeShape> {
        if self.consume("?") {
            return self.parse_wildcard();
        }

        let ident = self.parse_ident()?;
        if self.consume("<") {
            let mut arguments = vec![self.parse_shape()?];
            while self.consume(",") {
                arguments.push(self.parse_shape()?);
            }
            self.expect(">")?;

            if self.scope.lookup(ident).is_some() {
                return Err(malformed_error!(
                    "Type variable '{}' can not take type arguments",
                    ident
                ));
            }
            return Ok(TypeShape::parameterized(ident, arguments));
        }

        Ok(match self.scope.lookup(ident) {
            Some(declared_on) => TypeShape::Variable {
                declared_on,
                name: ident.to_string(),
            },
            None => TypeShape::named(ident),
        })
    }

    fn parse_wildcard(&mut self) -> Result<TypeShape> {
        if self.consume_keyword("extends") {
            Ok(TypeShape::wildcard(self.parse_bounds()?, Vec::new()))
        } else if self.consume_keyword("super") {
            Ok(TypeShape::wildcard(Vec::new(), self.parse_bounds()?))
        } else {
            Ok(TypeShape::unbounded())
        }
    }

    fn parse_bounds(&mut self) -> Result<Vec<TypeShape>> {
        let mut bounds = vec![self.parse_shape()?];
        while self.consume("&") {
            bounds.push(self.parse_shape()?);
        }
        Ok(bounds)
    }

    fn parse_ident(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let input: &'a str = self.input;
        let rest = &input[self.position..];

        let mut end = 0;
        for (index, c) in rest.char_indices() {
            let valid = if index == 0 {
                c.is_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
            };
            if !valid {
                break;
            }
            end = index + c.len_utf8();
        }

        if end == 0 {
            return Err(malformed_error!(
                "Expected a type name at {} in '{}'",
                self.position,
                self.input
            ));
        }

        let ident = &rest[..end];
        if ident.split('.').any(str::is_empty) {
            return Err(malformed_error!(
                "Empty name segment in '{}' at {} in '{}'",
                ident,
                self.position,
                self.input
            ));
        }

        self.position += end;
        Ok(ident)
    }

    fn consume(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.position..].starts_with(token) {
            self.position += token.len();
            true
        } else {
            false
        }
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = &self.input[self.position..];
        let Some(after) = rest.strip_prefix(keyword) else {
            return false;
        };

        let followed_by_ident = after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$');
        if !followed_by_ident {
            self.position += keyword.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.consume(token) {
            Ok(())
        } else {
            Err(malformed_error!(
                "Expected '{}' at {} in '{}'",
                token,
                self.position,
                self.input
            ))
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        self.position += rest.len() - rest.trim_start().len();
    }
}
