//! Top-level statement analysis of script blocks
//!
//! Only the constructs the edit synthesizer reasons about are modelled: imports, the default
//! export and the object literals hanging off it. Everything else is `Other` with a location.

use super::position::{Location, Position};
use super::utils::{script_parser, unquote, NodeLocator, NodeTextExt};
use crate::syntax::{ParseError, ParseResult};
use tree_sitter::Node;

/// A top-level statement with its whole-document location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Import(ImportDeclaration),
    ExportDefault(ExportDefault),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Module path without quotes
    pub source: String,
    /// Local bindings introduced by the import
    pub specifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDefault {
    pub declaration: Declaration,
}

/// What follows `export default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `export default { ... }`
    Object(ObjectLiteral),
    /// `export default defineComponent({ ... })`
    Call(CallExpression),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    pub callee: String,
    /// Span of the argument list, parentheses included
    pub arguments: Location,
    /// First argument when it is an object literal
    pub argument: Option<ObjectLiteral>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLiteral {
    /// Span from `{` to just past `}`
    pub loc: Location,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: PropertyValue,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Object(ObjectLiteral),
    Identifier(String),
    Other,
}

impl Statement {
    #[must_use]
    pub fn as_import(&self) -> Option<&ImportDeclaration> {
        match &self.kind {
            StatementKind::Import(import) => Some(import),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_export_default(&self) -> Option<&ExportDefault> {
        match &self.kind {
            StatementKind::ExportDefault(export) => Some(export),
            _ => None,
        }
    }
}

impl ExportDefault {
    /// The component options object, either direct or wrapped in a helper call
    #[must_use]
    pub fn options(&self) -> Option<&ObjectLiteral> {
        match &self.declaration {
            Declaration::Object(object) => Some(object),
            Declaration::Call(call) => call.argument.as_ref(),
            Declaration::Other => None,
        }
    }
}

impl ObjectLiteral {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_named(name))
    }

    /// Whether an entry registers `name`, either as key or as identifier value
    #[must_use]
    pub fn lists(&self, name: &str) -> bool {
        self.properties.iter().any(|p| {
            p.is_named(name) || matches!(&p.value, PropertyValue::Identifier(id) if id == name)
        })
    }
}

impl Property {
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.key == name
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectLiteral> {
        match &self.value {
            PropertyValue::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Parse script content into top-level statements
///
/// `origin` is the document position at which `content` begins; every returned location is
/// expressed in document coordinates.
///
/// # Errors
///
/// Returns `ParseError::Syntax` at the first error or missing node when the content does
/// not parse, or `ParseError::Language` if the grammar cannot be loaded.
pub fn parse_statements(content: &str, origin: Position) -> ParseResult<Vec<Statement>> {
    let mut parser = script_parser()?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ParseError::Syntax {
            message: "Failed to parse script content".to_string(),
            line: origin.line,
            column: origin.column,
        })?;

    let root = tree.root_node();
    let locator = NodeLocator::new(content, origin);

    if root.has_error() {
        return Err(syntax_error(root, content, &locator));
    }

    let mut cursor = root.walk();

    let statements = root
        .named_children(&mut cursor)
        .filter(|node| !matches!(node.kind(), "comment" | "hash_bang_line"))
        .filter(|node| !is_bare_identifier(*node))
        .map(|node| Statement {
            kind: classify(node, content, &locator),
            loc: locator.location(node),
        })
        .collect();

    Ok(statements)
}

fn syntax_error(root: Node, content: &str, locator: &NodeLocator) -> ParseError {
    let node = first_error(root).unwrap_or(root);
    let position = locator.position(node.start_byte());

    let message = if node.is_missing() {
        format!("Missing `{}`", node.kind())
    } else {
        let text: String = node.text(content).chars().take(20).collect();
        format!("Unexpected `{}`", text.trim())
    };

    ParseError::Syntax {
        message,
        line: position.line,
        column: position.column,
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

/// `foo;` on its own; left behind by macro residue and never useful
fn is_bare_identifier(node: Node) -> bool {
    if node.kind() != "expression_statement" {
        return false;
    }

    let mut cursor = node.walk();
    let mut children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");

    let only = match (children.next(), children.next()) {
        (Some(child), None) => child.kind() == "identifier",
        _ => false,
    };
    only
}

fn classify(node: Node, content: &str, locator: &NodeLocator) -> StatementKind {
    match node.kind() {
        "import_statement" => {
            parse_import(node, content).map_or(StatementKind::Other, StatementKind::Import)
        }
        "export_statement" if is_default_export(node) => {
            StatementKind::ExportDefault(ExportDefault {
                declaration: parse_declaration(node, content, locator),
            })
        }
        _ => StatementKind::Other,
    }
}

fn is_default_export(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "default");
    found
}

fn parse_import(node: Node, content: &str) -> Option<ImportDeclaration> {
    let source = node.child_by_field_name("source")?;
    let mut specifiers = Vec::new();
    let mut cursor = node.walk();

    for clause in node.named_children(&mut cursor) {
        if clause.kind() == "import_clause" {
            collect_specifiers(clause, content, &mut specifiers);
        }
    }

    Some(ImportDeclaration {
        source: unquote(source.text(content)).to_string(),
        specifiers,
    })
}

fn collect_specifiers(clause: Node, content: &str, specifiers: &mut Vec<String>) {
    let mut cursor = clause.walk();

    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => specifiers.push(child.text_or_default(content)),
            "namespace_import" => {
                let mut inner = child.walk();
                let name = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "identifier");

                if let Some(name) = name {
                    specifiers.push(name.text_or_default(content));
                }
            }
            "named_imports" => {
                let mut inner = child.walk();

                for spec in child.named_children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }

                    let local = spec
                        .child_by_field_name("alias")
                        .or_else(|| spec.child_by_field_name("name"));

                    if let Some(local) = local {
                        specifiers.push(unquote(local.text(content)).to_string());
                    }
                }
            }
            _ => {}
        }
    }
}

fn parse_declaration(node: Node, content: &str, locator: &NodeLocator) -> Declaration {
    let Some(value) = node
        .child_by_field_name("value")
        .or_else(|| node.child_by_field_name("declaration"))
    else {
        return Declaration::Other;
    };

    let value = unwrap_expression(value);

    match value.kind() {
        "object" => Declaration::Object(parse_object(value, content, locator)),
        "call_expression" => parse_call(value, content, locator)
            .map_or(Declaration::Other, Declaration::Call),
        _ => Declaration::Other,
    }
}

/// Look through `(...)`, `x as T` and `x satisfies T`
fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    if !matches!(
        node.kind(),
        "parenthesized_expression" | "as_expression" | "satisfies_expression"
    ) {
        return node;
    }

    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");

    inner.map_or(node, unwrap_expression)
}

fn parse_call(node: Node, content: &str, locator: &NodeLocator) -> Option<CallExpression> {
    let callee = node.child_by_field_name("function")?;
    let arguments = node.child_by_field_name("arguments")?;

    if arguments.kind() != "arguments" {
        return None;
    }

    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");

    Some(CallExpression {
        callee: callee.text_or_default(content),
        arguments: locator.location(arguments),
        argument: first
            .filter(|arg| arg.kind() == "object")
            .map(|arg| parse_object(arg, content, locator)),
    })
}

fn parse_object(node: Node, content: &str, locator: &NodeLocator) -> ObjectLiteral {
    let mut properties = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        let property = match child.kind() {
            "pair" => child.child_by_field_name("key").map(|key| Property {
                key: property_key(key, content),
                value: child
                    .child_by_field_name("value")
                    .map_or(PropertyValue::Other, |value| {
                        parse_value(value, content, locator)
                    }),
                loc: locator.location(child),
            }),
            "shorthand_property_identifier" => {
                let name = child.text_or_default(content);

                Some(Property {
                    key: name.clone(),
                    value: PropertyValue::Identifier(name),
                    loc: locator.location(child),
                })
            }
            "method_definition" => child.child_by_field_name("name").map(|key| Property {
                key: property_key(key, content),
                value: PropertyValue::Other,
                loc: locator.location(child),
            }),
            _ => None,
        };

        properties.extend(property);
    }

    ObjectLiteral {
        loc: locator.location(node),
        properties,
    }
}

fn property_key(key: Node, content: &str) -> String {
    match key.kind() {
        "string" => unquote(key.text(content)).to_string(),
        _ => key.text_or_default(content),
    }
}

fn parse_value(value: Node, content: &str, locator: &NodeLocator) -> PropertyValue {
    let value = unwrap_expression(value);

    match value.kind() {
        "object" => PropertyValue::Object(parse_object(value, content, locator)),
        "identifier" => PropertyValue::Identifier(value.text_or_default(content)),
        _ => PropertyValue::Other,
    }
}
