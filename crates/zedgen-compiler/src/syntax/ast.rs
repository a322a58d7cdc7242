//! Abstract syntax tree produced by the parser.

use std::fmt;

/// A possibly namespaced object type such as `namespace/platform/user`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    /// The last path segment (e.g., "user").
    pub name: String,
    /// The leading path segments (e.g., ["namespace", "platform"]).
    pub prefix: Vec<String>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, prefix: Vec<String>) -> Self {
        Self {
            name: name.into(),
            prefix,
        }
    }

    /// Splits a `/`-separated path: the last segment is the name, the rest
    /// is the prefix chain.
    pub fn from_path(path: &str) -> Self {
        let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
        let name = segments.pop().unwrap_or_default();
        Self {
            name,
            prefix: segments,
        }
    }

    /// Iterates over prefix segments followed by the name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.prefix
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

/// Canonical form: prefix segments and name joined with `/`.
impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prefix in &self.prefix {
            write!(f, "{prefix}/")?;
        }
        f.write_str(&self.name)
    }
}

/// One `definition` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub object_type: ObjectType,
    pub relations: Vec<RelationDecl>,
    pub permissions: Vec<PermissionDecl>,
    /// Position of the `definition` keyword.
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "definition {} {{", self.object_type)?;
        for relation in &self.relations {
            writeln!(f, "    {relation}")?;
        }
        for permission in &self.permissions {
            writeln!(f, "    {permission}")?;
        }
        f.write_str("}")
    }
}

/// `relation <name>: <expression>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub name: String,
    pub expression: RelationExpr,
}

impl fmt::Display for RelationDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relation {}: {}", self.name, self.expression)
    }
}

/// Allowed subject types of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationExpr {
    /// A type reference such as `platform/user`, optionally `platform/user:*`.
    Single { value: String, wildcard: bool },
    /// `left | right`
    Union(Box<RelationExpr>, Box<RelationExpr>),
}

impl RelationExpr {
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single {
            value: value.into(),
            wildcard: false,
        }
    }

    pub fn wildcard(value: impl Into<String>) -> Self {
        Self::Single {
            value: value.into(),
            wildcard: true,
        }
    }

    pub fn union(left: RelationExpr, right: RelationExpr) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }
}

impl fmt::Display for RelationExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { value, wildcard } => {
                f.write_str(value)?;
                if *wildcard {
                    f.write_str(":*")?;
                }
                Ok(())
            }
            Self::Union(left, right) => write!(f, "{left} | {right}"),
        }
    }
}

/// `permission <name> = <expression>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDecl {
    pub name: String,
    pub expression: PermExpr,
}

impl fmt::Display for PermissionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "permission {} = {}", self.name, self.expression)
    }
}

/// Binary operators of permission expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Union,
    /// `&`
    Intersection,
    /// `-`
    Exclusion,
    /// `->`, follow a relation and evaluate a name on the related object
    Arrow,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Union => "+",
            Self::Intersection => "&",
            Self::Exclusion => "-",
            Self::Arrow => "->",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Union => 1,
            Self::Intersection => 2,
            Self::Exclusion => 3,
            Self::Arrow => 4,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Permission expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermExpr {
    /// A relation or permission name of the same definition.
    Identifier(String),
    BinaryOp {
        operator: Operator,
        left: Box<PermExpr>,
        right: Box<PermExpr>,
    },
}

impl PermExpr {
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::Identifier(value.into())
    }

    pub fn binary(operator: Operator, left: PermExpr, right: PermExpr) -> Self {
        Self::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Names referenced by the expression, left to right, without duplicates.
    /// Traversal targets (`parent->view` yields `parent`, `view`) are included.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Identifier(value) => {
                if !names.contains(&value.as_str()) {
                    names.push(value);
                }
            }
            Self::BinaryOp { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
        }
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Self::Identifier(_) => None,
            Self::BinaryOp { operator, .. } => Some(operator.precedence()),
        }
    }

    /// Writes an operand, parenthesized when the tree shape would otherwise
    /// be lost (looser child, or equal-precedence right child).
    fn fmt_operand(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: Operator,
        right_side: bool,
    ) -> fmt::Result {
        let needs_parens = match self.precedence() {
            Some(child) => {
                child < parent.precedence() || (right_side && child == parent.precedence())
            }
            None => false,
        };
        if needs_parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for PermExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(value) => f.write_str(value),
            Self::BinaryOp {
                operator,
                left,
                right,
            } => {
                left.fmt_operand(f, *operator, false)?;
                match operator {
                    Operator::Arrow => f.write_str("->")?,
                    other => write!(f, " {other} ")?,
                }
                right.fmt_operand(f, *operator, true)
            }
        }
    }
}
