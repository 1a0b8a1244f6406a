//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Accessors return `Option` because the tree may contain recovered errors.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(ForStmt, ForStmt);
ast_node!(ExprStmt, ExprStmt);
ast_node!(Body, Body);
ast_node!(Name, Name);
ast_node!(Attribute, Attribute);
ast_node!(Call, Call);
ast_node!(ArgList, ArgList);
ast_node!(Tuple, Tuple);
ast_node!(Paren, Paren);
ast_node!(Literal, Literal);

/// Statement: a loop or a bare expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    For(ForStmt),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ForStmt => ForStmt::cast(node).map(Stmt::For),
            SyntaxKind::ExprStmt => ExprStmt::cast(node).map(Stmt::Expr),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::For(n) => n.as_cst(),
            Stmt::Expr(n) => n.as_cst(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Name(Name),
    Attribute(Attribute),
    Call(Call),
    Tuple(Tuple),
    Paren(Paren),
    Literal(Literal),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Name => Name::cast(node).map(Expr::Name),
            SyntaxKind::Attribute => Attribute::cast(node).map(Expr::Attribute),
            SyntaxKind::Call => Call::cast(node).map(Expr::Call),
            SyntaxKind::Tuple => Tuple::cast(node).map(Expr::Tuple),
            SyntaxKind::Paren => Paren::cast(node).map(Expr::Paren),
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Name(n) => n.as_cst(),
            Expr::Attribute(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
            Expr::Tuple(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Literal(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }

    /// Strips redundant parentheses: `((a.b))` → `a.b`.
    pub fn unparenthesized(self) -> Option<Expr> {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = paren.inner()?;
        }
        Some(expr)
    }

    /// Dotted path of a name or attribute chain: `a.b.c` → `["a", "b", "c"]`.
    ///
    /// `None` when the chain is rooted at anything other than a plain name,
    /// e.g. `f(x).y` or `"s".upper`.
    pub fn path(&self) -> Option<Vec<String>> {
        match self {
            Expr::Name(name) => Some(vec![name.text()?]),
            Expr::Attribute(attr) => attr.path(),
            Expr::Paren(paren) => paren.inner()?.path(),
            _ => None,
        }
    }

    /// Source text without surrounding trivia.
    pub fn source_text(&self) -> String {
        self.as_cst().text().to_string().trim().to_string()
    }
}

impl Root {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }

    /// All `for` statements in document order, nested ones included.
    pub fn for_stmts(&self) -> impl Iterator<Item = ForStmt> + '_ {
        self.0.descendants().filter_map(ForStmt::cast)
    }
}

impl ForStmt {
    fn in_keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::KwIn)
    }

    /// Loop variable(s): the expression before `in`.
    pub fn target(&self) -> Option<Expr> {
        let first = self.0.children().find_map(Expr::cast)?;
        match self.in_keyword() {
            Some(kw) if first.text_range().end() > kw.text_range().start() => None,
            _ => Some(first),
        }
    }

    /// The sequence being iterated: the expression after `in`.
    pub fn iterable(&self) -> Option<Expr> {
        let kw = self.in_keyword()?;
        let after = kw.text_range().end();
        self.0
            .children()
            .filter_map(Expr::cast)
            .find(|e| e.text_range().start() >= after)
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }

    /// Normalized loop header, e.g. `for line in doc.lines`.
    pub fn header(&self) -> Option<String> {
        let target = self.target()?.source_text();
        let iterable = self.iterable()?.source_text();
        Some(format!("for {target} in {iterable}"))
    }
}

impl Body {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Name {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn text(&self) -> Option<String> {
        self.token().map(|t| t.text().to_string())
    }
}

impl Attribute {
    /// The object whose attribute is read.
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The attribute name token after the dot.
    pub fn attr(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn path(&self) -> Option<Vec<String>> {
        let mut path = self.value()?.path()?;
        path.push(self.attr()?.text().to_string());
        Some(path)
    }
}

impl Call {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .find_map(ArgList::cast)
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(Expr::cast).collect::<Vec<_>>())
    }
}

impl Tuple {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Paren {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Int | SyntaxKind::Str))
    }
}
