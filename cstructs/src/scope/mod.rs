//! Lexical scopes and symbol registration.
//!
//! A [`ScopeStack`] tracks the chain of lexical contexts of one in-progress
//! translation context: the global scope at the bottom, then function and
//! block scopes pushed and popped as declaration processing enters and leaves
//! them. Each scope owns its own name-to-declaration maps; lookups search
//! from the innermost context outward and report absence as `None`, never as
//! an error. Registering a complete composite tag also patches every forward
//! reference visible in the chain (see [`ScopeStack::register_composite`]).

#[cfg(test)]
mod tests;

use compact_str::CompactString;
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::ctype::{CType, CompositeKind, TypeId, TypeTable};
use crate::loc::SourceLocation;

/// What kind of symbol a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// An object (variable) declaration.
    Variable,
    /// A function declaration or definition.
    Function,
    /// A typedef name.
    Typedef,
}

/// One registered declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// The name as written in the source.
    pub name: CompactString,
    /// Globally unique flattened name (see [`ScopeStack::scoped_name_of`]).
    pub scoped_name: String,
    /// Symbol kind.
    pub kind: DeclKind,
    /// Root of the declared type expression in the owning [`TypeTable`].
    pub ty: TypeId,
    /// Where the declaration appears.
    pub location: SourceLocation,
}

/// The kind of lexical context a scope represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// The outermost file scope.
    Global,
    /// A function body scope, carrying the function's name.
    Function(CompactString),
    /// A brace-delimited block nested inside a function.
    Block,
}

/// One lexical context.
#[derive(Debug, Clone)]
pub struct Scope {
    /// The kind of this scope.
    pub kind: ScopeKind,
    /// Variable name -> declaration.
    pub variables: FxHashMap<String, Declaration>,
    /// Function name -> declaration.
    pub functions: FxHashMap<String, Declaration>,
    /// Qualified complex-type tag ("struct s") -> composite type.
    pub types: FxHashMap<String, TypeId>,
    /// Typedef name -> the type it denotes.
    pub typedefs: FxHashMap<String, TypeId>,
}

impl Scope {
    /// Creates an empty scope of the given kind.
    #[must_use]
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            types: FxHashMap::default(),
            typedefs: FxHashMap::default(),
        }
    }
}

/// The scope chain of one translation context.
///
/// Owned by exactly one in-progress context; parallel translation units each
/// use their own stack and merge composite tags afterwards.
#[derive(Debug)]
pub struct ScopeStack {
    /// Innermost scope last. Chains are almost always shallow.
    scopes: SmallVec<[Scope; 8]>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: smallvec![Scope::new(ScopeKind::Global)],
        }
    }

    /// True when the current context is the outermost file scope.
    #[must_use]
    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Enters a function body scope.
    pub fn enter_function(&mut self, name: impl Into<CompactString>) {
        self.scopes.push(Scope::new(ScopeKind::Function(name.into())));
    }

    /// Enters a nested block scope.
    pub fn enter_block(&mut self) {
        self.scopes.push(Scope::new(ScopeKind::Block));
    }

    /// Leaves the current scope. The global scope is never popped.
    pub fn exit_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "attempted to pop the global scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// The name of the innermost enclosing function, if any.
    #[must_use]
    pub fn enclosing_function(&self) -> Option<&str> {
        self.scopes.iter().rev().find_map(|scope| match &scope.kind {
            ScopeKind::Function(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// True if a variable or function with `name` (possibly already
    /// scope-qualified) is visible in the current context chain.
    ///
    /// `original_name` is the unqualified source spelling, checked against
    /// registrations whose keys were already flattened.
    #[must_use]
    pub fn variable_name_in_use(&self, name: &str, original_name: &str) -> bool {
        for scope in self.scopes.iter().rev() {
            if scope.variables.contains_key(name) || scope.functions.contains_key(name) {
                return true;
            }
            if scope
                .variables
                .values()
                .chain(scope.functions.values())
                .any(|decl| decl.scoped_name == name || decl.name == original_name)
            {
                return true;
            }
        }
        false
    }

    /// Resolves a variable name from the innermost context outward.
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> Option<&Declaration> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name))
    }

    /// Resolves a function name from the innermost context outward.
    #[must_use]
    pub fn lookup_function(&self, name: &str) -> Option<&Declaration> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.functions.get(name))
    }

    /// Resolves a qualified complex-type tag such as `struct s`.
    #[must_use]
    pub fn lookup_type(&self, qualified: &str) -> Option<TypeId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.types.get(qualified))
            .copied()
    }

    /// Resolves a typedef name to the type it denotes. Needed specifically to
    /// recover the hidden composite of an anonymous structure defined inline
    /// in a typedef (chase the result with [`TypeTable::resolve`]).
    #[must_use]
    pub fn lookup_typedef(&self, name: &str) -> Option<TypeId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.typedefs.get(name))
            .copied()
    }

    /// Inserts a declaration into the current context.
    ///
    /// Conflict prevention is the caller's job via
    /// [`variable_name_in_use`](Self::variable_name_in_use) first;
    /// re-registration is not sanctioned.
    pub fn register_declaration(&mut self, decl: Declaration) {
        let scope = self.current_scope_mut();
        match decl.kind {
            DeclKind::Variable => {
                scope.variables.insert(decl.name.to_string(), decl);
            }
            DeclKind::Function => {
                scope.functions.insert(decl.name.to_string(), decl);
            }
            DeclKind::Typedef => {
                scope.typedefs.insert(decl.name.to_string(), decl.ty);
            }
        }
    }

    /// Registers a composite tag by (kind, name).
    ///
    /// Returns true the first time a given (kind, name) pair is registered
    /// anywhere in the chain (the composite then needs an explicit
    /// declaration emitted later) and false on every subsequent attempt, so
    /// identical tags met across compilation units merge without
    /// re-declaring. No second composite instance is recorded on rejection.
    pub fn register_type_declaration(
        &mut self,
        kind: CompositeKind,
        name: &str,
        ty: TypeId,
    ) -> bool {
        let qualified = kind.qualified_tag(name);
        let already_known = self
            .scopes
            .iter()
            .any(|scope| scope.types.contains_key(&qualified));
        if already_known {
            return false;
        }
        self.current_scope_mut().types.insert(qualified, ty);
        true
    }

    /// Entry point for declaration registration: registers a complete
    /// composite and, when it is new, patches every forward reference to its
    /// tag in the type expressions visible from the current chain.
    ///
    /// Returns what [`register_type_declaration`](Self::register_type_declaration)
    /// returned.
    pub fn register_composite(&mut self, table: &mut TypeTable, composite: TypeId) -> bool {
        let CType::Composite { kind, name, .. } = table.get(composite) else {
            debug_assert!(false, "register_composite on a non-composite {composite:?}");
            return false;
        };
        let kind = *kind;
        let name = name.clone();

        if !self.register_type_declaration(kind, &name, composite) {
            return false;
        }
        debug!("registered {} {name}, patching visible roots", kind.keyword());

        for root in self.visible_roots() {
            table.bind_forward_refs(root, composite);
        }
        true
    }

    /// Returns a globally unique qualified name for a local declaration,
    /// composed from the enclosing function's identity when not in global
    /// scope, so flattening all declarations into one namespace never
    /// collides.
    #[must_use]
    pub fn scoped_name_of(&self, name: &str) -> String {
        match self.enclosing_function() {
            Some(function) if !self.is_global_scope() => format!("{function}::{name}"),
            _ => name.to_owned(),
        }
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        // The stack always holds at least the global scope.
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Roots of every type expression visible from the current chain.
    fn visible_roots(&self) -> Vec<TypeId> {
        let mut roots = Vec::new();
        for scope in &self.scopes {
            roots.extend(
                scope
                    .variables
                    .values()
                    .chain(scope.functions.values())
                    .map(|decl| decl.ty),
            );
            roots.extend(scope.typedefs.values().copied());
            roots.extend(scope.types.values().copied());
        }
        roots
    }
}
