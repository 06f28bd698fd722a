//! The recursive C type representation.
//!
//! Types live in an arena ([`TypeTable`]) and reference each other by
//! [`TypeId`], so the possibly-cyclic type graph has a single owner and ids
//! stay copyable. Forward references to struct/union/enum tags are modeled as
//! [`CType::Elaborated`] nodes whose link to the full definition starts out
//! absent and is patched exactly once by the binding resolver (`binding.rs`)
//! when the complete composite becomes registered.

#![allow(missing_docs)]

mod binding;


use compact_str::CompactString;

/// Index of one type in its owning [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    Float,
    Double,
}

/// Which tag namespace a composite lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Struct,
    Union,
    Enum,
}

impl CompositeKind {
    /// The C keyword for this kind.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            CompositeKind::Struct => "struct",
            CompositeKind::Union => "union",
            CompositeKind::Enum => "enum",
        }
    }

    /// The qualified tag used as a scope key, e.g. `struct s`.
    #[must_use]
    pub fn qualified_tag(self, name: &str) -> String {
        format!("{} {name}", self.keyword())
    }
}

impl std::fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One named member of a composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: CompactString,
    pub ty: TypeId,
}

/// A node of the type graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType {
    /// A scalar leaf.
    Primitive(PrimitiveKind),
    /// Pointer to exactly one inner type.
    Pointer(TypeId),
    /// Array of one element type, length absent for incomplete arrays.
    Array {
        element: TypeId,
        length: Option<u64>,
    },
    /// A function signature: return type plus ordered parameter types.
    Function {
        return_type: TypeId,
        params: Vec<TypeId>,
    },
    /// A typedef name denoting exactly one inner type.
    Typedef {
        name: CompactString,
        inner: TypeId,
    },
    /// The canonical, fully defined struct/union/enum.
    Composite {
        kind: CompositeKind,
        name: CompactString,
        members: Vec<Member>,
    },
    /// A forward reference by kind and tag name. `binding` is absent until
    /// the matching composite is registered, then set exactly once.
    Elaborated {
        kind: CompositeKind,
        name: CompactString,
        binding: Option<TypeId>,
    },
}

/// Arena of type-graph nodes for one translation context.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Vec<CType>,
}

impl TypeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its id. Nodes are not interned: two
    /// elaborated references to the same tag are distinct nodes, each with
    /// its own binding slot.
    pub fn add(&mut self, ty: CType) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(ty);
        id
    }

    /// Immutable access to one node. Out-of-range ids are an upstream
    /// defect, not a recoverable condition.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &CType {
        &self.types[id.index()]
    }

    /// Number of nodes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when the table holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // Convenience constructors mirroring how upstream declaration parsing
    // builds type expressions.

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        self.add(CType::Primitive(kind))
    }

    pub fn pointer_to(&mut self, inner: TypeId) -> TypeId {
        self.add(CType::Pointer(inner))
    }

    pub fn array_of(&mut self, element: TypeId, length: Option<u64>) -> TypeId {
        self.add(CType::Array { element, length })
    }

    pub fn function(&mut self, return_type: TypeId, params: Vec<TypeId>) -> TypeId {
        self.add(CType::Function {
            return_type,
            params,
        })
    }

    pub fn typedef(&mut self, name: impl Into<CompactString>, inner: TypeId) -> TypeId {
        self.add(CType::Typedef {
            name: name.into(),
            inner,
        })
    }

    pub fn composite(
        &mut self,
        kind: CompositeKind,
        name: impl Into<CompactString>,
        members: Vec<Member>,
    ) -> TypeId {
        self.add(CType::Composite {
            kind,
            name: name.into(),
            members,
        })
    }

    pub fn elaborated(&mut self, kind: CompositeKind, name: impl Into<CompactString>) -> TypeId {
        self.add(CType::Elaborated {
            kind,
            name: name.into(),
            binding: None,
        })
    }
}
