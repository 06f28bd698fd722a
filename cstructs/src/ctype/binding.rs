//! Forward-reference binding.
//!
//! When declaration registration learns the full definition of a composite
//! tag, every type expression already built may contain elaborated nodes that
//! reference that tag by (kind, name). This resolver walks a type graph and
//! patches each such unbound node to point at the canonical composite, so
//! every consumer of the graph sees one node per logical type.

use log::debug;
use rustc_hash::FxHashSet;

use super::{CType, CompositeKind, TypeId, TypeTable};

impl TypeTable {
    /// Binds every unbound elaborated node reachable from `root` whose
    /// (kind, name) match the composite `target`.
    ///
    /// Re-running with the same target changes nothing; nodes already bound
    /// (to this target or another) are left untouched. The walk never enters
    /// an elaborated node's binding, only its own kind/name fields, so
    /// self-referential composites terminate.
    pub fn bind_forward_refs(&mut self, root: TypeId, target: TypeId) {
        let CType::Composite { kind, name, .. } = self.get(target) else {
            debug_assert!(false, "bind target {target:?} is not a composite");
            return;
        };
        let kind = *kind;
        let name = name.clone();
        debug!("binding forward refs to {} {name}", kind.keyword());

        let mut visited = FxHashSet::default();
        self.bind_into(root, kind, &name, target, &mut visited);
    }

    fn bind_into(
        &mut self,
        id: TypeId,
        kind: CompositeKind,
        name: &str,
        target: TypeId,
        visited: &mut FxHashSet<TypeId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        match &mut self.types[id.index()] {
            CType::Primitive(_) => {}
            CType::Pointer(inner) => {
                let inner = *inner;
                self.bind_into(inner, kind, name, target, visited);
            }
            CType::Array { element, .. } => {
                let element = *element;
                self.bind_into(element, kind, name, target, visited);
            }
            CType::Typedef { inner, .. } => {
                let inner = *inner;
                self.bind_into(inner, kind, name, target, visited);
            }
            CType::Function {
                return_type,
                params,
            } => {
                let mut children = Vec::with_capacity(params.len() + 1);
                children.push(*return_type);
                children.extend(params.iter().copied());
                for child in children {
                    self.bind_into(child, kind, name, target, visited);
                }
            }
            CType::Composite { members, .. } => {
                let children: Vec<TypeId> = members.iter().map(|m| m.ty).collect();
                for child in children {
                    self.bind_into(child, kind, name, target, visited);
                }
            }
            CType::Elaborated {
                kind: node_kind,
                name: node_name,
                binding,
            } => {
                if binding.is_none() && *node_kind == kind && node_name == name {
                    *binding = Some(target);
                }
            }
        }
    }

    /// Chases typedef indirection and bound elaborated links to the
    /// underlying type. Unbound elaborated nodes resolve to themselves.
    #[must_use]
    pub fn resolve(&self, id: TypeId) -> TypeId {
        let mut current = id;
        loop {
            match self.get(current) {
                CType::Typedef { inner, .. } => current = *inner,
                CType::Elaborated {
                    binding: Some(bound),
                    ..
                } => current = *bound,
                _ => return current,
            }
        }
    }
}
