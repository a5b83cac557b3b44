//! Supertype lookups and generic type-argument resolution.

use std::collections::{HashMap, HashSet};

use crate::model::{ClassDecl, ProgramModel, TypeRef};

use super::context::type_display_name;

/// Type parameter `(owner, name)` to the type bound to it.
type Substitution = HashMap<(String, String), TypeRef>;

/// Every class the analyzer can see, module declarations before libraries.
pub struct TypeHierarchy<'m> {
    classes: HashMap<&'m str, &'m ClassDecl>,
}

impl<'m> TypeHierarchy<'m> {
    pub fn new(model: &'m ProgramModel) -> Self {
        let mut classes = HashMap::new();
        for class in model.classes.iter().chain(model.libraries.iter()) {
            classes.entry(class.name.as_str()).or_insert(class);
        }
        Self { classes }
    }

    pub fn get(&self, fq: &str) -> Option<&'m ClassDecl> {
        self.classes.get(fq).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether `class` is `target` or has it among its transitive supertypes.
    pub fn is_or_implements(&self, class: &str, target: &str) -> bool {
        let mut visited = HashSet::new();
        self.implements_inner(class, target, &mut visited)
    }

    fn implements_inner<'a>(&self, class: &'a str, target: &str, visited: &mut HashSet<&'a str>) -> bool
    where
        'm: 'a,
    {
        if class == target {
            return true;
        }
        if !visited.insert(class) {
            return false;
        }
        let Some(decl) = self.get(class) else {
            return false;
        };
        decl.supertypes
            .iter()
            .filter_map(TypeRef::class_name)
            .any(|st| self.implements_inner(st, target, visited))
    }

    /// Concrete type bound to type parameter `index` of `target` as seen from
    /// `class`.
    ///
    /// Supertypes are searched depth-first in declaration order and the
    /// first resolution wins. Type parameters of intermediate classes are
    /// substituted along the way. Returns `None` when `target` is not a
    /// supertype or declares no such argument.
    pub fn resolve_type_argument(&self, class: &str, target: &str, index: usize) -> Option<TypeRef> {
        let decl = self.get(class)?;
        let mut visited = HashSet::new();
        let empty = Substitution::new();
        decl.supertypes
            .iter()
            .find_map(|st| self.resolve_in(st, target, index, &empty, &mut visited))
    }

    fn resolve_in(
        &self,
        ty: &'m TypeRef,
        target: &str,
        index: usize,
        inherited: &Substitution,
        visited: &mut HashSet<&'m str>,
    ) -> Option<TypeRef> {
        let name = ty.class_name()?;
        if !visited.insert(name) {
            return None;
        }

        let decl = self.get(name);
        let mapping = match decl {
            Some(decl) if !decl.type_params.is_empty() => bind_parameters(decl, ty, inherited),
            _ => inherited.clone(),
        };

        if name == target {
            return ty.arg(index).map(|arg| substitute(arg, &mapping));
        }

        decl?.supertypes
            .iter()
            .find_map(|st| self.resolve_in(st, target, index, &mapping, visited))
    }

    /// Type argument `index` of the first direct supertype named `target`
    /// that supplies one.
    pub fn find_supertype_argument(&self, class: &str, target: &str, index: usize) -> Option<&'m TypeRef> {
        self.get(class)?
            .supertypes
            .iter()
            .filter(|st| st.class_name() == Some(target))
            .find_map(|st| st.arg(index))
    }

    /// Display name joining enclosing class names with `.`.
    pub fn nested_simple_name(&self, fq: &str) -> String {
        let Some(decl) = self.get(fq) else {
            return type_display_name(fq);
        };
        let mut names = vec![decl.simple_name()];
        let mut visited = HashSet::from([decl.name.as_str()]);
        let mut outer = decl.outer.as_deref();
        while let Some(outer_fq) = outer {
            if !visited.insert(outer_fq) {
                break;
            }
            match self.get(outer_fq) {
                Some(parent) => {
                    names.push(parent.simple_name());
                    outer = parent.outer.as_deref();
                }
                None => {
                    names.push(outer_fq.rsplit('.').next().unwrap_or(outer_fq));
                    break;
                }
            }
        }
        names.reverse();
        names.join(".")
    }
}

fn bind_parameters(decl: &ClassDecl, ty: &TypeRef, inherited: &Substitution) -> Substitution {
    let mut mapping = inherited.clone();
    for (idx, param) in decl.type_params.iter().enumerate() {
        if let Some(arg) = ty.arg(idx) {
            mapping.insert((decl.name.clone(), param.clone()), substitute(arg, inherited));
        }
    }
    mapping
}

/// Follow parameter bindings until a type no longer maps to anything else.
fn substitute(ty: &TypeRef, mapping: &Substitution) -> TypeRef {
    let mut current = ty.clone();
    // Each step consumes a distinct binding, so this bound covers any chain.
    for _ in 0..=mapping.len() {
        let TypeRef::Param { owner, name } = &current else {
            break;
        };
        match mapping.get(&(owner.clone(), name.clone())) {
            Some(mapped) if *mapped != current => current = mapped.clone(),
            _ => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_follows_chain() {
        let mut mapping = Substitution::new();
        mapping.insert(("a.B".into(), "T".into()), TypeRef::param("a.A", "X"));
        mapping.insert(("a.A".into(), "X".into()), TypeRef::class("a.Cmd"));
        assert_eq!(substitute(&TypeRef::param("a.B", "T"), &mapping), TypeRef::class("a.Cmd"));
    }

    #[test]
    fn test_substitute_stops_on_cycle() {
        let mut mapping = Substitution::new();
        mapping.insert(("a.B".into(), "T".into()), TypeRef::param("a.A", "X"));
        mapping.insert(("a.A".into(), "X".into()), TypeRef::param("a.B", "T"));
        let result = substitute(&TypeRef::param("a.B", "T"), &mapping);
        assert!(matches!(result, TypeRef::Param { .. }));
    }
}
