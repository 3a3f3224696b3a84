//! Property dispatch through `Base.getproperty` and `Base.setproperty!`.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::debug;

use julia_bindgen_core::{ClassEntry, HostValue, MethodEntry, PropertyEntry, TypeEntry};

use super::{EmitStats, SourceEmitter};
use crate::defaults::{Destination, synthesize};

/// One branch of a dispatch routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Property symbol tested against.
    pub property: String,
    /// Accessor routine name.
    pub routine: String,
    /// Literal for the property index, for indexed accessors.
    pub index: Option<String>,
}

/// Getter and setter dispatch for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDispatch {
    abstract_name: String,
    getters: Vec<Accessor>,
    setters: Vec<Accessor>,
}

impl PropertyDispatch {
    pub fn getters(&self) -> &[Accessor] {
        &self.getters
    }

    pub fn setters(&self) -> &[Accessor] {
        &self.setters
    }
}

impl<'a> SourceEmitter<'a> {
    /// Collect the properties visible on `class`, nearest declaration first.
    ///
    /// Levels are walked from `class` up to, but not including, the root.
    pub(super) fn property_dispatch(&self, class: &'a ClassEntry, stats: &mut EmitStats) -> PropertyDispatch {
        let levels: Vec<&ClassEntry> = self
            .api
            .registry
            .ancestors(&class.name)
            .filter(|level| !level.is_root())
            .collect();

        let mut getters = Vec::new();
        let mut seen = FxHashSet::default();
        for property in levels.iter().flat_map(|level| &level.properties) {
            if !seen.insert(property.name.as_str()) {
                continue;
            }
            let Some(getter) = &property.getter else {
                continue;
            };
            match self.accessor(class, property, getter, 0) {
                Some(accessor) => getters.push(accessor),
                None => stats.members_skipped += 1,
            }
        }

        let mut setters = Vec::new();
        let mut seen = FxHashSet::default();
        for property in levels.iter().flat_map(|level| &level.properties) {
            let Some(setter) = &property.setter else {
                continue;
            };
            if !seen.insert(property.name.as_str()) {
                continue;
            }
            match self.accessor(class, property, setter, 1) {
                Some(accessor) => setters.push(accessor),
                None => stats.members_skipped += 1,
            }
        }

        PropertyDispatch {
            abstract_name: class.abstract_name(),
            getters,
            setters,
        }
    }

    /// Bind `routine` as an accessor of `property` on `class`.
    ///
    /// `values` is the number of trailing value arguments the routine takes
    /// (none for getters, one for setters). The routine must have survived
    /// on `class` or an ancestor and accept exactly the index (when the
    /// property has one) followed by those values.
    fn accessor(
        &self,
        class: &'a ClassEntry,
        property: &PropertyEntry,
        routine: &str,
        values: usize,
    ) -> Option<Accessor> {
        let found = self
            .api
            .registry
            .ancestors(&class.name)
            .find_map(|owner| owner.find_method(routine).map(|method| (owner, method)));
        let Some((owner, method)) = found else {
            debug!(class = %class.name, property = %property.name, routine, "accessor was not bound");
            return None;
        };
        if owner.is_singleton || self.method_stub(owner, method).is_err() {
            debug!(class = %class.name, property = %property.name, routine, "accessor was not bound");
            return None;
        }

        let indexed = property.index >= 0;
        let provided = values + usize::from(indexed);
        if !accepts(method, provided) {
            debug!(class = %class.name, property = %property.name, routine, "accessor arity mismatch");
            return None;
        }

        let index = if indexed {
            let argument = method.arguments.first()?;
            let ty = self.resolve(owner, &method.name, &argument.type_ref).ok()?;
            Some(self.index_literal(ty, property.index)?)
        } else {
            None
        };

        Some(Accessor {
            property: property.target_name.clone(),
            routine: method.target_name.clone(),
            index,
        })
    }

    fn index_literal(&self, ty: &TypeEntry, index: i32) -> Option<String> {
        let destination = match ty {
            TypeEntry::Builtin(entry) => Destination::Builtin(entry.kind),
            TypeEntry::Enum(entry) => Destination::Enum {
                qualified: &entry.qualified_target_name,
                is_flags: entry.is_flags,
            },
            TypeEntry::Class(_) => return None,
        };
        synthesize(
            &HostValue::Int(i64::from(index)),
            destination,
            self.config.real_is_double,
        )
    }
}

/// Whether `method` can be called with `provided` arguments after `self`.
fn accepts(method: &MethodEntry, provided: usize) -> bool {
    let required = method.arguments.iter().filter(|a| !a.has_default()).count();
    required <= provided && provided <= method.arguments.len()
}

impl fmt::Display for PropertyDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "function Base.getproperty(object::{}, property::Symbol)",
            self.abstract_name
        )?;
        write_branches(f, &self.getters, "return getfield(object, property)", |f, a| {
            match &a.index {
                Some(index) => writeln!(f, "\t\treturn {}(object, {index})", a.routine),
                None => writeln!(f, "\t\treturn {}(object)", a.routine),
            }
        })?;
        writeln!(f, "end")?;
        writeln!(f)?;

        writeln!(
            f,
            "function Base.setproperty!(object::{}, property::Symbol, value)",
            self.abstract_name
        )?;
        write_branches(f, &self.setters, "setfield!(object, property, value)", |f, a| {
            match &a.index {
                Some(index) => writeln!(f, "\t\t{}(object, {index}, value)", a.routine),
                None => writeln!(f, "\t\t{}(object, value)", a.routine),
            }
        })?;
        writeln!(f, "end")?;
        writeln!(f)
    }
}

fn write_branches(
    f: &mut fmt::Formatter<'_>,
    accessors: &[Accessor],
    fallback: &str,
    body: impl Fn(&mut fmt::Formatter<'_>, &Accessor) -> fmt::Result,
) -> fmt::Result {
    if accessors.is_empty() {
        return writeln!(f, "\t{fallback}");
    }
    for (i, accessor) in accessors.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elseif" };
        writeln!(f, "\t{keyword} property == :{}", accessor.property)?;
        body(f, accessor)?;
    }
    writeln!(f, "\telse")?;
    writeln!(f, "\t\t{fallback}")?;
    writeln!(f, "\tend")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::emit::test_support::populate;
    use crate::populate::PopulatedApi;

    fn dispatch(api: &PopulatedApi, class: &str) -> (PropertyDispatch, EmitStats) {
        let config = GeneratorConfig::default();
        let emitter = SourceEmitter::new(api, &config);
        let mut stats = EmitStats::default();
        let class = api.registry.class(class).unwrap();
        (emitter.property_dispatch(class, &mut stats), stats)
    }

    fn chain() -> PopulatedApi {
        populate(
            json!([
                { "name": "A", "parent": "Object",
                  "properties": [
                      { "name": "p", "type": "int", "getter": "get_p", "setter": "set_p" },
                      { "name": "ro", "type": "int", "getter": "get_ro" }
                  ],
                  "methods": [
                      { "name": "get_p", "return": { "type": "int" } },
                      { "name": "set_p", "arguments": [ { "name": "value", "type": "int" } ] },
                      { "name": "get_ro", "return": { "type": "int" } }
                  ] },
                { "name": "B", "parent": "A" }
            ]),
            &GeneratorConfig::default(),
        )
    }

    #[test]
    fn inherited_properties_resolve_through_ancestor() {
        let api = chain();
        let (dispatch, stats) = dispatch(&api, "B");
        let getters: Vec<_> = dispatch.getters().iter().map(|a| a.routine.as_str()).collect();
        assert_eq!(getters, ["get_p", "get_ro"]);
        let setters: Vec<_> = dispatch.setters().iter().map(|a| a.routine.as_str()).collect();
        assert_eq!(setters, ["set_p"]);
        assert_eq!(stats.members_skipped, 0);

        let out = dispatch.to_string();
        assert!(out.starts_with("function Base.getproperty(object::GodotB, property::Symbol)\n\tif property == :p\n\t\treturn get_p(object)\n\telseif property == :ro\n"));
        assert!(out.contains("\tif property == :p\n\t\tset_p(object, value)\n\telse\n\t\tsetfield!(object, property, value)\n\tend\n"));
    }

    #[test]
    fn nearest_declaration_wins() {
        let api = populate(
            json!([
                { "name": "A", "parent": "Object",
                  "properties": [ { "name": "p", "type": "int", "getter": "get_p" } ],
                  "methods": [ { "name": "get_p", "return": { "type": "int" } } ] },
                { "name": "B", "parent": "A",
                  "properties": [ { "name": "p", "type": "int", "getter": "get_b_p" } ],
                  "methods": [ { "name": "get_b_p", "return": { "type": "int" } } ] }
            ]),
            &GeneratorConfig::default(),
        );
        let (dispatch, _) = dispatch(&api, "B");
        assert_eq!(dispatch.getters().len(), 1);
        assert_eq!(dispatch.getters()[0].routine, "get_b_p");
    }

    #[test]
    fn accessors_that_were_filtered_are_left_out() {
        let api = populate(
            json!([
                { "name": "Node", "parent": "Object",
                  "properties": [
                      { "name": "modulate", "type": "color", "getter": "get_modulate", "setter": "set_modulate" }
                  ],
                  "methods": [
                      { "name": "get_modulate", "return": { "type": "color" } },
                      { "name": "set_modulate", "arguments": [ { "name": "c", "type": "color" } ] }
                  ] }
            ]),
            &GeneratorConfig::default(),
        );
        let (dispatch, stats) = dispatch(&api, "Node");
        assert!(dispatch.getters().is_empty());
        assert!(dispatch.setters().is_empty());
        assert_eq!(stats.members_skipped, 2);
        assert_eq!(
            dispatch.to_string(),
            "function Base.getproperty(object::GodotNode, property::Symbol)\n\treturn getfield(object, property)\nend\n\n\
             function Base.setproperty!(object::GodotNode, property::Symbol, value)\n\tsetfield!(object, property, value)\nend\n\n"
        );
    }

    #[test]
    fn indexed_accessors_pass_the_index() {
        let api = populate(
            json!([
                { "name": "Control", "parent": "Object",
                  "properties": [
                      { "name": "offset_left", "type": "float", "index": 0,
                        "getter": "get_offset", "setter": "set_offset" }
                  ],
                  "methods": [
                      { "name": "get_offset", "return": { "type": "float" },
                        "arguments": [ { "name": "side", "type": "int" } ], "argument_meta": ["int32"] },
                      { "name": "set_offset",
                        "arguments": [ { "name": "side", "type": "int" }, { "name": "value", "type": "float" } ],
                        "argument_meta": ["int32"] }
                  ] }
            ]),
            &GeneratorConfig::default(),
        );
        let (dispatch, _) = dispatch(&api, "Control");
        let out = dispatch.to_string();
        assert!(out.contains("\t\treturn get_offset(object, Int32(0))\n"));
        assert!(out.contains("\t\tset_offset(object, Int32(0), value)\n"));
    }
}
