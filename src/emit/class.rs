//! Per-class source files.

use std::fmt;

use julia_bindgen_core::ClassEntry;

use super::method::singleton_holder;
use super::{ConstantBlock, EnumBlock, MethodStub, PropertyDispatch};

/// Everything generated for one class, in file order:
/// tag and data types, the `<Class>Info` module, method stubs and property
/// dispatch.
#[derive(Debug, Clone)]
pub struct ClassSource<'a> {
    class: &'a ClassEntry,
    /// Abstract tag of the parent; `None` for the root.
    parent: Option<String>,
    stubs: Vec<MethodStub<'a>>,
    dispatch: Option<PropertyDispatch>,
}

impl<'a> ClassSource<'a> {
    pub(super) fn new(
        class: &'a ClassEntry,
        parent: Option<String>,
        stubs: Vec<MethodStub<'a>>,
        dispatch: Option<PropertyDispatch>,
    ) -> Self {
        Self {
            class,
            parent,
            stubs,
            dispatch,
        }
    }

    pub fn class(&self) -> &'a ClassEntry {
        self.class
    }

    /// File name inside the classes directory.
    pub fn file_name(&self) -> String {
        format!("{}.jl", self.class.target_name)
    }

    pub fn stubs(&self) -> &[MethodStub<'a>] {
        &self.stubs
    }

    pub fn dispatch(&self) -> Option<&PropertyDispatch> {
        self.dispatch.as_ref()
    }

    /// Names the generated calls look up through `string_names`.
    pub fn interned_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        std::iter::once(self.class.name.as_str()).chain(self.stubs.iter().map(MethodStub::name))
    }

    fn write_types(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.class;
        let tag = class.abstract_name();

        match &self.parent {
            Some(parent) => writeln!(f, "abstract type {tag} <: {parent} end")?,
            None => writeln!(f, "abstract type {tag} end")?,
        }
        writeln!(f)?;

        if let Some(doc) = &class.doc {
            writeln!(f, "@doc raw\"\"\"{}\n\n{}\"\"\"", doc.brief, doc.description)?;
        }
        writeln!(f, "struct {} <: {tag}", class.target_name)?;
        writeln!(f, "\tnative_ptr::Ptr{{Nothing}}")?;
        writeln!(f, "end")?;
        writeln!(f)?;

        if class.is_singleton {
            let singleton = class.singleton_name();
            writeln!(f, "mutable struct {singleton} <: {tag}")?;
            writeln!(f, "\tnative_ptr::Ptr{{Nothing}}")?;
            writeln!(f, "\t{singleton}() = new(C_NULL)")?;
            writeln!(f, "end")?;
            writeln!(f)?;
            writeln!(f, "const {} = {singleton}()", singleton_holder(class))?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_info_module(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.class;
        writeln!(f, "baremodule {}", class.info_module_name())?;
        writeln!(f, "using Base: @enum, @raw_str")?;
        writeln!(f, "using Core: @doc")?;
        writeln!(f)?;
        for entry in &class.enums {
            write!(f, "{}", EnumBlock(entry))?;
        }
        for constant in &class.constants {
            write!(
                f,
                "{}",
                ConstantBlock {
                    constant,
                    is_const: false,
                }
            )?;
        }
        writeln!(f, "end")?;
        writeln!(f)
    }
}

impl fmt::Display for ClassSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_types(f)?;
        self.write_info_module(f)?;
        for stub in &self.stubs {
            write!(f, "{stub}")?;
        }
        if let Some(dispatch) = &self.dispatch {
            write!(f, "{dispatch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::GeneratorConfig;
    use crate::emit::test_support::populate;
    use crate::emit::{EmitStats, SourceEmitter};

    #[test]
    fn simple_class() {
        let config = GeneratorConfig::default();
        let api = populate(
            json!([
                { "name": "Foo", "parent": "Object",
                  "constants": [ { "name": "BAR", "value": 3 } ],
                  "methods": [
                      { "name": "baz", "return": { "type": "int" },
                        "arguments": [ { "name": "x", "type": "int" } ],
                        "default_arguments": [ { "type": "int", "value": 5 } ] }
                  ] }
            ]),
            &config,
        );
        let emitter = SourceEmitter::new(&api, &config);
        let foo = api.registry.class("Foo").unwrap();
        let source = emitter.class_source(foo, &mut EmitStats::default()).unwrap();
        let out = source.to_string();

        assert!(out.starts_with(
            "abstract type GodotFoo <: GodotObject end\n\n\
             struct Foo <: GodotFoo\n\tnative_ptr::Ptr{Nothing}\nend\n\n\
             baremodule FooInfo\nusing Base: @enum, @raw_str\nusing Core: @doc\n\nBAR = 3\n\nend\n\n"
        ));
        assert!(out.contains("\tfunction baz(self::GodotFoo, x::Int64 = 5)\n"));
        assert!(out.contains("\t\treturn ret[]\n"));
        assert!(out.contains("function Base.getproperty(object::GodotFoo, property::Symbol)"));
        assert_eq!(source.file_name(), "Foo.jl");
        assert_eq!(source.interned_names().collect::<Vec<_>>(), ["Foo", "baz"]);
    }

    #[test]
    fn root_class_has_no_supertype() {
        let config = GeneratorConfig::default();
        let api = populate(json!([]), &config);
        let emitter = SourceEmitter::new(&api, &config);
        let object = api.registry.class("Object").unwrap();
        let out = emitter
            .class_source(object, &mut EmitStats::default())
            .unwrap()
            .to_string();
        assert!(out.starts_with("abstract type GodotObject end\n\nstruct Object <: GodotObject\n"));
    }

    #[test]
    fn singleton_has_holder_and_no_dispatch() {
        let config = GeneratorConfig::default();
        let api = populate(
            json!([
                { "name": "Engine", "parent": "Object", "singleton": true,
                  "methods": [ { "name": "get_frames_drawn", "return": { "type": "int" } } ] }
            ]),
            &config,
        );
        let emitter = SourceEmitter::new(&api, &config);
        let engine = api.registry.class("Engine").unwrap();
        let source = emitter.class_source(engine, &mut EmitStats::default()).unwrap();
        let out = source.to_string();

        assert!(source.dispatch().is_none());
        assert!(out.contains(
            "mutable struct EngineSingleton <: GodotEngine\n\tnative_ptr::Ptr{Nothing}\n\tEngineSingleton() = new(C_NULL)\nend\n\n\
             const EngineSingletonInstance = EngineSingleton()\n"
        ));
        assert!(!out.contains("Base.getproperty"));
        assert!(!out.contains("Base.setproperty!"));
    }
}
