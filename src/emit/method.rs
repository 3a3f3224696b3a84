//! Lazy-binding method stubs.

use std::fmt;

use julia_bindgen_core::{ClassEntry, EmitError, MethodEntry};

use super::SourceEmitter;

/// What a stub is called on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// `self::Godot<Class>`; the handle is read from `self`.
    Instance { abstract_name: String },
    /// `::Type{<Class>}`; the handle lives in a module-level holder that is
    /// resolved on first call.
    Singleton { class_target: String, holder: String },
}

/// A parameter after the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub name: &'a str,
    pub annotation: String,
    pub default: Option<&'a str>,
}

/// Return holder of a non-void method.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReturnSlot {
    initial: String,
    call_repr: String,
    output: String,
}

/// A resolved method stub.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodStub<'a> {
    /// Interned host class name.
    class_name: &'a str,
    method: &'a MethodEntry,
    receiver: Receiver,
    parameters: Vec<Parameter<'a>>,
    /// Input conversion of each argument.
    inputs: Vec<String>,
    ret: Option<ReturnSlot>,
}

impl<'a> MethodStub<'a> {
    /// Host method name, interned by the generated code.
    pub fn name(&self) -> &'a str {
        &self.method.name
    }

    pub fn target_name(&self) -> &'a str {
        &self.method.target_name
    }

    pub fn parameters(&self) -> &[Parameter<'a>] {
        &self.parameters
    }

    pub fn is_void(&self) -> bool {
        self.ret.is_none()
    }

    fn instance(&self) -> String {
        match &self.receiver {
            Receiver::Instance { .. } => "getfield(self, :native_ptr)".to_string(),
            Receiver::Singleton { holder, .. } => format!("getfield({holder}, :native_ptr)"),
        }
    }
}

impl<'a> SourceEmitter<'a> {
    /// Resolve every type `method` mentions.
    pub fn method_stub(
        &self,
        class: &'a ClassEntry,
        method: &'a MethodEntry,
    ) -> Result<MethodStub<'a>, EmitError> {
        let return_type = self.resolve(class, &method.name, &method.return_type)?;
        let ret = (!return_type.is_void()).then(|| {
            let marshaling = return_type.marshaling();
            ReturnSlot {
                initial: marshaling.initial_value.clone(),
                call_repr: marshaling.call_repr.clone(),
                output: marshaling.output.render("ret"),
            }
        });

        let mut parameters = Vec::with_capacity(method.arguments.len());
        let mut inputs = Vec::with_capacity(method.arguments.len());
        for argument in &method.arguments {
            let ty = self.resolve(class, &method.name, &argument.type_ref)?;
            inputs.push(ty.marshaling().input.render(&argument.target_name));
            parameters.push(Parameter {
                name: &argument.target_name,
                annotation: ty.parameter_annotation(),
                default: argument.default.as_ref().map(|d| d.literal.as_str()),
            });
        }

        let receiver = if class.is_singleton {
            Receiver::Singleton {
                class_target: class.target_name.clone(),
                holder: singleton_holder(class),
            }
        } else {
            Receiver::Instance {
                abstract_name: class.abstract_name(),
            }
        };

        Ok(MethodStub {
            class_name: &class.name,
            method,
            receiver,
            parameters,
            inputs,
            ret,
        })
    }
}

/// Module-level constant holding the singleton instance of `class`.
pub(super) fn singleton_holder(class: &ClassEntry) -> String {
    format!("{}Instance", class.singleton_name())
}

impl fmt::Display for MethodStub<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.target_name();

        writeln!(f, "let")?;
        writeln!(f, "\tglobal {name}")?;
        writeln!(f, "\tmethod_bind = C_NULL")?;

        write!(f, "\tfunction {name}(")?;
        match &self.receiver {
            Receiver::Instance { abstract_name } => write!(f, "self::{abstract_name}")?,
            Receiver::Singleton { class_target, .. } => write!(f, "::Type{{{class_target}}}")?,
        }
        for parameter in &self.parameters {
            write!(f, ", {}::{}", parameter.name, parameter.annotation)?;
            if let Some(default) = parameter.default {
                write!(f, " = {default}")?;
            }
        }
        writeln!(f, ")")?;

        writeln!(f, "\t\tif method_bind == C_NULL")?;
        writeln!(
            f,
            "\t\t\tmethod_bind = @ccall godot_julia_get_method_bind(string_names._{}::Ref{{StringName}}, string_names._{}::Ref{{StringName}})::Ptr{{Nothing}}",
            self.class_name,
            self.name()
        )?;
        writeln!(f, "\t\tend")?;

        if let Receiver::Singleton { holder, .. } = &self.receiver {
            writeln!(f, "\t\tif getfield({holder}, :native_ptr) == C_NULL")?;
            writeln!(
                f,
                "\t\t\tsetfield!({holder}, :native_ptr, @ccall godot_julia_get_singleton(string_names._{}::Ref{{StringName}})::Ptr{{Nothing}})",
                self.class_name
            )?;
            writeln!(f, "\t\tend")?;
        }

        let ret_arg = match &self.ret {
            Some(ret) => {
                writeln!(f, "\t\tret = {}", ret.initial)?;
                format!("ret::{}", ret.call_repr)
            }
            None => "C_NULL::Ptr{Nothing}".to_string(),
        };

        let args_arg = if self.inputs.is_empty() {
            "C_NULL::Ptr{Nothing}"
        } else {
            writeln!(f, "\t\targs = [{}]", self.inputs.join(", "))?;
            "args::Ref{Ptr{Nothing}}"
        };

        writeln!(
            f,
            "\t\t@ccall godot_julia_method_bind_ptrcall(method_bind::Ptr{{Nothing}}, {}::Ptr{{Nothing}}, {args_arg}, {ret_arg})::Cvoid",
            self.instance()
        )?;

        if let Some(ret) = &self.ret {
            writeln!(f, "\t\treturn {}", ret.output)?;
        }

        writeln!(f, "\tend")?;
        writeln!(f, "end")?;
        writeln!(f)?;

        if let Some(doc) = &self.method.doc {
            writeln!(f, "@doc raw\"\"\"{doc}\"\"\"")?;
            write!(f, "{name}(")?;
            match &self.receiver {
                Receiver::Instance { abstract_name } => write!(f, "::{abstract_name}")?,
                Receiver::Singleton { class_target, .. } => write!(f, "::Type{{{class_target}}}")?,
            }
            for parameter in &self.parameters {
                write!(f, ", ::{}", parameter.annotation)?;
            }
            writeln!(f, ")")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::emit::test_support::populate;

    const BAZ: &str = "\
let
\tglobal baz
\tmethod_bind = C_NULL
\tfunction baz(self::GodotFoo, x::Int64 = 5)
\t\tif method_bind == C_NULL
\t\t\tmethod_bind = @ccall godot_julia_get_method_bind(string_names._Foo::Ref{StringName}, string_names._baz::Ref{StringName})::Ptr{Nothing}
\t\tend
\t\tret = Ref{Int64}(0)
\t\targs = [Ref{Int64}(x)]
\t\t@ccall godot_julia_method_bind_ptrcall(method_bind::Ptr{Nothing}, getfield(self, :native_ptr)::Ptr{Nothing}, args::Ref{Ptr{Nothing}}, ret::Ref{Int64})::Cvoid
\t\treturn ret[]
\tend
end

";

    fn render(classes: serde_json::Value, class: &str, method: &str) -> Result<String, EmitError> {
        let config = GeneratorConfig::default();
        let api = populate(classes, &config);
        let emitter = SourceEmitter::new(&api, &config);
        let class = api.registry.class(class).unwrap();
        let method = class.find_method(method).unwrap();
        emitter.method_stub(class, method).map(|stub| stub.to_string())
    }

    #[test]
    fn integer_method_with_default() {
        let out = render(
            json!([
                { "name": "Foo", "parent": "Object",
                  "methods": [
                      { "name": "baz", "return": { "type": "int" },
                        "arguments": [ { "name": "x", "type": "int" } ],
                        "default_arguments": [ { "type": "int", "value": 5 } ] }
                  ] }
            ]),
            "Foo",
            "baz",
        )
        .unwrap();
        assert_eq!(out, BAZ);
    }

    #[test]
    fn stubs_of_the_same_method_compare_equal() {
        let config = GeneratorConfig::default();
        let api = populate(
            json!([
                { "name": "Foo", "parent": "Object",
                  "methods": [
                      { "name": "baz", "return": { "type": "float" },
                        "arguments": [ { "name": "x", "type": "float" } ],
                        "default_arguments": [ { "type": "float", "value": 0.5 } ] },
                      { "name": "qux" }
                  ] }
            ]),
            &config,
        );
        let emitter = SourceEmitter::new(&api, &config);
        let class = api.registry.class("Foo").unwrap();
        let baz = class.find_method("baz").unwrap();
        let qux = class.find_method("qux").unwrap();

        let first = emitter.method_stub(class, baz).unwrap();
        assert_eq!(first, emitter.method_stub(class, baz).unwrap());
        assert_ne!(first, emitter.method_stub(class, qux).unwrap());
        assert_eq!(first.parameters()[0].default, Some("0.5"));
    }

    #[test]
    fn void_method_without_arguments() {
        let out = render(
            json!([ { "name": "Node", "parent": "Object", "methods": [ { "name": "queue_free" } ] } ]),
            "Node",
            "queue_free",
        )
        .unwrap();
        assert!(out.contains("\tfunction queue_free(self::GodotNode)\n"));
        assert!(out.contains(", C_NULL::Ptr{Nothing}, C_NULL::Ptr{Nothing})::Cvoid\n"));
        assert!(!out.contains("ret ="));
        assert!(!out.contains("return"));
    }

    #[test]
    fn object_and_enum_marshaling() {
        let out = render(
            json!([
                { "name": "Node", "parent": "Object",
                  "constants": [ { "name": "MODE_A", "value": 0 } ],
                  "enums": [ { "name": "Mode", "constants": ["MODE_A"] } ],
                  "methods": [
                      { "name": "reparent",
                        "return": { "type": "int", "usage": "CLASS_IS_ENUM", "class_name": "Node.Mode" },
                        "arguments": [ { "name": "parent", "type": "object", "class_name": "Node" } ] }
                  ] }
            ]),
            "Node",
            "reparent",
        )
        .unwrap();
        assert!(out.contains("function reparent(self::GodotNode, parent::GodotNode)"));
        assert!(out.contains("ret = Ref{Cint}(0)"));
        assert!(out.contains("args = [Ref{Ptr{Nothing}}(getfield(parent, :native_ptr))]"));
        assert!(out.contains("ret::Ref{Cint})::Cvoid"));
        assert!(out.contains("return NodeInfo.Mode(ret[])"));
    }

    #[test]
    fn singleton_receiver() {
        let out = render(
            json!([
                { "name": "Engine", "parent": "Object", "singleton": true,
                  "methods": [ { "name": "get_frames_drawn", "return": { "type": "int" } } ] }
            ]),
            "Engine",
            "get_frames_drawn",
        )
        .unwrap();
        assert!(out.contains("\tfunction get_frames_drawn(::Type{Engine})\n"));
        assert!(out.contains(
            "setfield!(EngineSingletonInstance, :native_ptr, @ccall godot_julia_get_singleton(string_names._Engine::Ref{StringName})::Ptr{Nothing})"
        ));
        assert!(out.contains("getfield(EngineSingletonInstance, :native_ptr)::Ptr{Nothing}"));
        assert!(!out.contains("self"));
    }

    #[test]
    fn documented_method_signature() {
        let config = GeneratorConfig::default();
        let api = populate(
            json!([
                { "name": "Node", "parent": "Object",
                  "methods": [
                      { "name": "set_name", "arguments": [ { "name": "name", "type": "string_name" } ] }
                  ] }
            ]),
            &config,
        );
        let mut class = api.registry.class("Node").unwrap().clone();
        class.methods[0].doc = Some("Sets the name.".into());
        let emitter = SourceEmitter::new(&api, &config);
        let out = emitter.method_stub(&class, &class.methods[0]).unwrap().to_string();
        assert!(out.ends_with("@doc raw\"\"\"Sets the name.\"\"\"\nset_name(::GodotNode, ::StringName)\n\n"));
    }
}
