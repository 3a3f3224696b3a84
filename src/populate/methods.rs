//! Method admission, signature classification and default arguments.

use tracing::{debug, trace};

use julia_bindgen_core::{
    ArgumentEntry, BuiltinKind, ClassEntry, DefaultValue, MethodEntry, MethodFlags,
    PopulateError, PropertyUsage, TypeMeta, TypeRef, VariantType,
};

use super::{MetadataPopulator, doc_text};
use crate::defaults::{Destination, synthesize};
use crate::host::{MethodBindInfo, MethodInfo, PropertyInfo};

/// Index used for the return slot in metadata lookups.
const RETURN_SLOT: i32 = -1;

impl MetadataPopulator<'_> {
    /// Populate the bindable methods of `class`, sorted by name.
    pub(super) fn populate_methods(&mut self, class: &mut ClassEntry) {
        let mut infos = self.db.method_list(&class.name);
        infos.sort_by(|a, b| a.name.cmp(&b.name));

        for info in infos {
            match self.populate_method(&class.name, &info) {
                Ok(method) => {
                    trace!(class = %class.name, method = %method.name, "bound method");
                    class.methods.push(method);
                }
                Err(err) => self.report(err),
            }
        }

        debug!(class = %class.name, methods = class.methods.len(), "populated methods");
    }

    fn populate_method(&self, class: &str, info: &MethodInfo) -> Result<MethodEntry, PopulateError> {
        let class_name = || class.to_string();
        let method_name = || info.name.clone();

        let unsupported = info
            .arguments
            .iter()
            .chain(std::iter::once(&info.return_value))
            .find(|slot| !slot.variant_type.is_supported_in_signature());
        if let Some(slot) = unsupported {
            return Err(PopulateError::UnsupportedType {
                class: class_name(),
                method: method_name(),
                variant_type: slot.variant_type,
            });
        }
        if info.name.is_empty() {
            return Err(PopulateError::EmptyMethodName { class: class_name() });
        }
        if info.flags.contains(MethodFlags::STATIC) {
            return Err(PopulateError::StaticMethod {
                class: class_name(),
                method: method_name(),
            });
        }
        if info.flags.contains(MethodFlags::VIRTUAL) {
            return Err(PopulateError::VirtualMethod {
                class: class_name(),
                method: method_name(),
            });
        }

        let bind = self.db.method_bind(class, &info.name);
        if let Some(bind) = &bind {
            if bind.is_vararg {
                return Err(PopulateError::VarargMethod {
                    class: class_name(),
                    method: method_name(),
                });
            }
            if bind.is_static {
                return Err(PopulateError::StaticMethod {
                    class: class_name(),
                    method: method_name(),
                });
            }
        }

        let return_meta = slot_meta(info, bind.as_ref(), RETURN_SLOT);
        let return_type = classify(&info.return_value, return_meta, true);

        let doc = self
            .docs
            .doc_for_class(class)
            .and_then(|d| d.method(&info.name))
            .and_then(|d| doc_text(&d.description));
        let mut method = MethodEntry::new(info.name.as_str(), return_type).with_doc(doc);

        for (i, slot) in info.arguments.iter().enumerate() {
            let meta = slot_meta(info, bind.as_ref(), i as i32);
            let mut argument = ArgumentEntry::new(slot.name.as_str(), classify(slot, meta, false));

            if let Some(value) = bind.as_ref().and_then(|b| b.default_argument(i)) {
                let literal = synthesize(
                    value,
                    self.destination(&argument.type_ref),
                    self.config.real_is_double,
                )
                .ok_or_else(|| PopulateError::UnsupportedDefault {
                    class: class_name(),
                    method: method_name(),
                    argument: slot.name.clone(),
                    value: value.clone(),
                })?;
                argument = argument.with_default(DefaultValue::new(value.clone(), literal));
            }

            method.arguments.push(argument);
        }

        Ok(method)
    }

    /// Where a default for an argument of type `type_ref` ends up.
    fn destination<'r>(&'r self, type_ref: &'r TypeRef) -> Destination<'r> {
        if type_ref.is_enum {
            return match self.registry.enum_type(&type_ref.name) {
                Some(entry) => Destination::Enum {
                    qualified: &entry.qualified_target_name,
                    is_flags: entry.is_flags,
                },
                None => Destination::Builtin(BuiltinKind::Int32),
            };
        }
        match BuiltinKind::from_name(&type_ref.name) {
            Some(kind) => Destination::Builtin(kind),
            None => Destination::Object(&type_ref.name),
        }
    }
}

/// Width metadata of a slot, preferring what the method bind reports.
fn slot_meta(info: &MethodInfo, bind: Option<&MethodBindInfo>, index: i32) -> TypeMeta {
    match bind {
        Some(bind) => bind.argument_meta(index),
        None => info.meta(index),
    }
}

/// Map an argument or return slot to the type it is bound as.
fn classify(slot: &PropertyInfo, meta: TypeMeta, is_return: bool) -> TypeRef {
    match slot.variant_type {
        VariantType::Nil if is_return && !slot.usage.contains(PropertyUsage::NIL_IS_VARIANT) => {
            TypeRef::new(BuiltinKind::Void.name())
        }
        VariantType::Nil => TypeRef::new(BuiltinKind::Variant.name()),
        VariantType::Int if slot.usage.is_enum_like() => {
            TypeRef::enumeration(slot.class_name.as_str())
        }
        VariantType::Int => TypeRef::new(BuiltinKind::from_int_meta(meta).name()),
        VariantType::Float => TypeRef::new(BuiltinKind::from_float_meta(meta).name()),
        VariantType::Object => TypeRef::new(slot.class_name.as_str()),
        other => TypeRef::new(other.name()),
    }
}
