//! Source emission.
//!
//! Each generated file is first resolved into a plan (types looked up,
//! marshaling templates applied) and then rendered through `Display`.
//! Resolution failures are per member: the offending method, property
//! accessor or class file is logged, counted and left out.
//!
//! Generated files:
//!
//! | File | Content |
//! |---|---|
//! | `core_constants.jl` | Host build constants ([`CoreConstants`]) |
//! | `constants.jl` | Global enums and constants ([`GlobalConstants`]) |
//! | `string_names.jl` | Interned class and method names ([`StringNames`]) |
//! | `classes/<Class>.jl` | One per emitted class ([`ClassSource`]) |
//! | `classes.jl` | Includes in dependency order ([`Manifest`]) |

mod class;
mod enums;
mod globals;
mod method;
mod property;

pub use class::ClassSource;
pub use enums::{ConstantBlock, EnumBlock};
pub use globals::{CoreConstants, GlobalConstants, Manifest, StringNames};
pub use method::{MethodStub, Receiver};
pub use property::{Accessor, PropertyDispatch};

use rustc_hash::FxHashSet;
use tracing::warn;

use julia_bindgen_core::{ClassEntry, EmitError, TypeEntry, TypeRef};

use crate::config::GeneratorConfig;
use crate::populate::PopulatedApi;

/// Counters for members dropped or kept during emission.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitStats {
    pub methods_emitted: usize,
    pub members_skipped: usize,
}

/// Resolves populated entries into renderable plans.
pub struct SourceEmitter<'a> {
    api: &'a PopulatedApi,
    config: &'a GeneratorConfig,
    /// Classes that get a file.
    files: FxHashSet<&'a str>,
}

impl<'a> SourceEmitter<'a> {
    pub fn new(api: &'a PopulatedApi, config: &'a GeneratorConfig) -> Self {
        let mut files = FxHashSet::default();
        // Registration order puts every parent before its children.
        for class in api.registry.classes() {
            let parent_declared = class
                .parent
                .as_deref()
                .is_none_or(|parent| files.contains(parent));
            if !parent_declared {
                warn!(class = %class.name, "not emitted: parent has no file");
                continue;
            }
            if config.include_editor_api || !class.api_type.is_editor() {
                files.insert(class.name.as_str());
            }
        }
        Self { api, config, files }
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Whether `class` gets a file of its own: it is in an emitted API
    /// partition and so is every ancestor.
    pub fn is_emitted(&self, class: &ClassEntry) -> bool {
        self.files.contains(class.name.as_str())
    }

    /// Emitted classes, in the given order.
    pub fn emitted_classes(&self, order: &[String]) -> Vec<&'a ClassEntry> {
        let registry = &self.api.registry;
        order
            .iter()
            .filter_map(|name| registry.class(name))
            .filter(|class| self.is_emitted(class))
            .collect()
    }

    /// Resolve a signature type of `owner.member`.
    ///
    /// Classes that are not emitted, and enums declared by them, do not
    /// resolve: nothing would define them at load time.
    pub(crate) fn resolve(
        &self,
        owner: &ClassEntry,
        member: &str,
        type_ref: &TypeRef,
    ) -> Result<&'a TypeEntry, EmitError> {
        let registry = &self.api.registry;
        let unresolved = || EmitError::UnresolvedType {
            owner: owner.name.clone(),
            member: member.to_string(),
            type_name: type_ref.name.clone(),
        };

        let entry = registry.resolve(type_ref).ok_or_else(unresolved)?;
        let declaring = match entry {
            TypeEntry::Class(class) => Some(class),
            TypeEntry::Enum(entry) => entry.owner.as_deref().and_then(|o| registry.class(o)),
            TypeEntry::Builtin(_) => None,
        };
        match declaring {
            Some(class) if !self.is_emitted(class) => Err(unresolved()),
            _ => Ok(entry),
        }
    }

    /// Plan the file of `class`.
    ///
    /// Members that fail to resolve are dropped and counted in `stats`; an
    /// error is returned only when the class itself cannot be declared.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn class_source(
        &self,
        class: &'a ClassEntry,
        stats: &mut EmitStats,
    ) -> Result<ClassSource<'a>, EmitError> {
        let parent = match &class.parent {
            None => None,
            Some(parent) => {
                let entry = self
                    .api
                    .registry
                    .class(parent)
                    .filter(|entry| self.is_emitted(entry))
                    .ok_or_else(|| EmitError::MissingParent {
                        class: class.name.clone(),
                        parent: parent.clone(),
                    })?;
                Some(entry.abstract_name())
            }
        };

        let mut stubs = Vec::with_capacity(class.methods.len());
        for method in class.methods.iter().filter(|m| m.is_bindable()) {
            match self.method_stub(class, method) {
                Ok(stub) => stubs.push(stub),
                Err(err) => {
                    warn!(class = %class.name, method = %method.name, "{err}");
                    stats.members_skipped += 1;
                }
            }
        }
        stats.methods_emitted += stubs.len();

        let dispatch = if class.is_singleton {
            None
        } else {
            Some(self.property_dispatch(class, stats))
        };

        Ok(ClassSource::new(class, parent, stubs, dispatch))
    }

    pub fn global_constants(&self) -> GlobalConstants<'a> {
        GlobalConstants::new(&self.api.global_enums, &self.api.global_constants)
    }

    pub fn core_constants(&self) -> CoreConstants {
        CoreConstants::new(self.config)
    }

    pub fn manifest(&self, classes: &[&ClassEntry]) -> Manifest {
        Manifest::new(
            &self.config.classes_dir,
            classes.iter().map(|class| class.target_name.clone()),
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::json;

    use crate::config::GeneratorConfig;
    use crate::host::{JsonClassDb, NoDocs};
    use crate::populate::{MetadataPopulator, PopulatedApi};

    /// Populate a small host rooted at `Object` with the given extra classes.
    pub fn populate(classes: serde_json::Value, config: &GeneratorConfig) -> PopulatedApi {
        let mut all = vec![json!({ "name": "Object" })];
        if let serde_json::Value::Array(extra) = classes {
            all.extend(extra);
        }
        let db = JsonClassDb::from_value(json!({ "classes": all })).unwrap();
        MetadataPopulator::new(&db, &NoDocs, config).populate()
    }
}
