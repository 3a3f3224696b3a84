//! Metadata population.
//!
//! Walks the host class database and builds the type registry:
//!
//! 1. Builtins are registered from the static table.
//! 2. Global constants are grouped into global enums and loose constants.
//! 3. Classes are visited breadth-first from the root. Admitted classes get
//!    their properties, enums and constants; every non-empty enum is
//!    registered so signatures can refer to it.
//! 4. Methods are populated once all enums are known, then the classes are
//!    registered parent-first.
//!
//! Problems with a single member are logged and counted; the member is
//! dropped and population continues.

mod class;
mod methods;

use tracing::{debug, info, info_span, warn};

use julia_bindgen_core::naming::{fix_doc_description, global_enum_target_name};
use julia_bindgen_core::{ConstantEntry, EnumEntry, EnumTypeEntry, PopulateError};
use julia_bindgen_registry::TypeRegistry;

use crate::config::GeneratorConfig;
use crate::host::{ClassDb, DocDatabase};

/// Everything population produces.
#[derive(Debug, Clone)]
pub struct PopulatedApi {
    pub registry: TypeRegistry,
    pub global_enums: Vec<EnumEntry>,
    pub global_constants: Vec<ConstantEntry>,
    /// Members dropped because of a populate error.
    pub skipped: usize,
}

/// Builds a [`PopulatedApi`] from the host collaborators.
pub struct MetadataPopulator<'a> {
    db: &'a dyn ClassDb,
    docs: &'a dyn DocDatabase,
    config: &'a GeneratorConfig,
    registry: TypeRegistry,
    skipped: usize,
}

impl<'a> MetadataPopulator<'a> {
    pub fn new(db: &'a dyn ClassDb, docs: &'a dyn DocDatabase, config: &'a GeneratorConfig) -> Self {
        Self {
            db,
            docs,
            config,
            registry: TypeRegistry::new(),
            skipped: 0,
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn populate(mut self) -> PopulatedApi {
        let _span = info_span!("populate").entered();

        self.registry.register_builtins();
        let (global_enums, global_constants) = self.populate_global_constants();

        let mut classes = self.populate_classes();
        for class in &mut classes {
            self.populate_methods(class);
        }
        for class in classes {
            let name = class.name.clone();
            if let Err(err) = self.registry.register_class(class) {
                warn!(class = %name, "{err}");
                self.skipped += 1;
            }
        }

        info!(
            classes = self.registry.class_count(),
            enums = self.registry.enum_count(),
            skipped = self.skipped,
            "populated class database"
        );

        PopulatedApi {
            registry: self.registry,
            global_enums,
            global_constants,
            skipped: self.skipped,
        }
    }

    /// Log a dropped member.
    fn report(&mut self, err: PopulateError) {
        if err.is_policy() {
            debug!("{err}");
        } else {
            warn!("{err}");
        }
        self.skipped += 1;
    }

    fn populate_global_constants(&mut self) -> (Vec<EnumEntry>, Vec<ConstantEntry>) {
        let scope = self.docs.global_scope();
        let mut enums: Vec<EnumEntry> = Vec::new();
        let mut loose = Vec::new();

        for info in self.db.global_constants() {
            let doc = scope
                .and_then(|d| d.constant(&info.name))
                .and_then(|d| doc_text(&d.description));
            let constant = ConstantEntry::new(info.name, info.value).with_doc(doc);

            let Some(enum_name) = info.enum_name else {
                loose.push(constant);
                continue;
            };

            match enums.iter_mut().find(|e| e.name == enum_name) {
                Some(entry) => entry.constants.push(constant),
                None => {
                    let target = global_enum_target_name(&enum_name);
                    enums.push(
                        EnumEntry::new(enum_name, target.clone(), target)
                            .with_flags(info.is_bitfield)
                            .with_constant(constant),
                    );
                }
            }
        }

        for entry in &enums {
            let companion = EnumTypeEntry::new(entry.name.clone(), None, entry);
            if let Err(err) = self.registry.register_enum(companion) {
                warn!("{err}");
            }
        }

        debug!(
            enums = enums.len(),
            constants = loose.len(),
            "populated global constants"
        );
        (enums, loose)
    }
}

/// Cleaned documentation text, or `None` when there is nothing to say.
fn doc_text(text: &str) -> Option<String> {
    let text = fix_doc_description(text);
    (!text.is_empty()).then_some(text)
}
