//! Class traversal: admission, properties, enums and constants.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use julia_bindgen_core::naming::fix_doc_description;
use julia_bindgen_core::{
    ClassDocumentation, ClassEntry, ConstantEntry, EnumEntry, EnumTypeEntry, PopulateError,
    PropertyEntry, PropertyUsage, VariantType,
};

use super::{MetadataPopulator, doc_text};
use crate::host::ClassDoc;

impl MetadataPopulator<'_> {
    /// Visit every class reachable from the root and build the admitted ones.
    ///
    /// Children of a rejected class are still visited and attach to the
    /// nearest admitted ancestor. The result is parent-first.
    pub(super) fn populate_classes(&mut self) -> Vec<ClassEntry> {
        let root = self.config.root_class.clone();
        let mut queue = VecDeque::from([root.clone()]);
        let mut visited = FxHashSet::default();
        let mut admitted = FxHashSet::default();
        let mut classes = Vec::new();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }

            let mut inheriters = self.db.direct_inheriters(&name);
            inheriters.sort();
            queue.extend(inheriters);

            if !self.is_admitted(&name) {
                continue;
            }

            let parent = if name == root {
                None
            } else {
                match self.nearest_admitted_ancestor(&name, &admitted) {
                    Some(parent) => Some(parent),
                    None => {
                        let parent = self.db.parent_class(&name).unwrap_or_default();
                        self.report(PopulateError::UnknownParent {
                            class: name.clone(),
                            parent,
                        });
                        continue;
                    }
                }
            };

            let class = self.populate_class(&name, parent);
            admitted.insert(name);
            classes.push(class);
        }

        classes
    }

    fn is_admitted(&self, name: &str) -> bool {
        if !self.db.api_type(name).is_recognized() {
            debug!(class = name, "ignoring type outside the known API partitions");
            return false;
        }
        if !self.db.is_class_exposed(name) {
            debug!(class = name, "ignoring type because it's not exposed");
            return false;
        }
        if !self.db.is_class_enabled(name) {
            debug!(class = name, "ignoring type because it's not enabled");
            return false;
        }
        true
    }

    fn nearest_admitted_ancestor(&self, name: &str, admitted: &FxHashSet<String>) -> Option<String> {
        let mut seen = FxHashSet::default();
        let mut current = self.db.parent_class(name);
        while let Some(parent) = current {
            if admitted.contains(&parent) {
                return Some(parent);
            }
            if !seen.insert(parent.clone()) {
                return None;
            }
            current = self.db.parent_class(&parent);
        }
        None
    }

    fn populate_class(&mut self, name: &str, parent: Option<String>) -> ClassEntry {
        let docs = self.docs;
        let class_doc = docs.doc_for_class(name);
        let is_singleton = self.db.is_singleton(name);

        let mut class = ClassEntry::new(name)
            .with_api_type(self.db.api_type(name))
            .with_singleton(is_singleton)
            .with_instantiable(self.db.can_instantiate(name) && !is_singleton)
            .with_ref_counted(self.db.is_parent_class(name, &self.config.ref_counted_class))
            .with_doc(class_doc.map(|doc| ClassDocumentation {
                brief: fix_doc_description(&doc.brief_description),
                description: fix_doc_description(&doc.description),
            }));
        class.parent = parent;

        self.populate_properties(&mut class, class_doc);
        self.populate_constants(&mut class, class_doc);

        debug!(
            class = name,
            properties = class.properties.len(),
            enums = class.enums.len(),
            constants = class.constants.len(),
            "populated class"
        );
        class
    }

    fn populate_properties(&mut self, class: &mut ClassEntry, class_doc: Option<&ClassDoc>) {
        for info in self.db.property_list(&class.name) {
            let is_marker = info.usage.is_grouping()
                || (info.variant_type == VariantType::Nil
                    && info.usage.contains(PropertyUsage::ARRAY));
            // Names with a slash are inspector-only.
            if is_marker || info.name.contains('/') {
                continue;
            }

            let Some(index) = self.db.property_index(&class.name, &info.name) else {
                self.report(PopulateError::InvalidPropertyIndex {
                    class: class.name.clone(),
                    property: info.name,
                });
                continue;
            };

            let mut property = PropertyEntry::new(info.name.as_str(), index).with_doc(
                class_doc
                    .and_then(|d| d.property(&info.name))
                    .and_then(|d| doc_text(&d.description)),
            );
            property.getter = self.db.property_getter(&class.name, &info.name);
            property.setter = self.db.property_setter(&class.name, &info.name);
            class.properties.push(property);
        }
    }

    /// Attach enum members to their enums; what is left are loose constants.
    fn populate_constants(&mut self, class: &mut ClassEntry, class_doc: Option<&ClassDoc>) {
        let mut loose = self.db.integer_constant_list(&class.name);

        for info in self.db.enum_list(&class.name) {
            let qualified = format!("{}.{}", class.info_module_name(), info.name);
            let mut entry = EnumEntry::new(info.name.as_str(), info.name.as_str(), qualified)
                .with_flags(info.is_bitfield);

            for name in &info.constants {
                loose.retain(|c| c != name);
                match self.constant(class, class_doc, name) {
                    Some(constant) => entry.constants.push(constant),
                    None => self.report(PopulateError::MissingConstantValue {
                        class: class.name.clone(),
                        constant: name.clone(),
                    }),
                }
            }

            // Nothing to emit for an enum without constants; references to it
            // resolve to a plain integer.
            if entry.is_empty() {
                debug!(class = %class.name, enum_name = %entry.name, "skipping empty enum");
                continue;
            }

            let key = format!("{}.{}", class.name, entry.name);
            let companion = EnumTypeEntry::new(key, Some(class.name.clone()), &entry);
            if let Err(err) = self.registry.register_enum(companion) {
                warn!(class = %class.name, "{err}");
            }
            class.enums.push(entry);
        }

        for name in loose {
            match self.constant(class, class_doc, &name) {
                Some(constant) => class.constants.push(constant),
                None => self.report(PopulateError::MissingConstantValue {
                    class: class.name.clone(),
                    constant: name,
                }),
            }
        }
    }

    fn constant(
        &self,
        class: &ClassEntry,
        class_doc: Option<&ClassDoc>,
        name: &str,
    ) -> Option<ConstantEntry> {
        let value = self.db.integer_constant(&class.name, name)?;
        let doc = class_doc
            .and_then(|d| d.constant(name))
            .and_then(|d| doc_text(&d.description));
        Some(ConstantEntry::new(name, value).with_doc(doc))
    }
}
