//! Generator configuration.

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// The host was built with double-precision `real_t`.
    pub real_is_double: bool,
    /// Class the traversal starts from; the only class without a parent.
    pub root_class: String,
    /// Ancestor that marks a class as reference counted.
    pub ref_counted_class: String,
    /// Emit classes from the editor API partitions.
    pub include_editor_api: bool,
    /// Name of the generated Julia package.
    pub package_name: String,
    /// Sub-directory for the per-class files.
    pub classes_dir: String,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            real_is_double: false,
            root_class: "Object".to_string(),
            ref_counted_class: "RefCounted".to_string(),
            include_editor_api: false,
            package_name: "Godot.jl".to_string(),
            classes_dir: "classes".to_string(),
        }
    }

    pub fn with_real_is_double(mut self, real_is_double: bool) -> Self {
        self.real_is_double = real_is_double;
        self
    }

    pub fn with_root_class(mut self, root_class: impl Into<String>) -> Self {
        self.root_class = root_class.into();
        self
    }

    pub fn with_ref_counted_class(mut self, class: impl Into<String>) -> Self {
        self.ref_counted_class = class.into();
        self
    }

    pub fn with_editor_api(mut self, include: bool) -> Self {
        self.include_editor_api = include;
        self
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn with_classes_dir(mut self, dir: impl Into<String>) -> Self {
        self.classes_dir = dir.into();
        self
    }

    /// Julia type of the host's `real_t`.
    pub fn real_type(&self) -> &'static str {
        if self.real_is_double { "Float64" } else { "Float32" }
    }

    /// Size in bytes of a host `Variant`.
    pub fn variant_size(&self) -> usize {
        if self.real_is_double { 40 } else { 24 }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
