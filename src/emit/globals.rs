//! Package-level files: build constants, global constants, interned names
//! and the include manifest.

use std::collections::BTreeSet;
use std::fmt;

use julia_bindgen_core::{ConstantEntry, EnumEntry};

use super::{ConstantBlock, EnumBlock};
use crate::config::GeneratorConfig;

/// `core_constants.jl`: constants that depend on how the host was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConstants {
    package_name: String,
    real_type: &'static str,
    variant_size: usize,
    real_is_double: bool,
}

impl CoreConstants {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            package_name: config.package_name.clone(),
            real_type: config.real_type(),
            variant_size: config.variant_size(),
            real_is_double: config.real_is_double,
        }
    }
}

impl fmt::Display for CoreConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let real = if self.real_is_double { "double" } else { "float" };
        writeln!(f, "# {} build constants", self.package_name)?;
        writeln!(f, "RealT = {}", self.real_type)?;
        writeln!(
            f,
            "const VARIANT_SIZE = {} # assuming real_t is {real}",
            self.variant_size
        )
    }
}

/// `constants.jl`: global enums followed by loose global constants.
#[derive(Debug, Clone, Copy)]
pub struct GlobalConstants<'a> {
    enums: &'a [EnumEntry],
    constants: &'a [ConstantEntry],
}

impl<'a> GlobalConstants<'a> {
    pub fn new(enums: &'a [EnumEntry], constants: &'a [ConstantEntry]) -> Self {
        Self { enums, constants }
    }
}

impl fmt::Display for GlobalConstants<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.enums {
            write!(f, "{}", EnumBlock(entry))?;
        }
        for constant in self.constants {
            write!(
                f,
                "{}",
                ConstantBlock {
                    constant,
                    is_const: true,
                }
            )?;
        }
        Ok(())
    }
}

/// `string_names.jl`: one interned `StringName` per class and method name
/// used by the generated calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringNames {
    names: BTreeSet<String>,
}

impl StringNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for StringNames {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for StringNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mutable struct StringNames")?;
        for name in &self.names {
            writeln!(f, "\t_{name}::StringName")?;
        }
        writeln!(f, "\tStringNames() = new()")?;
        writeln!(f, "end")?;
        writeln!(f)?;
        writeln!(f, "string_names = StringNames()")?;
        writeln!(f)?;
        writeln!(f, "function initialize_string_names()")?;
        for name in &self.names {
            writeln!(f, "\tstring_names._{name} = StringName(\"{name}\")")?;
        }
        writeln!(f, "end")?;
        writeln!(f)
    }
}

/// `classes.jl`: includes every class file in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    classes_dir: String,
    files: Vec<String>,
}

impl Manifest {
    pub fn new(classes_dir: &str, classes: impl IntoIterator<Item = String>) -> Self {
        Self {
            classes_dir: classes_dir.to_string(),
            files: classes.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "include(\"{}/{file}.jl\");", self.classes_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_constants_follow_precision() {
        let single = CoreConstants::new(&GeneratorConfig::default()).to_string();
        assert!(single.contains("RealT = Float32\nconst VARIANT_SIZE = 24 # assuming real_t is float\n"));

        let config = GeneratorConfig::default().with_real_is_double(true);
        let double = CoreConstants::new(&config).to_string();
        assert!(double.contains("RealT = Float64\nconst VARIANT_SIZE = 40 # assuming real_t is double\n"));
    }

    #[test]
    fn string_names_are_sorted_and_unique() {
        let mut names = StringNames::new();
        names.extend(["Node", "get_name", "Node", "Foo"]);
        assert_eq!(names.len(), 3);
        assert_eq!(
            names.to_string(),
            "mutable struct StringNames\n\t_Foo::StringName\n\t_Node::StringName\n\t_get_name::StringName\n\
             \tStringNames() = new()\nend\n\nstring_names = StringNames()\n\n\
             function initialize_string_names()\n\tstring_names._Foo = StringName(\"Foo\")\n\
             \tstring_names._Node = StringName(\"Node\")\n\tstring_names._get_name = StringName(\"get_name\")\nend\n\n"
        );
    }

    #[test]
    fn manifest_lists_files_in_order() {
        let manifest = Manifest::new("classes", ["Object".to_string(), "Node".to_string()]);
        assert_eq!(
            manifest.to_string(),
            "include(\"classes/Object.jl\");\ninclude(\"classes/Node.jl\");\n"
        );
    }

    #[test]
    fn loose_globals_are_const() {
        let enums = [EnumEntry::new("Side", "Side", "Side")
            .with_constant(ConstantEntry::new("SIDE_LEFT", 0))];
        let constants = [ConstantEntry::new("MAX_THINGS", 64)];
        let out = GlobalConstants::new(&enums, &constants).to_string();
        assert_eq!(
            out,
            "@enum Side begin\nSIDE_LEFT = 0\nend\n\nconst MAX_THINGS = 64\n\n"
        );
    }
}
