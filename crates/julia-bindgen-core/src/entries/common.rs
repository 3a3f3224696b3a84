//! Member entries shared by classes and the global scope.

use crate::naming::escape_julia_keyword;

/// A named integer constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantEntry {
    pub name: String,
    pub value: i64,
    /// Cleaned documentation text, when the documentation database has any.
    pub doc: Option<String>,
}

impl ConstantEntry {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

/// A property backed by accessor methods.
///
/// Accessors are referenced by host method name and only bound if the named
/// method survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub target_name: String,
    pub index: i32,
    pub getter: Option<String>,
    pub setter: Option<String>,
    pub doc: Option<String>,
}

impl PropertyEntry {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        let name = name.into();
        Self {
            target_name: escape_julia_keyword(&name),
            name,
            index,
            getter: None,
            setter: None,
            doc: None,
        }
    }

    pub fn with_getter(mut self, getter: impl Into<String>) -> Self {
        self.getter = Some(getter.into());
        self
    }

    pub fn with_setter(mut self, setter: impl Into<String>) -> Self {
        self.setter = Some(setter.into());
        self
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    /// A property without a setter cannot be assigned.
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_builder() {
        let prop = PropertyEntry::new("end", -1).with_getter("get_end");
        assert_eq!(prop.target_name, "_end");
        assert!(prop.is_read_only());

        let prop = prop.with_setter("set_end");
        assert!(!prop.is_read_only());
    }
}
