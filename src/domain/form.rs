// ============================================================
// FORM FIELDS
// ============================================================
// Field definitions and construction-time exclusion

use serde::{Deserialize, Serialize};

/// A single form field definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    /// Human-readable label
    pub label: String,

    /// Whether the field must be filled in
    pub required: bool,

    /// Initial value rendered into the form, if any
    pub initial: Option<String>,
}

impl FormField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: true,
            initial: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }
}

/// Insertion-ordered mapping from field name to definition.
///
/// Order matters for rendering, so this is a small vec-backed map rather
/// than a hash map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldMap {
    entries: Vec<(String, FormField)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any existing definition with the same name.
    pub fn insert(&mut self, name: impl Into<String>, field: FormField) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = field;
        } else {
            self.entries.push((name, field));
        }
    }

    /// Remove a field by name. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<FormField> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormField)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every named field. Names not present in the map are
    /// silently ignored.
    pub fn exclude<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.remove(name.as_ref());
        }
    }
}

/// A form definition: its field map plus the exclusions applied when it
/// was built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDef {
    pub fields: FieldMap,
}

impl FormDef {
    pub fn builder() -> FormDefBuilder {
        FormDefBuilder::default()
    }
}

/// Builder that collects fields and applies exclusions after all fields
/// are populated, mirroring construction-time exclusion semantics.
#[derive(Debug, Default)]
pub struct FormDefBuilder {
    fields: FieldMap,
    exclude: Vec<String>,
}

impl FormDefBuilder {
    pub fn field(mut self, name: impl Into<String>, field: FormField) -> Self {
        self.fields.insert(name, field);
        self
    }

    /// Names to drop from the finished field map. Absent names are ignored.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> FormDef {
        let mut fields = self.fields;
        fields.exclude(&self.exclude);
        FormDef { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("x", FormField::new("X"));
        fields.insert("y", FormField::new("Y"));
        fields
    }

    #[test]
    fn test_exclude_removes_named_field() {
        let mut fields = base_fields();
        fields.exclude(["x"]);
        assert!(!fields.contains("x"));
        assert!(fields.contains("y"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_exclude_absent_field_is_noop() {
        let mut fields = base_fields();
        fields.exclude(["z"]);
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_builder_applies_exclusions_after_fields() {
        let form = FormDef::builder()
            .field("x", FormField::new("X"))
            .exclude(["x"]) // order relative to field() must not matter
            .field("y", FormField::new("Y").optional())
            .build();
        assert_eq!(form.fields.names().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut fields = base_fields();
        fields.insert("x", FormField::new("X2").with_initial("0"));
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(fields.get("x").unwrap().label, "X2");
    }
}
