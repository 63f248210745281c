use serde_json::Value;

use crate::{
    client::{
        error::ClientError,
        form::{FieldSpec, SETTINGS_FIELDS, field_spec, fields_for, missing_required},
        request::{FormFields, Mutation, ValidatedForm},
    },
    models::{Record, RecordKind, Settings},
};

/// Generic create/edit form. The field set follows the collection; an id
/// means the record exists and submit becomes an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEditor {
    kind: RecordKind,
    id: Option<i32>,
    values: FormFields,
}

impl RecordEditor {
    /// Empty form for a new record.
    pub fn create(kind: RecordKind) -> Self {
        let values = fields_for(kind)
            .iter()
            .map(|spec| (spec.name.to_string(), String::new()))
            .collect();
        Self {
            kind,
            id: None,
            values,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(record: &Record) -> Self {
        let kind = record.kind();
        let row = serde_json::to_value(record).unwrap_or(Value::Null);

        let values = fields_for(kind)
            .iter()
            .map(|spec| {
                let value = match row.get(spec.name) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => String::new(),
                };
                (spec.name.to_string(), value)
            })
            .collect();

        Self {
            kind,
            id: Some(record.id()),
            values,
        }
    }

    pub fn open(kind: RecordKind, record: Option<&Record>) -> Self {
        match record {
            Some(record) => Self::edit(record),
            None => Self::create(kind),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.kind)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ClientError> {
        if field_spec(self.kind, name).is_none() {
            return Err(ClientError::UnknownField {
                kind: self.kind,
                field: name.to_string(),
            });
        }
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        missing_required(self.kind, |name| self.value(name))
    }

    /// Gathers every named field into the mutation for this form, or refuses
    /// when a required field is blank.
    pub fn submit(&self) -> Result<Mutation, ClientError> {
        let form = ValidatedForm::new(self.kind, self.values.clone())?;
        Ok(match self.id {
            Some(id) => Mutation::Update { id, form },
            None => Mutation::Create(form),
        })
    }
}

/// Settings form. Starts from the whole current record so a submit, which
/// replaces the record, keeps keys the form does not display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    values: Settings,
}

impl SettingsForm {
    pub fn from_current(current: &Settings) -> Self {
        let mut values = current.clone();
        for name in SETTINGS_FIELDS {
            if values.get(name).is_none() {
                values.set(*name, "");
            }
        }
        Self { values }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.set(name, value);
    }

    pub fn submit(&self) -> Mutation {
        Mutation::ReplaceSettings(self.values.clone())
    }
}
