use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::{
    client::{
        error::ClientError,
        form::{field_spec, missing_required},
    },
    models::{RecordKind, Settings},
};

/// Flat string map gathered from a submitted form.
pub type FormFields = BTreeMap<String, String>;

/// Form values that passed the required-field check for their collection.
/// The only way to build a create or update [`Mutation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    kind: RecordKind,
    fields: FormFields,
}

impl ValidatedForm {
    pub fn new(kind: RecordKind, fields: FormFields) -> Result<Self, ClientError> {
        if let Some(field) = fields.keys().find(|name| field_spec(kind, name).is_none()) {
            return Err(ClientError::UnknownField {
                kind,
                field: field.clone(),
            });
        }

        let missing = missing_required(kind, |name| fields.get(name).map(String::as_str));
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }

        Ok(Self { kind, fields })
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }
}

/// Every write the console can issue. Each variant maps to one method,
/// query string and body on the gateway endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(ValidatedForm),
    Update { id: i32, form: ValidatedForm },
    ReplaceSettings(Settings),
    Delete { kind: RecordKind, id: i32 },
}

impl Mutation {
    pub fn method(&self) -> Method {
        match self {
            Mutation::Create(_) => Method::POST,
            Mutation::Update { .. } | Mutation::ReplaceSettings(_) => Method::PUT,
            Mutation::Delete { .. } => Method::DELETE,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Mutation::Create(_) => Vec::new(),
            Mutation::Update { id, form } => vec![
                ("type", form.kind().as_str().to_string()),
                ("id", id.to_string()),
            ],
            Mutation::ReplaceSettings(_) => vec![("type", "settings".to_string())],
            Mutation::Delete { kind, id } => {
                vec![("type", kind.as_str().to_string()), ("id", id.to_string())]
            }
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Mutation::Create(form) => {
                let mut body = Map::new();
                body.insert("action".into(), Value::from("create"));
                body.insert("type".into(), Value::from(form.kind().as_str()));
                for (name, value) in form.fields() {
                    body.insert(name.clone(), Value::from(value.as_str()));
                }
                Some(Value::Object(body))
            }
            Mutation::Update { form, .. } => Some(string_map(form.fields().iter())),
            Mutation::ReplaceSettings(settings) => Some(string_map(settings.iter())),
            Mutation::Delete { .. } => None,
        }
    }

    /// Success text shown after the gateway accepted the write.
    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "Item created",
            Mutation::Update { .. } => "Changes saved",
            Mutation::ReplaceSettings(_) => "Settings saved",
            Mutation::Delete { .. } => "Item deleted",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::Delete { .. } => "Failed to delete",
            _ => "Failed to save",
        }
    }
}

fn string_map<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> Value {
    Value::Object(
        entries
            .map(|(name, value)| (name.clone(), Value::from(value.as_str())))
            .collect(),
    )
}
