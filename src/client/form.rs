use crate::models::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Multiline,
    Number,
}

/// One named input of an editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub input: FieldInput,
}

const fn field(name: &'static str, required: bool, input: FieldInput) -> FieldSpec {
    FieldSpec {
        name,
        required,
        input,
    }
}

const NEWS_FIELDS: &[FieldSpec] = &[
    field("title", true, FieldInput::Text),
    field("content", true, FieldInput::Multiline),
    field("category", true, FieldInput::Text),
    field("image_url", false, FieldInput::Text),
];

const MATCH_FIELDS: &[FieldSpec] = &[
    field("match_date", true, FieldInput::Text),
    field("match_time", true, FieldInput::Text),
    field("home_team", true, FieldInput::Text),
    field("away_team", true, FieldInput::Text),
    field("score", false, FieldInput::Text),
    field("location", true, FieldInput::Text),
    field("home_logo", false, FieldInput::Text),
    field("away_logo", false, FieldInput::Text),
];

const PLAYER_FIELDS: &[FieldSpec] = &[
    field("number", true, FieldInput::Number),
    field("name", true, FieldInput::Text),
    field("position", true, FieldInput::Text),
    field("image_url", false, FieldInput::Text),
    field("bio", false, FieldInput::Multiline),
];

const GALLERY_FIELDS: &[FieldSpec] = &[
    field("image_url", true, FieldInput::Text),
    field("title", false, FieldInput::Text),
    field("description", false, FieldInput::Multiline),
];

/// Fields shown by the settings form. The form still submits every key of
/// the current record.
pub const SETTINGS_FIELDS: &[&str] = &[
    "site_title",
    "site_subtitle",
    "contact_phone",
    "contact_email",
    "contact_address",
];

pub fn fields_for(kind: RecordKind) -> &'static [FieldSpec] {
    match kind {
        RecordKind::News => NEWS_FIELDS,
        RecordKind::Matches => MATCH_FIELDS,
        RecordKind::Players => PLAYER_FIELDS,
        RecordKind::Gallery => GALLERY_FIELDS,
    }
}

pub fn field_spec(kind: RecordKind, name: &str) -> Option<&'static FieldSpec> {
    fields_for(kind).iter().find(|spec| spec.name == name)
}

/// Names of required fields that are absent or blank.
pub fn missing_required<'a>(
    kind: RecordKind,
    value: impl Fn(&str) -> Option<&'a str>,
) -> Vec<&'static str> {
    fields_for(kind)
        .iter()
        .filter(|spec| spec.required)
        .filter(|spec| value(spec.name).is_none_or(|v| v.trim().is_empty()))
        .map(|spec| spec.name)
        .collect()
}
