use super::error::FormConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Registration event a form collects data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    Birth,
    Death,
    Marriage,
}

impl Event {
    pub const fn ordered() -> [Self; 3] {
        [Self::Birth, Self::Death, Self::Marriage]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Death => "death",
            Self::Marriage => "marriage",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = FormConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "birth" => Ok(Self::Birth),
            "death" => Ok(Self::Death),
            "marriage" => Ok(Self::Marriage),
            other => Err(FormConfigError::UnsupportedEvent(other.to_string())),
        }
    }
}

/// `react-intl` style message consumed by the external i18n renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDescriptor {
    pub id: String,
    pub default_message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl MessageDescriptor {
    pub fn new(
        id: impl Into<String>,
        default_message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            default_message: default_message.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalAction {
    #[serde(rename = "hide")]
    Hide,
    #[serde(rename = "disable")]
    Disable,
    #[serde(rename = "hideInPreview")]
    HideInPreview,
}

/// Boolean expression in the renderer's DSL. Never evaluated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression(String);

impl Expression {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    pub action: ConditionalAction,
    pub expression: Expression,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Conditional {
    pub fn hide(expression: impl Into<Expression>) -> Self {
        Self {
            action: ConditionalAction::Hide,
            expression: expression.into(),
            extra: Map::new(),
        }
    }
}

/// Keeps an explicit `null` apart from a missing key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Appends `conditional` unless an entry with the same expression exists.
/// Returns whether the list changed.
pub fn push_conditional(list: &mut Vec<Conditional>, conditional: Conditional) -> bool {
    if list
        .iter()
        .any(|existing| existing.expression == conditional.expression)
    {
        return false;
    }
    list.push(conditional);
    true
}

/// Control kind the renderer draws for a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Number,
    Tel,
    Date,
    RadioGroup,
    SelectWithOptions,
    SelectWithDynamicOptions,
    LocationSearchInput,
    SubsectionHeader,
    /// Kinds only used by hand-authored base forms.
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Tel => "TEL",
            Self::Date => "DATE",
            Self::RadioGroup => "RADIO_GROUP",
            Self::SelectWithOptions => "SELECT_WITH_OPTIONS",
            Self::SelectWithDynamicOptions => "SELECT_WITH_DYNAMIC_OPTIONS",
            Self::LocationSearchInput => "LOCATION_SEARCH_INPUT",
            Self::SubsectionHeader => "SUBSECTION_HEADER",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TEXT" => Self::Text,
            "NUMBER" => Self::Number,
            "TEL" => Self::Tel,
            "DATE" => Self::Date,
            "RADIO_GROUP" => Self::RadioGroup,
            "SELECT_WITH_OPTIONS" => Self::SelectWithOptions,
            "SELECT_WITH_DYNAMIC_OPTIONS" => Self::SelectWithDynamicOptions,
            "LOCATION_SEARCH_INPUT" => Self::LocationSearchInput,
            "SUBSECTION_HEADER" => Self::SubsectionHeader,
            _ => Self::Other(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: MessageDescriptor,
}

/// Options the renderer fetches from an offline resource at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicOptions {
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorDescriptor {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
}

/// Wire form of a named record-transformation operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub field_name: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation: Option<OperationDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<OperationDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGroup {
    pub id: String,
    pub label: MessageDescriptor,
    pub field_to_redirect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

/// One form field. Attributes the engine does not model are kept in `extra`
/// so hand-authored fields survive decoration unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: MessageDescriptor,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<ValidatorDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<Conditional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MappingDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_options: Option<DynamicOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide_in_preview: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType, label: MessageDescriptor) -> Self {
        Self {
            name: name.into(),
            field_type,
            label,
            required: false,
            initial_value: Some(Value::String(String::new())),
            validators: Vec::new(),
            conditionals: Vec::new(),
            mapping: None,
            preview_group: None,
            options: None,
            dynamic_options: None,
            flex_direction: None,
            hide_in_preview: false,
            extra: Map::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_conditionals(mut self, conditionals: Vec<Conditional>) -> Self {
        self.conditionals = conditionals;
        self
    }

    pub fn with_mapping(mut self, mapping: impl Into<MappingDescriptor>) -> Self {
        self.mapping = Some(mapping.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_dynamic_options(mut self, options: DynamicOptions) -> Self {
        self.dynamic_options = Some(options);
        self
    }

    pub fn with_flex_direction(mut self, direction: impl Into<String>) -> Self {
        self.flex_direction = Some(direction.into());
        self
    }

    pub fn hidden_in_preview(mut self) -> Self {
        self.hide_in_preview = true;
        self
    }

    pub fn push_conditional(&mut self, conditional: Conditional) -> bool {
        push_conditional(&mut self.conditionals, conditional)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormGroup {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_groups: Option<Vec<PreviewGroup>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<Conditional>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormGroup {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub id: String,
    #[serde(default)]
    pub groups: Vec<FormGroup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Root of a registration form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub sections: Vec<FormSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegisterForm {
    pub fn section(&self, id: &str) -> Option<&FormSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn group(&self, section: &str, group: &str) -> Option<&FormGroup> {
        self.section(section)?
            .groups
            .iter()
            .find(|candidate| candidate.id == group)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections
            .iter()
            .flat_map(|section| section.groups.iter())
            .flat_map(|group| group.fields.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conditionals_are_deduplicated_by_expression() {
        let mut list = vec![Conditional::hide("!values.detailsExist")];
        assert!(!push_conditional(
            &mut list,
            Conditional::hide("!values.detailsExist")
        ));
        assert!(!push_conditional(
            &mut list,
            Conditional {
                action: ConditionalAction::Disable,
                expression: Expression::from("!values.detailsExist"),
                extra: Map::new(),
            }
        ));
        assert!(push_conditional(
            &mut list,
            Conditional::hide("values.informantType === \"MOTHER\"")
        ));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn unknown_field_attributes_survive_round_trip() {
        let raw = json!({
            "name": "childBirthDate",
            "type": "DATE",
            "label": { "id": "form.field.label.childDateOfBirth", "defaultMessage": "Date of birth" },
            "required": true,
            "validators": [{ "operation": "isValidChildBirthDate" }],
            "mapping": { "template": { "fieldName": "eventDate", "operation": "dateFormatTransformer", "parameters": ["eventDate", "en", "do MMMM yyyy"] } },
            "searchableResource": ["facilities"]
        });

        let field: FieldDescriptor = serde_json::from_value(raw.clone()).expect("field parses");
        assert_eq!(field.field_type, FieldType::Date);
        assert_eq!(field.extra.get("searchableResource"), Some(&json!(["facilities"])));
        assert_eq!(field.initial_value, None);

        let rendered = serde_json::to_value(&field).expect("field serializes");
        assert_eq!(rendered["searchableResource"], raw["searchableResource"]);
        assert_eq!(rendered["mapping"], raw["mapping"]);
        assert!(rendered.get("initialValue").is_none());
        assert!(rendered.get("conditionals").is_none());
    }

    #[test]
    fn base_fields_render_back_unchanged() {
        let raw = json!({
            "name": "motherBirthDate",
            "type": "DATE",
            "label": { "id": "form.field.label.motherDateOfBirth", "defaultMessage": "Date of birth" },
            "required": false,
            "initialValue": null,
            "conditionals": [
                { "action": "hide", "expression": "values.exactDateOfBirthUnknown", "id": "dob-unknown" }
            ]
        });

        let field: FieldDescriptor = serde_json::from_value(raw.clone()).expect("field parses");
        assert_eq!(field.initial_value, Some(Value::Null));
        assert_eq!(field.conditionals[0].extra.get("id"), Some(&json!("dob-unknown")));

        let rendered = serde_json::to_value(&field).expect("field serializes");
        assert_eq!(rendered, raw);
    }

    #[test]
    fn field_type_passes_through_unknown_kinds() {
        let kind: FieldType = serde_json::from_value(json!("DOCUMENT_UPLOADER_WITH_OPTION"))
            .expect("kind parses");
        assert_eq!(kind, FieldType::Other("DOCUMENT_UPLOADER_WITH_OPTION".to_string()));
        assert_eq!(
            serde_json::to_value(FieldType::SelectWithDynamicOptions).expect("serializes"),
            json!("SELECT_WITH_DYNAMIC_OPTIONS")
        );
    }

    #[test]
    fn event_parses_known_names_only() {
        assert_eq!("death".parse::<Event>().expect("death parses"), Event::Death);
        match "divorce".parse::<Event>() {
            Err(FormConfigError::UnsupportedEvent(value)) => assert_eq!(value, "divorce"),
            other => panic!("expected unsupported event, got {other:?}"),
        }
    }
}
