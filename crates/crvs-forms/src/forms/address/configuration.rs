//! Where generated address fields go and which field sets each point gets.

use super::use_case::{AddressUseCase, PersonAddressType};
use crate::forms::domain::{Event, Expression, MessageDescriptor};
use crate::forms::error::FormConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PRIMARY_ADDRESS_SUBSECTION: &str = "primaryAddressSubsection";
pub const SECONDARY_ADDRESS_SUBSECTION: &str = "secondaryAddressSubsection";
pub const PRIMARY_ADDRESS_SAME_AS_OTHER_PRIMARY: &str = "primaryAddressSameAsOtherPrimary";

/// What one entry of an insertion point generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldSetKind {
    Address(AddressUseCase),
    Subsection(PersonAddressType),
    SameAsOtherPrimary,
}

impl FieldSetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Address(use_case) => use_case.as_str(),
            Self::Subsection(PersonAddressType::PrimaryAddress) => PRIMARY_ADDRESS_SUBSECTION,
            Self::Subsection(PersonAddressType::SecondaryAddress) => SECONDARY_ADDRESS_SUBSECTION,
            Self::SameAsOtherPrimary => PRIMARY_ADDRESS_SAME_AS_OTHER_PRIMARY,
        }
    }
}

impl fmt::Display for FieldSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldSetKind {
    type Err = FormConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            PRIMARY_ADDRESS_SUBSECTION => Ok(Self::Subsection(PersonAddressType::PrimaryAddress)),
            SECONDARY_ADDRESS_SUBSECTION => {
                Ok(Self::Subsection(PersonAddressType::SecondaryAddress))
            }
            PRIMARY_ADDRESS_SAME_AS_OTHER_PRIMARY => Ok(Self::SameAsOtherPrimary),
            other => other
                .parse::<AddressUseCase>()
                .map(Self::Address)
                .map_err(|_| FormConfigError::UnsupportedFieldSet(other.to_string())),
        }
    }
}

impl TryFrom<String> for FieldSetKind {
    type Error = FormConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldSetKind> for String {
    fn from(value: FieldSetKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSetSpec {
    pub config: FieldSetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<MessageDescriptor>,
    /// Section whose address is being filled by the copy toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_comparison_section: Option<String>,
    /// Section the address is copied from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_comparison_section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_case: Option<Expression>,
}

impl FieldSetSpec {
    pub fn new(config: FieldSetKind) -> Self {
        Self {
            config,
            label: None,
            x_comparison_section: None,
            y_comparison_section: None,
            conditional_case: None,
        }
    }

    pub fn address(use_case: AddressUseCase) -> Self {
        Self::new(FieldSetKind::Address(use_case))
    }

    pub fn with_label(mut self, label: MessageDescriptor) -> Self {
        self.label = Some(label);
        self
    }

    pub fn comparing(mut self, x_section: impl Into<String>, y_section: impl Into<String>) -> Self {
        self.x_comparison_section = Some(x_section.into());
        self.y_comparison_section = Some(y_section.into());
        self
    }

    pub fn with_conditional_case(mut self, expression: impl Into<Expression>) -> Self {
        self.conditional_case = Some(expression.into());
        self
    }
}

/// Field sets inserted right after `preceding_field_id`, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionSpec {
    pub preceding_field_id: String,
    pub configurations: Vec<FieldSetSpec>,
}

impl InsertionSpec {
    pub fn new(preceding_field_id: impl Into<String>, configurations: Vec<FieldSetSpec>) -> Self {
        Self {
            preceding_field_id: preceding_field_id.into(),
            configurations,
        }
    }

    pub fn path(&self) -> Result<FieldPath, FormConfigError> {
        self.preceding_field_id.parse()
    }
}

/// `event.section.group.field` split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub event: Event,
    pub section: String,
    pub group: String,
    pub field: String,
}

impl FromStr for FieldPath {
    type Err = FormConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || FormConfigError::MalformedFieldId(value.to_string());
        let segments: Vec<&str> = value.split('.').collect();
        let [event, section, group, field] = segments.as_slice() else {
            return Err(malformed());
        };
        if [section, group, field].iter().any(|segment| segment.is_empty()) {
            return Err(malformed());
        }

        Ok(Self {
            event: event.parse()?,
            section: (*section).to_string(),
            group: (*group).to_string(),
            field: (*field).to_string(),
        })
    }
}

/// Reads an address configuration document (a JSON array of insertion specs).
pub fn parse_address_configuration(source: &str) -> Result<Vec<InsertionSpec>, serde_json::Error> {
    serde_json::from_str(source)
}

/// Hide expressions referenced by the built-in configuration.
pub mod expressions {
    pub const DETAILS_DONT_EXIST: &str = "!values.detailsExist";
    pub const INFORMANT_IS_MOTHER_OR_FATHER: &str = "(draftData?.registration?.informantType === \"MOTHER\" || draftData?.registration?.informantType === \"FATHER\")";
    pub const FATHER_ADDRESS_HIDDEN: &str =
        "(!values.detailsExist || values.primaryAddressSameAsOtherPrimary)";
}

fn message(id: &str, default_message: &str, description: &str) -> MessageDescriptor {
    MessageDescriptor::new(id, default_message, description)
}

fn usual_place_of_residence() -> MessageDescriptor {
    message(
        "form.field.label.primaryAddress",
        "Usual place of residence",
        "Title of the primary address subsection",
    )
}

fn residence_of(conditional_case: Option<&str>) -> Vec<FieldSetSpec> {
    let mut header = FieldSetSpec::new(FieldSetKind::Subsection(PersonAddressType::PrimaryAddress))
        .with_label(usual_place_of_residence());
    let mut address = FieldSetSpec::address(AddressUseCase::Primary);
    if let Some(expression) = conditional_case {
        header = header.with_conditional_case(expression);
        address = address.with_conditional_case(expression);
    }
    vec![header, address]
}

/// Insertion points used when no configuration file is supplied.
pub fn default_address_configuration() -> Vec<InsertionSpec> {
    vec![
        InsertionSpec::new(
            "birth.child.child-view-group.birthLocation",
            vec![FieldSetSpec::address(AddressUseCase::PlaceOfBirth)],
        ),
        InsertionSpec::new(
            "birth.informant.informant-view-group.informantID",
            residence_of(Some(expressions::INFORMANT_IS_MOTHER_OR_FATHER)),
        ),
        InsertionSpec::new(
            "birth.mother.mother-view-group.maritalStatus",
            residence_of(Some(expressions::DETAILS_DONT_EXIST)),
        ),
        InsertionSpec::new(
            "birth.father.father-view-group.maritalStatus",
            vec![
                FieldSetSpec::new(FieldSetKind::Subsection(PersonAddressType::PrimaryAddress))
                    .with_label(usual_place_of_residence())
                    .with_conditional_case(expressions::DETAILS_DONT_EXIST),
                FieldSetSpec::new(FieldSetKind::SameAsOtherPrimary)
                    .with_label(message(
                        "form.field.label.primaryAddressSameAsOtherPrimary",
                        "Same as mother's usual place of residence?",
                        "Title for the father address same as mother toggle",
                    ))
                    .comparing("father", "mother")
                    .with_conditional_case(expressions::DETAILS_DONT_EXIST),
                FieldSetSpec::address(AddressUseCase::Primary)
                    .with_conditional_case(expressions::FATHER_ADDRESS_HIDDEN),
            ],
        ),
        InsertionSpec::new(
            "death.deathEvent.death-event-details.deathLocation",
            vec![FieldSetSpec::address(AddressUseCase::PlaceOfDeath)],
        ),
        InsertionSpec::new(
            "death.deceased.deceased-view-group.maritalStatus",
            residence_of(None),
        ),
        InsertionSpec::new(
            "death.informant.informant-view-group.informantID",
            residence_of(None),
        ),
        InsertionSpec::new(
            "marriage.marriageEvent.marriage-event-details.typeOfMarriage",
            vec![FieldSetSpec::address(AddressUseCase::PlaceOfMarriage)],
        ),
        InsertionSpec::new(
            "marriage.groom.groom-view-group.groomID",
            residence_of(None),
        ),
        InsertionSpec::new(
            "marriage.bride.bride-view-group.brideID",
            residence_of(None),
        ),
    ]
}
