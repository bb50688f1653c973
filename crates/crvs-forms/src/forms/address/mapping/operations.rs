//! Record-transformation operations referenced by generated fields.
//!
//! The record layer resolves operations by name; here each operation is a
//! type, so a mutation can only be constructed together with the query that
//! reads its value back.

use crate::forms::address::use_case::PersonAddressType;
use crate::forms::domain::{
    Event, MappingDescriptor, OperationDescriptor, TemplateDescriptor,
};
use serde_json::{json, Map, Value};

pub trait Operation {
    fn name(&self) -> &'static str;

    fn parameters(&self) -> Vec<Value>;

    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            operation: self.name().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// A writer paired with the reader performing its structural inverse.
pub trait Invertible: Operation {
    type Inverse: Operation;

    fn inverse(&self) -> Self::Inverse;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FhirAddressProperty {
    Country,
    State,
    District,
    City,
    PostalCode,
}

impl FhirAddressProperty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::District => "district",
            Self::City => "city",
            Self::PostalCode => "postalCode",
        }
    }
}

/// Field names a reader skips when the stored address belongs to the other
/// branch. Local and international fields share FHIR properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchIgnoreLists {
    pub for_local_address: Vec<String>,
    pub for_international_address: Vec<String>,
}

impl BranchIgnoreLists {
    fn to_value(&self) -> Value {
        json!({
            "fieldsToIgnoreForLocalAddress": self.for_local_address,
            "fieldsToIgnoreForInternationalAddress": self.for_international_address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToAddressFhirProperty {
    pub address_type: PersonAddressType,
    pub property: FhirAddressProperty,
    pub ignore: Option<BranchIgnoreLists>,
}

impl FieldToAddressFhirProperty {
    pub const NAME: &'static str = "fieldToAddressFhirPropertyTransformer";
}

impl Operation for FieldToAddressFhirProperty {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        vec![
            json!(self.address_type.as_str()),
            json!(self.property.as_str()),
        ]
    }
}

impl Invertible for FieldToAddressFhirProperty {
    type Inverse = AddressFhirPropertyToField;

    fn inverse(&self) -> Self::Inverse {
        AddressFhirPropertyToField {
            address_type: self.address_type,
            property: self.property,
            ignore: self.ignore.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFhirPropertyToField {
    pub address_type: PersonAddressType,
    pub property: FhirAddressProperty,
    pub ignore: Option<BranchIgnoreLists>,
}

impl AddressFhirPropertyToField {
    pub const NAME: &'static str = "addressFhirPropertyToFieldTransformer";
}

impl Operation for AddressFhirPropertyToField {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        let mut parameters = vec![
            json!(self.address_type.as_str()),
            json!(self.property.as_str()),
        ];
        if let Some(ignore) = &self.ignore {
            parameters.push(ignore.to_value());
        }
        parameters
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToAddressLine {
    pub address_type: PersonAddressType,
    pub line: u8,
    pub transformed_field_name: String,
}

impl FieldToAddressLine {
    pub const NAME: &'static str = "fieldToAddressLineTransformer";
}

impl Operation for FieldToAddressLine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        vec![
            json!(self.address_type.as_str()),
            json!(self.line),
            json!(self.transformed_field_name),
        ]
    }
}

impl Invertible for FieldToAddressLine {
    type Inverse = AddressLineToField;

    fn inverse(&self) -> Self::Inverse {
        AddressLineToField {
            address_type: self.address_type,
            line: self.line,
            transformed_field_name: self.transformed_field_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLineToField {
    pub address_type: PersonAddressType,
    pub line: u8,
    pub transformed_field_name: String,
}

impl AddressLineToField {
    pub const NAME: &'static str = "addressLineToFieldTransformer";
}

impl Operation for AddressLineToField {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        vec![
            json!(self.address_type.as_str()),
            json!(self.line),
            json!(self.transformed_field_name),
        ]
    }
}

/// Slot of an event location address a field is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocationField {
    pub transformed_field_name: String,
    pub line_number: Option<u8>,
    pub ignore: Option<BranchIgnoreLists>,
}

impl EventLocationField {
    fn to_value(&self) -> Value {
        let mut slot = Map::new();
        slot.insert(
            "transformedFieldName".to_string(),
            json!(self.transformed_field_name),
        );
        if let Some(line) = self.line_number {
            slot.insert("lineNumber".to_string(), json!(line));
        }
        Value::Object(slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocationMutation {
    pub event: Event,
    pub field: EventLocationField,
}

impl EventLocationMutation {
    pub const BIRTH: &'static str = "birthEventLocationMutationTransformer";
    pub const DEATH: &'static str = "deathEventLocationMutationTransformer";
    pub const MARRIAGE: &'static str = "marriageEventLocationMutationTransformer";
}

impl Operation for EventLocationMutation {
    fn name(&self) -> &'static str {
        match self.event {
            Event::Birth => Self::BIRTH,
            Event::Death => Self::DEATH,
            Event::Marriage => Self::MARRIAGE,
        }
    }

    fn parameters(&self) -> Vec<Value> {
        vec![self.field.to_value()]
    }
}

impl Invertible for EventLocationMutation {
    type Inverse = EventLocationQuery;

    fn inverse(&self) -> Self::Inverse {
        EventLocationQuery {
            field: self.field.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocationQuery {
    pub field: EventLocationField,
}

impl EventLocationQuery {
    pub const NAME: &'static str = "eventLocationQueryTransformer";
}

impl Operation for EventLocationQuery {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        let mut parameters = vec![self.field.to_value()];
        if let Some(ignore) = &self.field.ignore {
            parameters.push(ignore.to_value());
        }
        parameters
    }
}

/// One side of an address copy: whose address, and which of their addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressReference {
    pub address_type: PersonAddressType,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAddress {
    pub from: AddressReference,
    pub to: AddressReference,
}

impl CopyAddress {
    pub const NAME: &'static str = "copyAddressTransformer";

    fn copy_parameters(&self) -> Vec<Value> {
        vec![
            json!(self.from.address_type.as_str()),
            json!(self.from.section),
            json!(self.to.address_type.as_str()),
            json!(self.to.section),
        ]
    }
}

impl Operation for CopyAddress {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        self.copy_parameters()
    }
}

impl Invertible for CopyAddress {
    type Inverse = SameAddressField;

    fn inverse(&self) -> Self::Inverse {
        SameAddressField { copy: self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SameAddressField {
    pub copy: CopyAddress,
}

impl SameAddressField {
    pub const NAME: &'static str = "sameAddressFieldTransformer";
}

impl Operation for SameAddressField {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Vec<Value> {
        self.copy.copy_parameters()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOperation {
    FieldToAddressFhirProperty(FieldToAddressFhirProperty),
    FieldToAddressLine(FieldToAddressLine),
    EventLocation(EventLocationMutation),
    CopyAddress(CopyAddress),
}

impl MutationOperation {
    pub fn inverse(&self) -> QueryOperation {
        match self {
            Self::FieldToAddressFhirProperty(op) => {
                QueryOperation::AddressFhirPropertyToField(op.inverse())
            }
            Self::FieldToAddressLine(op) => QueryOperation::AddressLineToField(op.inverse()),
            Self::EventLocation(op) => QueryOperation::EventLocation(op.inverse()),
            Self::CopyAddress(op) => QueryOperation::SameAddressField(op.inverse()),
        }
    }
}

impl Operation for MutationOperation {
    fn name(&self) -> &'static str {
        match self {
            Self::FieldToAddressFhirProperty(op) => op.name(),
            Self::FieldToAddressLine(op) => op.name(),
            Self::EventLocation(op) => op.name(),
            Self::CopyAddress(op) => op.name(),
        }
    }

    fn parameters(&self) -> Vec<Value> {
        match self {
            Self::FieldToAddressFhirProperty(op) => op.parameters(),
            Self::FieldToAddressLine(op) => op.parameters(),
            Self::EventLocation(op) => op.parameters(),
            Self::CopyAddress(op) => op.parameters(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOperation {
    AddressFhirPropertyToField(AddressFhirPropertyToField),
    AddressLineToField(AddressLineToField),
    EventLocation(EventLocationQuery),
    SameAddressField(SameAddressField),
}

impl Operation for QueryOperation {
    fn name(&self) -> &'static str {
        match self {
            Self::AddressFhirPropertyToField(op) => op.name(),
            Self::AddressLineToField(op) => op.name(),
            Self::EventLocation(op) => op.name(),
            Self::SameAddressField(op) => op.name(),
        }
    }

    fn parameters(&self) -> Vec<Value> {
        match self {
            Self::AddressFhirPropertyToField(op) => op.parameters(),
            Self::AddressLineToField(op) => op.parameters(),
            Self::EventLocation(op) => op.parameters(),
            Self::SameAddressField(op) => op.parameters(),
        }
    }
}

/// Certificate bindings. The certificate shows names rather than location
/// ids, so templates read through their own transformers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOperation {
    AddressFhirProperty {
        address_type: PersonAddressType,
        property: FhirAddressProperty,
    },
    AddressLine {
        address_type: PersonAddressType,
        line: u8,
        transformed_field_name: String,
    },
    EventLocationFhirProperty {
        property: FhirAddressProperty,
    },
    EventLocationLine {
        line: u8,
        transformed_field_name: String,
    },
}

impl Operation for TemplateOperation {
    fn name(&self) -> &'static str {
        match self {
            Self::AddressFhirProperty { .. } => "addressFHIRPropertyTemplateTransformer",
            Self::AddressLine { .. } => "addressLineTemplateTransformer",
            Self::EventLocationFhirProperty { .. } => {
                "eventLocationAddressFHIRPropertyTemplateTransformer"
            }
            Self::EventLocationLine { .. } => "eventLocationAddressLineTemplateTransformer",
        }
    }

    fn parameters(&self) -> Vec<Value> {
        match self {
            Self::AddressFhirProperty {
                address_type,
                property,
            } => vec![json!(address_type.as_str()), json!(property.as_str())],
            Self::AddressLine {
                address_type,
                line,
                transformed_field_name,
            } => vec![
                json!(address_type.as_str()),
                json!(line),
                json!(transformed_field_name),
            ],
            Self::EventLocationFhirProperty { property } => vec![json!(property.as_str())],
            Self::EventLocationLine {
                line,
                transformed_field_name,
            } => vec![json!(line), json!(transformed_field_name)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMapping {
    pub field_name: String,
    pub operation: TemplateOperation,
}

/// Typed mapping of one generated field. The query is always derived from
/// the mutation, never chosen separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMapping {
    mutation: MutationOperation,
    query: QueryOperation,
    template: Option<TemplateMapping>,
}

impl AddressMapping {
    pub fn new(mutation: MutationOperation, template: Option<TemplateMapping>) -> Self {
        let query = mutation.inverse();
        Self {
            mutation,
            query,
            template,
        }
    }

    pub fn mutation(&self) -> &MutationOperation {
        &self.mutation
    }

    pub fn query(&self) -> &QueryOperation {
        &self.query
    }

    pub fn template(&self) -> Option<&TemplateMapping> {
        self.template.as_ref()
    }
}

impl From<AddressMapping> for MappingDescriptor {
    fn from(mapping: AddressMapping) -> Self {
        MappingDescriptor {
            mutation: Some(mapping.mutation.descriptor()),
            query: Some(mapping.query.descriptor()),
            template: mapping.template.map(|template| TemplateDescriptor {
                field_name: template.field_name,
                operation: template.operation.name().to_string(),
                parameters: template.operation.parameters(),
            }),
        }
    }
}

/// Every address mutation and the query that reads its value back.
pub const OPERATION_PAIRS: [(&str, &str); 6] = [
    (
        FieldToAddressFhirProperty::NAME,
        AddressFhirPropertyToField::NAME,
    ),
    (FieldToAddressLine::NAME, AddressLineToField::NAME),
    (EventLocationMutation::BIRTH, EventLocationQuery::NAME),
    (EventLocationMutation::DEATH, EventLocationQuery::NAME),
    (EventLocationMutation::MARRIAGE, EventLocationQuery::NAME),
    (CopyAddress::NAME, SameAddressField::NAME),
];

pub fn paired_query(mutation: &str) -> Option<&'static str> {
    OPERATION_PAIRS
        .iter()
        .find(|(writer, _)| *writer == mutation)
        .map(|(_, reader)| *reader)
}

pub fn paired_mutations(query: &str) -> Vec<&'static str> {
    OPERATION_PAIRS
        .iter()
        .filter(|(_, reader)| *reader == query)
        .map(|(writer, _)| *writer)
        .collect()
}
