use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use chrono::NaiveDate;
use thiserror::Error;

pub mod commons_form;

pub use commons_form::{CommonsFormService, FieldResult};

/// A commons as stored on the server side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commons {
    pub id: String,
    pub name: String,
    pub starting_balance: f64,
    pub cow_price: f64,
    pub milk_price: f64,
    /// ISO 8601 timestamp, e.g. "2022-03-05T00:00:00"
    pub start_date: String,
}

/// Validated commons handed to the submit handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonsDraft {
    /// Only present when editing an existing commons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub starting_balance: f64,
    pub cow_price: f64,
    pub milk_price: f64,
    pub start_date: NaiveDate, // YYYY-MM-DD
}

impl CommonsDraft {
    /// Build the stored record for a draft, assigning `fallback_id` when the draft is new
    pub fn into_commons(self, fallback_id: impl Into<String>) -> Commons {
        Commons {
            id: self.id.unwrap_or_else(|| fallback_id.into()),
            name: self.name,
            starting_balance: self.starting_balance,
            cow_price: self.cow_price,
            milk_price: self.milk_price,
            start_date: format!("{}T00:00:00", self.start_date.format("%Y-%m-%d")),
        }
    }
}

/// Controls on the commons form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommonsField {
    Id,
    Name,
    StartingBalance,
    CowPrice,
    MilkPrice,
    StartDate,
}

impl CommonsField {
    /// Fields the user can edit, in display order
    pub const EDITABLE: [CommonsField; 5] = [
        CommonsField::Name,
        CommonsField::StartingBalance,
        CommonsField::CowPrice,
        CommonsField::MilkPrice,
        CommonsField::StartDate,
    ];

    /// DOM id of the control, also the key used in the draft's JSON form
    pub fn dom_id(&self) -> &'static str {
        match self {
            CommonsField::Id => "id",
            CommonsField::Name => "name",
            CommonsField::StartingBalance => "startingBalance",
            CommonsField::CowPrice => "cowPrice",
            CommonsField::MilkPrice => "milkPrice",
            CommonsField::StartDate => "startDate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommonsField::Id => "Id",
            CommonsField::Name => "Commons Name",
            CommonsField::StartingBalance => "Starting Balance",
            CommonsField::CowPrice => "Cow Price",
            CommonsField::MilkPrice => "Milk Price",
            CommonsField::StartDate => "Start Date",
        }
    }

    /// Stable `data-testid` hook for test automation
    pub fn test_id(&self) -> &'static str {
        match self {
            CommonsField::Id => "CreateCommonsForm-id",
            CommonsField::Name => "CreateCommonsForm-name",
            CommonsField::StartingBalance => "CreateCommonsForm-startbal",
            CommonsField::CowPrice => "CreateCommonsForm-cowprice",
            CommonsField::MilkPrice => "CreateCommonsForm-milkprice",
            CommonsField::StartDate => "CreateCommonsForm-startdate",
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            CommonsField::Id | CommonsField::Name => "text",
            CommonsField::StartingBalance | CommonsField::CowPrice | CommonsField::MilkPrice => "number",
            CommonsField::StartDate => "date",
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(
            self,
            CommonsField::StartingBalance | CommonsField::CowPrice | CommonsField::MilkPrice
        )
    }

    /// Message shown when the field is empty or unparseable
    pub fn required_message(&self) -> &'static str {
        match self {
            CommonsField::Id => "Id is required",
            CommonsField::Name => "Commons name is required",
            CommonsField::StartingBalance => "Starting Balance is required",
            CommonsField::CowPrice => "Cow price is required",
            CommonsField::MilkPrice => "Milk price is required",
            CommonsField::StartDate => "Start date is required",
        }
    }

    /// Message shown when an amount is below the configured minimum
    pub fn not_positive_message(&self) -> &'static str {
        match self {
            CommonsField::StartingBalance => "Starting Balance must be positive",
            CommonsField::CowPrice => "Cow price must be positive",
            CommonsField::MilkPrice => "Milk price must be positive",
            _ => "Value must be positive",
        }
    }
}

impl fmt::Display for CommonsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Validation failures for the commons form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommonsValidationError {
    #[error("{}", .0.required_message())]
    Required(CommonsField),
    #[error("{}", .0.not_positive_message())]
    NotPositive(CommonsField),
}

/// Validation errors grouped by the field they belong to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonsFormErrors {
    by_field: BTreeMap<CommonsField, Vec<CommonsValidationError>>,
}

impl CommonsFormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Replace the errors recorded for `field`; an empty list clears it
    pub fn set(&mut self, field: CommonsField, errors: Vec<CommonsValidationError>) {
        if errors.is_empty() {
            self.by_field.remove(&field);
        } else {
            self.by_field.insert(field, errors);
        }
    }

    pub fn get(&self, field: CommonsField) -> &[CommonsValidationError] {
        self.by_field.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for a field, the one rendered inline
    pub fn message_for(&self, field: CommonsField) -> Option<String> {
        self.get(field).first().map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = CommonsField> + '_ {
        self.by_field.keys().copied()
    }
}

/// Raw control values as the user typed them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonsFormInput {
    pub id: Option<String>,
    pub name: String,
    pub starting_balance: String,
    pub cow_price: String,
    pub milk_price: String,
    pub start_date: String,
}

impl CommonsFormInput {
    pub fn get(&self, field: CommonsField) -> &str {
        match field {
            CommonsField::Id => self.id.as_deref().unwrap_or(""),
            CommonsField::Name => &self.name,
            CommonsField::StartingBalance => &self.starting_balance,
            CommonsField::CowPrice => &self.cow_price,
            CommonsField::MilkPrice => &self.milk_price,
            CommonsField::StartDate => &self.start_date,
        }
    }

    /// Store a control value. Returns false for the read-only id, which is never changed.
    pub fn set(&mut self, field: CommonsField, value: String) -> bool {
        let slot = match field {
            CommonsField::Id => return false,
            CommonsField::Name => &mut self.name,
            CommonsField::StartingBalance => &mut self.starting_balance,
            CommonsField::CowPrice => &mut self.cow_price,
            CommonsField::MilkPrice => &mut self.milk_price,
            CommonsField::StartDate => &mut self.start_date,
        };
        *slot = value;
        true
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }
}

/// Where the start date control takes its initial value from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartDateSource {
    /// Always show the placeholder date, even when editing
    #[default]
    Placeholder,
    /// Show the date portion of the record being edited
    InitialRecord,
}

/// Configuration for the commons form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommonsFormConfig {
    /// Smallest accepted starting balance, cow price and milk price
    pub min_amount: f64,
    /// Start date shown when no record date is used (YYYY-MM-DD)
    pub placeholder_start_date: String,
    pub start_date_source: StartDateSource,
    pub default_button_label: String,
}

impl Default for CommonsFormConfig {
    fn default() -> Self {
        Self {
            min_amount: 0.01,
            placeholder_start_date: "2022-01-01".to_string(),
            start_date_source: StartDateSource::Placeholder,
            default_button_label: "Create".to_string(),
        }
    }
}

/// Lifecycle of a single form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormPhase {
    #[default]
    Editing,
    /// Last submit failed validation
    Blocked,
    /// The draft has been handed to the submit handler
    Submitted,
}

/// State held by one commons form while it is mounted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonsFormState {
    pub input: CommonsFormInput,
    pub errors: CommonsFormErrors,
    pub phase: FormPhase,
}

impl CommonsFormState {
    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }
}

/// First 10 characters of an ISO timestamp, i.e. its date portion
pub fn date_portion(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}
