//! Commons form domain logic.
//!
//! Every rule the create/edit commons form enforces lives here as a plain
//! function over the raw control values. The UI only renders the state this
//! service produces and forwards the resulting draft to its submit handler.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    date_portion, Commons, CommonsDraft, CommonsField, CommonsFormConfig, CommonsFormErrors,
    CommonsFormInput, CommonsFormState, CommonsValidationError, FormPhase, StartDateSource,
};

/// Outcome of validating one field
pub type FieldResult<T> = Result<T, Vec<CommonsValidationError>>;

/// Service that owns the commons form rules
#[derive(Debug, Clone, Default)]
pub struct CommonsFormService {
    config: CommonsFormConfig,
}

impl CommonsFormService {
    pub fn new() -> Self {
        Self {
            config: CommonsFormConfig::default(),
        }
    }

    pub fn with_config(config: CommonsFormConfig) -> Self {
        Self { config }
    }

    /// Control values for a freshly mounted form
    pub fn initial_input(&self, initial: Option<&Commons>) -> CommonsFormInput {
        let Some(commons) = initial else {
            return CommonsFormInput {
                start_date: self.config.placeholder_start_date.clone(),
                ..CommonsFormInput::default()
            };
        };

        let start_date = match self.config.start_date_source {
            StartDateSource::Placeholder => self.config.placeholder_start_date.clone(),
            StartDateSource::InitialRecord => date_portion(&commons.start_date),
        };

        CommonsFormInput {
            id: Some(commons.id.clone()),
            name: commons.name.clone(),
            starting_balance: commons.starting_balance.to_string(),
            cow_price: commons.cow_price.to_string(),
            milk_price: commons.milk_price.to_string(),
            start_date,
        }
    }

    pub fn validate_name(&self, input: &str) -> FieldResult<String> {
        if input.is_empty() {
            return Err(vec![CommonsValidationError::Required(CommonsField::Name)]);
        }
        Ok(input.to_string())
    }

    /// Validate one of the three amount fields
    pub fn validate_amount(&self, field: CommonsField, input: &str) -> FieldResult<f64> {
        let amount = match parse_amount(input) {
            Some(amount) => amount,
            None => return Err(vec![CommonsValidationError::Required(field)]),
        };

        if amount < self.config.min_amount {
            return Err(vec![CommonsValidationError::NotPositive(field)]);
        }
        Ok(amount)
    }

    pub fn validate_start_date(&self, input: &str) -> FieldResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|_| vec![CommonsValidationError::Required(CommonsField::StartDate)])
    }

    /// Errors for a single field of `input`; empty when the field is valid
    pub fn validate_field(&self, input: &CommonsFormInput, field: CommonsField) -> Vec<CommonsValidationError> {
        let value = input.get(field);
        let result = match field {
            CommonsField::Id => Ok(()),
            CommonsField::Name => self.validate_name(value).map(|_| ()),
            CommonsField::StartingBalance | CommonsField::CowPrice | CommonsField::MilkPrice => {
                self.validate_amount(field, value).map(|_| ())
            }
            CommonsField::StartDate => self.validate_start_date(value).map(|_| ()),
        };
        result.err().unwrap_or_default()
    }

    /// Validate every editable field and build the draft when all of them pass
    pub fn validate_form(&self, input: &CommonsFormInput) -> Result<CommonsDraft, CommonsFormErrors> {
        let mut errors = CommonsFormErrors::new();

        let name = self.validate_name(&input.name);
        let starting_balance = self.validate_amount(CommonsField::StartingBalance, &input.starting_balance);
        let cow_price = self.validate_amount(CommonsField::CowPrice, &input.cow_price);
        let milk_price = self.validate_amount(CommonsField::MilkPrice, &input.milk_price);
        let start_date = self.validate_start_date(&input.start_date);

        match (name, starting_balance, cow_price, milk_price, start_date) {
            (Ok(name), Ok(starting_balance), Ok(cow_price), Ok(milk_price), Ok(start_date)) => {
                Ok(CommonsDraft {
                    id: input.id.clone(),
                    name,
                    starting_balance,
                    cow_price,
                    milk_price,
                    start_date,
                })
            }
            (name, starting_balance, cow_price, milk_price, start_date) => {
                errors.set(CommonsField::Name, name.err().unwrap_or_default());
                errors.set(CommonsField::StartingBalance, starting_balance.err().unwrap_or_default());
                errors.set(CommonsField::CowPrice, cow_price.err().unwrap_or_default());
                errors.set(CommonsField::MilkPrice, milk_price.err().unwrap_or_default());
                errors.set(CommonsField::StartDate, start_date.err().unwrap_or_default());
                Err(errors)
            }
        }
    }

    /// Create the state for a newly mounted form
    pub fn create_form_state(&self, initial: Option<&Commons>) -> CommonsFormState {
        CommonsFormState {
            input: self.initial_input(initial),
            errors: CommonsFormErrors::new(),
            phase: FormPhase::Editing,
        }
    }

    /// Apply a control change. Once a submit has been blocked, the changed field is re-validated.
    pub fn update_field(&self, mut state: CommonsFormState, field: CommonsField, value: String) -> CommonsFormState {
        if !state.input.set(field, value) {
            warn!("Ignoring change to read-only field {}", field);
            return state;
        }

        if state.phase == FormPhase::Blocked {
            let errors = self.validate_field(&state.input, field);
            state.errors.set(field, errors);
        }
        state
    }

    /// Attempt a submit. Returns the draft to hand to the submit handler, if any.
    pub fn submit(&self, mut state: CommonsFormState) -> (CommonsFormState, Option<CommonsDraft>) {
        if state.phase == FormPhase::Submitted {
            debug!("Commons form already submitted, ignoring submit");
            return (state, None);
        }

        match self.validate_form(&state.input) {
            Ok(draft) => {
                debug!("Commons form valid, submitting {:?}", draft.name);
                state.errors = CommonsFormErrors::new();
                state.phase = FormPhase::Submitted;
                (state, Some(draft))
            }
            Err(errors) => {
                debug!(
                    "Commons form blocked: {:?}",
                    errors.fields().collect::<Vec<_>>()
                );
                state.errors = errors;
                state.phase = FormPhase::Blocked;
                (state, None)
            }
        }
    }
}

/// Parse a number control value; empty, malformed and non-finite input count as missing
fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CommonsFormInput {
        CommonsFormInput {
            id: None,
            name: "Test Commons".to_string(),
            starting_balance: "100.00".to_string(),
            cow_price: "50.00".to_string(),
            milk_price: "2.50".to_string(),
            start_date: "2023-05-01".to_string(),
        }
    }

    fn existing_commons() -> Commons {
        Commons {
            id: "42".to_string(),
            name: "Existing".to_string(),
            starting_balance: 200.0,
            cow_price: 10.0,
            milk_price: 1.25,
            start_date: "2022-03-05T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_draft() {
        let service = CommonsFormService::new();
        let draft = service.validate_form(&valid_input()).unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.name, "Test Commons");
        assert_eq!(draft.starting_balance, 100.0);
        assert_eq!(draft.cow_price, 50.0);
        assert_eq!(draft.milk_price, 2.5);
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }

    #[test]
    fn test_empty_name_is_required() {
        let service = CommonsFormService::new();
        let input = CommonsFormInput { name: String::new(), ..valid_input() };

        let errors = service.validate_form(&input).unwrap_err();
        assert_eq!(errors.message_for(CommonsField::Name).as_deref(), Some("Commons name is required"));
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_amounts_must_be_positive() {
        let service = CommonsFormService::new();

        for field in [CommonsField::StartingBalance, CommonsField::CowPrice, CommonsField::MilkPrice] {
            for value in ["0", "-5", "0.00", "0.001"] {
                let result = service.validate_amount(field, value);
                assert_eq!(result, Err(vec![CommonsValidationError::NotPositive(field)]), "{} = {}", field, value);
            }
            assert_eq!(service.validate_amount(field, "0.01"), Ok(0.01));
        }
    }

    #[test]
    fn test_missing_or_non_numeric_amounts_are_required() {
        let service = CommonsFormService::new();

        for field in [CommonsField::StartingBalance, CommonsField::CowPrice, CommonsField::MilkPrice] {
            for value in ["", "   ", "abc", "NaN", "inf", "12abc"] {
                let result = service.validate_amount(field, value);
                assert_eq!(result, Err(vec![CommonsValidationError::Required(field)]), "{} = {:?}", field, value);
            }
        }
    }

    #[test]
    fn test_amount_messages_in_form() {
        let service = CommonsFormService::new();
        let input = CommonsFormInput {
            starting_balance: String::new(),
            cow_price: "-1".to_string(),
            milk_price: "x".to_string(),
            ..valid_input()
        };

        let errors = service.validate_form(&input).unwrap_err();
        assert_eq!(errors.message_for(CommonsField::StartingBalance).as_deref(), Some("Starting Balance is required"));
        assert_eq!(errors.message_for(CommonsField::CowPrice).as_deref(), Some("Cow price must be positive"));
        assert_eq!(errors.message_for(CommonsField::MilkPrice).as_deref(), Some("Milk price is required"));
        assert!(errors.get(CommonsField::Name).is_empty());
        assert!(errors.get(CommonsField::StartDate).is_empty());
    }

    #[test]
    fn test_invalid_start_date_is_required() {
        let service = CommonsFormService::new();

        for value in ["", "2023-13-01", "2023-02-30", "not a date", "05/01/2023"] {
            let input = CommonsFormInput { start_date: value.to_string(), ..valid_input() };
            let errors = service.validate_form(&input).unwrap_err();
            assert_eq!(
                errors.message_for(CommonsField::StartDate).as_deref(),
                Some("Start date is required"),
                "start date {:?}",
                value
            );
        }
    }

    #[test]
    fn test_initial_input_without_record_uses_placeholder() {
        let service = CommonsFormService::new();
        let input = service.initial_input(None);

        assert_eq!(input.id, None);
        assert_eq!(input.name, "");
        assert_eq!(input.starting_balance, "");
        assert_eq!(input.start_date, "2022-01-01");
    }

    #[test]
    fn test_initial_input_from_record_keeps_placeholder_date_by_default() {
        let service = CommonsFormService::new();
        let input = service.initial_input(Some(&existing_commons()));

        assert_eq!(input.id.as_deref(), Some("42"));
        assert_eq!(input.name, "Existing");
        assert_eq!(input.starting_balance, "200");
        assert_eq!(input.milk_price, "1.25");
        assert_eq!(input.start_date, "2022-01-01");
    }

    #[test]
    fn test_initial_input_from_record_date_truncated() {
        let service = CommonsFormService::with_config(CommonsFormConfig {
            start_date_source: StartDateSource::InitialRecord,
            ..CommonsFormConfig::default()
        });
        let input = service.initial_input(Some(&existing_commons()));

        assert_eq!(input.start_date, "2022-03-05");
    }

    #[test]
    fn test_submit_valid_form_once() {
        let service = CommonsFormService::new();
        let state = service.create_form_state(None);
        let state = CommonsField::EDITABLE
            .iter()
            .fold(state, |state, field| {
                let value = valid_input().get(*field).to_string();
                service.update_field(state, *field, value)
            });

        let (state, draft) = service.submit(state);
        assert!(draft.is_some());
        assert_eq!(state.phase, FormPhase::Submitted);

        let (state, again) = service.submit(state);
        assert!(again.is_none());
        assert!(state.is_submitted());
    }

    #[test]
    fn test_submit_blocked_then_revalidates_on_change() {
        let service = CommonsFormService::new();
        let state = service.create_form_state(None);

        let (state, draft) = service.submit(state);
        assert!(draft.is_none());
        assert_eq!(state.phase, FormPhase::Blocked);
        assert!(!state.errors.get(CommonsField::Name).is_empty());
        assert!(!state.errors.get(CommonsField::CowPrice).is_empty());
        // placeholder date is valid
        assert!(state.errors.get(CommonsField::StartDate).is_empty());

        let state = service.update_field(state, CommonsField::Name, "Fixed".to_string());
        assert!(state.errors.get(CommonsField::Name).is_empty());
        assert!(!state.errors.get(CommonsField::CowPrice).is_empty());

        let state = service.update_field(state, CommonsField::CowPrice, "0".to_string());
        assert_eq!(
            state.errors.message_for(CommonsField::CowPrice).as_deref(),
            Some("Cow price must be positive")
        );
        // other fields keep their values
        assert_eq!(state.input.name, "Fixed");
    }

    #[test]
    fn test_no_revalidation_before_first_submit() {
        let service = CommonsFormService::new();
        let state = service.create_form_state(None);
        let state = service.update_field(state, CommonsField::CowPrice, "-3".to_string());

        assert!(state.errors.is_empty());
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_editing_keeps_id_unchanged() {
        let service = CommonsFormService::new();
        let state = service.create_form_state(Some(&existing_commons()));
        let state = service.update_field(state, CommonsField::Id, "99".to_string());
        let state = service.update_field(state, CommonsField::Name, "Renamed".to_string());

        let (_, draft) = service.submit(state);
        let draft = draft.unwrap();
        assert_eq!(draft.id.as_deref(), Some("42"));
        assert_eq!(draft.name, "Renamed");
        assert_eq!(draft.starting_balance, 200.0);
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
    }

    #[test]
    fn test_custom_min_amount() {
        let service = CommonsFormService::with_config(CommonsFormConfig {
            min_amount: 1.0,
            ..CommonsFormConfig::default()
        });
        assert!(service.validate_amount(CommonsField::CowPrice, "0.5").is_err());
        assert_eq!(service.validate_amount(CommonsField::CowPrice, "1"), Ok(1.0));
    }
}
