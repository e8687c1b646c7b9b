use yew::prelude::*;
use shared::{Commons, CommonsDraft, CommonsField, CommonsFormConfig, CommonsFormService, CommonsFormState};

pub struct UseCommonsFormResult {
    pub state: CommonsFormState,
    pub actions: UseCommonsFormActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCommonsFormActions {
    /// Store a control value
    pub on_change: Callback<(CommonsField, String)>,
    /// Validate and, when valid, hand the draft to the submit handler
    pub submit: Callback<()>,
}

/// Hook holding the draft for one mounted commons form.
///
/// The state is built once from `initial` when the form mounts; later prop
/// changes do not reset it. Parents remount the form (e.g. with a new `key`)
/// to load a different record.
#[hook]
pub fn use_commons_form(
    initial: Option<Commons>,
    config: CommonsFormConfig,
    on_submit: Callback<CommonsDraft>,
) -> UseCommonsFormResult {
    let service = CommonsFormService::with_config(config);
    let form_state = {
        let service = service.clone();
        use_state(move || service.create_form_state(initial.as_ref()))
    };

    let on_change = {
        let service = service.clone();
        let form_state = form_state.clone();
        Callback::from(move |(field, value): (CommonsField, String)| {
            form_state.set(service.update_field((*form_state).clone(), field, value));
        })
    };

    let submit = {
        let form_state = form_state.clone();
        Callback::from(move |_| {
            form_state.set(submit_form(&service, (*form_state).clone(), &on_submit));
        })
    };

    UseCommonsFormResult {
        state: (*form_state).clone(),
        actions: UseCommonsFormActions { on_change, submit },
    }
}

/// Run a submit attempt and emit the draft when validation passes
pub(crate) fn submit_form(
    service: &CommonsFormService,
    state: CommonsFormState,
    on_submit: &Callback<CommonsDraft>,
) -> CommonsFormState {
    let (state, draft) = service.submit(state);
    match draft {
        Some(draft) => {
            log::info!("Submitting commons {:?}", draft.name);
            on_submit.emit(draft);
        }
        None if !state.is_submitted() => {
            log::debug!("Commons form has {} invalid field(s)", state.errors.fields().count());
        }
        None => {}
    }
    state
}
