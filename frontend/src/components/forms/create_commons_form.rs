use yew::prelude::*;
use shared::{Commons, CommonsDraft, CommonsField, CommonsFormConfig};
use crate::components::forms::FieldGroup;
use crate::hooks::use_commons_form;

pub const SUBMIT_BUTTON_TEST_ID: &str = "CreateCommonsForm-Create-Button";

/// Caller-supplied submit handler
#[derive(Clone, PartialEq)]
pub struct SubmitAction {
    pub on_submit: Callback<CommonsDraft>,
}

#[derive(Properties, PartialEq)]
pub struct CreateCommonsFormProps {
    /// Record to edit; None for create mode
    #[prop_or_default]
    pub initial_common: Option<Commons>,
    pub submit_action: SubmitAction,
    /// Defaults to the config's label ("Create")
    #[prop_or_default]
    pub button_label: Option<AttrValue>,
    #[prop_or_default]
    pub config: CommonsFormConfig,
}

#[function_component(CreateCommonsForm)]
pub fn create_commons_form(props: &CreateCommonsFormProps) -> Html {
    let form = use_commons_form(
        props.initial_common.clone(),
        props.config.clone(),
        props.submit_action.on_submit.clone(),
    );
    let state = &form.state;

    let onsubmit = {
        let submit = form.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let button_label = props
        .button_label
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| props.config.default_button_label.clone());

    html! {
        <form class="create-commons-form" onsubmit={onsubmit}>
            {if state.input.is_editing() {
                html! {
                    <FieldGroup
                        field={CommonsField::Id}
                        value={state.input.get(CommonsField::Id).to_string()}
                        disabled=true
                        on_change={form.actions.on_change.clone()}
                    />
                }
            } else { html! {} }}

            {for CommonsField::EDITABLE.iter().map(|field| {
                html! {
                    <FieldGroup
                        key={field.dom_id()}
                        field={*field}
                        value={state.input.get(*field).to_string()}
                        error={state.errors.message_for(*field)}
                        on_change={form.actions.on_change.clone()}
                    />
                }
            })}

            <SubmitButton label={button_label} disabled={state.is_submitted()} />
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: String,
    /// Set once the form has been submitted
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button
            type="submit"
            class="btn btn-primary"
            data-testid={SUBMIT_BUTTON_TEST_ID}
            disabled={props.disabled}
        >
            {props.label.clone()}
        </button>
    }
}
