use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::CommonsField;

#[derive(Properties, PartialEq)]
pub struct FieldGroupProps {
    pub field: CommonsField,
    pub value: String,
    /// Inline validation message; also marks the control invalid
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<(CommonsField, String)>,
}

/// Label, control and invalid-feedback for one commons form field
#[function_component(FieldGroup)]
pub fn field_group(props: &FieldGroupProps) -> Html {
    let field = props.field;

    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((field, input.value()));
        })
    };

    let control_class = classes!("form-control", props.error.is_some().then_some("is-invalid"));

    html! {
        <div class="mb-3">
            <label class="form-label" for={field.dom_id()}>{field.label()}</label>
            <input
                class={control_class}
                id={field.dom_id()}
                name={field.dom_id()}
                type={field.input_type()}
                step={field.is_amount().then_some("0.01")}
                data-testid={field.test_id()}
                value={props.value.clone()}
                onchange={onchange}
                disabled={props.disabled}
            />
            <div class="invalid-feedback">
                {props.error.clone().unwrap_or_default()}
            </div>
        </div>
    }
}
