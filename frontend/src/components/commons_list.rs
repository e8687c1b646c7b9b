use yew::prelude::*;
use shared::Commons;
use crate::services::date_utils::{format_amount, format_date_for_display};

#[derive(Properties, PartialEq)]
pub struct CommonsListProps {
    pub commons: Vec<Commons>,
    /// Id of the commons currently open for editing
    #[prop_or_default]
    pub editing_id: Option<String>,
    pub on_edit: Callback<Commons>,
}

#[function_component(CommonsList)]
pub fn commons_list(props: &CommonsListProps) -> Html {
    html! {
        <section class="commons-section">
            <h2>{"Commons"}</h2>

            {if props.commons.is_empty() {
                html! { <div class="empty">{"No commons yet."}</div> }
            } else {
                html! {
                    <table class="table commons-table">
                        <thead>
                            <tr>
                                <th>{"Id"}</th>
                                <th>{"Name"}</th>
                                <th>{"Starting Balance"}</th>
                                <th>{"Cow Price"}</th>
                                <th>{"Milk Price"}</th>
                                <th>{"Start Date"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.commons.iter().map(|commons| {
                                let row_class = if props.editing_id.as_deref() == Some(commons.id.as_str()) {
                                    "editing"
                                } else {
                                    ""
                                };
                                let on_click = {
                                    let on_edit = props.on_edit.clone();
                                    let commons = commons.clone();
                                    Callback::from(move |_: MouseEvent| on_edit.emit(commons.clone()))
                                };

                                html! {
                                    <tr key={commons.id.clone()} class={row_class}>
                                        <td>{&commons.id}</td>
                                        <td>{&commons.name}</td>
                                        <td>{format_amount(commons.starting_balance)}</td>
                                        <td>{format_amount(commons.cow_price)}</td>
                                        <td>{format_amount(commons.milk_price)}</td>
                                        <td>{format_date_for_display(&commons.start_date)}</td>
                                        <td>
                                            <button
                                                type="button"
                                                class="btn btn-secondary btn-sm"
                                                data-testid={format!("CommonsList-edit-{}", commons.id)}
                                                onclick={on_click}
                                            >
                                                {"Edit"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            }}
        </section>
    }
}
