mod components;
mod hooks;
mod services;

use yew::prelude::*;
use log::LevelFilter;
use shared::{Commons, CommonsDraft};
use components::CommonsList;
use components::forms::{CreateCommonsForm, SubmitAction};
use services::logging::Logger;

/// Page that mounts the commons form in create and edit mode and keeps submitted records in memory
#[function_component(App)]
fn app() -> Html {
    let commons = use_state(Vec::<Commons>::new);
    let editing = use_state(|| Option::<Commons>::None);
    // Also keys the create form, so every successful create mounts a fresh one
    let next_id = use_state(|| 1u64);

    let create_action = {
        let commons = commons.clone();
        let next_id = next_id.clone();
        SubmitAction {
            on_submit: Callback::from(move |draft: CommonsDraft| {
                log_draft("Create", &draft);
                let record = draft.into_commons((*next_id).to_string());
                Logger::info_with_component("App", &format!("Created commons {} ({})", record.name, record.id));

                let mut updated = (*commons).clone();
                updated.push(record);
                commons.set(updated);
                next_id.set(*next_id + 1);
            }),
        }
    };

    let edit_action = {
        let commons = commons.clone();
        let editing = editing.clone();
        SubmitAction {
            on_submit: Callback::from(move |draft: CommonsDraft| {
                log_draft("Update", &draft);
                let Some(id) = draft.id.clone() else {
                    Logger::warn_with_component("App", "Edited commons has no id, ignoring");
                    return;
                };

                let record = draft.into_commons(id.as_str());
                let updated = (*commons)
                    .iter()
                    .map(|existing| if existing.id == id { record.clone() } else { existing.clone() })
                    .collect::<Vec<_>>();
                Logger::info_with_component("App", &format!("Updated commons {}", id));
                commons.set(updated);
                editing.set(None);
            }),
        }
    };

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |record: Commons| editing.set(Some(record)))
    };

    html! {
        <main class="container">
            <h1>{"Commons"}</h1>

            <section class="create-commons">
                <h2>{"Create Commons"}</h2>
                <CreateCommonsForm
                    key={format!("create-{}", *next_id)}
                    submit_action={create_action}
                />
            </section>

            {if let Some(record) = (*editing).clone() {
                let edit_key = format!("edit-{}", record.id);
                html! {
                    <section class="edit-commons">
                        <h2>{format!("Edit Commons {}", record.id)}</h2>
                        <CreateCommonsForm
                            key={edit_key}
                            initial_common={record}
                            submit_action={edit_action}
                            button_label="Update"
                        />
                    </section>
                }
            } else { html! {} }}

            <CommonsList
                commons={(*commons).clone()}
                editing_id={(*editing).as_ref().map(|record| record.id.clone())}
                on_edit={on_edit}
            />
        </main>
    }
}

fn log_draft(action: &str, draft: &CommonsDraft) {
    match serde_json::to_string(draft) {
        Ok(json) => Logger::debug_with_component("App", &format!("{} payload: {}", action, json)),
        Err(e) => Logger::error_with_component("App", &format!("Failed to serialize draft: {}", e)),
    }
}

fn main() {
    Logger::init(LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
