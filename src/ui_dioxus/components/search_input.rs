use dioxus::prelude::*;

#[component]
pub fn SearchInput(
    value: String,
    placeholder: &'static str,
    on_search: EventHandler<String>,
) -> Element {
    rsx! {
        input {
            r#type: "text",
            class: "search-input",
            placeholder: "{placeholder}",
            value: "{value}",
            aria_label: "Search table",
            style: "margin-bottom: 10px; padding: 6px; width: 300px;",
            oninput: move |e: FormEvent| on_search.call(e.value()),
        }
    }
}
