use std::sync::atomic::{AtomicUsize, Ordering};

use yew::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[derive(Properties, PartialEq)]
pub struct DialogProps {
    /// Prefix for the element ids inside the dialog. A unique one is
    /// generated when empty.
    #[prop_or_default]
    pub id: String,
    pub open: bool,
    pub on_close: Callback<()>,
    pub title: String,
    #[prop_or_default]
    pub description: String,
    #[prop_or_default]
    pub close_label: String,
    #[prop_or_default]
    pub children: Children,
}

static NEXT_DIALOG: AtomicUsize = AtomicUsize::new(0);

fn next_dialog_id() -> String {
    format!("dialog-{}", NEXT_DIALOG.fetch_add(1, Ordering::Relaxed))
}

/// Id of the heading that labels the dialog.
pub fn title_id(id: &str, generated: &str) -> String {
    let prefix = if id.is_empty() { generated } else { id };
    format!("{}-title", prefix)
}

pub fn is_dismiss_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Modal dialog. Closes on Escape, on the close button and on a click
/// outside the panel.
#[function_component(Dialog)]
pub fn dialog(props: &DialogProps) -> Html {
    let generated_id = use_state(next_dialog_id);
    {
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |open: &bool| {
                let listener = if *open {
                    web_sys::window()
                        .and_then(|window| window.document())
                        .map(|document| {
                            let callback = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                                if is_dismiss_key(&e.key()) {
                                    on_close.emit(());
                                }
                            }) as Box<dyn FnMut(KeyboardEvent)>);
                            if let Err(e) = document
                                .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
                            {
                                log::warn!("Failed to listen for Escape: {:?}", e);
                            }
                            (document, callback)
                        })
                } else {
                    None
                };

                move || {
                    if let Some((document, callback)) = listener {
                        let _ = document
                            .remove_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
                    }
                }
            },
            props.open,
        );
    }

    if !props.open {
        return html! {};
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let heading_id = title_id(&props.id, &generated_id);
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let close_label = if props.close_label.is_empty() {
        "Close".to_string()
    } else {
        props.close_label.clone()
    };

    html! {
        <div class="dialog-overlay" onclick={close.clone()}>
            <style>
                {r#"
                    .dialog-overlay {
                        position: fixed;
                        inset: 0;
                        z-index: 50;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: rgba(0, 0, 0, 0.7);
                        backdrop-filter: blur(4px);
                    }
                    .dialog-panel {
                        position: relative;
                        width: calc(100vw - 1.5rem);
                        max-width: 520px;
                        max-height: 92vh;
                        overflow-y: auto;
                        padding: 1.5rem;
                        border-radius: 12px;
                        background: rgba(30, 30, 30, 0.95);
                        border: 1px solid rgba(30, 144, 255, 0.3);
                    }
                    .dialog-close {
                        position: absolute;
                        top: 1rem;
                        right: 1rem;
                        background: none;
                        border: none;
                        color: #999;
                        font-size: 1.25rem;
                        cursor: pointer;
                    }
                "#}
            </style>
            <div
                class="dialog-panel"
                role="dialog"
                aria-modal="true"
                aria-labelledby={heading_id.clone()}
                onclick={keep_open}
            >
                <button type="button" class="dialog-close" aria-label={close_label} onclick={close}>
                    {"×"}
                </button>
                <h2 id={heading_id}>{props.title.clone()}</h2>
                {
                    if props.description.is_empty() {
                        html! {}
                    } else {
                        html! { <p class="dialog-description">{props.description.clone()}</p> }
                    }
                }
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_dismisses() {
        assert!(is_dismiss_key("Escape"));
        assert!(is_dismiss_key("Esc"));
        assert!(!is_dismiss_key("Enter"));
    }

    #[test]
    fn dialogs_get_distinct_title_ids() {
        let first = next_dialog_id();
        let second = next_dialog_id();
        assert_ne!(first, second);
        assert_ne!(title_id("", &first), title_id("", &second));
    }

    #[test]
    fn explicit_id_prefixes_the_title() {
        assert_eq!(title_id("book-call", "dialog-7"), "book-call-title");
        assert_eq!(title_id("", "dialog-7"), "dialog-7-title");
    }
}
