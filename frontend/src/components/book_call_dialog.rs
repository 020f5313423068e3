use yew::prelude::*;
use gloo_timers::callback::Timeout;

use crate::components::contact_form::ContactForm;
use crate::components::dialog::Dialog;
use crate::i18n::{ContactFormCopy, DialogCopy};

const CLOSE_AFTER_SUCCESS_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct BookCallDialogProps {
    pub trigger_label: String,
    pub copy: DialogCopy,
    pub form_copy: ContactFormCopy,
    #[prop_or_else(|| "hero-cta".to_string())]
    pub trigger_class: String,
}

#[function_component(BookCallDialog)]
pub fn book_call_dialog(props: &BookCallDialogProps) -> Html {
    let open = use_state(|| false);
    // Dropped with the component, which clears a pending close.
    let close_timer = use_mut_ref(|| None::<Timeout>);

    let open_dialog = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(true))
    };
    let close_dialog = {
        let open = open.clone();
        let close_timer = close_timer.clone();
        Callback::from(move |_: ()| {
            close_timer.borrow_mut().take();
            open.set(false);
        })
    };
    let on_success = {
        let open = open.setter();
        let close_timer = close_timer.clone();
        Callback::from(move |_: ()| {
            let open = open.clone();
            *close_timer.borrow_mut() = Some(Timeout::new(CLOSE_AFTER_SUCCESS_MS, move || open.set(false)));
        })
    };

    html! {
        <>
            <button type="button" class={props.trigger_class.clone()} onclick={open_dialog}>
                {props.trigger_label.clone()}
            </button>
            <Dialog
                open={*open}
                on_close={close_dialog}
                title={props.copy.title.clone()}
                description={props.copy.description.clone()}
                close_label={props.copy.close_label.clone()}
            >
                <ContactForm copy={props.form_copy.clone()} {on_success} />
            </Dialog>
        </>
    }
}
