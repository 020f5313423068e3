use yew::prelude::*;
use yew_router::prelude::*;

use crate::i18n::NotFoundCopy;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct NotFoundProps {
    pub copy: NotFoundCopy,
    pub locale: String,
}

#[function_component(NotFound)]
pub fn not_found(props: &NotFoundProps) -> Html {
    html! {
        <div class="legal-content not-found">
            <h1>{props.copy.title.clone()}</h1>
            <p>{props.copy.body.clone()}</p>
            <Link<Route> to={Route::Home { locale: props.locale.clone() }} classes="hero-cta">
                {props.copy.back_home.clone()}
            </Link<Route>>
        </div>
    }
}
