use yew::prelude::*;
use yew_router::prelude::*;
use chrono::Datelike;

use crate::i18n::{FooterCopy, Locale};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub locale: Locale,
    pub brand: String,
    pub copy: FooterCopy,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let locale = props.locale.code().to_string();
    let year = chrono::Local::now().year();

    html! {
        <footer class="site-footer">
            <div class="footer-brand">
                <strong>{props.brand.clone()}</strong>
                <p>{props.copy.tagline.clone()}</p>
            </div>
            <div class="legal-links">
                <Link<Route> to={Route::PrivacyPolicy { locale: locale.clone() }}>
                    {props.copy.privacy_policy.clone()}
                </Link<Route>>
                {" | "}
                <Link<Route> to={Route::TermsOfService { locale }}>
                    {props.copy.terms_of_service.clone()}
                </Link<Route>>
            </div>
            <p class="footer-rights">{format!("© {} {}. {}", year, props.brand, props.copy.rights)}</p>
        </footer>
    }
}
