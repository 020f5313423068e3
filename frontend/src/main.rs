use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, warn, error, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod content;
mod i18n;
mod components {
    pub mod book_call_dialog;
    pub mod contact_form;
    pub mod dialog;
    pub mod footer;
    pub mod locale_switcher;
}
mod how_it_works {
    //! Scroll-driven progress through the "how it works" steps.
    pub mod section;
    pub mod session;
    pub mod tracker;
    pub mod viewport;
}
mod pages {
    pub mod home;
    pub mod legal;
    pub mod not_found;
}

use components::{
    book_call_dialog::BookCallDialog,
    footer::Footer,
    locale_switcher::LocaleSwitcher,
};
use i18n::{ContactFormCopy, DialogCopy, Locale, Messages, NavCopy};
use pages::{
    home::Home,
    legal::LegalPage,
    not_found::NotFound,
};

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/:locale")]
    Home { locale: String },
    #[at("/:locale/privacy-policy")]
    PrivacyPolicy { locale: String },
    #[at("/:locale/terms-of-service")]
    TermsOfService { locale: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// The same page in another language. Pages without a localized
    /// counterpart land on the localized home page.
    pub fn with_locale(self, locale: Locale) -> Route {
        let locale = locale.code().to_string();
        match self {
            Route::PrivacyPolicy { .. } => Route::PrivacyPolicy { locale },
            Route::TermsOfService { .. } => Route::TermsOfService { locale },
            Route::Root | Route::Home { .. } | Route::NotFound => Route::Home { locale },
        }
    }
}

fn set_document_lang(locale: Locale) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("lang", locale.code()) {
            warn!("Failed to set document language: {:?}", e);
        }
    }
}

fn not_found_page(locale: Locale, messages: &Messages) -> Html {
    html! { <NotFound copy={messages.not_found.clone()} locale={locale.code().to_string()} /> }
}

/// Resolves the locale segment, loads its messages and wraps the page in
/// the shared navigation and footer. Unknown locales render the not found page.
fn localized(code: &str, render: impl FnOnce(Locale, &Messages) -> Html) -> Html {
    let requested = Locale::from_code(code);
    let locale = requested.unwrap_or(Locale::DEFAULT);

    let messages = match Messages::load(locale) {
        Ok(messages) => messages,
        Err(e) => {
            error!("Failed to load {} messages: {}", locale.code(), e);
            return html! {
                <p class="load-error">{"Something went wrong. Please reload the page."}</p>
            };
        }
    };
    set_document_lang(locale);

    let page = match requested {
        Some(locale) => render(locale, &messages),
        None => {
            warn!("Unknown locale in path: {}", code);
            not_found_page(locale, &messages)
        }
    };

    html! {
        <>
            <Nav
                locale={locale}
                copy={messages.nav.clone()}
                cta={messages.hero.primary_cta.clone()}
                book_call={messages.book_call.clone()}
                form_copy={messages.contact_form.clone()}
            />
            {page}
            <Footer locale={locale} brand={messages.nav.brand.clone()} copy={messages.footer.clone()} />
        </>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Root => {
            let locale = Locale::detect();
            info!("Redirecting to {} Home page", locale.code());
            html! { <Redirect<Route> to={Route::Home { locale: locale.code().to_string() }} /> }
        },
        Route::Home { locale } => {
            info!("Rendering Home page");
            localized(&locale, |_, messages| html! { <Home messages={messages.clone()} /> })
        },
        Route::PrivacyPolicy { locale } => {
            info!("Rendering Privacy Policy page");
            localized(&locale, |locale, messages| html! {
                <LegalPage
                    document={messages.legal.privacy_policy.clone()}
                    last_updated_label={messages.legal.last_updated_label.clone()}
                    locale={locale.code().to_string()}
                    back_home={messages.not_found.back_home.clone()}
                />
            })
        },
        Route::TermsOfService { locale } => {
            info!("Rendering Terms of Service page");
            localized(&locale, |locale, messages| html! {
                <LegalPage
                    document={messages.legal.terms_of_service.clone()}
                    last_updated_label={messages.legal.last_updated_label.clone()}
                    locale={locale.code().to_string()}
                    back_home={messages.not_found.back_home.clone()}
                />
            })
        },
        Route::NotFound => {
            info!("Rendering Not Found page");
            localized(Locale::DEFAULT.code(), not_found_page)
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub locale: Locale,
    pub copy: NavCopy,
    pub cta: String,
    pub book_call: DialogCopy,
    pub form_copy: ContactFormCopy,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let listener = window.clone().and_then(|window| {
                let document = window.document()?;
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_top = document
                        .document_element()
                        .map(|root| root.scroll_top())
                        .unwrap_or_default();
                    is_scrolled.set(scroll_top > 50);
                }) as Box<dyn FnMut()>);

                match window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    Ok(()) => Some(scroll_callback),
                    Err(e) => {
                        warn!("Failed to add scroll listener: {:?}", e);
                        None
                    }
                }
            });

            move || {
                if let (Some(window), Some(scroll_callback)) = (window, listener) {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };
    let code = props.locale.code();

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <style>
                {r#"
                    body {
                        margin: 0;
                        background: #1a1a1a;
                        color: #fff;
                        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                    }
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 100;
                        padding: 1rem 2rem;
                        transition: background 0.3s;
                    }
                    .top-nav.scrolled {
                        background: rgba(26, 26, 26, 0.95);
                        backdrop-filter: blur(10px);
                        border-bottom: 1px solid rgba(30, 144, 255, 0.1);
                    }
                    .nav-content {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        max-width: 72rem;
                        margin: 0 auto;
                    }
                    .nav-logo {
                        color: #fff;
                        font-size: 1.4rem;
                        font-weight: 700;
                        text-decoration: none;
                    }
                    .nav-right {
                        display: flex;
                        align-items: center;
                        gap: 1.5rem;
                    }
                    .nav-link {
                        color: #999;
                        text-decoration: none;
                    }
                    .nav-link:hover {
                        color: #7EB2FF;
                    }
                    .nav-login-button, .hero-cta {
                        background: #1E90FF;
                        color: white;
                        border: none;
                        border-radius: 8px;
                        padding: 0.75rem 1.5rem;
                        font-size: 1rem;
                        cursor: pointer;
                        text-decoration: none;
                        transition: background 0.3s;
                    }
                    .nav-login-button:hover, .hero-cta:hover {
                        background: #1873CC;
                    }
                    .hero-cta:disabled {
                        opacity: 0.6;
                        cursor: not-allowed;
                    }
                    .burger-menu {
                        display: none;
                        flex-direction: column;
                        gap: 4px;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        width: 24px;
                        height: 2px;
                        background: #fff;
                    }
                    .locale-switcher {
                        position: relative;
                    }
                    .locale-trigger {
                        background: none;
                        border: 1px solid rgba(30, 144, 255, 0.3);
                        border-radius: 8px;
                        padding: 0.4rem 0.6rem;
                        cursor: pointer;
                        font-size: 1.1rem;
                    }
                    .locale-menu {
                        position: absolute;
                        right: 0;
                        margin-top: 0.5rem;
                        list-style: none;
                        padding: 0.5rem;
                        background: #222;
                        border: 1px solid rgba(30, 144, 255, 0.2);
                        border-radius: 8px;
                    }
                    .locale-option {
                        display: flex;
                        gap: 0.5rem;
                        width: 100%;
                        background: none;
                        border: none;
                        color: #ccc;
                        padding: 0.4rem 0.8rem;
                        cursor: pointer;
                        white-space: nowrap;
                    }
                    .locale-option.current {
                        color: #7EB2FF;
                    }
                    .contact-form .form-row {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr));
                        gap: 1rem;
                    }
                    .contact-form .form-field {
                        display: flex;
                        flex-direction: column;
                        gap: 0.4rem;
                        margin-bottom: 1rem;
                    }
                    .contact-form input, .contact-form select, .contact-form textarea {
                        background: rgba(0, 0, 0, 0.3);
                        border: 1px solid rgba(30, 144, 255, 0.2);
                        border-radius: 8px;
                        color: #fff;
                        padding: 0.75rem;
                    }
                    .contact-form .required {
                        color: #ff6b6b;
                    }
                    .form-status.success {
                        color: #4CAF50;
                    }
                    .form-status.error {
                        color: #ff6b6b;
                    }
                    .site-footer {
                        padding: 3rem 2rem;
                        text-align: center;
                        color: #666;
                        border-top: 1px solid rgba(30, 144, 255, 0.1);
                    }
                    .site-footer a {
                        color: #7EB2FF;
                        text-decoration: none;
                    }
                    @media (max-width: 768px) {
                        .burger-menu {
                            display: flex;
                        }
                        .nav-right {
                            display: none;
                        }
                        .nav-right.mobile-menu-open {
                            display: flex;
                            flex-direction: column;
                            position: absolute;
                            top: 100%;
                            left: 0;
                            right: 0;
                            padding: 1.5rem;
                            background: rgba(26, 26, 26, 0.98);
                        }
                    }
                "#}
            </style>
            <div class="nav-content">
                <Link<Route> to={Route::Home { locale: code.to_string() }} classes="nav-logo">
                    {props.copy.brand.clone()}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu} aria-label="Menu">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <a href={format!("/{}#how-it-works", code)} class="nav-link" onclick={close_menu.clone()}>
                        {props.copy.how_it_works.clone()}
                    </a>
                    <a href={format!("/{}#contact", code)} class="nav-link" onclick={close_menu}>
                        {props.copy.contact.clone()}
                    </a>
                    <LocaleSwitcher current={props.locale} label={props.copy.locale_switcher_label.clone()} />
                    <BookCallDialog
                        trigger_label={props.cta.clone()}
                        copy={props.book_call.clone()}
                        form_copy={props.form_copy.clone()}
                        trigger_class="nav-login-button"
                    />
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
