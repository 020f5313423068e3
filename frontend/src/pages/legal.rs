use yew::prelude::*;
use yew_router::prelude::*;

use crate::i18n::{LegalDocument, LegalSection};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LegalPageProps {
    pub document: LegalDocument,
    pub last_updated_label: String,
    pub locale: String,
    pub back_home: String,
}

fn render_section(index: usize, section: &LegalSection) -> Html {
    html! {
        <section key={index}>
            <h2>{format!("{}. {}", index + 1, section.title)}</h2>
            { for section.paragraphs.iter().map(|p| html! { <p>{p.clone()}</p> }) }
            {
                if section.bullets.is_empty() {
                    html! {}
                } else {
                    html! {
                        <ul>
                            { for section.bullets.iter().map(|b| html! { <li>{b.clone()}</li> }) }
                        </ul>
                    }
                }
            }
        </section>
    }
}

#[function_component(LegalPage)]
pub fn legal_page(props: &LegalPageProps) -> Html {
    let document = &props.document;

    {
        use_effect_with_deps(
            |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            document.title.clone(),
        );
    }

    html! {
        <div class="legal-content">
            <style>
                {r#"
                    .legal-content {
                        min-height: 100vh;
                        background: #1a1a1a;
                        padding: 8rem 2rem 4rem;
                        color: #fff;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                    }
                    .legal-content h1 {
                        font-size: 2rem;
                        background: linear-gradient(45deg, #fff, #7EB2FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                        margin-bottom: 0.5rem;
                    }
                    .legal-content .last-updated {
                        color: #666;
                        margin-bottom: 2rem;
                    }
                    .legal-content section {
                        background: rgba(0, 0, 0, 0.2);
                        border-radius: 12px;
                        width: 100%;
                        max-width: 720px;
                        padding: 2rem;
                        margin: 1rem auto;
                    }
                    .legal-content h2 {
                        color: #7EB2FF;
                        font-size: 1.4rem;
                        margin-bottom: 1rem;
                    }
                    .legal-content p, .legal-content li {
                        color: #999;
                        line-height: 1.6;
                    }
                    .legal-content .intro {
                        max-width: 720px;
                    }
                "#}
            </style>
            <h1>{document.title.clone()}</h1>
            <p class="last-updated">
                {format!("{} {}", props.last_updated_label, document.last_updated)}
            </p>
            <div class="intro">
                { for document.intro.iter().map(|p| html! { <p>{p.clone()}</p> }) }
            </div>
            { for document.sections.iter().enumerate().map(|(i, s)| render_section(i, s)) }
            <div class="legal-links">
                <Link<Route> to={Route::Home { locale: props.locale.clone() }}>
                    {props.back_home.clone()}
                </Link<Route>>
            </div>
        </div>
    }
}
