use yew::prelude::*;

use crate::components::book_call_dialog::BookCallDialog;
use crate::components::contact_form::ContactForm;
use crate::content::feature_image;
use crate::how_it_works::section::HowItWorks;
use crate::i18n::{FeaturesCopy, Messages};

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub messages: Messages,
}

#[derive(Properties, PartialEq)]
struct FeatureGridProps {
    copy: FeaturesCopy,
}

#[function_component(FeatureGrid)]
fn feature_grid(props: &FeatureGridProps) -> Html {
    html! {
        <section id="features" class="features-section">
            <div class="section-intro">
                <h2>{props.copy.title.clone()}</h2>
                <p>{props.copy.subtitle.clone()}</p>
            </div>
            <div class="features-grid">
                {
                    props.copy.items.iter().map(|item| {
                        let image = feature_image(&item.id);
                        if image.is_none() {
                            log::warn!("No image for feature {}", item.id);
                        }
                        html! {
                            <article key={item.id.clone()} class="feature-card">
                                {
                                    match image {
                                        Some(src) => html! {
                                            <img src={src} alt={item.title.clone()} loading="lazy" />
                                        },
                                        None => html! {},
                                    }
                                }
                                <h3>{item.title.clone()}</h3>
                                <p>{item.description.clone()}</p>
                            </article>
                        }
                    }).collect::<Html>()
                }
            </div>
        </section>
    }
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let messages = &props.messages;

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page {
                        background: #1a1a1a;
                        color: #fff;
                        min-height: 100vh;
                    }
                    .hero {
                        min-height: 90vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 8rem 1.5rem 4rem;
                    }
                    .hero h1 {
                        font-size: 3.5rem;
                        max-width: 52rem;
                        background: linear-gradient(45deg, #fff, #7EB2FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .hero p {
                        color: #999;
                        max-width: 40rem;
                        font-size: 1.2rem;
                        line-height: 1.6;
                    }
                    .hero-actions {
                        display: flex;
                        gap: 1rem;
                        margin-top: 2rem;
                        flex-wrap: wrap;
                        justify-content: center;
                    }
                    .hero-secondary {
                        color: #7EB2FF;
                        padding: 1rem 2rem;
                        border: 1px solid rgba(30, 144, 255, 0.3);
                        border-radius: 8px;
                        text-decoration: none;
                    }
                    .section-intro {
                        text-align: center;
                        max-width: 48rem;
                        margin: 0 auto 3rem;
                    }
                    .features-section, .contact-section {
                        padding: 6rem 1.5rem;
                    }
                    .features-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr));
                        gap: 2rem;
                        max-width: 72rem;
                        margin: 0 auto;
                    }
                    .feature-card {
                        background: rgba(30, 30, 30, 0.7);
                        border: 1px solid rgba(30, 144, 255, 0.1);
                        border-radius: 16px;
                        overflow: hidden;
                        padding-bottom: 1.5rem;
                    }
                    .feature-card img {
                        width: 100%;
                        height: 12rem;
                        object-fit: cover;
                    }
                    .feature-card h3, .feature-card p {
                        padding: 0 1.5rem;
                    }
                    .feature-card p {
                        color: #999;
                        line-height: 1.6;
                    }
                    .contact-section {
                        max-width: 48rem;
                        margin: 0 auto;
                        scroll-margin-top: 5rem;
                    }
                "#}
            </style>

            <header class="hero">
                <span class="eyebrow">{messages.hero.eyebrow.clone()}</span>
                <h1>{messages.hero.title.clone()}</h1>
                <p>{messages.hero.subtitle.clone()}</p>
                <div class="hero-actions">
                    <BookCallDialog
                        trigger_label={messages.hero.primary_cta.clone()}
                        copy={messages.book_call.clone()}
                        form_copy={messages.contact_form.clone()}
                    />
                    <a href="#how-it-works" class="hero-secondary">
                        {messages.hero.secondary_cta.clone()}
                    </a>
                </div>
            </header>

            <FeatureGrid copy={messages.features.clone()} />

            <HowItWorks
                copy={messages.how_it_works.clone()}
                form_copy={messages.contact_form.clone()}
            />

            <section id="contact" class="contact-section">
                <div class="section-intro">
                    <h2>{messages.contact.title.clone()}</h2>
                    <p>{messages.contact.subtitle.clone()}</p>
                </div>
                <ContactForm copy={messages.contact_form.clone()} />
            </section>
        </div>
    }
}
