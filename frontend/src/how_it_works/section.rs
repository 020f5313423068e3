use yew::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::components::contact_form::ContactForm;
use crate::components::dialog::Dialog;
use crate::i18n::{interpolate, ContactFormCopy, HowItWorksCopy};

use super::session::{ProgressSession, TimeoutScheduler};
use super::tracker::{ProgressSnapshot, StepStatus};
use super::viewport::{parse_step_index, IntersectionViewport, STEP_INDEX_ATTR};

#[derive(Properties, PartialEq)]
pub struct HowItWorksProps {
    pub copy: HowItWorksCopy,
    pub form_copy: ContactFormCopy,
    #[prop_or_else(|| "how-it-works".to_string())]
    pub id: String,
}

/// Collects the rendered step elements together with their indices.
fn step_targets(list: &Element) -> Vec<(usize, Element)> {
    let selector = format!("[{}]", STEP_INDEX_ATTR);
    let nodes = match list.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("Failed to query step elements: {:?}", e);
            return Vec::new();
        }
    };

    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|element| {
            parse_step_index(element.get_attribute(STEP_INDEX_ATTR).as_deref()).map(|index| (index, element))
        })
        .collect()
}

fn status_class(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "step-pending",
        StepStatus::Active => "step-active",
        StepStatus::Completed => "step-completed",
    }
}

#[function_component(HowItWorks)]
pub fn how_it_works(props: &HowItWorksProps) -> Html {
    let total = props.copy.steps.len();
    let snapshot = use_state(|| ProgressSnapshot::empty(total));
    let contact_open = use_state(|| false);
    let list_ref = use_node_ref();

    {
        let setter = snapshot.setter();
        let list_ref = list_ref.clone();
        use_effect_with_deps(
            move |total: &usize| {
                let total = *total;
                setter.set(ProgressSnapshot::empty(total));

                let session = list_ref.cast::<Element>().map(|list| {
                    let setter = setter.clone();
                    ProgressSession::mount(
                        total,
                        step_targets(&list),
                        IntersectionViewport::new(),
                        TimeoutScheduler,
                        move |snapshot| setter.set(snapshot),
                    )
                });
                if session.is_none() {
                    log::warn!("How it works list not mounted, progress stays static");
                }

                move || {
                    if let Some(mut session) = session {
                        session.teardown();
                    }
                }
            },
            total,
        );
    }

    let open_contact = {
        let contact_open = contact_open.clone();
        Callback::from(move |_: MouseEvent| contact_open.set(true))
    };
    let close_contact = {
        let contact_open = contact_open.clone();
        Callback::from(move |_: ()| contact_open.set(false))
    };

    let width = format!("width: {:.2}%;", snapshot.percent());
    let height = format!("height: {:.2}%;", snapshot.percent());
    let counter = interpolate(&props.copy.progress_label, &[
        ("reached", snapshot.reached().to_string()),
        ("total", total.to_string()),
    ]);

    html! {
        <section id={props.id.clone()} class="how-it-works">
            <style>
                {r#"
                    .how-it-works {
                        padding: 6rem 1.5rem;
                        scroll-margin-top: 5rem;
                    }
                    .how-it-works .intro {
                        max-width: 48rem;
                        margin: 0 auto;
                        text-align: center;
                    }
                    .how-it-works .progress-track {
                        height: 0.5rem;
                        border-radius: 999px;
                        overflow: hidden;
                        background: rgba(30, 144, 255, 0.15);
                    }
                    .how-it-works .progress-fill {
                        height: 100%;
                        background: linear-gradient(90deg, #1E90FF, #7EB2FF);
                        transition: width 0.7s ease-out;
                    }
                    .how-it-works .steps {
                        position: relative;
                        max-width: 56rem;
                        margin: 3rem auto 0;
                    }
                    .how-it-works .step-line {
                        position: absolute;
                        left: 1.5rem;
                        top: 2rem;
                        width: 2px;
                        height: calc(100% - 4rem);
                        background: rgba(30, 144, 255, 0.2);
                    }
                    .how-it-works .step-line-fill {
                        width: 100%;
                        background: #1E90FF;
                        transition: height 0.7s ease-out;
                    }
                    .how-it-works .step {
                        display: flex;
                        gap: 1.5rem;
                        margin-bottom: 2rem;
                        transition: transform 0.5s;
                    }
                    .how-it-works .step-marker {
                        flex-shrink: 0;
                        width: 3rem;
                        height: 3rem;
                        border-radius: 50%;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        border: 2px solid rgba(30, 144, 255, 0.4);
                        background: #1a1a1a;
                        z-index: 1;
                    }
                    .how-it-works .step-active .step-marker {
                        border-color: #1E90FF;
                        transform: scale(1.1);
                    }
                    .how-it-works .step-completed .step-marker {
                        border-color: #1E90FF;
                        background: #1E90FF;
                    }
                    .how-it-works .step-card {
                        flex: 1;
                        padding: 1.5rem;
                        border-radius: 1rem;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                    }
                    .how-it-works .step-active .step-card {
                        border-color: rgba(30, 144, 255, 0.5);
                        transform: scale(1.01);
                    }
                "#}
            </style>
            <div class="intro">
                <span class="eyebrow">{props.copy.eyebrow.clone()}</span>
                <h2>{props.copy.title.clone()}</h2>
                <p>{props.copy.subtitle.clone()}</p>
            </div>

            <div class="progress" aria-hidden="true">
                <div class="progress-track">
                    <div class="progress-fill" style={width}></div>
                </div>
                <p class="progress-label">{counter}</p>
            </div>

            <div class="steps" ref={list_ref}>
                <div class="step-line">
                    <div class="step-line-fill" style={height}></div>
                </div>
                {
                    props.copy.steps.iter().enumerate().map(|(index, step)| {
                        let status = snapshot.status(index);
                        html! {
                            <div
                                key={step.number.clone()}
                                data-step-index={index.to_string()}
                                class={classes!("step", status_class(status))}
                            >
                                <div class="step-marker">
                                    {
                                        if status == StepStatus::Completed {
                                            html! { <span aria-label="completed">{"✓"}</span> }
                                        } else {
                                            html! { <span>{step.number.clone()}</span> }
                                        }
                                    }
                                </div>
                                <div class="step-card">
                                    <h3>{step.title.clone()}</h3>
                                    <p>{step.description.clone()}</p>
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>

            <div class="cta">
                <button type="button" class="hero-cta" onclick={open_contact}>
                    {props.copy.cta.clone()}{" →"}
                </button>
            </div>

            <Dialog
                id={format!("{}-contact", props.id)}
                open={*contact_open}
                on_close={close_contact}
                title={props.copy.dialog.title.clone()}
                description={props.copy.dialog.description.clone()}
                close_label={props.copy.dialog.close_label.clone()}
            >
                <ContactForm copy={props.form_copy.clone()} />
            </Dialog>
        </section>
    }
}
