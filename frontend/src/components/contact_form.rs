use yew::prelude::*;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config;
use crate::i18n::{ContactFormCopy, FieldCopy};

const STATUS_RESET_MS: u32 = 5_000;

/// Body of `POST /api/book-call`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub service: String,
    pub message: String,
    pub preferred_date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Service,
    Message,
    PreferredDate,
}

impl BookingForm {
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::Service => &mut self.service,
            Field::Message => &mut self.message,
            Field::PreferredDate => &mut self.preferred_date,
        };
        *slot = value;
    }

    /// Name, email and service are required.
    pub fn is_valid(&self) -> bool {
        [&self.name, &self.email, &self.service]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Success,
    Error,
}

async fn submit_booking(form: &BookingForm) -> Result<(), String> {
    let url = format!("{}/api/book-call", config::get_backend_url());
    let response = Request::post(&url)
        .json(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("booking request failed with status {}", response.status()))
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub copy: ContactFormCopy,
    /// Fired after the booking was accepted by the server.
    #[prop_or_default]
    pub on_success: Callback<()>,
}

pub enum ContactFormMsg {
    Update(Field, String),
    Submit,
    Submitted(Result<(), String>),
    ResetStatus,
}

pub struct ContactForm {
    form: BookingForm,
    submitting: bool,
    status: SubmitStatus,
    status_reset: Option<Timeout>,
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ContactFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: BookingForm::default(),
            submitting: false,
            status: SubmitStatus::Idle,
            status_reset: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Update(field, value) => {
                self.form.set(field, value);
                true
            }
            ContactFormMsg::Submit => {
                if self.submitting || !self.form.is_valid() {
                    return false;
                }
                self.submitting = true;
                self.status = SubmitStatus::Idle;
                self.status_reset = None;

                let form = self.form.clone();
                ctx.link().send_future(async move {
                    ContactFormMsg::Submitted(submit_booking(&form).await)
                });
                true
            }
            ContactFormMsg::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        log::info!("Booking request sent");
                        self.status = SubmitStatus::Success;
                        self.form = BookingForm::default();
                        let link = ctx.link().clone();
                        self.status_reset = Some(Timeout::new(STATUS_RESET_MS, move || {
                            link.send_message(ContactFormMsg::ResetStatus);
                        }));
                        ctx.props().on_success.emit(());
                    }
                    Err(e) => {
                        log::error!("Error submitting booking: {}", e);
                        self.status = SubmitStatus::Error;
                    }
                }
                true
            }
            ContactFormMsg::ResetStatus => {
                self.status = SubmitStatus::Idle;
                self.status_reset = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let copy = &ctx.props().copy;
        let link = ctx.link();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let on_input = |field: Field| {
            link.callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                ContactFormMsg::Update(field, input.value())
            })
        };
        let on_service = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            ContactFormMsg::Update(Field::Service, select.value())
        });
        let on_message = link.callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::Update(Field::Message, area.value())
        });

        let required = |field: &FieldCopy, id: &'static str| {
            html! {
                <label for={id}>
                    {field.label.clone()}{" "}
                    <span class="required">{copy.required_marker.clone()}</span>
                </label>
            }
        };
        let optional = |field: &FieldCopy, id: &'static str| {
            html! { <label for={id}>{field.label.clone()}</label> }
        };

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let disabled = self.submitting || !self.form.is_valid();
        let submit_label = if self.submitting {
            copy.submit_busy.clone()
        } else {
            copy.submit_idle.clone()
        };

        html! {
            <form class="contact-form" {onsubmit}>
                <div class="form-row">
                    <div class="form-field">
                        {required(&copy.name, "name")}
                        <input type="text" id="name" name="name" required={true}
                            value={self.form.name.clone()}
                            placeholder={copy.name.placeholder.clone()}
                            oninput={on_input(Field::Name)} />
                    </div>
                    <div class="form-field">
                        {required(&copy.email, "email")}
                        <input type="email" id="email" name="email" required={true}
                            value={self.form.email.clone()}
                            placeholder={copy.email.placeholder.clone()}
                            oninput={on_input(Field::Email)} />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-field">
                        {optional(&copy.phone, "phone")}
                        <input type="tel" id="phone" name="phone"
                            value={self.form.phone.clone()}
                            placeholder={copy.phone.placeholder.clone()}
                            oninput={on_input(Field::Phone)} />
                    </div>
                    <div class="form-field">
                        {optional(&copy.company, "company")}
                        <input type="text" id="company" name="company"
                            value={self.form.company.clone()}
                            placeholder={copy.company.placeholder.clone()}
                            oninput={on_input(Field::Company)} />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-field">
                        {required(&copy.service, "service")}
                        <select id="service" name="service" required={true} onchange={on_service}>
                            <option value="" selected={self.form.service.is_empty()}>
                                {copy.service.placeholder.clone()}
                            </option>
                            {
                                copy.service_options.iter().map(|option| html! {
                                    <option
                                        key={option.clone()}
                                        value={option.clone()}
                                        selected={self.form.service == *option}
                                    >
                                        {option.clone()}
                                    </option>
                                }).collect::<Html>()
                            }
                        </select>
                    </div>
                    <div class="form-field">
                        {optional(&copy.preferred_date, "preferredDate")}
                        <input type="date" id="preferredDate" name="preferredDate"
                            min={today}
                            value={self.form.preferred_date.clone()}
                            oninput={on_input(Field::PreferredDate)} />
                    </div>
                </div>
                <div class="form-field">
                    {optional(&copy.message, "message")}
                    <textarea id="message" name="message" rows="4"
                        value={self.form.message.clone()}
                        placeholder={copy.message.placeholder.clone()}
                        oninput={on_message} />
                </div>
                <button type="submit" class="hero-cta" {disabled}>
                    {submit_label}
                </button>
                {
                    match self.status {
                        SubmitStatus::Idle => html! {},
                        SubmitStatus::Success => html! {
                            <p class="form-status success" role="status">{copy.success.clone()}</p>
                        },
                        SubmitStatus::Error => html! {
                            <p class="form-status error" role="alert">{copy.error.clone()}</p>
                        },
                    }
                }
            </form>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_name_email_and_service() {
        let mut form = BookingForm::default();
        assert!(!form.is_valid());

        form.set(Field::Name, "Ada".to_string());
        form.set(Field::Email, "ada@example.com".to_string());
        assert!(!form.is_valid());

        form.set(Field::Service, "Web Development".to_string());
        assert!(form.is_valid());

        form.set(Field::Name, "   ".to_string());
        assert!(!form.is_valid());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut form = BookingForm::default();
        form.set(Field::PreferredDate, "2026-11-02".to_string());
        let body = serde_json::to_value(&form).expect("serializes");

        assert_eq!(body["preferredDate"], "2026-11-02");
        assert_eq!(body["phone"], "");
        assert!(body.get("preferred_date").is_none());
    }
}
