use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Ru,
    Hy,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ru, Locale::Hy];
    pub const DEFAULT: Locale = Locale::En;

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Hy => "hy",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ru => "Русский",
            Locale::Hy => "Հայերեն",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Locale::En => "🇬🇧",
            Locale::Ru => "🇷🇺",
            Locale::Hy => "🇦🇲",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    /// Picks the first supported language out of a browser preference list
    /// such as `["hy-AM", "ru", "en-US"]`.
    pub fn negotiate(preferred: &[String]) -> Locale {
        preferred
            .iter()
            .filter_map(|tag| tag.split(|c: char| c == '-' || c == '_').next())
            .find_map(Locale::from_code)
            .unwrap_or(Locale::DEFAULT)
    }

    /// Locale preferred by the browser, from `navigator.languages`.
    pub fn detect() -> Locale {
        let preferred: Vec<String> = web_sys::window()
            .map(|window| {
                window
                    .navigator()
                    .languages()
                    .iter()
                    .filter_map(|value| value.as_string())
                    .collect()
            })
            .unwrap_or_default();
        Locale::negotiate(&preferred)
    }

    fn raw_messages(self) -> &'static str {
        match self {
            Locale::En => include_str!("../messages/en.json"),
            Locale::Ru => include_str!("../messages/ru.json"),
            Locale::Hy => include_str!("../messages/hy.json"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    pub nav: NavCopy,
    pub hero: HeroCopy,
    pub features: FeaturesCopy,
    pub how_it_works: HowItWorksCopy,
    pub contact: ContactSectionCopy,
    pub contact_form: ContactFormCopy,
    pub book_call: DialogCopy,
    pub footer: FooterCopy,
    pub legal: LegalCopy,
    pub not_found: NotFoundCopy,
}

impl Messages {
    pub fn load(locale: Locale) -> Result<Messages, serde_json::Error> {
        serde_json::from_str(locale.raw_messages())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavCopy {
    pub brand: String,
    pub how_it_works: String,
    pub contact: String,
    pub locale_switcher_label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCopy {
    pub eyebrow: String,
    pub title: String,
    pub subtitle: String,
    pub primary_cta: String,
    pub secondary_cta: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesCopy {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureCopy>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCopy {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HowItWorksCopy {
    pub eyebrow: String,
    pub title: String,
    pub subtitle: String,
    pub steps: Vec<Step>,
    pub cta: String,
    /// Counter under the progress bar, with `{reached}` and `{total}` slots.
    pub progress_label: String,
    pub dialog: DialogCopy,
}

/// One unit of the "how it works" narrative.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub number: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSectionCopy {
    pub title: String,
    pub subtitle: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogCopy {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub close_label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCopy {
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormCopy {
    pub name: FieldCopy,
    pub email: FieldCopy,
    pub phone: FieldCopy,
    pub company: FieldCopy,
    pub service: FieldCopy,
    pub preferred_date: FieldCopy,
    pub message: FieldCopy,
    pub required_marker: String,
    pub service_options: Vec<String>,
    pub submit_idle: String,
    pub submit_busy: String,
    pub success: String,
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterCopy {
    pub tagline: String,
    pub privacy_policy: String,
    pub terms_of_service: String,
    pub rights: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalCopy {
    pub privacy_policy: LegalDocument,
    pub terms_of_service: LegalDocument,
    pub last_updated_label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocument {
    pub title: String,
    pub last_updated: String,
    pub intro: Vec<String>,
    pub sections: Vec<LegalSection>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalSection {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundCopy {
    pub title: String,
    pub body: String,
    pub back_home: String,
}

/// Fills `{name}` slots in a message.
pub fn interpolate(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
        assert_eq!(Locale::from_code("EN"), Some(Locale::En));
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn negotiation_uses_primary_subtag() {
        let preferred = vec!["de-DE".to_string(), "hy-AM".to_string(), "en".to_string()];
        assert_eq!(Locale::negotiate(&preferred), Locale::Hy);
        assert_eq!(Locale::negotiate(&["ru_RU".to_string()]), Locale::Ru);
        assert_eq!(Locale::negotiate(&["fr".to_string()]), Locale::En);
        assert_eq!(Locale::negotiate(&[]), Locale::En);
    }

    #[test]
    fn every_locale_parses() {
        for locale in Locale::ALL {
            if let Err(e) = Messages::load(locale) {
                panic!("{} messages failed to parse: {}", locale.code(), e);
            }
        }
    }

    #[test]
    fn locales_share_structure() {
        let reference = Messages::load(Locale::DEFAULT).expect("default messages");
        for locale in Locale::ALL {
            let messages = Messages::load(locale).expect("messages");
            assert!(!messages.how_it_works.steps.is_empty());
            assert_eq!(messages.how_it_works.steps.len(), reference.how_it_works.steps.len());
            assert_eq!(messages.features.items.len(), reference.features.items.len());
            assert_eq!(
                messages.contact_form.service_options.len(),
                reference.contact_form.service_options.len()
            );
            for (item, expected) in messages.features.items.iter().zip(&reference.features.items) {
                assert_eq!(item.id, expected.id);
            }
        }
    }

    #[test]
    fn interpolation_fills_named_slots() {
        let text = interpolate("{reached} of {total} steps", &[
            ("reached", 2.to_string()),
            ("total", 4.to_string()),
        ]);
        assert_eq!(text, "2 of 4 steps");
    }
}
