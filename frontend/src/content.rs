/// Static parts of a feature card; texts come from the locale messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub id: &'static str,
    pub image: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        id: "iterative-design",
        image: "https://images.unsplash.com/photo-1557682250-33bd709cbe85?auto=format&fit=crop&w=1600&q=80",
    },
    Feature {
        id: "production-engineering",
        image: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?auto=format&fit=crop&w=1600&q=80",
    },
    Feature {
        id: "human-centered-ux",
        image: "https://images.unsplash.com/photo-1586717799252-bd134ad00e26?auto=format&fit=crop&w=1600&q=80",
    },
    Feature {
        id: "brand-systems",
        image: "https://images.unsplash.com/photo-1526498460520-4c246339dccb?auto=format&fit=crop&w=1600&q=80",
    },
    Feature {
        id: "performance-first",
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&w=1600&q=80",
    },
    Feature {
        id: "launch-and-iterate",
        image: "https://images.unsplash.com/photo-1518770660439-4636190af475?auto=format&fit=crop&w=1600&q=80",
    },
];

pub fn feature_image(id: &str) -> Option<&'static str> {
    FEATURES.iter().find(|feature| feature.id == id).map(|feature| feature.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Locale, Messages};

    #[test]
    fn every_feature_message_has_an_image() {
        let messages = Messages::load(Locale::DEFAULT).expect("messages");
        for item in &messages.features.items {
            assert!(feature_image(&item.id).is_some(), "no image for {}", item.id);
        }
        assert_eq!(messages.features.items.len(), FEATURES.len());
    }
}
