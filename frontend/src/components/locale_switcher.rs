use yew::prelude::*;
use yew_router::prelude::*;

use crate::i18n::Locale;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LocaleSwitcherProps {
    pub current: Locale,
    pub label: String,
}

#[function_component(LocaleSwitcher)]
pub fn locale_switcher(props: &LocaleSwitcherProps) -> Html {
    let menu_open = use_state(|| false);
    let route = use_route::<Route>();
    let navigator = use_navigator();

    let toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let items = Locale::ALL.iter().map(|&locale| {
        let onclick = {
            let menu_open = menu_open.clone();
            let navigator = navigator.clone();
            let route = route.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                menu_open.set(false);
                let target = route
                    .clone()
                    .unwrap_or(Route::Home { locale: Locale::DEFAULT.code().to_string() })
                    .with_locale(locale);
                match &navigator {
                    Some(navigator) => navigator.replace(&target),
                    None => log::warn!("No navigator available for locale switch"),
                }
            })
        };
        let class = classes!("locale-option", (locale == props.current).then(|| "current"));
        html! {
            <li key={locale.code()}>
                <button type="button" {class} {onclick} lang={locale.code()}>
                    <span class="locale-flag">{locale.flag()}</span>
                    {locale.name()}
                </button>
            </li>
        }
    });

    html! {
        <div class="locale-switcher">
            <button
                type="button"
                class="locale-trigger"
                aria-label={props.label.clone()}
                aria-haspopup="true"
                aria-expanded={(*menu_open).to_string()}
                onclick={toggle}
            >
                {props.current.flag()}
            </button>
            {
                if *menu_open {
                    html! { <ul class="locale-menu" role="menu">{ for items }</ul> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
