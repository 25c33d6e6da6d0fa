use yew::html::Scope;
use yew::prelude::*;

use crate::{Model, Msg, Tab};

pub fn render_sidebar(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    html! {
        <aside class="sidebar">
            <h2 class="logo"><i class="fa-solid fa-recycle"></i>{" SmartWaste"}</h2>

            { nav_button(link, model.active_tab, Tab::Dashboard, "fa-solid fa-chart-pie", "Dashboard") }
            { nav_button(link, model.active_tab, Tab::Webcam, "fa-solid fa-video", "Webcam Scanner") }
            { nav_button(link, model.active_tab, Tab::Upload, "fa-solid fa-image", "Upload Scanner") }

            { render_theme_toggle(&model.theme, link) }
        </aside>
    }
}

fn nav_button(
    link: &Scope<Model>,
    active: Tab,
    tab: Tab,
    icon: &'static str,
    label: &'static str,
) -> Html {
    html! {
        <button
            class={classes!("nav-btn", (active == tab).then_some("active"))}
            onclick={link.callback(move |_| Msg::SwitchTab(tab))}
        >
            <i class={icon}></i>{ format!(" {label}") }
        </button>
    }
}

fn render_theme_toggle(theme: &str, link: &Scope<Model>) -> Html {
    html! {
        <button
            id="theme-toggle"
            class="theme-toggle"
            onclick={link.callback(|_| Msg::ToggleTheme)}
            title={ if theme == "light" { "Switch to Dark Mode" } else { "Switch to Light Mode" } }
        >
            { if theme == "light" {
                html! { <i class="fa-solid fa-sun"></i> }
            } else {
                html! { <i class="fa-solid fa-moon"></i> }
            }}
        </button>
    }
}
