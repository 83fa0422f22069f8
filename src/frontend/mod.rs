mod browser;
mod carousel;
mod cursor;
mod dock;
mod hooks;
mod media;
mod pages;
mod reveal;
mod search_demo;

use crate::config::{build_env, rejected_values, SiteConfig};
use crate::logging::{log_event, LogLevel};
use browser::{local_storage, prefers_reduced_motion, system_prefers_dark};
use js_sys::{Function, Reflect};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

const THEME_KEY: &str = "portfolio-theme";

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/work/:slug")]
    CaseStudy { slug: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn toggle_label(self) -> String {
        format!("Switch to {} theme", self.toggled().as_str())
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

fn resolve_theme() -> Theme {
    local_storage()
        .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten())
        .and_then(|value| Theme::from_str(&value))
        .unwrap_or(if system_prefers_dark() { Theme::Dark } else { Theme::Light })
}

fn apply_theme(theme: Theme) {
    if let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|document| document.document_element())
    {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

fn apply_theme_with_transition(theme: Theme) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let document_js: JsValue = document.into();
    let start = Reflect::get(&document_js, &JsValue::from_str("startViewTransition")).ok();
    let Some(start) = start.as_ref().and_then(|value| value.dyn_ref::<Function>()) else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

#[hook]
pub fn use_site_config() -> Rc<SiteConfig> {
    use_context::<Rc<SiteConfig>>().unwrap_or_default()
}

pub fn emit_log(config: &SiteConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    log_event(config.log_level, level, event, fields);
}

#[derive(Properties, PartialEq)]
struct SiteHeaderProps {
    theme: Theme,
    on_toggle: Callback<MouseEvent>,
}

#[function_component(SiteHeader)]
fn site_header(props: &SiteHeaderProps) -> Html {
    html! {
        <header class="site-header">
            <Link<Route> to={Route::Home} classes={classes!("site-name")}>{crate::content::SITE_OWNER}</Link<Route>>
            <button
                class="theme-toggle"
                type="button"
                aria-label={props.theme.toggle_label()}
                aria-pressed={(props.theme == Theme::Dark).to_string()}
                onclick={props.on_toggle.clone()}
            >
                <span aria-hidden="true">{props.theme.icon()}</span>
            </button>
        </header>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::Home /> },
        Route::CaseStudy { slug } => html! { <pages::CaseStudyPage {slug} /> },
        Route::NotFound => html! { <pages::NotFound /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| SiteConfig::from_build_env());
    let theme = use_state(resolve_theme);

    {
        let current = *theme;
        let config = config.clone();
        use_effect_with((), move |_| {
            apply_theme(current);
            emit_log(
                &config,
                LogLevel::Info,
                "site_started",
                json!({
                    "theme": current.as_str(),
                    "gate_configured": config.gate_password.is_some(),
                    "reduced_motion": prefers_reduced_motion(),
                }),
            );
            for error in rejected_values(build_env) {
                emit_log(
                    &config,
                    LogLevel::Warn,
                    "config_value_rejected",
                    json!({ "error": error.to_string() }),
                );
            }
            || ()
        });
    }

    let on_toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next);
            theme.set(next);
        })
    };

    html! {
        <ContextProvider<Rc<SiteConfig>> context={config.clone()}>
            <BrowserRouter>
                <a class="skip-link" href="#content">{"Skip to main content"}</a>
                <div class="page-shell">
                    <SiteHeader theme={*theme} on_toggle={on_toggle} />
                    <main id="content">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </BrowserRouter>
        </ContextProvider<Rc<SiteConfig>>>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
