use std::sync::OnceLock;

use dioxus::prelude::*;
use store::ConsoleConfig;
use ui::{AuthProvider, Destination};

use views::{Dashboard, Login, NotFound, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/users")]
    Users {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Entry => Route::Login {},
            Destination::Landing => Route::Dashboard {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONSOLE_TOML: &str = include_str!("../console.toml");

static CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

fn config() -> &'static ConsoleConfig {
    CONFIG.get_or_init(ConsoleConfig::default)
}

fn main() {
    let parsed = ConsoleConfig::from_toml(CONSOLE_TOML);
    let config = parsed.as_ref().cloned().unwrap_or_default();

    let level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    // Fails only if a subscriber is already installed.
    let _ = dioxus::logger::init(level);

    if let Err(error) = &parsed {
        tracing::warn!(%error, "console.toml rejected, using defaults");
    }
    tracing::info!(base_url = %config.api.base_url, "starting parking console");

    let _ = CONFIG.set(config);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            config: config().clone(),
            Router::<Route> {}
        }
    }
}
