use dioxus::prelude::*;
use ui::{fallback_destination, use_auth};

use crate::Route;

/// Unknown paths land on the dashboard or the login page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let session = use_auth();
    let nav = use_navigator();

    let destination = fallback_destination(session.peek().is_logged_in());
    tracing::debug!(path = %segments.join("/"), ?destination, "unknown route");
    nav.replace(Route::from(destination));

    rsx! {}
}
