use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Atheno" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    log::error!("render failed: {errors:?}");
                    rsx! {
                        div { class: "fatal",
                            h1 { "Atheno stopped unexpectedly" }
                            p { "Restart the app to continue. Your submitted work is safe on the server." }
                            pre { "{errors:?}" }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
