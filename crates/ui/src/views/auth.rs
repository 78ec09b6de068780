use api::demo::{DEMO_PASSWORD, DEMO_STUDENT_EMAIL, DEMO_TEACHER_EMAIL};
use atheno_core::model::Role;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::SignUpForm;

use crate::context::AppContext;
use crate::routes::{Route, home_route};
use crate::vm::{FormStatus, auth_error_message};

#[component]
pub fn SignInView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let offline = ctx.offline();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut status = use_signal(|| FormStatus::Idle);

    let submit = use_callback(move |()| {
        if status.read().is_working() {
            return;
        }
        let auth = auth.clone();
        let email = email();
        let password = password();
        status.set(FormStatus::Working);
        spawn(async move {
            match auth.sign_in(&email, &password).await {
                Ok(user) => {
                    status.set(FormStatus::Idle);
                    let _ = navigator.replace(home_route(user.role));
                }
                Err(err) => status.set(FormStatus::Failed(auth_error_message(&err))),
            }
        });
    });

    let working = status.read().is_working();
    let error = status.read().error().map(str::to_string);

    rsx! {
        div { class: "page page--auth",
            div { class: "auth-card",
                h1 { class: "auth-title", "Atheno" }
                p { class: "auth-subtitle", "Sign in to continue" }

                if let Some(error) = error {
                    p { class: "form-error", role: "alert", "{error}" }
                }

                label { class: "field",
                    span { "Email" }
                    input {
                        id: "sign-in-email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        id: "sign-in-password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                        onkeydown: move |evt| {
                            if evt.data.key() == Key::Enter {
                                submit.call(());
                            }
                        },
                    }
                }
                button {
                    class: "btn btn-primary btn-block",
                    r#type: "button",
                    disabled: working,
                    onclick: move |_| submit.call(()),
                    if working { "Signing in..." } else { "Sign in" }
                }
                p { class: "auth-switch",
                    "New here? "
                    Link { to: Route::SignUp {}, "Create an account" }
                }

                if offline {
                    div { class: "demo-hint",
                        p { "Offline demo accounts (password {DEMO_PASSWORD}):" }
                        ul {
                            li { "{DEMO_STUDENT_EMAIL}" }
                            li { "{DEMO_TEACHER_EMAIL}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SignUpView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut status = use_signal(|| FormStatus::Idle);

    let submit = use_callback(move |()| {
        if status.read().is_working() {
            return;
        }
        let auth = auth.clone();
        let form = SignUpForm {
            name: name(),
            email: email(),
            password: password(),
            confirm_password: confirm(),
            role: role(),
        };
        status.set(FormStatus::Working);
        spawn(async move {
            match auth.sign_up(&form).await {
                Ok(user) => {
                    status.set(FormStatus::Idle);
                    let _ = navigator.replace(home_route(user.role));
                }
                Err(err) => status.set(FormStatus::Failed(auth_error_message(&err))),
            }
        });
    });

    let working = status.read().is_working();
    let error = status.read().error().map(str::to_string);

    rsx! {
        div { class: "page page--auth",
            div { class: "auth-card",
                h1 { class: "auth-title", "Create your account" }

                if let Some(error) = error {
                    p { class: "form-error", role: "alert", "{error}" }
                }

                label { class: "field",
                    span { "Full name" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Confirm password" }
                    input {
                        r#type: "password",
                        value: "{confirm}",
                        oninput: move |evt| confirm.set(evt.value()),
                    }
                }
                fieldset { class: "field role-picker",
                    legend { "I am a" }
                    for option in [Role::Student, Role::Teacher] {
                        label { key: "{option}", class: "role-option",
                            input {
                                r#type: "radio",
                                name: "role",
                                checked: role() == option,
                                onchange: move |_| role.set(option),
                            }
                            span {
                                if option == Role::Teacher { "Teacher" } else { "Student" }
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary btn-block",
                    r#type: "button",
                    disabled: working,
                    onclick: move |_| submit.call(()),
                    if working { "Creating account..." } else { "Sign up" }
                }
                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::SignIn {}, "Sign in" }
                }
            }
        }
    }
}
