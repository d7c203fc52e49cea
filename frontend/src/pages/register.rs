use leptos::*;
use leptos_router::{use_navigate, A};

use crate::{
    api::{types::RegisterRequest, ApiClient},
    state::SessionContext,
};

#[component]
pub fn RegisterPage(session: SessionContext) -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);

    let api = ApiClient::new(session);
    let navigate = use_navigate();
    let register = create_action(move |request: &RegisterRequest| {
        let api = api.clone();
        let navigate = navigate.clone();
        let request = request.clone();
        async move {
            match api.register(&request).await {
                Ok(auth) => {
                    session.establish(&auth.token, &auth.user);
                    navigate("/", Default::default());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    view! {
        <section class="auth-form">
            <h1>"Create an account"</h1>
            {move || error.get().map(|text| view! { <p class="error">{text}</p> })}
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                register.dispatch(RegisterRequest {
                    name: name.get(),
                    email: email.get(),
                    password: password.get(),
                });
            }>
                <label>
                    "Name"
                    <input
                        type="text"
                        required
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        required
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        required
                        minlength="6"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || register.pending().get()>
                    "Register"
                </button>
            </form>
            <p>
                "Already registered? " <A href="/login">"Sign in"</A>
            </p>
        </section>
    }
}
