use leptos::*;
use leptos_router::{use_navigate, A};

use crate::{
    api::{types::LoginRequest, ApiClient},
    state::SessionContext,
};

#[component]
pub fn LoginPage(session: SessionContext) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);

    let api = ApiClient::new(session);
    let navigate = use_navigate();
    let login = create_action(move |request: &LoginRequest| {
        let api = api.clone();
        let navigate = navigate.clone();
        let request = request.clone();
        async move {
            match api.login(&request).await {
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
            <h1>"Sign in"</h1>
            {move || error.get().map(|text| view! { <p class="error">{text}</p> })}
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                login.dispatch(LoginRequest {
                    email: email.get(),
                    password: password.get(),
                });
            }>
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
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || login.pending().get()>
                    "Sign in"
                </button>
            </form>
            <p>
                "New here? " <A href="/register">"Create an account"</A>
            </p>
        </section>
    }
}
