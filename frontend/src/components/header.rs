use leptos::*;
use leptos_router::A;

use crate::{api::ApiClient, state::SessionContext};

#[component]
pub fn Header(session: SessionContext) -> impl IntoView {
    let api = ApiClient::new(session);
    let logout = create_action(move |_: &()| {
        let api = api.clone();
        async move {
            // Clearing the cookie server-side can fail silently; the local
            // session is dropped either way.
            let _ = api.logout().await;
            session.clear();
        }
    });

    view! {
        <header class="site-header">
            <A href="/" class="brand">"Shopfront"</A>
            <nav>
                <A href="/">"Catalog"</A>
                <Show
                    when=move || session.is_authenticated()
                    fallback=|| {
                        view! {
                            <A href="/login">"Sign in"</A>
                            <A href="/register">"Register"</A>
                        }
                    }
                >
                    <A href="/cart">"Cart"</A>
                    <A href="/orders">"Orders"</A>
                    <Show when=move || session.is_admin()>
                        <A href="/products/new">"Add product"</A>
                    </Show>
                    <button class="link-button" on:click=move |_| logout.dispatch(())>
                        "Sign out"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
