//! Route guards. Each takes the session context explicitly and either
//! renders its children or redirects away.

use leptos::*;
use leptos_router::Redirect;

use crate::state::SessionContext;

#[component]
pub fn RequireAuth(session: SessionContext, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAdmin(session: SessionContext, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show
            when=move || session.is_admin()
            fallback=|| view! { <Redirect path="/"/> }
        >
            {children()}
        </Show>
    }
}
