//! Cart page: line items, running total, checkout.

use leptos::*;
use leptos_router::use_navigate;

use crate::{
    api::{types::CartItem, ApiClient},
    config,
    state::SessionContext,
    utils::format::format_price,
};

#[component]
pub fn CartPage(session: SessionContext) -> impl IntoView {
    let (version, set_version) = create_signal(0u32);
    let (error, set_error) = create_signal(Option::<String>::None);

    let cart_api = ApiClient::new(session);
    let cart = create_local_resource(
        move || version.get(),
        move |_| {
            let api = cart_api.clone();
            async move { api.cart().await }
        },
    );

    let remove_api = ApiClient::new(session);
    let remove_item = create_action(move |item_id: &String| {
        let api = remove_api.clone();
        let item_id = item_id.clone();
        async move {
            match api.remove_cart_item(&item_id).await {
                Ok(_) => set_version.update(|n| *n += 1),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let clear_api = ApiClient::new(session);
    let clear_cart = create_action(move |_: &()| {
        let api = clear_api.clone();
        async move {
            match api.clear_cart().await {
                Ok(_) => set_version.update(|n| *n += 1),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let checkout_api = ApiClient::new(session);
    let navigate = use_navigate();
    let checkout = create_action(move |_: &()| {
        let api = checkout_api.clone();
        let navigate = navigate.clone();
        async move {
            match api.create_order().await {
                Ok(_) => navigate("/orders", Default::default()),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    view! {
        <section class="cart">
            <h1>"Your cart"</h1>
            {move || error.get().map(|text| view! { <p class="error">{text}</p> })}
            {move || match cart.get() {
                None => view! { <p>"Loading cart"</p> }.into_view(),
                Some(Err(err)) => view! { <p class="error">{err.to_string()}</p> }.into_view(),
                Some(Ok(cart)) => {
                    if cart.items.is_empty() {
                        view! { <p>"Your cart is empty."</p> }.into_view()
                    } else {
                        let total = cart.total_cents();
                        view! {
                            <ul class="cart-items">
                                <For
                                    each=move || cart.items.clone()
                                    key=|item| item.id.clone()
                                    children=move |item: CartItem| {
                                        let item_id = item.id.clone();
                                        let line_total =
                                            item.product.price_cents * i64::from(item.quantity);
                                        view! {
                                            <li class="cart-line">
                                                <img
                                                    src=config::asset_url(&item.product.image)
                                                    alt=item.product.name.clone()
                                                />
                                                <span class="name">{item.product.name.clone()}</span>
                                                <span class="quantity">{format!("x{}", item.quantity)}</span>
                                                <span class="line-total">{format_price(line_total)}</span>
                                                <button on:click=move |_| remove_item.dispatch(item_id.clone())>
                                                    "Remove"
                                                </button>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                            <p class="cart-total">"Total: " {format_price(total)}</p>
                            <div class="cart-actions">
                                <button on:click=move |_| clear_cart.dispatch(())>"Clear cart"</button>
                                <button class="primary" on:click=move |_| checkout.dispatch(())>
                                    "Place order"
                                </button>
                            </div>
                        }
                        .into_view()
                    }
                }
            }}
        </section>
    }
}
