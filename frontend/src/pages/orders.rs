//! Order history. Totals come from the snapshot prices recorded at
//! checkout, not the live catalog.

use leptos::*;

use crate::{
    api::{
        types::{OrderItem, OrderView},
        ApiClient,
    },
    state::SessionContext,
    utils::format::format_price,
};

#[component]
pub fn OrdersPage(session: SessionContext) -> impl IntoView {
    let api = ApiClient::new(session);
    let orders = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.orders().await }
        },
    );

    view! {
        <section class="orders">
            <h1>"Your orders"</h1>
            {move || match orders.get() {
                None => view! { <p>"Loading orders"</p> }.into_view(),
                Some(Err(err)) => view! { <p class="error">{err.to_string()}</p> }.into_view(),
                Some(Ok(orders)) => {
                    if orders.is_empty() {
                        view! { <p>"No orders yet."</p> }.into_view()
                    } else {
                        view! {
                            <ul class="order-list">
                                <For
                                    each=move || orders.clone()
                                    key=|order| order.id.clone()
                                    children=move |order: OrderView| {
                                        view! {
                                            <li class="order">
                                                <h2>
                                                    "Order placed " {order.created_at.clone()}
                                                    " · " {format_price(order.total_cents)}
                                                </h2>
                                                <ul class="order-items">
                                                    <For
                                                        each=move || order.items.clone()
                                                        key=|item| item.id.clone()
                                                        children=|item: OrderItem| {
                                                            let name = item
                                                                .product
                                                                .as_ref()
                                                                .map(|p| p.name.clone())
                                                                .unwrap_or_else(|| {
                                                                    "(no longer in catalog)".to_string()
                                                                });
                                                            view! {
                                                                <li class="order-line">
                                                                    <span class="name">{name}</span>
                                                                    <span class="quantity">
                                                                        {format!("x{}", item.quantity)}
                                                                    </span>
                                                                    <span class="snapshot-price">
                                                                        {format_price(item.price_cents)}
                                                                    </span>
                                                                </li>
                                                            }
                                                        }
                                                    />
                                                </ul>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        }
                        .into_view()
                    }
                }
            }}
        </section>
    }
}
