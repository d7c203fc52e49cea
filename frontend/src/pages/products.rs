//! Catalog page: the storefront landing view.

use leptos::*;
use leptos_router::A;

use crate::{
    api::{types::Product, ApiClient},
    config,
    state::SessionContext,
    utils::format::format_price,
};

#[component]
pub fn ProductsPage(session: SessionContext) -> impl IntoView {
    let (version, set_version) = create_signal(0u32);
    let (notice, set_notice) = create_signal(Option::<String>::None);

    let list_api = ApiClient::new(session);
    let products = create_local_resource(
        move || version.get(),
        move |_| {
            let api = list_api.clone();
            async move { api.products().await }
        },
    );

    let add_api = ApiClient::new(session);
    let add_to_cart = create_action(move |product_id: &String| {
        let api = add_api.clone();
        let product_id = product_id.clone();
        async move {
            match api.add_to_cart(&product_id, None).await {
                Ok(_) => set_notice.set(Some("Added to cart".into())),
                Err(err) => set_notice.set(Some(err.to_string())),
            }
        }
    });

    let delete_api = ApiClient::new(session);
    let delete_product = create_action(move |product_id: &String| {
        let api = delete_api.clone();
        let product_id = product_id.clone();
        async move {
            match api.delete_product(&product_id).await {
                Ok(()) => set_version.update(|n| *n += 1),
                Err(err) => set_notice.set(Some(err.to_string())),
            }
        }
    });

    view! {
        <section class="catalog">
            <h1>"Catalog"</h1>
            {move || notice.get().map(|text| view! { <p class="notice">{text}</p> })}
            {move || match products.get() {
                None => view! { <p>"Loading catalog"</p> }.into_view(),
                Some(Err(err)) => view! { <p class="error">{err.to_string()}</p> }.into_view(),
                Some(Ok(items)) => {
                    if items.is_empty() {
                        view! { <p>"Nothing for sale yet."</p> }.into_view()
                    } else {
                        view! {
                            <ul class="product-grid">
                                <For
                                    each=move || items.clone()
                                    key=|product| product.id.clone()
                                    children=move |product: Product| {
                                        let add_id = product.id.clone();
                                        let delete_id = product.id.clone();
                                        let edit_href = format!("/products/{}/edit", product.id);
                                        view! {
                                            <li class="product-card">
                                                <img src=config::asset_url(&product.image) alt=product.name.clone()/>
                                                <h2>{product.name.clone()}</h2>
                                                <p class="description">{product.description.clone()}</p>
                                                <p class="price">{format_price(product.price_cents)}</p>
                                                <Show when=move || session.is_authenticated()>
                                                    {
                                                        let add_id = add_id.clone();
                                                        view! {
                                                            <button on:click=move |_| add_to_cart.dispatch(add_id.clone())>
                                                                "Add to cart"
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                                <Show when=move || session.is_admin()>
                                                    {
                                                        let delete_id = delete_id.clone();
                                                        let edit_href = edit_href.clone();
                                                        view! {
                                                            <span class="admin-tools">
                                                                <A href=edit_href>"Edit"</A>
                                                                <button on:click=move |_| delete_product.dispatch(delete_id.clone())>
                                                                    "Delete"
                                                                </button>
                                                            </span>
                                                        }
                                                    }
                                                </Show>
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
