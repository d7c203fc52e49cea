//! Admin product form, shared between "add" and "edit". The image arrives
//! as a browser `File`; it is read into bytes here and shipped as a
//! multipart part by the API client.

use leptos::*;
use leptos_router::{use_navigate, use_params_map};

use crate::{
    api::{types::Product, ApiClient},
    state::SessionContext,
    utils::format::parse_price_cents,
};

#[derive(Clone)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price_input: String,
    pub file: Option<web_sys::File>,
}

async fn file_to_bytes(file: web_sys::File) -> Result<(String, Vec<u8>), String> {
    let name = file.name();
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Failed to read the selected file".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok((name, bytes))
}

#[component]
pub fn ProductNewPage(session: SessionContext) -> impl IntoView {
    let (error, set_error) = create_signal(Option::<String>::None);
    let api = ApiClient::new(session);
    let navigate = use_navigate();

    let create = create_action(move |data: &ProductFormData| {
        let api = api.clone();
        let navigate = navigate.clone();
        let data = data.clone();
        async move {
            let Some(price_cents) = parse_price_cents(&data.price_input) else {
                set_error.set(Some("Enter a price like 12.50".into()));
                return;
            };
            let Some(file) = data.file else {
                set_error.set(Some("Choose a product image".into()));
                return;
            };
            let image = match file_to_bytes(file).await {
                Ok(image) => image,
                Err(err) => {
                    set_error.set(Some(err));
                    return;
                }
            };
            match api
                .create_product(&data.name, &data.description, price_cents, image)
                .await
            {
                Ok(_) => navigate("/", Default::default()),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    view! {
        <section class="product-form">
            <h1>"Add product"</h1>
            {move || error.get().map(|text| view! { <p class="error">{text}</p> })}
            <ProductForm
                initial=None
                submit_label="Create"
                on_submit=Callback::new(move |data| create.dispatch(data))
            />
        </section>
    }
}

#[component]
pub fn ProductEditPage(session: SessionContext) -> impl IntoView {
    let params = use_params_map();
    let product_id =
        move || params.with(|p| p.get("id").cloned()).unwrap_or_default();

    let (error, set_error) = create_signal(Option::<String>::None);

    let load_api = ApiClient::new(session);
    let product = create_local_resource(product_id, move |id| {
        let api = load_api.clone();
        async move { api.product(&id).await }
    });

    let update_api = ApiClient::new(session);
    let navigate = use_navigate();
    let update = create_action(move |input: &(String, ProductFormData)| {
        let api = update_api.clone();
        let navigate = navigate.clone();
        let (id, data) = input.clone();
        async move {
            let Some(price_cents) = parse_price_cents(&data.price_input) else {
                set_error.set(Some("Enter a price like 12.50".into()));
                return;
            };
            let image = match data.file {
                Some(file) => match file_to_bytes(file).await {
                    Ok(image) => Some(image),
                    Err(err) => {
                        set_error.set(Some(err));
                        return;
                    }
                },
                None => None,
            };
            match api
                .update_product(
                    &id,
                    Some(&data.name),
                    Some(&data.description),
                    Some(price_cents),
                    image,
                )
                .await
            {
                Ok(_) => navigate("/", Default::default()),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    view! {
        <section class="product-form">
            <h1>"Edit product"</h1>
            {move || error.get().map(|text| view! { <p class="error">{text}</p> })}
            {move || match product.get() {
                None => view! { <p>"Loading product"</p> }.into_view(),
                Some(Err(err)) => view! { <p class="error">{err.to_string()}</p> }.into_view(),
                Some(Ok(product)) => {
                    let id = product.id.clone();
                    view! {
                        <ProductForm
                            initial=Some(product)
                            submit_label="Save changes"
                            on_submit=Callback::new(move |data| {
                                update.dispatch((id.clone(), data))
                            })
                        />
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

#[component]
fn ProductForm(
    initial: Option<Product>,
    submit_label: &'static str,
    #[prop(into)] on_submit: Callback<ProductFormData>,
) -> impl IntoView {
    let initial_price = initial
        .as_ref()
        .map(|p| format!("{}.{:02}", p.price_cents / 100, p.price_cents % 100))
        .unwrap_or_default();
    let (name, set_name) =
        create_signal(initial.as_ref().map(|p| p.name.clone()).unwrap_or_default());
    let (description, set_description) = create_signal(
        initial
            .as_ref()
            .map(|p| p.description.clone())
            .unwrap_or_default(),
    );
    let (price_input, set_price_input) = create_signal(initial_price);
    let (file, set_file) = create_signal(Option::<web_sys::File>::None);
    let image_required = initial.is_none();

    view! {
        <form on:submit=move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            on_submit.call(ProductFormData {
                name: name.get(),
                description: description.get(),
                price_input: price_input.get(),
                file: file.get(),
            });
        }>
            <label>
                "Name"
                <input
                    type="text"
                    required
                    minlength="2"
                    maxlength="32"
                    prop:value=name
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Description"
                <textarea
                    prop:value=description
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label>
                "Price"
                <input
                    type="text"
                    required
                    placeholder="12.50"
                    prop:value=price_input
                    on:input=move |ev| set_price_input.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Image"
                <input
                    type="file"
                    accept="image/*"
                    required=image_required
                    on:change=move |ev| {
                        let input = event_target::<web_sys::HtmlInputElement>(&ev);
                        set_file.set(input.files().and_then(|files| files.get(0)));
                    }
                />
            </label>
            <button type="submit">{submit_label}</button>
        </form>
    }
}
