#[cfg(target_arch = "wasm32")]
fn main() {
    use leptos::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Starting Shopfront frontend");

    mount_to_body(|| view! { <shopfront_frontend::App/> });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // The browser bundle is the real entry point; nothing runs natively.
}
