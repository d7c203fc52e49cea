use leptos::*;
use leptos_router::{Route, Router, Routes};

pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

use components::{
    guard::{RequireAdmin, RequireAuth},
    header::Header,
};
use pages::{
    cart::CartPage,
    login::LoginPage,
    orders::OrdersPage,
    product_form::{ProductEditPage, ProductNewPage},
    products::ProductsPage,
    register::RegisterPage,
};
use state::SessionContext;

/// Application root. The session context is created exactly once here and
/// passed explicitly to the header, the guards, and every page.
#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::init_from_storage();

    view! {
        <Router>
            <Header session/>
            <main>
                <Routes>
                    <Route path="/" view=move || view! { <ProductsPage session/> }/>
                    <Route path="/login" view=move || view! { <LoginPage session/> }/>
                    <Route path="/register" view=move || view! { <RegisterPage session/> }/>
                    <Route
                        path="/cart"
                        view=move || {
                            view! {
                                <RequireAuth session>
                                    <CartPage session/>
                                </RequireAuth>
                            }
                        }
                    />
                    <Route
                        path="/orders"
                        view=move || {
                            view! {
                                <RequireAuth session>
                                    <OrdersPage session/>
                                </RequireAuth>
                            }
                        }
                    />
                    <Route
                        path="/products/new"
                        view=move || {
                            view! {
                                <RequireAdmin session>
                                    <ProductNewPage session/>
                                </RequireAdmin>
                            }
                        }
                    />
                    <Route
                        path="/products/:id/edit"
                        view=move || {
                            view! {
                                <RequireAdmin session>
                                    <ProductEditPage session/>
                                </RequireAdmin>
                            }
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
