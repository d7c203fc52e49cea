//! Typed HTTP client for the storefront API. Holds the session context it
//! was given at startup: bearer headers come from it, and any 401 clears it
//! so the guards can push the user back to the login page.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::types::*,
    config,
    state::SessionContext,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Not signed in")]
    Unauthorized,
    #[error("{0}")]
    Api(String),
    #[error("Request failed: {0}")]
    Network(String),
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(session: SessionContext) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
        }
    }

    pub fn new_with_base_url(session: SessionContext, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session,
        }
    }

    fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(config::api_base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::Unauthorized)?;
        Ok(builder.bearer_auth(token))
    }

    /// Browsers only attach the refresh cookie when the fetch opts in.
    fn with_cookies(builder: RequestBuilder) -> RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        {
            builder.fetch_credentials_include()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder
        }
    }

    async fn handle<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // The access token is no longer good; drop the session so the
            // guards redirect to login.
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Network(format!("Bad response body: {}", e)))
        } else {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Request failed with status {}", status));
            Err(ApiError::Api(message))
        }
    }

    // --- auth ---

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let builder = Self::with_cookies(
            self.client.post(self.url("/auth/register")).json(request),
        );
        self.handle(builder).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder =
            Self::with_cookies(self.client.post(self.url("/auth/login")).json(request));
        self.handle(builder).await
    }

    pub async fn refresh(&self) -> Result<AuthResponse, ApiError> {
        let builder = Self::with_cookies(self.client.post(self.url("/auth/refresh")));
        self.handle(builder).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let builder = Self::with_cookies(self.client.post(self.url("/auth/logout")));
        let _: serde_json::Value = self.handle(builder).await?;
        Ok(())
    }

    pub async fn me(&self) -> Result<SessionUser, ApiError> {
        let builder = self.authorized(self.client.get(self.url("/auth/@me")))?;
        self.handle(builder).await
    }

    // --- catalog ---

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.handle(self.client.get(self.url("/products"))).await
    }

    pub async fn product(&self, id: &str) -> Result<Product, ApiError> {
        self.handle(self.client.get(self.url(&format!("/products/{}", id))))
            .await
    }

    pub async fn create_product(
        &self,
        name: &str,
        description: &str,
        price_cents: i64,
        image: (String, Vec<u8>),
    ) -> Result<Product, ApiError> {
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("description", description.to_string())
            .text("price_cents", price_cents.to_string())
            .part(
                "image",
                reqwest::multipart::Part::bytes(image.1).file_name(image.0),
            );
        let builder = self
            .authorized(self.client.post(self.url("/products")))?
            .multipart(form);
        self.handle(builder).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        price_cents: Option<i64>,
        image: Option<(String, Vec<u8>)>,
    ) -> Result<Product, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        if let Some(name) = name {
            form = form.text("name", name.to_string());
        }
        if let Some(description) = description {
            form = form.text("description", description.to_string());
        }
        if let Some(price_cents) = price_cents {
            form = form.text("price_cents", price_cents.to_string());
        }
        if let Some((filename, bytes)) = image {
            form = form.part(
                "image",
                reqwest::multipart::Part::bytes(bytes).file_name(filename),
            );
        }
        let builder = self
            .authorized(self.client.patch(self.url(&format!("/products/{}", id))))?
            .multipart(form);
        self.handle(builder).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let builder =
            self.authorized(self.client.delete(self.url(&format!("/products/{}", id))))?;
        let _: serde_json::Value = self.handle(builder).await?;
        Ok(())
    }

    // --- cart ---

    pub async fn cart(&self) -> Result<CartView, ApiError> {
        let builder = self.authorized(self.client.get(self.url("/cart")))?;
        self.handle(builder).await
    }

    pub async fn add_to_cart(
        &self,
        product_id: &str,
        quantity: Option<i32>,
    ) -> Result<CartView, ApiError> {
        let builder = self
            .authorized(self.client.post(self.url("/cart/add")))?
            .json(&AddToCartRequest {
                product_id: product_id.to_string(),
                quantity,
            });
        self.handle(builder).await
    }

    pub async fn remove_cart_item(&self, item_id: &str) -> Result<CartView, ApiError> {
        let builder = self.authorized(
            self.client
                .delete(self.url(&format!("/cart/item/{}", item_id))),
        )?;
        self.handle(builder).await
    }

    pub async fn clear_cart(&self) -> Result<CartView, ApiError> {
        let builder = self.authorized(self.client.delete(self.url("/cart/clear")))?;
        self.handle(builder).await
    }

    // --- orders ---

    pub async fn orders(&self) -> Result<Vec<OrderView>, ApiError> {
        let builder = self.authorized(self.client.get(self.url("/order")))?;
        self.handle(builder).await
    }

    pub async fn create_order(&self) -> Result<CreateOrderResponse, ApiError> {
        let builder = self.authorized(self.client.post(self.url("/order/create")))?;
        self.handle(builder).await
    }
}
