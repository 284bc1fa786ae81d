//! REST client for the storefront API.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_core::sale::SaleStatus;
use storefront_core::submission::{
    BusinessEnquiryStatus, ContactStatus, InquiryStatus, SubmissionStatus,
};
use storefront_core::types::DbId;

use crate::error::ClientError;
use crate::session::Session;
use crate::types::{
    Accepted, AuthPayload, BusinessEnquiry, Contact, Credentials, Deleted, Envelope, Inquiry,
    NewBusinessEnquiry, NewContact, NewInquiry, NewProduct, NewSale, Product, ProductChanges,
    ProductQuery, Registration, Sale, SaleChanges, SaleQuery, SalesStats, StatusChange,
    StatusQuery, User,
};

/// HTTP client for one storefront API deployment.
///
/// Holds at most one [`Session`]; every request made while a session is
/// present carries its bearer token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// * `base_url` - API root including the `/api` prefix, e.g.
    ///   `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // ---- session lifecycle ----

    /// Sign in and keep the resulting session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        let payload: AuthPayload = self
            .send_data(
                self.request(Method::POST, "/auth/login")
                    .json(&Credentials { email, password }),
            )
            .await?;
        tracing::debug!(user_id = payload.user.id, "Signed in");
        Ok(self.session.insert(Session::new(payload.token, payload.user)))
    }

    /// Create a `user`-role account. The current session is left as is.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, ClientError> {
        self.send_data(
            self.request(Method::POST, "/auth/register")
                .json(&Registration { name, email, password }),
        )
        .await
    }

    /// Forget the current session. Returns it, if there was one.
    pub fn logout(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(s) = &session {
            tracing::debug!(user_id = s.user.id, "Signed out");
        }
        session
    }

    /// Re-establish a session from a stored token.
    ///
    /// The token is checked against `/auth/me`. It is dropped, leaving the
    /// client signed out, if the check fails for any reason or the user is
    /// not an admin.
    pub async fn restore(&mut self, token: String) -> Option<&Session> {
        let result: Result<User, ClientError> = self
            .send_data(self.http.get(self.url("/auth/me")).bearer_auth(&token))
            .await;

        match result {
            Ok(user) => {
                let session = Session::new(token, user);
                if session.is_admin() {
                    return Some(self.session.insert(session));
                }
                tracing::warn!(
                    user_id = session.user.id,
                    "Stored session is not an admin, dropping it"
                );
            }
            Err(e) => tracing::warn!(error = %e, "Stored session is no longer valid, dropping it"),
        }
        self.session = None;
        None
    }

    /// Fetch the signed-in user from the server.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.send_data(self.authed(Method::GET, "/auth/me")?).await
    }

    // ---- products ----

    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ClientError> {
        self.send_data(self.request(Method::GET, "/products").query(query))
            .await
    }

    /// Look a product up by system id or external business id.
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        self.send_data(self.request(Method::GET, &format!("/products/{id}")))
            .await
    }

    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, ClientError> {
        self.send_data(self.authed(Method::POST, "/products")?.json(input))
            .await
    }

    pub async fn update_product(
        &self,
        id: &str,
        changes: &ProductChanges,
    ) -> Result<Product, ClientError> {
        self.send_data(self.authed(Method::PUT, &format!("/products/{id}"))?.json(changes))
            .await
    }

    /// Retire a product. It stays retrievable by admins.
    pub async fn delete_product(&self, id: &str) -> Result<Product, ClientError> {
        self.send_data(self.authed(Method::DELETE, &format!("/products/{id}"))?)
            .await
    }

    // ---- inquiries ----

    pub async fn submit_inquiry(
        &self,
        input: &NewInquiry,
    ) -> Result<Accepted<Inquiry>, ClientError> {
        self.send_accepted(self.request(Method::POST, "/inquiries").json(input))
            .await
    }

    pub async fn list_inquiries(
        &self,
        status: Option<InquiryStatus>,
    ) -> Result<Vec<Inquiry>, ClientError> {
        self.list_submissions("/inquiries", status).await
    }

    pub async fn get_inquiry(&self, id: DbId) -> Result<Inquiry, ClientError> {
        self.send_data(self.authed(Method::GET, &format!("/inquiries/{id}"))?)
            .await
    }

    pub async fn set_inquiry_status(
        &self,
        id: DbId,
        status: InquiryStatus,
    ) -> Result<Inquiry, ClientError> {
        self.set_status("/inquiries", id, status).await
    }

    pub async fn delete_inquiry(&self, id: DbId) -> Result<Deleted, ClientError> {
        self.send_data(self.authed(Method::DELETE, &format!("/inquiries/{id}"))?)
            .await
    }

    // ---- contacts ----

    pub async fn submit_contact(
        &self,
        input: &NewContact,
    ) -> Result<Accepted<Contact>, ClientError> {
        self.send_accepted(self.request(Method::POST, "/contacts").json(input))
            .await
    }

    pub async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<Contact>, ClientError> {
        self.list_submissions("/contacts", status).await
    }

    pub async fn get_contact(&self, id: DbId) -> Result<Contact, ClientError> {
        self.send_data(self.authed(Method::GET, &format!("/contacts/{id}"))?)
            .await
    }

    pub async fn set_contact_status(
        &self,
        id: DbId,
        status: ContactStatus,
    ) -> Result<Contact, ClientError> {
        self.set_status("/contacts", id, status).await
    }

    pub async fn delete_contact(&self, id: DbId) -> Result<Deleted, ClientError> {
        self.send_data(self.authed(Method::DELETE, &format!("/contacts/{id}"))?)
            .await
    }

    // ---- business enquiries ----

    pub async fn submit_business_enquiry(
        &self,
        input: &NewBusinessEnquiry,
    ) -> Result<Accepted<BusinessEnquiry>, ClientError> {
        self.send_accepted(self.request(Method::POST, "/business-enquiries").json(input))
            .await
    }

    pub async fn list_business_enquiries(
        &self,
        status: Option<BusinessEnquiryStatus>,
    ) -> Result<Vec<BusinessEnquiry>, ClientError> {
        self.list_submissions("/business-enquiries", status).await
    }

    pub async fn get_business_enquiry(&self, id: DbId) -> Result<BusinessEnquiry, ClientError> {
        self.send_data(self.authed(Method::GET, &format!("/business-enquiries/{id}"))?)
            .await
    }

    pub async fn set_business_enquiry_status(
        &self,
        id: DbId,
        status: BusinessEnquiryStatus,
    ) -> Result<BusinessEnquiry, ClientError> {
        self.set_status("/business-enquiries", id, status).await
    }

    pub async fn delete_business_enquiry(&self, id: DbId) -> Result<Deleted, ClientError> {
        self.send_data(self.authed(Method::DELETE, &format!("/business-enquiries/{id}"))?)
            .await
    }

    // ---- sales ----

    pub async fn list_sales(&self, query: &SaleQuery) -> Result<Vec<Sale>, ClientError> {
        self.send_data(self.authed(Method::GET, "/sales")?.query(query))
            .await
    }

    /// Completed-sale total within the query window, plus the trailing
    /// monthly and daily series. The query's `status` is ignored.
    pub async fn sales_stats(&self, query: &SaleQuery) -> Result<SalesStats, ClientError> {
        let window = SaleQuery {
            status: None,
            ..query.clone()
        };
        self.send_data(self.authed(Method::GET, "/sales/stats")?.query(&window))
            .await
    }

    pub async fn get_sale(&self, id: DbId) -> Result<Sale, ClientError> {
        self.send_data(self.authed(Method::GET, &format!("/sales/{id}"))?)
            .await
    }

    pub async fn create_sale(&self, input: &NewSale) -> Result<Sale, ClientError> {
        self.send_data(self.authed(Method::POST, "/sales")?.json(input))
            .await
    }

    pub async fn update_sale(&self, id: DbId, changes: &SaleChanges) -> Result<Sale, ClientError> {
        self.send_data(self.authed(Method::PUT, &format!("/sales/{id}"))?.json(changes))
            .await
    }

    pub async fn set_sale_status(&self, id: DbId, status: SaleStatus) -> Result<Sale, ClientError> {
        let changes = SaleChanges {
            status: Some(status),
            ..SaleChanges::default()
        };
        self.update_sale(id, &changes).await
    }

    pub async fn delete_sale(&self, id: DbId) -> Result<Deleted, ClientError> {
        self.send_data(self.authed(Method::DELETE, &format!("/sales/{id}"))?)
            .await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request, attaching the session token when there is one.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// Build a request that requires a session.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.http.request(method, self.url(path)).bearer_auth(&session.token))
    }

    async fn list_submissions<S, T>(
        &self,
        path: &str,
        status: Option<S>,
    ) -> Result<Vec<T>, ClientError>
    where
        S: SubmissionStatus,
        T: DeserializeOwned,
    {
        let query = StatusQuery {
            status: status.map(|s| s.as_str()),
        };
        self.send_data(self.authed(Method::GET, path)?.query(&query))
            .await
    }

    async fn set_status<S, T>(&self, path: &str, id: DbId, status: S) -> Result<T, ClientError>
    where
        S: SubmissionStatus,
        T: DeserializeOwned,
    {
        self.send_data(
            self.authed(Method::PUT, &format!("{path}/{id}/status"))?
                .json(&StatusChange {
                    status: status.as_str(),
                }),
        )
        .await
    }

    async fn send_data<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let envelope = Self::parse_envelope::<T>(builder.send().await?).await?;
        Self::require_data(envelope)
    }

    async fn send_accepted<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Accepted<T>, ClientError> {
        let mut envelope = Self::parse_envelope::<T>(builder.send().await?).await?;
        let warnings = std::mem::take(&mut envelope.warnings);
        for warning in &warnings {
            tracing::warn!(warning = %warning, "Submission accepted with warning");
        }
        Ok(Accepted {
            record: Self::require_data(envelope)?,
            warnings,
        })
    }

    /// Decode the envelope, mapping non-2xx statuses and `success: false`
    /// bodies to [`ClientError::Api`].
    async fn parse_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Envelope<T>, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Error bodies are usually envelopes, but a proxy or an unknown
            // route may answer with anything.
            let reason = || status.canonical_reason().unwrap_or("error").to_string();
            let (message, errors) =
                match serde_json::from_slice::<Envelope<serde_json::Value>>(&bytes) {
                    Ok(env) => (env.message.unwrap_or_else(reason), env.errors),
                    Err(_) => (reason(), Vec::new()),
                };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
                errors,
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        if !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.message.unwrap_or_default(),
                errors: envelope.errors,
            });
        }
        Ok(envelope)
    }

    fn require_data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
        envelope.data.ok_or_else(|| ClientError::Api {
            status: 200,
            message: "Response carried no data".to_string(),
            errors: Vec::new(),
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.session.is_some())
            .finish()
    }
}
