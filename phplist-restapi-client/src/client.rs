use crate::{
    error::Error,
    models::{id_field, total_field, Envelope},
    transport::{HttpTransport, ReqwestTransport},
};
use reqwest::{IntoUrl, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A client for the phpList REST API.
///
/// Every operation is one form-encoded POST to the configured endpoint,
/// with command selection via the `cmd` field, and one interpretation of
/// the `{status, data}` response envelope. Operations return `None` (or
/// `false`) when the server reports an error or the payload is missing the
/// expected field; only transport faults surface as [`Error`].
#[derive(Clone)]
pub struct Client {
    url: Url,
    login: String,
    password: String,
    secret: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Initializes a new client with the default transport (10 second
    /// timeout, cookie jar enabled so a login session persists across
    /// calls within this client's lifetime).
    ///
    /// The URL is the full API endpoint, typically something like
    /// `https://website.com/lists/admin/?pi=restapi&page=call`.
    ///
    /// ## Panic
    ///
    /// This function panics if `url` is not a valid URL.
    pub fn new<U: IntoUrl, S: Into<String>>(url: U, login: S, password: S) -> Self {
        Self {
            url: url.into_url().unwrap(),
            login: login.into(),
            password: password.into(),
            secret: None,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// Sets the remote processing secret, appended as `secret` to every
    /// outgoing call. An empty secret is treated as unset.
    pub fn with_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Replaces the HTTP transport. This is the seam tests use to script
    /// responses without a network.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Dispatches one command: merges in `cmd` and the optional secret,
    /// posts the form, and parses the body. `Ok(None)` means the body was
    /// not a well-formed envelope; transport faults are the only `Err`.
    async fn call_api(
        &self,
        command: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<Option<Envelope>, Error> {
        params.push(param("cmd", command));
        match &self.secret {
            Some(secret) if !secret.is_empty() => params.push(param("secret", secret)),
            _ => {}
        }

        debug!(command, "dispatching API call");
        let body = self.transport.post_form(&self.url, &params).await?;

        let envelope: Option<Envelope> = serde_json::from_str(&body).ok();
        if envelope.is_none() {
            debug!(command, "response body was not a well-formed envelope");
        }
        Ok(envelope)
    }

    async fn call_for_data(
        &self,
        command: &str,
        params: Vec<(String, String)>,
    ) -> Result<Option<Value>, Error> {
        Ok(self
            .call_api(command, params)
            .await?
            .and_then(Envelope::into_data))
    }

    async fn call_for_id(
        &self,
        command: &str,
        params: Vec<(String, String)>,
    ) -> Result<Option<u64>, Error> {
        Ok(self
            .call_for_data(command, params)
            .await?
            .and_then(|data| id_field(&data)))
    }

    /// Logs in with the configured credentials. Returns whether the server
    /// accepted them.
    pub async fn login(&self) -> Result<bool, Error> {
        let params = vec![
            param("login", &self.login),
            param("password", &self.password),
        ];
        Ok(self
            .call_api("login", params)
            .await?
            .is_some_and(|env| env.is_success()))
    }

    /// Fetches all lists. Returns the raw `data` payload (an array of list
    /// objects) exactly as the server sent it.
    pub async fn lists_get(&self) -> Result<Option<Value>, Error> {
        self.call_for_data("listsGet", vec![]).await
    }

    /// Creates a list and returns its id.
    pub async fn list_add(&self, name: &str, description: &str) -> Result<Option<u64>, Error> {
        let params = vec![
            param("name", name),
            param("description", description),
            param("listorder", "0"),
            param("active", "1"),
        ];
        self.call_for_id("listAdd", params).await
    }

    /// Finds a subscriber by email address and returns their id.
    pub async fn subscriber_find_by_email(&self, email: &str) -> Result<Option<u64>, Error> {
        let params = vec![param("email", email)];
        self.call_for_id("subscriberGetByEmail", params).await
    }

    /// Subscribes an email address to one or more lists, as a
    /// non-confirmed subscriber; phpList then sends its
    /// request-for-confirmation email.
    ///
    /// `lists` is a comma-separated string of list ids, e.g. `"1,2,3"`,
    /// passed through to the server verbatim.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use phplist_restapi_client::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), phplist_restapi_client::Error> {
    ///     let client = Client::new(
    ///         "https://website.com/lists/admin/?pi=restapi&page=call",
    ///         "admin",
    ///         "password",
    ///     );
    ///     match client.subscribe("someone@example.com", "1,2").await? {
    ///         Some(id) => println!("subscribed with id {id}"),
    ///         None => eprintln!("the server rejected the subscription"),
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn subscribe(&self, email: &str, lists: &str) -> Result<Option<u64>, Error> {
        let params = vec![
            param("email", email),
            param("foreignkey", ""),
            param("htmlemail", "1"),
            param("subscribepage", "0"),
            param("lists", lists),
        ];
        self.call_for_id("subscribe", params).await
    }

    /// Adds a subscriber directly as confirmed, bypassing the
    /// confirmation email. Returns the new subscriber's id.
    pub async fn subscriber_add(&self, email: &str) -> Result<Option<u64>, Error> {
        let params = vec![
            param("email", email),
            param("foreignkey", ""),
            param("confirmed", "1"),
            param("htmlemail", "1"),
            param("disabled", "0"),
        ];
        self.call_for_id("subscriberAdd", params).await
    }

    /// Updates a subscriber's email address. Returns the subscriber's id.
    pub async fn subscriber_update(&self, id: u64, email: &str) -> Result<Option<u64>, Error> {
        let params = vec![
            param("id", id.to_string()),
            param("email", email),
            param("confirmed", "1"),
            param("htmlemail", "1"),
        ];
        self.call_for_id("subscriberUpdate", params).await
    }

    /// Deletes a subscriber. Returns whether the server confirmed the
    /// deletion.
    pub async fn subscriber_delete(&self, id: u64) -> Result<bool, Error> {
        let params = vec![param("id", id.to_string())];
        Ok(self
            .call_api("subscriberDelete", params)
            .await?
            .is_some_and(|env| env.is_success()))
    }

    /// Fetches a subscriber by id.
    ///
    /// Returns the subscriber payload only when the response's `data.id`
    /// matches the requested id; a success envelope carrying some other
    /// subscriber is discarded.
    pub async fn subscriber_get(&self, id: u64) -> Result<Option<Value>, Error> {
        let params = vec![param("id", id.to_string())];
        let data = self.call_for_data("subscriberGet", params).await?;
        Ok(data.filter(|data| id_field(data) == Some(id)))
    }

    /// Fetches a subscriber by foreign key. Unlike
    /// [`subscriber_find_by_email`](Self::subscriber_find_by_email) this
    /// returns the whole subscriber payload, not just the id.
    pub async fn subscriber_get_by_foreignkey(
        &self,
        foreignkey: &str,
    ) -> Result<Option<Value>, Error> {
        let params = vec![param("foreignkey", foreignkey)];
        let data = self
            .call_for_data("subscriberGetByForeignkey", params)
            .await?;
        Ok(data.filter(|data| id_field(data).is_some()))
    }

    /// Returns the total number of subscribers in the system.
    pub async fn subscriber_count(&self) -> Result<Option<u64>, Error> {
        Ok(self
            .call_for_data("subscribersCount", vec![])
            .await?
            .and_then(|data| total_field(&data)))
    }

    /// Adds a subscriber to an existing list. Returns the lists the
    /// subscriber is now a member of.
    pub async fn list_subscriber_add(
        &self,
        list_id: u64,
        subscriber_id: u64,
    ) -> Result<Option<Value>, Error> {
        let params = vec![
            param("list_id", list_id.to_string()),
            param("subscriber_id", subscriber_id.to_string()),
        ];
        self.call_for_data("listSubscriberAdd", params).await
    }

    /// Returns the lists a subscriber is a member of.
    pub async fn lists_subscriber(&self, subscriber_id: u64) -> Result<Option<Value>, Error> {
        let params = vec![param("subscriber_id", subscriber_id.to_string())];
        self.call_for_data("listsSubscriber", params).await
    }

    /// Removes a subscriber from a list. Returns the lists the subscriber
    /// remains a member of.
    pub async fn list_subscriber_delete(
        &self,
        list_id: u64,
        subscriber_id: u64,
    ) -> Result<Option<Value>, Error> {
        let params = vec![
            param("list_id", list_id.to_string()),
            param("subscriber_id", subscriber_id.to_string()),
        ];
        self.call_for_data("listSubscriberDelete", params).await
    }
}

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}
