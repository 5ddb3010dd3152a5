//! A client for the phpList REST API: subscribers, lists, and list
//! membership, one form-encoded POST per command.
//!
//! ## Example
//!
//! ```no_run
//! use phplist_restapi_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), phplist_restapi_client::Error> {
//!     let client = Client::new(
//!         "https://website.com/lists/admin/?pi=restapi&page=call",
//!         "admin",
//!         "password",
//!     );
//!
//!     if !client.login().await? {
//!         eprintln!("login failed");
//!         return Ok(());
//!     }
//!
//!     match client.subscriber_add("someone@example.com").await? {
//!         Some(id) => println!("added subscriber {id}"),
//!         None => eprintln!("the server rejected the subscriber"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::Client;
pub use error::Error;
pub use transport::{HttpTransport, ReqwestTransport};
