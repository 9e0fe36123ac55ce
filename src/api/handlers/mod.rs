//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod root;
pub mod shorten;
pub mod top_domains;

pub use health::health_handler;
pub use links::delete_url_handler;
pub use redirect::redirect_handler;
pub use root::root_handler;
pub use shorten::shorten_handler;
pub use top_domains::top_domains_handler;
