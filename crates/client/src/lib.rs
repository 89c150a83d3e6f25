//! ShopPrime client SDK.
//!
//! This crate talks to the ShopPrime REST backend and owns the one piece of
//! client-side state with real invariants: the [`cart::CartStore`]. Everything
//! else - products, orders, coupons, the admin back-office - is straight
//! request/response plumbing in [`api::ApiClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopprime_client::api::ApiClient;
//! use shopprime_client::auth::AuthBroker;
//! use shopprime_client::cart::CartStore;
//! use shopprime_client::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config);
//! let auth = AuthBroker::new(api.clone());
//! let cart = CartStore::create(api.clone(), auth.subscribe());
//!
//! auth.sign_in("user@example.com", "password").await?;
//! cart.add_item(&product.id, 1).await?;
//! println!("{} items, total {}", cart.count(), cart.total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod error;
