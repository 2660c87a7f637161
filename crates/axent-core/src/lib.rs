//! # axent-core
//!
//! Ergonomics layer for accessibility-driven UI automation: polling waits
//! for element state, text-predicate filtering over element collections,
//! sibling discovery, and offset-based tapping.
//!
//! The library owns no UI. Everything resolves through the
//! [`AutomationDriver`](driver::AutomationDriver) seam — a tree snapshot
//! plus a tap at absolute coordinates — so any backend that can provide
//! those two operations gets the whole surface.
//!
//! ## Modules
//!
//! - [`driver`] - The backend trait, error type, and pure snapshot searches
//! - [`node`] - Snapshot node and frame types
//! - [`element`] - Re-resolvable element handles, state probes, taps, siblings
//! - [`wait`] - Polling waits for element state
//! - [`query`] - Lazy element queries with the text-filter grid
//! - [`filter`] - Structured text-filter expressions
//! - [`config`] - Persistent wait tuning
//! - [`axe`] - Reference backend over the `axe` accessibility CLI
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axent_core::axe::AxeDriver;
//! use axent_core::driver::AutomationDriver;
//! use axent_core::element::{Element, ElementState};
//! use axent_core::query::ElementQuery;
//! use axent_core::wait::WaitSpec;
//!
//! #[tokio::main]
//! async fn main() {
//!     let driver: Arc<dyn AutomationDriver> = Arc::new(AxeDriver::new("SIMULATOR-UDID"));
//!
//!     // Wait for the login button to become hittable, then tap its center.
//!     let login = Element::by_id(Arc::clone(&driver), "login-button");
//!     if login.wait_for(WaitSpec::default().state(ElementState::Hittable)).await {
//!         login.tap().await.expect("tap failed");
//!     }
//!
//!     // Count the static texts whose label contains both fragments.
//!     let matches = ElementQuery::tree(driver)
//!         .of_kind("StaticText")
//!         .label_containing(&["Order", "shipped"])
//!         .count()
//!         .await
//!         .expect("query failed");
//!     println!("{matches} matching labels");
//! }
//! ```

pub mod axe;
pub mod config;
pub mod driver;
pub mod element;
pub mod filter;
pub mod node;
pub mod query;
pub mod wait;
