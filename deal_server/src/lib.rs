//! # DealStream server
//! This crate hosts the HTTP backend for DealStream. It is responsible for:
//! * Serving the current deals, aggregated across platforms or for a single platform.
//! * Creating payment orders with Razorpay when a customer wants to unlock a deal.
//! * Verifying completed payments and handing out the unlocked deal's affiliate link.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns the server status and time.
//! * `GET /deals`: Every current deal, biggest discount first. `?refresh=true` bypasses the cache.
//! * `GET /deals/{platform}`: The deals for a single platform.
//! * `POST /create_order`: Creates a payment order for unlocking a deal.
//! * `POST /verify_payment`: Verifies a payment and returns the deal's affiliate link.
pub mod cli;
pub mod config;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;
