//! Cloudflare Pages hosting provider for siteforge
//!
//! Implements [`siteforge_providers::HostingProvider`] over the Cloudflare
//! v4 API. All responses arrive in the `{ success, result, errors }`
//! envelope; the first error message is surfaced when `success` is false.
//!
//! # Requirements
//!
//! - An API token with Pages edit permission
//! - `CLOUDFLARE_API_TOKEN` and `CLOUDFLARE_ACCOUNT_ID` set when
//!   configuring from the environment

pub mod pages;

pub use pages::{CloudflarePages, CloudflarePagesConfig};
