//! Repository layer over the hosting panel's application API.
//!
//! This service keeps no database; the panel owns every record it works with. Repositories
//! wrap the panel's REST endpoints behind typed methods, decoding panel resources into
//! domain models and encoding parameter models into request bodies so the service layer
//! never deals with URLs or response envelopes.

pub mod panel;
