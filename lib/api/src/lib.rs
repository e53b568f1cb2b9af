//! # hemicycle API
//!
//! HTTP surface over a [`hemicycle_storage::SnapshotStore`].
//!
//! | Route | Method | Body / result |
//! |-------|--------|---------------|
//! | `/` | GET | version and snapshot counts |
//! | `/groups` | GET | `{"result": {"Group 1": [names...]}}` |
//! | `/measures` | GET | `{"result": [{"key", "title"}], "ambiguous": [keys]}` |
//! | `/submit` | POST | `{key: choice}` to `{"result": [{"name", "similarity", "id"}]}` |
//! | `/reload` | POST | rebuild the snapshot from the source directories |
//! | `/dendrograms/{filename}` | GET | rendered SVG artifacts |
//!
//! Client errors come back as `400` with `{"error": message}`.

pub mod rest;

pub use rest::RestApi;
