//! Camera module - view parameters and view-frustum tests.
//!
//! `ViewParams` is derived once per frame from a camera pose and consumed
//! read-only by the boundary engine and the proxy resolver. The crate does
//! not own or drive cameras; the caller does.

mod frustum;
mod view_params;

pub use frustum::{
    Frustum, FrustumTest,
    SIDE_RIGHT, SIDE_LEFT, SIDE_TOP, SIDE_BOTTOM,
};
pub use view_params::ViewParams;
