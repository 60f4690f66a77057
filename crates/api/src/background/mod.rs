//! Background tasks spawned by `main`.
//!
//! Each task is a long-running async function that stops when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires.

pub mod session_cleanup;
