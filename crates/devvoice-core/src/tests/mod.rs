#[allow(clippy::unwrap_used)]
mod decoration;
#[allow(clippy::unwrap_used)]
mod session;
