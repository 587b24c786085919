//! Host environment flags
//!
//! A client build runs inside a browser host (`wasm32-unknown-unknown`);
//! every other target is a server. Both values are fixed at compile time.

/// Built for a browser host
pub const IS_CLIENT: bool = cfg!(all(target_arch = "wasm32", target_os = "unknown"));

/// Built for anything that is not a browser host
pub const IS_SERVER: bool = !IS_CLIENT;

pub fn is_client() -> bool {
    IS_CLIENT
}

pub fn is_server() -> bool {
    IS_SERVER
}
