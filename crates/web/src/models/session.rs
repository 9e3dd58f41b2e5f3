//! Session-stored state.
//!
//! The visitor's session carries exactly two things: the cart (lines plus
//! drawer flag, serialized as a whole) and the admin flag from a previously
//! successful login. Neither outlives the running session.

/// Session keys.
pub mod session_keys {
    /// Key for the serialized [`gung_corner_core::Cart`].
    pub const CART: &str = "cart";

    /// Key for the boolean admin-login flag.
    pub const IS_ADMIN: &str = "is_admin";
}
