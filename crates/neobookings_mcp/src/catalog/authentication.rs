//! Session authentication.

use crate::catalog::{Category, ToolSpec};
use crate::param::Param;

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new("authenticator_rq", "/AuthenticatorRQ", Category::Authentication, AUTHENTICATOR)
        .title("Authentication")
        .describe("Authenticate with the Neobookings API system and create a session."),
];

const AUTHENTICATOR: &[Param] = &[];
