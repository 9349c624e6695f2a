// Signature V4 related contants.
pub const AMZ_CONTENT_SHA256: &str = "X-Amz-Content-Sha256";
pub const AMZ_DATE: &str = "X-Amz-Date";

// Standard HTTP headers taking part in request signing.
pub const HOST: &str = "Host";
pub const AUTHORIZATION: &str = "Authorization";
