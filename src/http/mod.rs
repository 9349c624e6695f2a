mod headers;
mod signature_v4;

pub use headers::*;
pub use signature_v4::*;
