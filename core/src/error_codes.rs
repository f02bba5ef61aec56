//! Stable error codes carried in every error message.
//!
//! Codes never change meaning once published; new failure modes get new codes.

pub const LOAD_IO: &str = "MDIFF_LOAD_001";
pub const LOAD_ENCODING: &str = "MDIFF_LOAD_002";
pub const LOAD_JSON: &str = "MDIFF_LOAD_003";

pub const DOC_MISSING_MODEL: &str = "MDIFF_DOC_001";
pub const DOC_NOT_OBJECT: &str = "MDIFF_DOC_002";
pub const DOC_MODEL_NOT_OBJECT: &str = "MDIFF_DOC_003";

pub const CONFIG_EMPTY_PLACEHOLDER: &str = "MDIFF_CONFIG_001";
pub const CONFIG_PARSE: &str = "MDIFF_CONFIG_002";
