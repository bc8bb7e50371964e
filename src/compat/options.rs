use crate::compat::InputConstraints;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AdapterOptions {
    /// Fail instead of warning when a binary-only classifier is fitted on
    /// more than two classes.
    #[serde(default)]
    #[schemars(title = "Strict binary classes")]
    pub strict_binary: bool,

    #[serde(default)]
    pub input: InputConstraints,
}
