use thiserror::Error;

use super::registry::{ModelFamily, TargetLang};

/// Errors surfaced by model loading and translation. `InvalidSelection`
/// maps to a client error on the wire; `Operational` covers everything the
/// pretrained-model layer can throw (artifact fetch, instantiation,
/// generation) and is reported in-band as a message string.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid model type: {0}")]
    InvalidSelection(String),
    #[error("{0}")]
    Operational(String),
}

impl From<rust_bert::RustBertError> for TranslateError {
    fn from(err: rust_bert::RustBertError) -> Self {
        TranslateError::Operational(err.to_string())
    }
}

/// One loaded model/tokenizer pair, bound to its family at load time so
/// translation does not re-dispatch on a name.
///
/// Implementations run inference synchronously; callers are expected to
/// drive them through `spawn_blocking`.
pub trait Translator: Send {
    fn family(&self) -> ModelFamily;

    fn translate(&self, text: &str, target: TargetLang) -> Result<String, TranslateError>;
}
