use rust_bert::pipelines::translation::{Language, TranslationModel};
use tracing::debug;

use super::interface::{TranslateError, Translator};
use super::registry::{self, ModelFamily, TargetLang};

/// A loaded `rust_bert` translation pipeline bound to its model family.
/// The pipeline owns both the model and its tokenizer, so the pair can
/// never be half-replaced.
pub struct TranslationEngine {
    family: ModelFamily,
    model: TranslationModel,
}

impl TranslationEngine {
    pub fn new(family: ModelFamily, model: TranslationModel) -> Self {
        Self { family, model }
    }
}

impl Translator for TranslationEngine {
    fn family(&self) -> ModelFamily {
        self.family
    }

    fn translate(&self, text: &str, target: TargetLang) -> Result<String, TranslateError> {
        let (source, forced_target): (Option<Language>, Option<Language>) = match self.family {
            // Bilingual pair: the output language is baked into the model,
            // no tagging or forced token needed.
            ModelFamily::Helsinki => (None, None),
            family => {
                let code = registry::forced_language_code(family, target).ok_or_else(|| {
                    TranslateError::Operational(format!(
                        "no {} language code for target {}",
                        family,
                        target.tag()
                    ))
                })?;
                debug!(family = %family, code, "forcing output language");
                (Some(Language::English), Some(target.language()))
            }
        };

        let mut output = self.model.translate(&[text], source, forced_target)?;
        if output.is_empty() {
            return Err(TranslateError::Operational(
                "model returned no output".to_string(),
            ));
        }
        Ok(output.remove(0))
    }
}
