use std::sync::{Arc, Mutex};

use rust_bert::pipelines::common::ModelResource;
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use rust_bert::resources::RemoteResource;
use tch::Device;
use tracing::info;

use super::engine::TranslationEngine;
use super::interface::{TranslateError, Translator};
use super::registry::{self, ModelFamily, TargetLang};

/// Builds loaded translation engines from the registry's artifact tables.
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Resolve the artifact for `family` and load it. `target_tag` selects
    /// the bilingual pair for `helsinki` and is ignored by the multilingual
    /// families, which pick the output language at generation time instead.
    ///
    /// This downloads model weights on first use (cached across runs by the
    /// model library) and is blocking for the duration of the load.
    pub fn create(
        family: ModelFamily,
        target_tag: &str,
        force_cpu: bool,
    ) -> Result<Arc<Mutex<dyn Translator>>, TranslateError> {
        let target = match family {
            ModelFamily::Helsinki => Some(TargetLang::from_tag(target_tag)?),
            _ => None,
        };
        let artifacts = registry::artifacts(family, target)?;

        let device = if force_cpu {
            Device::Cpu
        } else {
            Device::cuda_if_available()
        };

        let (source_languages, target_languages): (Vec<Language>, Vec<Language>) = match target {
            Some(target) => (vec![Language::English], vec![target.language()]),
            None => (
                vec![Language::English],
                TargetLang::ALL.iter().map(|t| t.language()).collect(),
            ),
        };

        info!(
            family = %family,
            artifact = artifacts.model.1,
            source = family.source_code(),
            ?device,
            "loading translation model"
        );

        let translation_config = TranslationConfig::new(
            family.model_type(),
            ModelResource::Torch(Box::new(RemoteResource::from_pretrained(artifacts.model))),
            RemoteResource::from_pretrained(artifacts.config),
            RemoteResource::from_pretrained(artifacts.vocab),
            artifacts.merges.map(RemoteResource::from_pretrained),
            source_languages,
            target_languages,
            device,
        );
        let model = TranslationModel::new(translation_config)?;
        let engine = TranslationEngine::new(family, model);

        info!(family = %engine.family(), "translation model loaded");
        Ok(Arc::new(Mutex::new(engine)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helsinki_load_rejects_unknown_tag() {
        let result = TranslatorFactory::create(ModelFamily::Helsinki, "xx_XX", true);
        assert!(matches!(result, Err(TranslateError::Operational(_))));
    }

    // Downloads ~300MB of weights; run explicitly when exercising the full
    // loading path.
    #[test]
    #[ignore]
    fn loads_helsinki_french_pair() {
        let translator = TranslatorFactory::create(ModelFamily::Helsinki, "fr_XX", true).unwrap();
        let guard = translator.lock().unwrap();
        assert_eq!(guard.family(), ModelFamily::Helsinki);
        let output = guard.translate("Hello", TargetLang::French).unwrap();
        assert!(!output.is_empty());
    }
}
