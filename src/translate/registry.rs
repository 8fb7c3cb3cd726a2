use std::fmt;

use rust_bert::pipelines::common::ModelType;
use rust_bert::pipelines::translation::Language;

use super::interface::TranslateError;

/// A named group of pretrained translation models sharing one loading and
/// generation convention. `Helsinki` ships one bilingual Marian model per
/// language pair; the other families load a single multilingual model and
/// steer the output language at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Helsinki,
    MBart,
    M2M100,
    Nllb,
}

impl ModelFamily {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "helsinki" => Some(Self::Helsinki),
            "mbart" => Some(Self::MBart),
            "m2m100" => Some(Self::M2M100),
            "nllb" => Some(Self::Nllb),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Helsinki => "helsinki",
            Self::MBart => "mbart",
            Self::M2M100 => "m2m100",
            Self::Nllb => "nllb",
        }
    }

    pub fn model_type(&self) -> ModelType {
        match self {
            Self::Helsinki => ModelType::Marian,
            Self::MBart => ModelType::MBart,
            Self::M2M100 => ModelType::M2M100,
            Self::Nllb => ModelType::NLLB,
        }
    }

    /// Source-language code as the family's tokenizer spells it.
    pub fn source_code(&self) -> &'static str {
        match self {
            Self::Helsinki => "en",
            Self::MBart => "en_XX",
            Self::M2M100 => "en",
            Self::Nllb => "eng_Latn",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Target languages recognized on the wire. The tags are the mBART-style
/// identifiers the front end sends; each family maps them to its own
/// internal codes via [`forced_language_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLang {
    French,
    Hindi,
    German,
    Japanese,
}

impl TargetLang {
    pub const ALL: [TargetLang; 4] = [
        TargetLang::French,
        TargetLang::Hindi,
        TargetLang::German,
        TargetLang::Japanese,
    ];

    pub fn from_tag(tag: &str) -> Result<Self, TranslateError> {
        match tag {
            "fr_XX" => Ok(Self::French),
            "hi_IN" => Ok(Self::Hindi),
            "de_DE" => Ok(Self::German),
            "ja_XX" => Ok(Self::Japanese),
            other => Err(TranslateError::Operational(format!(
                "unknown target language tag: {other}"
            ))),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::French => "fr_XX",
            Self::Hindi => "hi_IN",
            Self::German => "de_DE",
            Self::Japanese => "ja_XX",
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::French => Language::French,
            Self::Hindi => Language::Hindi,
            Self::German => Language::German,
            Self::Japanese => Language::Japanese,
        }
    }
}

/// Remote resources making up one loadable pretrained artifact, as
/// `(cache_subdir, url)` pairs understood by `RemoteResource`.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactSet {
    pub model: (&'static str, &'static str),
    pub config: (&'static str, &'static str),
    pub vocab: (&'static str, &'static str),
    pub merges: Option<(&'static str, &'static str)>,
}

const MARIAN_EN_FR: ArtifactSet = ArtifactSet {
    model: (
        "marian-mt-en-fr/model",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-fr/resolve/main/rust_model.ot",
    ),
    config: (
        "marian-mt-en-fr/config",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-fr/resolve/main/config.json",
    ),
    vocab: (
        "marian-mt-en-fr/vocab",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-fr/resolve/main/vocab.json",
    ),
    merges: Some((
        "marian-mt-en-fr/spiece",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-fr/resolve/main/source.spm",
    )),
};

const MARIAN_EN_HI: ArtifactSet = ArtifactSet {
    model: (
        "marian-mt-en-hi/model",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-hi/resolve/main/rust_model.ot",
    ),
    config: (
        "marian-mt-en-hi/config",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-hi/resolve/main/config.json",
    ),
    vocab: (
        "marian-mt-en-hi/vocab",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-hi/resolve/main/vocab.json",
    ),
    merges: Some((
        "marian-mt-en-hi/spiece",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-hi/resolve/main/source.spm",
    )),
};

const MARIAN_EN_DE: ArtifactSet = ArtifactSet {
    model: (
        "marian-mt-en-de/model",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-de/resolve/main/rust_model.ot",
    ),
    config: (
        "marian-mt-en-de/config",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-de/resolve/main/config.json",
    ),
    vocab: (
        "marian-mt-en-de/vocab",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-de/resolve/main/vocab.json",
    ),
    merges: Some((
        "marian-mt-en-de/spiece",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-de/resolve/main/source.spm",
    )),
};

// The Opus-MT English-Japanese pair is published as "opus-mt-en-jap".
const MARIAN_EN_JA: ArtifactSet = ArtifactSet {
    model: (
        "marian-mt-en-jap/model",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-jap/resolve/main/rust_model.ot",
    ),
    config: (
        "marian-mt-en-jap/config",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-jap/resolve/main/config.json",
    ),
    vocab: (
        "marian-mt-en-jap/vocab",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-jap/resolve/main/vocab.json",
    ),
    merges: Some((
        "marian-mt-en-jap/spiece",
        "https://huggingface.co/Helsinki-NLP/opus-mt-en-jap/resolve/main/source.spm",
    )),
};

const MBART50_MANY_TO_MANY: ArtifactSet = ArtifactSet {
    model: (
        "mbart-50-many-to-many/model",
        "https://huggingface.co/facebook/mbart-large-50-many-to-many-mmt/resolve/main/rust_model.ot",
    ),
    config: (
        "mbart-50-many-to-many/config",
        "https://huggingface.co/facebook/mbart-large-50-many-to-many-mmt/resolve/main/config.json",
    ),
    vocab: (
        "mbart-50-many-to-many/vocab",
        "https://huggingface.co/facebook/mbart-large-50-many-to-many-mmt/resolve/main/sentencepiece.bpe.model",
    ),
    merges: None,
};

const M2M100_418M: ArtifactSet = ArtifactSet {
    model: (
        "m2m100-418m/model",
        "https://huggingface.co/facebook/m2m100_418M/resolve/main/rust_model.ot",
    ),
    config: (
        "m2m100-418m/config",
        "https://huggingface.co/facebook/m2m100_418M/resolve/main/config.json",
    ),
    vocab: (
        "m2m100-418m/vocab",
        "https://huggingface.co/facebook/m2m100_418M/resolve/main/vocab.json",
    ),
    merges: Some((
        "m2m100-418m/merges",
        "https://huggingface.co/facebook/m2m100_418M/resolve/main/sentencepiece.bpe.model",
    )),
};

const NLLB_600M_DISTILLED: ArtifactSet = ArtifactSet {
    model: (
        "nllb-200-distilled-600m/model",
        "https://huggingface.co/datasets/vpermilp/nllb-200-distilled-600M-rust/resolve/main/rust_model.ot",
    ),
    config: (
        "nllb-200-distilled-600m/config",
        "https://huggingface.co/datasets/vpermilp/nllb-200-distilled-600M-rust/raw/main/config.json",
    ),
    vocab: (
        "nllb-200-distilled-600m/vocab",
        "https://huggingface.co/datasets/vpermilp/nllb-200-distilled-600M-rust/resolve/main/tokenizer.json",
    ),
    merges: Some((
        "nllb-200-distilled-600m/merges",
        "https://huggingface.co/datasets/vpermilp/nllb-200-distilled-600M-rust/resolve/main/sentencepiece.bpe.model",
    )),
};

/// Resolves the pretrained artifact for a family. `target` picks the
/// bilingual pair for `helsinki`; the multilingual families ignore it and
/// load one fixed artifact.
pub fn artifacts(family: ModelFamily, target: Option<TargetLang>) -> Result<ArtifactSet, TranslateError> {
    match family {
        ModelFamily::Helsinki => {
            let target = target.ok_or_else(|| {
                TranslateError::Operational(
                    "helsinki requires a target language to select the model pair".to_string(),
                )
            })?;
            Ok(match target {
                TargetLang::French => MARIAN_EN_FR,
                TargetLang::Hindi => MARIAN_EN_HI,
                TargetLang::German => MARIAN_EN_DE,
                TargetLang::Japanese => MARIAN_EN_JA,
            })
        }
        ModelFamily::MBart => Ok(MBART50_MANY_TO_MANY),
        ModelFamily::M2M100 => Ok(M2M100_418M),
        ModelFamily::Nllb => Ok(NLLB_600M_DISTILLED),
    }
}

/// Internal language code a multilingual family forces as the first
/// generated token for the given target. `None` for `helsinki`, whose
/// output language is fixed by the loaded pair.
pub fn forced_language_code(family: ModelFamily, target: TargetLang) -> Option<&'static str> {
    match family {
        ModelFamily::Helsinki => None,
        ModelFamily::MBart => Some(match target {
            TargetLang::French => "fr_XX",
            TargetLang::Hindi => "hi_IN",
            TargetLang::German => "de_DE",
            TargetLang::Japanese => "ja_XX",
        }),
        ModelFamily::M2M100 => Some(match target {
            TargetLang::French => "fr",
            TargetLang::Hindi => "hi",
            TargetLang::German => "de",
            TargetLang::Japanese => "ja",
        }),
        ModelFamily::Nllb => Some(match target {
            TargetLang::French => "fra_Latn",
            TargetLang::Hindi => "hin_Deva",
            TargetLang::German => "deu_Latn",
            TargetLang::Japanese => "jpn_Jpan",
        }),
    }
}
