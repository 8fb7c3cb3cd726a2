pub mod engine;
pub mod factory;
pub mod interface;
pub mod registry;

pub use factory::TranslatorFactory;
pub use interface::{TranslateError, Translator};
pub use registry::{ModelFamily, TargetLang};
