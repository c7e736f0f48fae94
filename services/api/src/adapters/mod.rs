pub mod db;
pub mod extractor;
pub mod summarize_llm;
pub mod translate_llm;
pub mod tts;

pub use db::DbAdapter;
pub use extractor::PdfExtractAdapter;
pub use summarize_llm::OpenAiSummaryAdapter;
pub use translate_llm::OpenAiTranslationAdapter;
pub use tts::OpenAiTtsAdapter;
