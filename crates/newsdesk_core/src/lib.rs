pub mod chunk;
pub mod domain;
pub mod ports;
pub mod search;

pub use domain::{
    NewUser, SummaryRecord, TranslationRecord, User, UserCredentials, VoiceChoice,
};
pub use ports::{
    DatabaseService, PortError, PortResult, SpeechSynthesisService, SummarizationService,
    TextExtractionService, TranslationService,
};
