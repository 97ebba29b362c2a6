pub mod image_gen;
pub mod quiz_llm;
pub mod store;
pub mod topic_llm;
pub mod translate_llm;
pub mod tts;
pub mod tutor_llm;

pub use image_gen::OpenAiImageAdapter;
pub use quiz_llm::OpenAiQuizAdapter;
pub use store::JsonFileStore;
pub use topic_llm::OpenAiTopicAdapter;
pub use translate_llm::OpenAiTranslateAdapter;
pub use tts::OpenAiTtsAdapter;
pub use tutor_llm::OpenAiTutorAdapter;
