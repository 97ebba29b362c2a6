pub mod domain;
pub mod history;
pub mod ports;
pub mod progress;
pub mod tracker;

pub use domain::{DailyActivity, QuizQuestion, StudyEntry, UserProgress};
pub use ports::{
    IllustrationService, PortError, PortResult, QuizService, SpeechService, StudyStore,
    TopicClassificationService, TranslationService, TutorService,
};
pub use tracker::ProgressTracker;
