pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible
// to the binary that will build the web server router.
pub use rest::{
    ask_handler, dashboard_handler, history_handler, progress_handler, quiz_handler,
    speak_handler, translate_handler,
};
