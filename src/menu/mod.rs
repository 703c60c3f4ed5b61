pub mod handlers;
pub mod main_menu;

pub use handlers::run_with_progress;
pub use main_menu::{prompt_input_dir, prompt_settings};
