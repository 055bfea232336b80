pub mod events;
pub mod list;
pub mod text_area;
pub mod text_input;

pub use events::{TextAreaEvent, TextInputEvent};
pub use list::{ListItem, ListState};
pub use text_area::TextAreaState;
pub use text_input::TextInputState;
