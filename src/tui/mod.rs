//! Terminal front end.
//!
//! Apps follow an init/update/view loop: `view` returns an [`Element`] tree,
//! the [`Renderer`] draws it and records which widgets can take focus, and the
//! [`Runtime`] routes keys either to the focused widget or to the app's
//! [`Subscription`]s.

pub mod app;
pub mod apps;
pub mod command;
pub mod element;
pub mod macros;
pub mod renderer;
pub mod runtime;
pub mod state;
pub mod subscription;
pub mod widgets;

pub use app::{App, LayeredView};
pub use command::Command;
pub use element::{Alignment, Element, FocusId, Layer, LayoutConstraint};
pub use renderer::Renderer;
pub use runtime::Runtime;
pub use state::{Theme, ThemeVariant};
pub use subscription::{KeyBinding, Subscription};
pub use widgets::{ListItem, ListState, TextAreaState, TextInputState};
