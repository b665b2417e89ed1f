pub use self::{layout::PlayLayout, play_view::PlayView};

mod layout;
mod play_view;
pub mod widgets;
