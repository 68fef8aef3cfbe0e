pub mod geom;
pub mod home;

pub use geom::Rect;
pub use home::{
    CoverState, Metrics, RecentCardContext, draw_button_menu, draw_recent_book_card,
};
