pub mod render;
pub mod result_view;

pub use render::{render_dash, render_doctors, render_view};
pub use result_view::{QueryTicket, ResultView};
