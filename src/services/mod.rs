pub mod coordinate_mapper;
pub mod overlay_layout;
pub mod question_parser;

pub use coordinate_mapper::{map_coordinates, map_onto};
pub use overlay_layout::OverlayLayout;
pub use question_parser::{decode_reply, extract_coordinates, parse_questions};
