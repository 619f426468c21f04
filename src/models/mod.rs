pub mod answer;
pub mod loaders;
pub mod overlay;
pub mod question;

pub use answer::{assign_question_ids, AnswerCoordinates, Canvas, GridQuestion};
pub use loaders::{load_reply_file, load_reply_payload};
pub use overlay::{Marker, OverlayPlan};
pub use question::{Choice, Coordinate, Question};
