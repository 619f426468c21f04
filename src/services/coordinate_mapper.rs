//! 坐标映射 - 业务能力层
//!
//! 模型没有给出坐标时的网格兜底：把画布按题目数切成等高的行、
//! 按每道题的选项数切成等宽的列，取正确选项所在格子的中心点。
//! 这不是答案在截图中的真实位置。

use tracing::debug;

use crate::models::answer::{AnswerCoordinates, Canvas, GridQuestion};
use crate::models::question::Coordinate;

/// 计算每道题正确答案的网格坐标
///
/// # 参数
/// - `questions`: 网格记录列表，第 `i` 条占第 `i` 行
/// - `screen_width`: 画布宽度（像素）
/// - `screen_height`: 画布高度（像素）
///
/// # 返回
/// 按输入顺序返回能定位到正确答案的题目；选项为空或答案不在选项中的题目被跳过
pub fn map_coordinates(
    questions: &[GridQuestion],
    screen_width: f64,
    screen_height: f64,
) -> Vec<AnswerCoordinates> {
    if questions.is_empty() {
        return Vec::new();
    }

    let canvas = Canvas::new(screen_width, screen_height);
    if !canvas.is_usable() {
        debug!("画布尺寸无效 ({})，不做网格映射", canvas);
        return Vec::new();
    }

    let rows = questions.len() as f64;
    let row_height = screen_height / rows;

    questions
        .iter()
        .enumerate()
        .filter_map(|(row, question)| {
            if question.options.is_empty() {
                debug!("题目 {} 没有选项，跳过", question.id);
                return None;
            }

            let Some(column) = question
                .options
                .iter()
                .position(|option| *option == question.correct_answer)
            else {
                debug!(
                    "题目 {} 的正确答案 {:?} 不在选项中，跳过",
                    question.id, question.correct_answer
                );
                return None;
            };

            let columns = question.options.len() as f64;
            let column_width = screen_width / columns;

            let x = column_width * column as f64 + screen_width / (2.0 * columns);
            let y = row_height * row as f64 + screen_height / (2.0 * rows);

            Some(AnswerCoordinates {
                question_id: question.id.clone(),
                correct_answer: question.correct_answer.clone(),
                coordinates: vec![Coordinate { x, y }],
            })
        })
        .collect()
}

/// 在给定画布上做网格映射
pub fn map_onto(questions: &[GridQuestion], canvas: Canvas) -> Vec<AnswerCoordinates> {
    map_coordinates(questions, canvas.width, canvas.height)
}
