//! # Answer Overlay
//!
//! 截图答题覆盖层的核心：把视觉模型的回复解析成题目，
//! 为每道题的正确答案确定屏幕坐标，并生成覆盖层标记
//!
//! ## 架构设计
//!
//! 截图、调用模型、绘制窗口都由外部完成，本 crate 只做确定性的转换：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、选项、坐标、答案坐标、覆盖层标记
//! - `loaders` - 读取保存下来的模型回复
//!
//! ### ② 业务能力层（Services）
//! - `question_parser` - 回复解码 + 题目解析 + 坐标提取
//! - `coordinate_mapper` - 没有坐标时的网格兜底
//! - `overlay_layout` - 标记框的位置和文字
//!
//! ### ③ 流程层（Workflow）
//! - `CaptureCtx` - 上下文封装（截图序号 + 画布）
//! - `AnswerFlow` - 流程编排（解析 → 坐标 → 标记）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerCoordinates, Canvas, Choice, Coordinate, GridQuestion, Question};
pub use services::{decode_reply, extract_coordinates, map_coordinates, parse_questions};
pub use workflow::{AnswerFlow, CaptureCtx};
