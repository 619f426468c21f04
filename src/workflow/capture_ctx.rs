//! 截图处理上下文
//!
//! 封装"我正在处理第几次截图、画布多大"这一信息

use std::fmt::Display;

use crate::models::answer::Canvas;

/// 截图处理上下文
#[derive(Debug, Clone, Copy)]
pub struct CaptureCtx {
    /// 截图序号（仅用于日志显示）
    pub capture_index: usize,

    /// 截图对应的画布
    pub canvas: Canvas,
}

impl CaptureCtx {
    /// 创建新的截图上下文
    pub fn new(capture_index: usize, canvas: Canvas) -> Self {
        Self {
            capture_index,
            canvas,
        }
    }
}

impl Display for CaptureCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[截图 #{} {}]", self.capture_index, self.canvas)
    }
}
