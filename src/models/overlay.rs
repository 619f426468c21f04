use serde::{Deserialize, Serialize};

use super::answer::Canvas;
use super::question::Coordinate;

/// 覆盖层上的一个答案标记
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// 从 1 开始的编号
    pub index: usize,
    pub question_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// 标记指向的点
    pub anchor: Coordinate,
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

/// 交给外部渲染器的一次完整覆盖层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPlan {
    pub canvas: Canvas,
    pub markers: Vec<Marker>,
    pub auto_hide_ms: u64,
    pub opacity: f64,
}

impl OverlayPlan {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
