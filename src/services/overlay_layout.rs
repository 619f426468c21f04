//! 覆盖层布局 - 业务能力层
//!
//! 把答案坐标转换成渲染器可以直接使用的标记框

use tracing::debug;

use crate::config::Config;
use crate::models::answer::{AnswerCoordinates, Canvas};
use crate::models::overlay::{Marker, OverlayPlan};
use crate::utils::logging::truncate_text;

/// 覆盖层布局
pub struct OverlayLayout {
    marker_size: f64,
    caption_max_chars: usize,
    auto_hide_ms: u64,
    opacity: f64,
}

impl OverlayLayout {
    pub fn new(config: &Config) -> Self {
        Self {
            marker_size: config.marker_size.max(0.0),
            caption_max_chars: config.caption_max_chars,
            auto_hide_ms: config.auto_hide_delay_ms,
            opacity: config.overlay_opacity.clamp(0.0, 1.0),
        }
    }

    /// 为答案坐标生成标记
    ///
    /// # 参数
    /// - `answers`: 答案坐标，每个坐标生成一个标记
    /// - `captions`: 题目文本，`captions[i]` 属于 `answers[i]`（可以比答案短）
    /// - `canvas`: 目标画布，标记框会被限制在画布内
    pub fn place_markers(
        &self,
        answers: &[AnswerCoordinates],
        captions: &[&str],
        canvas: Canvas,
    ) -> Vec<Marker> {
        let mut markers = Vec::new();

        for (i, answer) in answers.iter().enumerate() {
            let caption = captions.get(i).and_then(|text| self.caption(text));
            let label = if answer.correct_answer.trim().is_empty() {
                "Unknown".to_string()
            } else {
                answer.correct_answer.clone()
            };

            for anchor in &answer.coordinates {
                let half = self.marker_size / 2.0;
                let left = clamp_axis(anchor.x - half, canvas.width - self.marker_size);
                let top = clamp_axis(anchor.y - half, canvas.height - self.marker_size);

                markers.push(Marker {
                    index: markers.len() + 1,
                    question_id: answer.question_id.clone(),
                    label: label.clone(),
                    caption: caption.clone(),
                    anchor: *anchor,
                    left,
                    top,
                    size: self.marker_size,
                });
            }
        }

        debug!("生成了 {} 个标记", markers.len());
        markers
    }

    /// 生成完整的覆盖层
    pub fn plan(
        &self,
        answers: &[AnswerCoordinates],
        captions: &[&str],
        canvas: Canvas,
    ) -> OverlayPlan {
        OverlayPlan {
            canvas,
            markers: self.place_markers(answers, captions, canvas),
            auto_hide_ms: self.auto_hide_ms,
            opacity: self.opacity,
        }
    }

    fn caption(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(truncate_text(text, self.caption_max_chars))
        }
    }
}

/// 限制在 [0, max]；画布比标记还小时取 0
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Coordinate;

    fn layout() -> OverlayLayout {
        OverlayLayout::new(&Config::default())
    }

    fn answer(id: &str, label: &str, points: &[(f64, f64)]) -> AnswerCoordinates {
        AnswerCoordinates {
            question_id: id.to_string(),
            correct_answer: label.to_string(),
            coordinates: points.iter().map(|(x, y)| Coordinate::new(*x, *y)).collect(),
        }
    }

    #[test]
    fn test_marker_centered_on_anchor() {
        let markers = layout().place_markers(
            &[answer("1", "B", &[(500.0, 400.0)])],
            &[],
            Canvas::new(1920.0, 1080.0),
        );

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].index, 1);
        assert_eq!(markers[0].left, 475.0);
        assert_eq!(markers[0].top, 375.0);
        assert_eq!(markers[0].size, 50.0);
        assert_eq!(markers[0].label, "B");
        assert_eq!(markers[0].caption, None);
    }

    #[test]
    fn test_marker_clamped_to_canvas() {
        let markers = layout().place_markers(
            &[answer("1", "A", &[(5.0, 1079.0), (1919.0, 10.0)])],
            &[],
            Canvas::new(1920.0, 1080.0),
        );

        assert_eq!((markers[0].left, markers[0].top), (0.0, 1030.0));
        assert_eq!((markers[1].left, markers[1].top), (1870.0, 0.0));
        assert_eq!(markers[1].index, 2);
    }

    #[test]
    fn test_tiny_canvas_pins_marker_to_origin() {
        let markers = layout().place_markers(
            &[answer("1", "A", &[(10.0, 10.0)])],
            &[],
            Canvas::new(20.0, 20.0),
        );
        assert_eq!((markers[0].left, markers[0].top), (0.0, 0.0));
    }

    #[test]
    fn test_caption_and_unknown_label() {
        let long = "x".repeat(150);

        let markers = layout().place_markers(
            &[
                answer("q1", "", &[(100.0, 100.0)]),
                answer("q-2", "C", &[(200.0, 200.0)]),
                answer("q3", "D", &[(300.0, 300.0)]),
            ],
            &[long.as_str(), "Short one"],
            Canvas::new(800.0, 600.0),
        );

        assert_eq!(markers[0].label, "Unknown");
        let caption = markers[0].caption.as_deref().unwrap();
        assert_eq!(caption.chars().count(), 103);
        assert!(caption.ends_with("..."));
        assert_eq!(markers[1].caption.as_deref(), Some("Short one"));
        // 没有对应标题
        assert_eq!(markers[2].caption, None);
    }

    #[test]
    fn test_shared_id_keeps_own_caption() {
        let markers = layout().place_markers(
            &[
                answer("7", "a", &[(100.0, 100.0)]),
                answer("7", "b", &[(200.0, 200.0), (250.0, 250.0)]),
            ],
            &["first question", "  "],
            Canvas::new(800.0, 600.0),
        );

        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].caption.as_deref(), Some("first question"));
        assert_eq!(markers[1].caption, None);
        assert_eq!(markers[2].caption, None);
    }

    #[test]
    fn test_plan_carries_config() {
        let config = Config {
            auto_hide_delay_ms: 2500,
            overlay_opacity: 3.0,
            ..Config::default()
        };
        let plan = OverlayLayout::new(&config).plan(&[], &[], Canvas::new(100.0, 100.0));

        assert!(plan.is_empty());
        assert_eq!(plan.auto_hide_ms, 2500);
        assert_eq!(plan.opacity, 1.0);
    }
}
