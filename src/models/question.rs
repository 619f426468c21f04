use serde::{Deserialize, Serialize};

/// 屏幕坐标（像素，原点在左上角）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub coordinate: Coordinate,
    /// 模型给出的选项字母（A、B、C…）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
}

/// 解析后的题目
///
/// 每次解析时从外部响应构建一次，之后只读
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub choices: Vec<Choice>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_coordinate: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

impl Question {
    /// 找到正确答案对应的选项索引
    ///
    /// 依次按选项文本、`correct_text`、选项字母（忽略大小写）匹配
    pub fn correct_choice_index(&self) -> Option<usize> {
        if let Some(idx) = self.choices.iter().position(|c| c.text == self.correct_answer) {
            return Some(idx);
        }

        if let Some(correct_text) = &self.correct_text {
            if let Some(idx) = self.choices.iter().position(|c| &c.text == correct_text) {
                return Some(idx);
            }
        }

        let answer = self.correct_answer.trim();
        if answer.is_empty() {
            return None;
        }
        self.choices.iter().position(|c| {
            c.letter
                .as_deref()
                .is_some_and(|letter| letter.trim().eq_ignore_ascii_case(answer))
        })
    }

    /// 选项文本列表
    pub fn option_texts(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.text.clone()).collect()
    }
}
