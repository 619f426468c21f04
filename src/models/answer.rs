use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::question::{Coordinate, Question};

/// 单道题正确答案的坐标结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCoordinates {
    pub question_id: String,
    pub correct_answer: String,
    pub coordinates: Vec<Coordinate>,
}

/// 网格兜底的输入记录
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridQuestion {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl GridQuestion {
    pub fn new(
        id: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            correct_answer: correct_answer.into(),
            options,
        }
    }
}

/// 由 (题目序号, 题目) 构建网格记录
///
/// 没有 id 时生成 `q{序号}`（序号从 1 开始）；正确答案会先解析成对应选项的文本，
/// 解析不到则原样保留（映射时会被跳过）
impl From<(usize, &Question)> for GridQuestion {
    fn from((idx, q): (usize, &Question)) -> Self {
        let correct_answer = q
            .correct_choice_index()
            .map(|i| q.choices[i].text.clone())
            .unwrap_or_else(|| q.correct_answer.clone());

        Self {
            id: q.id.clone().unwrap_or_else(|| generated_id(idx)),
            correct_answer,
            options: q.option_texts(),
        }
    }
}

fn generated_id(idx: usize) -> String {
    format!("q{}", idx + 1)
}

/// 为每道题分配输出用的 id
///
/// 模型给出的 id 原样保留；没有 id 的题目生成 `q{序号}`，
/// 与任何已有 id 冲突时追加 `-2`、`-3`… 直到唯一
pub fn assign_question_ids(questions: &[Question]) -> Vec<String> {
    let mut taken: HashSet<String> = questions.iter().filter_map(|q| q.id.clone()).collect();

    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| match &q.id {
            Some(id) => id.clone(),
            None => {
                let base = generated_id(idx);
                let mut candidate = base.clone();
                let mut suffix = 2;
                while taken.contains(&candidate) {
                    candidate = format!("{}-{}", base, suffix);
                    suffix += 1;
                }
                taken.insert(candidate.clone());
                candidate
            }
        })
        .collect()
}

/// 目标画布（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 宽高都是有限正数
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// 模型返回的 id 可能是字符串也可能是整数
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer question id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
