//! 题目解析 - 业务能力层
//!
//! 把形状不可信的模型响应一次性转换成强类型的 `Question` 列表。
//! 所有缺省规则都集中在这里，下游不再做防御性取值。

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::question::{Choice, Coordinate, Question};

/// 解析模型响应中的题目列表
///
/// # 参数
/// - `payload`: 模型返回的 JSON 负载
///
/// # 返回
/// 按原顺序返回题目；没有 `questions` 字段时返回空列表
pub fn parse_questions(payload: &Value) -> Vec<Question> {
    let Some(raw_questions) = payload.get("questions").and_then(|v| v.as_array()) else {
        debug!("响应中没有 questions 字段，视为 0 道题");
        return Vec::new();
    };

    raw_questions
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            if !raw.is_object() {
                debug!("第 {} 个题目条目不是对象，已跳过", idx + 1);
                return None;
            }
            Some(parse_question(raw))
        })
        .collect()
}

/// 提取所有已给出的正确答案坐标，保持题目顺序
pub fn extract_coordinates(questions: &[Question]) -> Vec<Coordinate> {
    questions.iter().filter_map(|q| q.correct_coordinate).collect()
}

/// 把模型回复原文解码成 JSON 负载
///
/// 依次尝试：整体解析、```json 代码块、最外层的 `{...}`。
/// 都失败时返回空题目列表
pub fn decode_reply(text: &str) -> Value {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }

    if let Some(re) = fence_regex() {
        if let Some(block) = re.captures(trimmed).and_then(|cap| cap.get(1)) {
            if let Ok(value) = serde_json::from_str::<Value>(block.as_str().trim()) {
                debug!("从代码块中解码出 JSON");
                return value;
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                debug!("从回复正文中截取到 JSON 对象");
                return value;
            }
        }
    }

    warn!(
        "❌ 无法解析模型回复为 JSON: {}",
        crate::utils::logging::truncate_text(trimmed, 200)
    );
    json!({ "questions": [], "totalQuestions": 0 })
}

// ========== 辅助函数 ==========

/// 匹配 Markdown 的 JSON 代码块，整个进程只编译一次
fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").ok())
        .as_ref()
}

fn parse_question(raw: &Value) -> Question {
    let choices = raw
        .get("choices")
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(parse_choice).collect())
        .unwrap_or_default();

    Question {
        id: raw.get("id").and_then(scalar_to_string),
        text: string_field(raw, "text").unwrap_or_default(),
        choices,
        correct_answer: raw
            .get("correctAnswer")
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        correct_coordinate: raw.get("correctCoordinate").and_then(strict_coordinate),
        correct_text: string_field(raw, "correctText"),
        confidence: string_field(raw, "confidence"),
    }
}

fn parse_choice(raw: &Value) -> Choice {
    let coordinate = raw.get("coordinate");

    Choice {
        text: string_field(raw, "text").unwrap_or_default(),
        coordinate: Coordinate {
            x: axis_or_zero(coordinate, "x"),
            y: axis_or_zero(coordinate, "y"),
        },
        letter: string_field(raw, "letter"),
    }
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

/// 字符串原样返回，数字和布尔值转成文本
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 缺失、非数字、负数或非有限值都记为 0
fn axis_or_zero(coordinate: Option<&Value>, axis: &str) -> f64 {
    coordinate
        .and_then(|c| c.get(axis))
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// 只有 x、y 都是数字时才认为坐标存在
fn strict_coordinate(value: &Value) -> Option<Coordinate> {
    let x = value.get("x").and_then(|v| v.as_f64())?;
    let y = value.get("y").and_then(|v| v.as_f64())?;
    Some(Coordinate {
        x: x.max(0.0),
        y: y.max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_without_questions_field() {
        assert!(parse_questions(&json!({ "analysis": "nothing here" })).is_empty());
        assert!(parse_questions(&json!([])).is_empty());
        assert!(parse_questions(&json!({ "questions": "oops" })).is_empty());
    }

    #[test]
    fn test_parse_questions_full_entry() {
        let payload = json!({
            "questions": [{
                "id": 1,
                "text": "Capital of France?",
                "choices": [
                    { "letter": "A", "text": "Paris", "coordinate": { "x": 100, "y": 200 } },
                    { "letter": "B", "text": "Rome", "coordinate": { "x": 100, "y": 250 } }
                ],
                "correctAnswer": "A",
                "correctText": "Paris",
                "correctCoordinate": { "x": 100, "y": 200 },
                "confidence": "high"
            }]
        });

        let questions = parse_questions(&payload);
        assert_eq!(questions.len(), 1);

        let q = &questions[0];
        assert_eq!(q.id.as_deref(), Some("1"));
        assert_eq!(q.text, "Capital of France?");
        assert_eq!(q.choices.len(), 2);
        assert_eq!(q.choices[1].coordinate, Coordinate::new(100.0, 250.0));
        assert_eq!(q.choices[0].letter.as_deref(), Some("A"));
        assert_eq!(q.correct_answer, "A");
        assert_eq!(q.correct_text.as_deref(), Some("Paris"));
        assert_eq!(q.correct_coordinate, Some(Coordinate::new(100.0, 200.0)));
        assert_eq!(q.confidence.as_deref(), Some("high"));
    }

    #[test]
    fn test_choice_without_coordinate_defaults_to_origin() {
        let payload = json!({
            "questions": [{
                "text": "Q",
                "choices": [
                    { "text": "no coordinate" },
                    { "text": "half", "coordinate": { "x": 40 } },
                    { "text": "garbage", "coordinate": { "x": "left", "y": -5 } }
                ],
                "correctAnswer": "half"
            }]
        });

        let q = &parse_questions(&payload)[0];
        assert_eq!(q.choices[0].coordinate, Coordinate::new(0.0, 0.0));
        assert_eq!(q.choices[1].coordinate, Coordinate::new(40.0, 0.0));
        assert_eq!(q.choices[2].coordinate, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_correct_answer_passed_through_unchecked() {
        let payload = json!({
            "questions": [{
                "text": "Q",
                "choices": [{ "text": "yes" }],
                "correctAnswer": "not an option"
            }]
        });

        let q = &parse_questions(&payload)[0];
        assert_eq!(q.correct_answer, "not an option");
        assert_eq!(q.correct_coordinate, None);
    }

    #[test]
    fn test_partial_correct_coordinate_is_dropped() {
        let payload = json!({
            "questions": [{ "text": "Q", "correctCoordinate": { "x": 10 } }]
        });

        let q = &parse_questions(&payload)[0];
        assert!(q.choices.is_empty());
        assert_eq!(q.correct_coordinate, None);
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let payload = json!({ "questions": [42, { "text": "real" }, null] });
        let questions = parse_questions(&payload);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "real");
    }

    #[test]
    fn test_extract_coordinates_keeps_only_defined() {
        let questions = vec![
            Question::default(),
            Question {
                correct_coordinate: Some(Coordinate::new(12.0, 34.0)),
                ..Default::default()
            },
            Question::default(),
        ];

        assert_eq!(
            extract_coordinates(&questions),
            vec![Coordinate::new(12.0, 34.0)]
        );
    }

    #[test]
    fn test_decode_reply_plain_json() {
        let value = decode_reply(r#"  {"questions": [], "totalQuestions": 0}  "#);
        assert_eq!(value["totalQuestions"], 0);
    }

    #[test]
    fn test_decode_reply_fenced_block() {
        let reply = "Here is the result:\n```json\n{\"questions\": [{\"text\": \"Q\"}]}\n```\nGood luck!";
        let value = decode_reply(reply);
        assert_eq!(parse_questions(&value).len(), 1);
    }

    #[test]
    fn test_decode_reply_repeated_fenced_calls() {
        for n in 1..=3 {
            let reply = format!("```json\n{{\"totalQuestions\": {}}}\n```", n);
            assert_eq!(decode_reply(&reply)["totalQuestions"], n);
        }
        assert!(std::ptr::eq(fence_regex().unwrap(), fence_regex().unwrap()));
    }

    #[test]
    fn test_decode_reply_embedded_object() {
        let reply = "Sure! {\"questions\": [{\"text\": \"Q\"}]} Hope this helps.";
        let value = decode_reply(reply);
        assert_eq!(parse_questions(&value)[0].text, "Q");
    }

    #[test]
    fn test_decode_reply_garbage() {
        let value = decode_reply("I could not find any questions.");
        assert!(parse_questions(&value).is_empty());
        assert_eq!(value["totalQuestions"], 0);
    }
}
