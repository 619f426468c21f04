//! 答案处理流程 - 流程层
//!
//! 核心职责：定义"一次截图"的完整处理流程
//!
//! 流程顺序：
//! 1. 解码模型回复 → 解析题目
//! 2. 有坐标的题目直接使用模型坐标或正确选项的坐标，没有的走网格兜底
//! 3. 生成覆盖层标记

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::answer::{assign_question_ids, AnswerCoordinates, Canvas, GridQuestion};
use crate::models::overlay::OverlayPlan;
use crate::models::question::{Coordinate, Question};
use crate::services::{decode_reply, map_onto, parse_questions, OverlayLayout};
use crate::utils::logging;
use crate::workflow::capture_ctx::CaptureCtx;

/// 答案坐标的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// 模型直接给出的正确答案坐标
    Explicit,
    /// 正确选项自带的坐标
    Choice,
    /// 网格兜底
    Grid,
}

/// 一次坐标解析的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    pub explicit: usize,
    pub choice: usize,
    pub grid: usize,
    pub skipped: usize,
}

/// 坐标解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub answers: Vec<AnswerCoordinates>,
    /// `answers[i]` 来自第 `rows[i]` 道题（从 0 开始）
    pub rows: Vec<usize>,
    pub stats: ResolveStats,
}

/// 答案处理流程
///
/// - 不持有任何外部资源
/// - 只依赖业务能力（services）
pub struct AnswerFlow {
    layout: OverlayLayout,
    verbose_logging: bool,
}

impl AnswerFlow {
    /// 创建新的答案处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            layout: OverlayLayout::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 为每道题确定正确答案的坐标
    ///
    /// 优先级：模型给出的正确答案坐标 → 正确选项的坐标 → 网格兜底。
    /// 网格兜底的行号是题目在全部题目中的位置，
    /// 所以不走网格的题目同样占一行
    pub fn resolve(&self, questions: &[Question], canvas: Canvas) -> Vec<AnswerCoordinates> {
        self.resolve_with_stats(questions, canvas).answers
    }

    /// 同 `resolve`，并返回每条结果对应的题目位置和来源统计
    pub fn resolve_with_stats(&self, questions: &[Question], canvas: Canvas) -> Resolution {
        let ids = assign_question_ids(questions);
        let records: Vec<GridQuestion> = questions
            .iter()
            .enumerate()
            .zip(&ids)
            .map(|(entry, id)| GridQuestion {
                id: id.clone(),
                ..GridQuestion::from(entry)
            })
            .collect();
        let sources: Vec<Option<AnswerSource>> = questions.iter().map(direct_source).collect();

        // 以行号为 key 做兜底映射，已有坐标的题目清空选项从而被跳过
        let fallback: Vec<GridQuestion> = records
            .iter()
            .zip(&sources)
            .enumerate()
            .map(|(row, (record, source))| GridQuestion {
                id: row.to_string(),
                correct_answer: record.correct_answer.clone(),
                options: if source.is_some() {
                    Vec::new()
                } else {
                    record.options.clone()
                },
            })
            .collect();

        let mut grid_by_row: HashMap<String, AnswerCoordinates> = map_onto(&fallback, canvas)
            .into_iter()
            .map(|answer| (answer.question_id.clone(), answer))
            .collect();

        let mut resolution = Resolution {
            answers: Vec::with_capacity(questions.len()),
            rows: Vec::with_capacity(questions.len()),
            stats: ResolveStats::default(),
        };

        let rows = records.iter().zip(questions).zip(&sources).enumerate();
        for (row, ((record, q), source)) in rows {
            let coordinate = match source {
                Some(AnswerSource::Explicit) => {
                    resolution.stats.explicit += 1;
                    q.correct_coordinate
                }
                Some(AnswerSource::Choice) => {
                    resolution.stats.choice += 1;
                    q.correct_choice_index().map(|i| q.choices[i].coordinate)
                }
                _ => None,
            };

            let answer = match coordinate {
                Some(point) => Some(AnswerCoordinates {
                    question_id: record.id.clone(),
                    correct_answer: record.correct_answer.clone(),
                    coordinates: vec![point],
                }),
                None => grid_by_row.remove(&row.to_string()).map(|mut answer| {
                    resolution.stats.grid += 1;
                    answer.question_id = record.id.clone();
                    answer
                }),
            };

            match answer {
                Some(answer) => {
                    resolution.answers.push(answer);
                    resolution.rows.push(row);
                }
                None => {
                    resolution.stats.skipped += 1;
                    debug!(
                        "题目 {} 的正确答案 {:?} 无法定位，跳过",
                        record.id, q.correct_answer
                    );
                }
            }
        }

        resolution
    }

    /// 处理一次模型响应，生成覆盖层
    pub fn plan(&self, payload: &Value, ctx: &CaptureCtx) -> OverlayPlan {
        let prefix = ctx.to_string();

        let questions = parse_questions(payload);
        logging::log_questions(&prefix, &questions, self.verbose_logging);

        let resolution = self.resolve_with_stats(&questions, ctx.canvas);
        let stats = resolution.stats;
        info!(
            "{} 坐标来源: 模型 {} / 选项 {} / 网格 {} / 跳过 {}",
            prefix, stats.explicit, stats.choice, stats.grid, stats.skipped
        );

        let captions: Vec<&str> = resolution
            .rows
            .iter()
            .map(|&row| questions[row].text.as_str())
            .collect();
        let plan = self.layout.plan(&resolution.answers, &captions, ctx.canvas);
        logging::log_plan(&prefix, &plan);
        plan
    }

    /// 处理模型回复原文
    pub fn plan_from_reply(&self, reply: &str, ctx: &CaptureCtx) -> OverlayPlan {
        self.plan(&decode_reply(reply), ctx)
    }
}

/// 不需要网格就能定位的来源；坐标为 (0, 0) 的选项视为未给出坐标
fn direct_source(question: &Question) -> Option<AnswerSource> {
    if question.correct_coordinate.is_some() {
        return Some(AnswerSource::Explicit);
    }

    question
        .correct_choice_index()
        .filter(|&i| question.choices[i].coordinate != Coordinate::default())
        .map(|_| AnswerSource::Choice)
}
