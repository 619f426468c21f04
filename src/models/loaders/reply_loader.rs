use crate::services::question_parser::decode_reply;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// 读取保存下来的模型回复原文
pub async fn load_reply_file(reply_path: &Path) -> Result<String> {
    let content = fs::read_to_string(reply_path)
        .await
        .with_context(|| format!("无法读取模型回复文件: {}", reply_path.display()))?;

    tracing::debug!(
        "已读取 {}，共 {} 字符",
        reply_path.display(),
        content.chars().count()
    );

    Ok(content)
}

/// 读取模型回复并解码成 JSON 负载
///
/// 文件无法读取时返回错误；内容无法解码时返回空题目列表
pub async fn load_reply_payload(reply_path: &Path) -> Result<Value> {
    let content = load_reply_file(reply_path).await?;
    Ok(decode_reply(&content))
}
