/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::overlay::OverlayPlan;
use crate::models::question::Question;

/// 初始化 tracing 日志
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 答案覆盖层启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🖥️ 画布尺寸: {}", config.canvas());
    info!("⏱️ 自动隐藏: {} ms", config.auto_hide_delay_ms);
    info!("{}", "=".repeat(60));
}

/// 记录解析出的题目
///
/// # 参数
/// - `prefix`: 日志前缀
/// - `questions`: 题目列表
/// - `verbose`: 是否逐题输出
pub fn log_questions(prefix: &str, questions: &[Question], verbose: bool) {
    info!("{} 🎯 解析出 {} 道题", prefix, questions.len());

    if !verbose {
        return;
    }

    for (i, q) in questions.iter().enumerate() {
        info!(
            "{} 📝 Q{}: \"{}\" - 正确答案: {}",
            prefix,
            i + 1,
            truncate_text(&q.text, 50),
            q.correct_answer
        );
    }
}

/// 记录生成的覆盖层
pub fn log_plan(prefix: &str, plan: &OverlayPlan) {
    if plan.is_empty() {
        info!("{} ⚠️ 没有可显示的答案", prefix);
        return;
    }

    for marker in &plan.markers {
        info!(
            "{} 📍 答案 {}: 位置 {} - {}",
            prefix, marker.index, marker.anchor, marker.label
        );
    }
    info!("{} ✅ 共 {} 个标记", prefix, plan.markers.len());
}

/// 截断长文本，超出部分以 `...` 结尾
///
/// 用于日志显示，也用于覆盖层标记的题目标题（见 `OverlayLayout`）
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
