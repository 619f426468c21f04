use std::path::PathBuf;

use answer_overlay::models::load_reply_payload;
use answer_overlay::utils::logging;
use answer_overlay::{AnswerFlow, CaptureCtx, Config};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "把视觉模型的回复转换成答案覆盖层", long_about = None)]
struct Args {
    /// 保存下来的模型回复文件
    #[arg(short, long)]
    response: PathBuf,

    /// TOML 配置文件（不指定时只读取环境变量）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖画布宽度
    #[arg(long)]
    width: Option<f64>,

    /// 覆盖画布高度
    #[arg(long)]
    height: Option<f64>,

    /// 格式化输出 JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    logging::init();

    // 加载配置
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("无法加载配置: {}", path.display()))?,
        None => Config::from_env(),
    };
    if let Some(width) = args.width {
        config.screen_width = width;
    }
    if let Some(height) = args.height {
        config.screen_height = height;
    }
    config.validate()?;

    logging::log_startup(&config);

    let payload = load_reply_payload(&args.response).await?;
    let ctx = CaptureCtx::new(1, config.canvas());
    let plan = AnswerFlow::new(&config).plan(&payload, &ctx);

    let output = if args.pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{}", output);

    Ok(())
}
