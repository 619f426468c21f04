use crate::error::{AppError, AppResult, FileError};
use crate::models::answer::Canvas;
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画布宽度（像素）
    pub screen_width: f64,
    /// 画布高度（像素）
    pub screen_height: f64,
    /// 覆盖层自动隐藏时间（毫秒）
    pub auto_hide_delay_ms: u64,
    /// 标记框边长（像素）
    pub marker_size: f64,
    /// 覆盖层不透明度 0.0 - 1.0
    pub overlay_opacity: f64,
    /// 标记说明文字的最大字符数
    pub caption_max_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 外部视觉模型 ---
    pub vision_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            auto_hide_delay_ms: 10_000,
            marker_size: 50.0,
            overlay_opacity: 0.7,
            caption_max_chars: 100,
            verbose_logging: false,
            vision_model: "gpt-4o".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn with_env_overrides(self) -> Self {
        Self {
            screen_width: env_or("SCREEN_WIDTH", self.screen_width),
            screen_height: env_or("SCREEN_HEIGHT", self.screen_height),
            auto_hide_delay_ms: env_or("AUTO_HIDE_DELAY_MS", self.auto_hide_delay_ms),
            marker_size: env_or("MARKER_SIZE", self.marker_size),
            overlay_opacity: env_or("OVERLAY_OPACITY", self.overlay_opacity),
            caption_max_chars: env_or("CAPTION_MAX_CHARS", self.caption_max_chars),
            verbose_logging: env_or("VERBOSE_LOGGING", self.verbose_logging),
            vision_model: std::env::var("VISION_MODEL").unwrap_or(self.vision_model),
        }
    }

    /// 配置中的画布
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.screen_width, self.screen_height)
    }

    /// 检查画布尺寸、标记大小和不透明度
    pub fn validate(&self) -> AppResult<()> {
        if !self.canvas().is_usable() {
            return Err(AppError::invalid_config(
                "screen_width/screen_height",
                self.canvas(),
                "有限正数",
            ));
        }
        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(AppError::invalid_config("marker_size", self.marker_size, "正数"));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(AppError::invalid_config(
                "overlay_opacity",
                self.overlay_opacity,
                "0.0 到 1.0 之间的数",
            ));
        }
        Ok(())
    }

    /// 解析 TOML 配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件加载配置，再叠加环境变量
    pub async fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })?;

        Ok(config.with_env_overrides())
    }
}

fn env_or<T: std::str::FromStr>(var_name: &str, fallback: T) -> T {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}
