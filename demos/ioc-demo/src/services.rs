//! 演示用的服务

use component_macros::Bean;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// 按语言提供问候语
pub trait MessageSource: Send + Sync {
    /// 指定语言的问候语
    fn greeting(&self, language: &str) -> Option<String>;
}

/// 从配置读取问候语
#[derive(Debug, Default, Bean)]
#[bean(order = 1, implements(dyn MessageSource + Send + Sync))]
pub struct ConsoleMessages {
    #[value("messages.greetings")]
    greetings: HashMap<String, String>,
}

impl MessageSource for ConsoleMessages {
    fn greeting(&self, language: &str) -> Option<String> {
        self.greetings.get(language).cloned()
    }
}

#[derive(Default, Bean)]
#[bean(order = 2, annotations("service"))]
pub struct GreetingService {
    #[inject]
    messages: Option<Arc<dyn MessageSource + Send + Sync>>,
    #[value("greeting.language")]
    language: String,
    #[value("greeting.audience")]
    audience: Vec<String>,
}

impl GreetingService {
    /// 为每个听众生成问候
    pub fn greet_all(&self) -> Vec<String> {
        let greeting = self
            .messages
            .as_ref()
            .and_then(|messages| messages.greeting(&self.language))
            .unwrap_or_else(|| "Hello".to_string());

        self.audience
            .iter()
            .map(|name| format!("{}, {}!", greeting, name))
            .collect()
    }
}

/// 启动审计，非单例
#[derive(Debug, Default, Bean)]
#[bean(prototype, annotations("audit"))]
pub struct AuditLog {
    #[value("audit.tags")]
    tags: Vec<String>,
}

impl AuditLog {
    /// 记录一条审计
    pub fn record(&self, event: &str) {
        info!("审计 [{}]: {}", self.tags.join(","), event);
    }
}
