//! # 示例应用程序
//!
//! 演示组件注册框架的两条注册路径：标记文档解析与注解类型注册。

use clap::Parser;
use definition_readers::{
    component_annotations, DefinitionRegistry, LoggingConfig, RegistrySession,
    RegistrySessionBuilder, ScopedProxyMode,
};
use registry_impl::{document_from_json_value, FileSystemResourceLoader, InMemoryResourceLoader};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "组件注册框架示例应用")]
struct Args {
    /// 定义文档路径（JSON/TOML/YAML），缺省时使用内置示例文档
    #[arg(short, long)]
    config: Option<String>,

    /// 激活的 profile，可重复指定
    #[arg(short, long)]
    profile: Vec<String>,

    /// 是否使用开发环境日志配置
    #[arg(long)]
    verbose: bool,
}

/// 问候服务（注解路径示例）
#[derive(Debug)]
struct GreetingService;

component_annotations!(GreetingService {
    component_name: Some("greetingService".to_string()),
    description: Some("问候服务".to_string()),
    primary: true,
});

/// 会话购物车（作用域代理示例）
#[derive(Debug)]
struct SessionCart;

component_annotations!(SessionCart {
    component_name: Some("sessionCart".to_string()),
    scope: Some("session".to_string()),
    proxy_mode: ScopedProxyMode::TargetClass,
});

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    };

    let session = build_session(&args, logging)?;

    // 标记路径
    let loaded = match &args.config {
        Some(location) => session.markup_reader().load_definitions(location)?,
        None => {
            let document = builtin_document()?;
            let count = session.markup_reader().register_definitions(&document)?;
            definition_readers::LoadedDefinitions {
                count,
                resources: vec!["<builtin>".to_string()],
            }
        }
    };
    info!("标记路径加载 {} 个组件定义", loaded.count);

    // 注解路径
    let reader = session.annotated_reader();
    reader.register::<GreetingService>()?;
    reader.register::<SessionCart>()?;

    print_registry(&session);
    Ok(())
}

/// 构建解析会话
fn build_session(args: &Args, logging: LoggingConfig) -> anyhow::Result<RegistrySession> {
    let mut builder = RegistrySessionBuilder::new()
        .with_active_profiles(args.profile.clone())
        .with_logging(logging);

    builder = match &args.config {
        Some(_) => builder.with_resource_loader(Arc::new(FileSystemResourceLoader::new("."))),
        None => builder.with_resource_loader(Arc::new(InMemoryResourceLoader::new())),
    };

    Ok(builder.build()?)
}

/// 内置示例文档
fn builtin_document() -> anyhow::Result<definition_readers::MarkupDocument> {
    let value = json!({
        "components": {
            "default-lazy-init": "false",
            "children": [
                {
                    "element": "component",
                    "name": "userService, users",
                    "class": "demo::UserService",
                    "scope": "singleton",
                    "children": [
                        { "element": "description", "text": "用户服务" },
                        { "element": "qualifier", "type": "persistence", "value": "jpa" }
                    ]
                },
                {
                    "element": "component",
                    "name": "reportWorker",
                    "class": "demo::ReportWorker",
                    "scope": "prototype",
                    "lazy-init": "true"
                },
                { "element": "alias", "name": "userService", "alias": "accountService" }
            ]
        }
    });
    Ok(document_from_json_value(&value, None)?)
}

/// 打印注册表内容
fn print_registry(session: &RegistrySession) {
    let registry = session.registry();
    println!("注册表共 {} 个组件定义:", registry.definition_count());
    for name in registry.definition_names() {
        let definition = registry
            .resolve(&name)
            .expect("枚举出的名称必然可解析");
        let aliases = registry.aliases_of(&name);
        println!(
            "  {name} -> {} [scope={}, lazy={}, primary={}]{}",
            definition.type_name().unwrap_or("<parent>"),
            definition.scope,
            definition.is_lazy_init(),
            definition.primary,
            if aliases.is_empty() {
                String::new()
            } else {
                format!(" 别名: {}", aliases.join(", "))
            }
        );
    }
}
