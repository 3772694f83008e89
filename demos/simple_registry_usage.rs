//! 注册表简单使用示例
//!
//! 组合根创建注册表，提供方和使用方各自持有绑定。

use injection_kit::logging::{init_logging, LoggingConfig};
use injection_kit::{ConfigLoader, Inject, Provided, Registry};
use std::sync::Arc;

trait DataSource: Send + Sync {
    fn describe(&self) -> String;
}

struct UserDataSource;
struct SystemDataSource;

impl DataSource for UserDataSource {
    fn describe(&self) -> String {
        "user data".to_string()
    }
}

impl DataSource for SystemDataSource {
    fn describe(&self) -> String {
        "system data".to_string()
    }
}

#[derive(Debug, Clone)]
struct AppSettings {
    app_name: String,
}

/// 使用方：只持有绑定，读取时才解析
struct Reporter {
    settings: Inject<AppSettings>,
    user_data: Inject<Arc<dyn DataSource>>,
    system_data: Inject<Arc<dyn DataSource>>,
}

impl Reporter {
    fn new(registry: &Registry) -> Self {
        Self {
            settings: Inject::by_type(registry),
            user_data: Inject::named(registry, "UserData"),
            system_data: Inject::named(registry, "SystemData"),
        }
    }

    fn report(&self) {
        let app_name = self
            .settings
            .get()
            .map(|settings| settings.app_name.clone())
            .unwrap_or_else(|| "<unset>".to_string());

        for (label, source) in [("user", &self.user_data), ("system", &self.system_data)] {
            match source.get_cloned() {
                Some(source) => println!("[{}] {} -> {}", app_name, label, source.describe()),
                None => println!("[{}] {} -> not available", app_name, label),
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::development())?;

    let config = ConfigLoader::new().load_config()?;
    let registry = Registry::with_config(config);

    // 使用方可以先于提供方创建
    let reporter = Reporter::new(&registry);
    reporter.report();

    let mut settings = Provided::new(
        &registry,
        AppSettings {
            app_name: "demo".to_string(),
        },
    );
    let _user = Provided::named(
        &registry,
        "UserData",
        Arc::new(UserDataSource) as Arc<dyn DataSource>,
    );
    let mut system = Provided::named(
        &registry,
        "SystemData",
        Arc::new(SystemDataSource) as Arc<dyn DataSource>,
    );
    reporter.report();

    settings.set(AppSettings {
        app_name: "demo-renamed".to_string(),
    });
    system.clear();
    reporter.report();

    let stats = registry.get_stats();
    println!(
        "registrations: {}, resolutions: {}, hit rate: {:.2}",
        stats.registrations,
        stats.total(),
        stats.hit_rate()
    );

    Ok(())
}
