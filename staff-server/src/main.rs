use anyhow::Context;
use staff_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env
    let _ = dotenvy::dotenv();

    // 2. 加载配置 (DATABASE_URL 缺失时直接退出)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logger(None, false, None);
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // 3. 日志
    init_logger(
        Some(config.log_level.as_str()),
        config.log_json,
        config.log_dir.as_deref(),
    );

    print_banner();
    tracing::info!("Staff server starting (env: {})", config.environment);

    // 4. 初始化服务器状态 (连接数据库、建索引、校准编号序列)
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 5. 启动 HTTP 服务器
    Server::with_state(config, state)
        .run()
        .await
        .context("server stopped with error")?;

    Ok(())
}
