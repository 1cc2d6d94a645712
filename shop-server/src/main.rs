use shop_server::{Config, Server, ServerState, init_logger, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志 (配置了 LOG_DIR 时同时写文件)
    match &config.log_dir {
        Some(dir) => init_logger_with_file(None, Some(dir)),
        None => init_logger(),
    }

    // 4. 初始化协作者并启动 HTTP 服务器
    let state = ServerState::initialize(&config);
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
