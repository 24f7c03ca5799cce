//! Точка входа `contrib-publisher`.
//!
//! Жизненный цикл:
//! - парсинг CLI и сборка конфигурации сессии (ошибки тут фатальны)
//! - подключение к площадке и регистрация обработчика событий
//! - авторизация identity, если задан режим аутентификации
//! - создание топиков и публикация котировок раз в 10 секунд
//! - остановка по `Ctrl+C` или по завершению сессии; сессия останавливается всегда

mod authorize;
mod cli;
mod generator;
mod guard;
mod handler;
mod publisher;
mod state;
mod streams;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use clap::Parser;
use contrib_venue::{VenueBehavior, VenueTransport};
use log::{error, info, warn};

use crate::publisher::{Publisher, PublisherSettings, RunOutcome};

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG, по умолчанию info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let interrupted = Arc::new(AtomicBool::new(false));

    // Ctrl+C => interrupted=true, цикл публикации выйдет на ближайшем тике
    {
        let interrupted = interrupted.clone();
        ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::Relaxed);
            info!("Ctrl+C pressed. Stopping...");
        })?;
    }

    let args = cli::Args::parse();
    args.validate()?;

    let config = args.session_config()?;
    let plan = args.publish_plan();

    info!(
        "Starting contrib-publisher: service={}, topics={}, auth={}",
        plan.service,
        plan.topics.join(","),
        config.auth()
    );

    let transport = VenueTransport::new(VenueBehavior::default());
    let publisher = Publisher::new(PublisherSettings::default(), interrupted);

    match publisher.run(&transport, &config, &plan)? {
        RunOutcome::StartFailed(e) => error!("Failed to start session: {e}"),
        RunOutcome::Unauthorized(e) => error!("No authorization: {e}"),
        RunOutcome::NoActiveStreams => warn!("no topic was created; nothing to publish"),
        RunOutcome::Finished { published, reason } => {
            info!("stopped ({reason:?}) after {published} publish event(s)")
        }
    }

    Ok(())
}
