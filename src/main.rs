mod app;
mod audio;
mod config;
mod mpris;
mod player;
mod runtime;
mod shelf;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("SEGNO_LOG") {
        clog.parse_filters(&filters);
    }
    clog.init();

    // Panics on worker threads would otherwise die silently behind the
    // alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    runtime::run()
}
