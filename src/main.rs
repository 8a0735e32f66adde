#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use adscrub::app;

fn parse_startup_config() -> app::StartupConfig {
    let mut cfg = app::StartupConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--episode" => {
                if let Some(p) = args.next() {
                    cfg.episode_path = Some(std::path::PathBuf::from(p));
                }
            }
            "--audio" => {
                if let Some(p) = args.next() {
                    cfg.audio_source = Some(p);
                }
            }
            "--api-base" => {
                if let Some(p) = args.next() {
                    cfg.api_base = Some(p);
                }
            }
            "--seek" => {
                if let Some(v) = args.next() {
                    if let Ok(t) = v.parse::<f64>() {
                        cfg.initial_seek = Some(t);
                    }
                }
            }
            "--dummy-candidates" => {
                if let Some(v) = args.next() {
                    if let Ok(n) = v.parse::<usize>() {
                        cfg.dummy_candidates = Some(n);
                    }
                }
            }
            "--no-touch" => {
                cfg.no_touch = true;
            }
            "--no-swipe" => {
                cfg.no_swipe = true;
            }
            "--no-sponsor-badge" => {
                cfg.no_sponsor_badge = true;
            }
            "--debug" => {
                cfg.debug = true;
            }
            "--debug-log" => {
                if let Some(p) = args.next() {
                    cfg.debug = true;
                    cfg.debug_log = Some(std::path::PathBuf::from(p));
                }
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage:\n  adscrub [options]\n\nOptions:\n  --episode <scan.json>\n  --audio <file-or-url>\n  --api-base <url>\n  --seek <secs>\n  --dummy-candidates <n>\n  --no-touch\n  --no-swipe\n  --no-sponsor-badge\n  --debug\n  --debug-log <path>\n  --help"
                );
                std::process::exit(0);
            }
            _ => {
                if arg.starts_with('-') {
                    continue;
                }
                let path = std::path::PathBuf::from(&arg);
                if path
                    .extension()
                    .and_then(|s| s.to_str())
                    .map(|s| s.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
                {
                    cfg.episode_path = Some(path);
                } else {
                    cfg.audio_source = Some(arg);
                }
            }
        }
    }
    cfg
}

fn main() -> eframe::Result<()> {
    let startup = parse_startup_config();
    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size([960.0, 600.0])
        .with_inner_size([1280.0, 720.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "AdScrub Review Station",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(
                app::AdScrub::new(cc, startup.clone()).expect("failed to init app"),
            ))
        }),
    )
}
