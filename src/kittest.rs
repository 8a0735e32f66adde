use egui::Vec2;
use egui_kittest::Harness;

use crate::{AdScrub, StartupConfig};

pub fn harness_with_startup(startup: StartupConfig) -> Harness<'static, AdScrub> {
    Harness::builder()
        .with_size(Vec2::new(1280.0, 720.0))
        .with_os(egui::os::OperatingSystem::from_target_os())
        .build_eframe(|cc| AdScrub::new_for_test(cc, startup).expect("init test app"))
}

pub fn harness_default() -> Harness<'static, AdScrub> {
    harness_with_startup(StartupConfig::default())
}
