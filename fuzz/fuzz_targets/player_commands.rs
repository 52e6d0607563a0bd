#![no_main]

use libfuzzer_sys::fuzz_target;
use songdeck::audio::NullAudioEngine;
use songdeck::catalog::Catalog;
use songdeck::controller::PlayerController;
use songdeck::drag::DragTarget;
use songdeck::store::MemoryStore;
use std::path::Path;
use std::time::Duration;

fuzz_target!(|data: &[u8]| {
    let mut controller = PlayerController::new(
        Catalog::builtin(Path::new("media")),
        Box::new(NullAudioEngine::with_fixed_duration(Duration::from_secs(60))),
        Box::new(MemoryStore::new()),
    );
    let cards = controller.catalog().cards.len();

    for byte in data {
        let arg = f64::from(byte >> 3) / 16.0 - 0.5;
        match byte % 9 {
            0 => controller.select_card(usize::from(*byte) % (cards + 1)),
            1 => {
                controller.play_previous();
            }
            2 => {
                controller.play_next();
            }
            3 => controller.toggle_play_pause(),
            4 => controller.begin_drag(DragTarget::Progress, arg),
            5 => controller.begin_drag(DragTarget::Volume, arg),
            6 => controller.update_drag(arg),
            7 => {
                controller.end_drag();
            }
            _ => {
                controller.toggle_mute();
                controller.tick();
            }
        }

        let cursor = controller.history().cursor_index();
        assert!(cursor >= -1 && cursor < controller.history().len() as i64);
        assert!((0.0..=1.0).contains(&controller.progress()));
        assert!((0.0..=1.0).contains(&controller.volume_level()));
    }
});
