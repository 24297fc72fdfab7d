//! Headless run: plays the jungle level with scripted input and no window.
//!
//! The chopper flies right, fires at the tank, and idles until the script
//! ends. Draw calls are recorded instead of rendered.
//!
//! ```text
//! RUST_LOG=info cargo run -p tessera --example headless
//! ```

use std::path::PathBuf;

use tessera::prelude::*;

/// Replays key presses and releases at fixed frame numbers.
struct ScriptedPlatform {
    frame: u32,
    last_frame: u32,
    script: Vec<(u32, KeyCode, bool)>,
    draw: DrawList,
    draw_calls: usize,
}

impl Platform for ScriptedPlatform {
    fn poll_input(&mut self, input: &mut InputState) -> bool {
        for &(frame, key, down) in &self.script {
            if frame == self.frame {
                if down {
                    input.press(key);
                } else {
                    input.release(key);
                }
            }
        }
        self.frame += 1;
        self.frame <= self.last_frame
    }

    fn renderer(&mut self) -> &mut dyn Renderer {
        self.draw.clear();
        &mut self.draw
    }

    fn present(&mut self) {
        self.draw_calls += self.draw.len();
        log::trace!("frame {}: {} draw calls", self.frame, self.draw.len());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let config = GameConfig::load(assets.join("config.json"))?;
    let mut game = Game::new(config);
    game.load_level_file(assets.join("levels/level1.json"))?;
    game.entities().log_entities();

    let mut platform = ScriptedPlatform {
        frame: 0,
        last_frame: 180,
        script: vec![
            (1, KeyCode::ArrowRight, true),
            (5, KeyCode::Space, true),
            (6, KeyCode::Space, false),
            (6, KeyCode::ArrowRight, false),
        ],
        draw: DrawList::new(),
        draw_calls: 0,
    };
    let status = game.run(&mut platform);

    let entities = game.entities();
    println!("status:         {status:?}");
    println!("frames:         {}", platform.frame);
    println!("draw calls:     {}", platform.draw_calls);
    println!("entities:       {}", entities.entity_count());
    println!("enemies killed: {}", entities.enemies_killed());
    println!("player hits:    {}", entities.player_hits());
    Ok(())
}
