//! Headless demo: the stock landing-page scenario.
//!
//! Runs the engine against the in-process surface with a scripted pointer
//! sweep, then prints what the surface ended up with. No window, no GPU -
//! this exists to watch the pipeline behave end to end.
//!
//! Run with: cargo run --bin pressure_demo --features demo

use glyphpress_core::{Rect, Vec2};
use glyphpress_engine::{
    FrameClock, HeadlessSurface, PressureConfig, PressureEngine, StructuralEvent,
};

/// Frames the scripted sweep runs for.
const SWEEP_FRAMES: u32 = 240;

/// A clock that does not sleep; the demo runs as fast as it can.
struct ImmediateClock;

impl FrameClock for ImmediateClock {
    fn wait_next_frame(&mut self) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = PressureConfig {
        text: "StarScope".to_string(),
        min_font_size: 120.0,
        scale: true,
        ..Default::default()
    };

    let container = Rect::new(0.0, 0.0, 1280.0, 400.0);
    let surface = HeadlessSurface::new(container, &config.text);
    let mut engine = match PressureEngine::new(config, surface) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("configuration rejected: {error}");
            std::process::exit(1);
        }
    };

    engine.mount();
    let pointer = engine.pointer();
    let events = engine.events().expect("engine just mounted");
    let token = engine.cancel_token();
    let mut clock = ImmediateClock;

    // Touch path: a one-finger gesture lands like a pointer move.
    pointer.touch_moved(&[Vec2::new(10.0, 200.0)]);

    // Sweep the pointer left-to-right across the block; halfway through,
    // shrink the container the way a window resize would.
    for frame in 0..SWEEP_FRAMES {
        let t = frame as f32 / SWEEP_FRAMES as f32;
        pointer.pointer_moved(1280.0 * t, 200.0);

        if frame == SWEEP_FRAMES / 2 {
            let resized = Rect::new(0.0, 0.0, 960.0, 400.0);
            engine.surface_mut().set_container(resized);
            events.send(StructuralEvent::Resized { container: resized });
        }

        engine.tick();
        clock.wait_next_frame();
    }

    // Deterministic teardown: after cancellation, a scheduled tick is a no-op.
    token.cancel();
    engine.tick();
    engine.dispose();

    let stats = engine.stats();
    let block = engine.block();

    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║                PRESSURE DEMO SUMMARY                  ║");
    println!("╚═══════════════════════════════════════════════════════╝");
    println!("  frames:         {}", stats.frames);
    println!("  avg frame:      {:.3} ms", stats.avg_frame_ms());
    println!("  max frame:      {} us", stats.max_frame_us);
    println!("  glyphs:         {}", block.glyph_count());
    println!("  base font size: {:.1} px", block.base_font_size);
    println!("  vertical scale: {:.3}", block.scale_y);
    println!();
    for applied in engine.surface().applied_glyphs() {
        println!(
            "  '{}'  {}  opacity {:.2}",
            applied.ch, applied.descriptor, applied.opacity
        );
    }
}
