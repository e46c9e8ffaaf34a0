//! Headless star field run
//!
//! Mounts the renderer on an in-memory surface, idles for a moment, engages
//! the warp ramp and logs frame statistics once per second until arrival.
//!
//! Run with: cargo run --features cli --bin warp-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use warp_field::time::now_millis;
    use warp_field::{Config, ManualScheduler, RecordingSurface, RenderParams, Renderer, Size, WarpTransition};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,warp_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("WARP_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading config");
            Config::load(&path)?
        }
        Err(_) => Config::default(),
    };
    let mut starfield = config.starfield.clone();
    if let Some(seed) = env_parse::<u64>("WARP_SEED") {
        starfield.seed = Some(seed);
    }
    let width = env_parse("WARP_WIDTH").unwrap_or(1920.0);
    let height = env_parse("WARP_HEIGHT").unwrap_or(1080.0);
    let reduced_motion = env_flag("WARP_REDUCED_MOTION");
    let idle_secs = env_parse("WARP_IDLE_SECS").unwrap_or(1.0);

    let mut warp = WarpTransition::new(&config.warp);
    let mounted_at = now_millis();
    let mut renderer = Renderer::mount(
        RecordingSurface::new(Size::new(width, height)),
        ManualScheduler::new(),
        &starfield,
        RenderParams {
            speed: warp.speed(),
            progress: 0.0,
        },
        reduced_motion,
        mounted_at,
    );

    if reduced_motion {
        let ops = renderer.surface_mut().take_ops();
        info!(draw_calls = ops.len(), "Reduced motion: single static paint");
        renderer.teardown();
        return Ok(());
    }

    info!(
        width,
        height,
        stars = renderer.field().len(),
        idle_secs,
        "Running headless star field"
    );

    let mut frame_interval = tokio::time::interval(Duration::from_millis(16));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let mut stats = FrameStats::default();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let now = now_millis();
                let secs = now / 1000.0;
                if !warp.is_warping()
                    && !warp.has_arrived()
                    && secs - mounted_at / 1000.0 >= idle_secs
                {
                    warp.engage(secs);
                }

                let speed = warp.speed_at(secs);
                renderer.update_speed(speed);
                renderer.update_progress(warp.background_progress(speed));
                if renderer.on_frame(now) {
                    let ops = renderer.surface_mut().take_ops();
                    stats.record(&ops);
                }

                if warp.has_arrived() {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                info!(
                    frames = stats.frames,
                    visible = stats.visible_per_frame(),
                    shade = stats.shade,
                    peak_trail_alpha = format!("{:.2}", stats.peak_trail_alpha),
                    speed = format!("{:.1}", renderer.field().speed()),
                    "stats"
                );
                stats = FrameStats::default();
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }

    renderer.teardown();
    info!(
        frames = renderer.frames(),
        final_speed = renderer.field().speed(),
        "Done"
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

/// Boolean env switch; unset means off
#[cfg(not(target_arch = "wasm32"))]
fn env_flag(key: &str) -> bool {
    let Ok(raw) = std::env::var(key) else {
        return false;
    };
    parse_flag(&raw).unwrap_or_else(|| {
        tracing::warn!(key, value = %raw, "Unrecognized flag value, treating as off");
        false
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Per-interval summary of painted frames
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct FrameStats {
    frames: u64,
    visible: u64,
    shade: u8,
    peak_trail_alpha: f64,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameStats {
    fn record(&mut self, ops: &[warp_field::DrawOp]) {
        use warp_field::DrawOp;

        self.frames += 1;
        for op in ops {
            match op {
                DrawOp::Background(shade) => self.shade = *shade,
                DrawOp::Star { .. } => self.visible += 1,
                DrawOp::Trail { alpha, .. } => {
                    self.peak_trail_alpha = self.peak_trail_alpha.max(*alpha)
                }
                DrawOp::Nebula(_) => {}
            }
        }
    }

    fn visible_per_frame(&self) -> u64 {
        self.visible.checked_div(self.frames).unwrap_or(0)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_numeric_and_word_forms() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
