use std::path::PathBuf;
use std::process;

use clap::Parser;
use kiss3d::window::Window;

use solar_system::file::{build_scene, read_file};
use solar_system::gui::{BodyTexture, Simulation};
use solar_system::model::RateSteps;

#[derive(Debug, Parser)]
#[command(about = "Textured planets spinning and orbiting in a tiny solar system")]
struct Args {
    /// Scene table to load
    #[arg(default_value = "solar-system.txt")]
    scene: PathBuf,

    /// Spin rate change per frame while Up/Down is held (rad/s)
    #[arg(long, default_value_t = 0.01)]
    spin_step: f32,

    /// Orbit rate change per frame while Right/Left is held (rad/s)
    #[arg(long, default_value_t = 0.01)]
    orbit_step: f32,

    /// Frame rate limit for the render loop
    #[arg(long, default_value_t = 60)]
    fps: u64,

    /// Window title
    #[arg(long, default_value = "Solar System")]
    title: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let specs = match read_file(&args.scene) {
        Ok(specs) => specs,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    // Textures can only be created once there's a GL context
    let mut window = Window::new_with_size(&args.title, 800, 600);
    window.set_framerate_limit(Some(args.fps));
    window.set_background_color(0.0, 0.0, 0.0);

    let steps = RateSteps {
        spin: args.spin_step,
        orbit: args.orbit_step,
    };
    let scene = match build_scene(&specs, steps, |spec| {
        BodyTexture::load(&spec.info.name, &spec.texture)
    }) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    let simulation = Simulation::new(scene);
    window.render_loop(simulation);
}
