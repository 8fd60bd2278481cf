use std::f32::consts::TAU;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use solar_system::file::{build_scene, read_file};
use solar_system::model::RateSteps;

/// Prints what a scene file describes, optionally after running it forward.
#[derive(Debug, Parser)]
struct Args {
    /// Only show this body
    name: Option<String>,

    /// Scene table to load
    #[arg(long, default_value = "solar-system.txt")]
    scene: PathBuf,

    /// Simulated seconds to run before printing
    #[arg(long, default_value_t = 0.0, value_parser = seconds)]
    at: f32,

    /// Simulation step, in seconds
    #[arg(long, default_value_t = 1.0 / 60.0, value_parser = seconds)]
    step: f32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let specs = match read_file(&args.scene) {
        Ok(specs) => specs,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };
    let mut scene = match build_scene(&specs, RateSteps::default(), |_| ()) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    scene.run_for(args.at, args.step.max(1e-4));

    for body in scene.bodies() {
        if let Some(name) = &args.name {
            if body.info.name.to_lowercase() != name.to_lowercase() {
                continue;
            }
        }

        println!("{} at t = {}s", body.info.name, args.at);
        println!("- Radius: {} x {}", body.info.radius, body.scale());
        println!(
            "- Tessellation: {} sectors, {} stacks",
            body.info.sectors, body.info.stacks
        );
        println!("- Spin rate: {} rad/s", body.rotation_rate());
        match period(body.rotation_rate()) {
            Some(p) => println!("- Day length: {:.2} s", p),
            None => println!("- Day length: never"),
        }
        if body.has_orbit() {
            let parent = match scene.parent_of(body.id) {
                Some(id) => scene.get_body(id).map(|b| b.info.name.as_str()).unwrap_or("?"),
                None => "origin",
            };
            println!("- Orbits: {}", parent);
            println!("- Orbit radius: {}", body.orbit_radius());
            println!("- Orbit rate: {} rad/s", body.orbit_rate());
            match period(body.orbit_rate()) {
                Some(p) => println!("- Year length: {:.2} s", p),
                None => println!("- Year length: never"),
            }
        }
        let p = body.position();
        println!("- Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        println!();
    }
}

fn seconds(arg: &str) -> Result<f32, String> {
    let value: f32 = arg.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a non-negative number of seconds, got {}", arg))
    }
}

fn period(rate: f32) -> Option<f32> {
    if rate > 0.0 {
        Some(TAU / rate)
    } else {
        None
    }
}
