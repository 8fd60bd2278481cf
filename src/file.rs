use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point3;

use crate::error::{ConfigError, SceneError};
use crate::model::{BodyID, BodyInfo, RateSteps, Scene};

const MIN_SECTORS: u32 = 3;
const MIN_STACKS: u32 = 2;

/// One row of the scene file.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub info: BodyInfo,
    pub scale: f32,
    pub rotation_rate: f32,
    pub orbit_radius: f32,
    pub orbit_rate: f32,
    pub position: Point3<f32>,
    // Index of an earlier row
    pub parent: Option<usize>,
    pub texture: PathBuf,
}

/// Reads a scene file. Texture paths are taken relative to the file's directory.
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<BodySpec>, ConfigError> {
    let filename = filename.as_ref();
    let contents = fs::read_to_string(filename).map_err(|source| ConfigError::Read {
        path: filename.to_owned(),
        source,
    })?;

    let mut specs = parse_scene(&contents)?;
    if let Some(dir) = filename.parent() {
        for spec in specs.iter_mut() {
            spec.texture = dir.join(&spec.texture);
        }
    }

    log::info!("Loaded {} bodies from {:?}", specs.len(), filename);
    Ok(specs)
}

/// Parses the scene table. The first line is a header; blank lines and lines
/// starting with `#` are skipped.
///
/// Columns: `name radius sectors stacks scale spin orbit_radius orbit_rate x y z parent texture`,
/// where `parent` is `-` to orbit the origin.
pub fn parse_scene(contents: &str) -> Result<Vec<BodySpec>, ConfigError> {
    let mut specs: Vec<BodySpec> = vec![];
    let mut name_to_idx = HashMap::new();

    // Read lines, skipping header
    for (line_idx, line) in contents.lines().enumerate().skip(1) {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_ascii_whitespace();

        macro_rules! next_string {
            ($column:literal) => {
                fields.next().ok_or(ConfigError::MissingColumn {
                    line: line_no,
                    column: $column,
                })?
            };
        }

        macro_rules! next_number {
            ($ty:ty, $column:literal) => {{
                let value = next_string!($column);
                value.parse::<$ty>().map_err(|_| ConfigError::BadNumber {
                    line: line_no,
                    column: $column,
                    value: value.to_owned(),
                })?
            }};
        }

        // NaN and inf parse fine as f32, but would poison every update
        macro_rules! finite {
            ($column:literal) => {{
                let value = next_string!($column);
                match value.parse::<f32>() {
                    Ok(number) if number.is_finite() => number,
                    _ => {
                        return Err(ConfigError::BadNumber {
                            line: line_no,
                            column: $column,
                            value: value.to_owned(),
                        })
                    }
                }
            }};
        }

        macro_rules! non_negative {
            ($column:literal) => {{
                let value = finite!($column);
                if value < 0.0 {
                    return Err(ConfigError::Negative {
                        line: line_no,
                        column: $column,
                        value,
                    });
                }
                value
            }};
        }

        macro_rules! at_least {
            ($min:expr, $column:literal) => {{
                let value = next_number!(u32, $column);
                if value < $min {
                    return Err(ConfigError::TooCoarse {
                        line: line_no,
                        column: $column,
                        min: $min,
                        value,
                    });
                }
                value
            }};
        }

        let name = next_string!("name");
        if name_to_idx.contains_key(name) {
            return Err(ConfigError::DuplicateName {
                line: line_no,
                name: name.to_owned(),
            });
        }

        let info = BodyInfo {
            name: name.to_owned(),
            radius: non_negative!("radius"),
            sectors: at_least!(MIN_SECTORS, "sectors"),
            stacks: at_least!(MIN_STACKS, "stacks"),
        };
        let scale = non_negative!("scale");
        let rotation_rate = non_negative!("spin");
        let orbit_radius = non_negative!("orbit_radius");
        let orbit_rate = non_negative!("orbit_rate");
        let position = Point3::new(
            finite!("x"),
            finite!("y"),
            finite!("z"),
        );

        // Figure out what we're orbiting
        let parent = match next_string!("parent") {
            "-" => None,
            parent => match name_to_idx.get(parent) {
                Some(&idx) => Some(idx),
                None => {
                    return Err(ConfigError::UnknownParent {
                        line: line_no,
                        parent: parent.to_owned(),
                    })
                }
            },
        };

        let texture = PathBuf::from(next_string!("texture"));

        if let Some(extra) = fields.next() {
            return Err(ConfigError::TrailingColumn {
                line: line_no,
                value: extra.to_owned(),
            });
        }

        name_to_idx.insert(name, specs.len());
        specs.push(BodySpec {
            info,
            scale,
            rotation_rate,
            orbit_radius,
            orbit_rate,
            position,
            parent,
            texture,
        });
    }

    if specs.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(specs)
}

/// Turns parsed rows into a scene, in row order. `load_texture` is called once
/// per body, in the same order.
pub fn build_scene<T, F>(
    specs: &[BodySpec],
    steps: RateSteps,
    mut load_texture: F,
) -> Result<Scene<T>, SceneError>
where
    F: FnMut(&BodySpec) -> T,
{
    let mut scene = Scene::new(steps);
    for spec in specs {
        let texture = load_texture(spec);
        let body = scene.add_body(spec.info.clone(), texture);
        body.set_position(spec.position);
        body.set_rotation_rate(spec.rotation_rate);
        body.set_scale(spec.scale);
        body.set_orbit_around_origin(spec.orbit_radius, spec.orbit_rate);
    }

    for (idx, spec) in specs.iter().enumerate() {
        if let Some(parent) = spec.parent {
            scene.track(BodyID(idx), BodyID(parent))?;
        }
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name radius sectors stacks scale spin orbit_radius orbit_rate x y z parent texture\n";

    fn parse_rows(rows: &str) -> Result<Vec<BodySpec>, ConfigError> {
        parse_scene(&format!("{}{}", HEADER, rows))
    }

    #[test]
    fn test_shipped_scene() {
        let contents = include_str!("../solar-system.txt");
        let specs = parse_scene(contents).unwrap();

        let names: Vec<_> = specs.iter().map(|s| s.info.name.as_str()).collect();
        assert_eq!(names, vec!["sun", "earth", "moon", "mars", "venus", "neptune"]);

        let moon = &specs[2];
        assert_eq!(moon.parent, Some(1));
        assert_eq!(moon.orbit_radius, 0.14);
        assert_eq!(moon.orbit_rate, 4.85);
        assert_eq!(specs[0].parent, None);
        assert_eq!(specs[0].orbit_radius, 0.0);
    }

    #[test]
    fn test_parse_row() {
        let specs = parse_rows(
            "# comment\n\
             \n\
             sun 0.2 72 36 1.0 0.1 0 0 0 0 0 - tex/sun.jpg\n\
             earth 0.09 72 36 1.01 2.0 0.9 0.5 1.5 0 0 sun tex/earth.jpg\n",
        )
        .unwrap();

        assert_eq!(specs.len(), 2);
        let earth = &specs[1];
        assert_eq!(
            earth.info,
            BodyInfo {
                name: String::from("earth"),
                radius: 0.09,
                sectors: 72,
                stacks: 36,
            }
        );
        assert_eq!(earth.scale, 1.01);
        assert_eq!(earth.rotation_rate, 2.0);
        assert_eq!(earth.position, Point3::new(1.5, 0.0, 0.0));
        assert_eq!(earth.parent, Some(0));
        assert_eq!(earth.texture, PathBuf::from("tex/earth.jpg"));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_rows("sun 0.2 72 36 1.0 0.1 0 0 0 0 0 -\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingColumn {
                line: 2,
                column: "texture"
            }
        ));

        let err = parse_rows("sun 0.2 72 36 1.0 fast 0 0 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { line: 2, column: "spin", .. }));

        let err = parse_rows("sun 0.2 72 36 1.0 NaN 0 0 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { line: 2, column: "spin", .. }));

        let err = parse_rows("sun inf 72 36 1.0 0.1 0 0 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { line: 2, column: "radius", .. }));

        let err = parse_rows("sun 0.2 72 36 1.0 0.1 0 -inf 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { line: 2, column: "orbit_rate", .. }));

        let err = parse_rows("sun 0.2 72 36 1.0 0.1 0 0 0 nan 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { line: 2, column: "y", .. }));

        let err = parse_rows("sun -0.2 72 36 1.0 0.1 0 0 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::Negative { line: 2, column: "radius", .. }));

        let err = parse_rows("sun 0.2 2 36 1.0 0.1 0 0 0 0 0 - a.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::TooCoarse { column: "sectors", min: 3, .. }));

        let err = parse_rows("sun 0.2 72 36 1.0 0.1 0 0 0 0 0 - a.jpg b.jpg\n").unwrap_err();
        assert!(matches!(err, ConfigError::TrailingColumn { line: 2, .. }));
    }

    #[test]
    fn test_parent_must_come_first() {
        let err = parse_rows(
            "moon 0.03 72 36 1 2.3 0.14 4.85 0 0 0 earth moon.jpg\n\
             earth 0.09 72 36 1 2.0 0.9 0.5 0 0 0 - earth.jpg\n",
        )
        .unwrap_err();
        match err {
            ConfigError::UnknownParent { line, parent } => {
                assert_eq!(line, 2);
                assert_eq!(parent, "earth");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_duplicates_and_empty() {
        let err = parse_rows(
            "sun 0.2 72 36 1 0.1 0 0 0 0 0 - a.jpg\n\
             sun 0.2 72 36 1 0.1 0 0 0 0 0 - a.jpg\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { line: 3, .. }));

        assert!(matches!(parse_scene(HEADER), Err(ConfigError::Empty)));
        assert!(matches!(parse_scene(""), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_build_scene() {
        let specs = parse_scene(include_str!("../solar-system.txt")).unwrap();
        let mut loaded = vec![];
        let scene = build_scene(&specs, RateSteps::default(), |spec| {
            loaded.push(spec.info.name.clone());
            loaded.len()
        })
        .unwrap();

        assert_eq!(loaded.len(), specs.len());
        assert_eq!(scene.len(), specs.len());
        let moon = scene.find_body("moon").unwrap();
        assert_eq!(scene.parent_of(moon), scene.find_body("earth"));
        assert_eq!(*scene.get_body(moon).unwrap().texture(), 3);
    }
}
