use std::fs;
use std::path::Path;
use std::rc::Rc;

use image::RgbaImage;
use kiss3d::context::Context;
use kiss3d::resource::Texture;

use crate::error::TextureError;

/// A body's texture. The body holds the only handle, so the GPU texture is
/// deleted when the body is dropped.
pub struct BodyTexture {
    texture: Rc<Texture>,
}

impl BodyTexture {
    /// Loads `path` for the body called `body_name`.
    ///
    /// A missing or undecodable file is logged, and the body gets an
    /// allocated texture with no image data, rather than failing the scene.
    pub fn load(body_name: &str, path: &Path) -> Self {
        let texture = match decode_image(path) {
            Ok(image) => {
                log::debug!(
                    "Loaded {}x{} texture {:?} for {}",
                    image.width(),
                    image.height(),
                    path,
                    body_name
                );
                upload(&image)
            }
            Err(e) => {
                log::error!("{} (drawing {} untextured)", e, body_name);
                Texture::new()
            }
        };

        BodyTexture { texture }
    }

    pub fn texture(&self) -> &Rc<Texture> {
        &self.texture
    }
}

/// Reads and decodes the file into RGBA rows, bottom row first, so that
/// v = 1 lands on the top of the image.
pub fn decode_image(path: &Path) -> Result<RgbaImage, TextureError> {
    let bytes = fs::read(path).map_err(|source| TextureError::Read {
        path: path.to_owned(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_owned(),
        source,
    })?;
    Ok(image.flipv().into_rgba8())
}

fn upload(image: &RgbaImage) -> Rc<Texture> {
    let ctxt = Context::get();
    let texture = Texture::new();

    ctxt.active_texture(Context::TEXTURE0);
    ctxt.bind_texture(Context::TEXTURE_2D, Some(&*texture));
    ctxt.tex_image2d(
        Context::TEXTURE_2D,
        0,
        Context::RGBA as i32,
        image.width() as i32,
        image.height() as i32,
        0,
        Context::RGBA,
        Some(&image.as_raw()[..]),
    );

    // Wrap around in u for the seam; clamp v at the poles
    ctxt.tex_parameteri(
        Context::TEXTURE_2D,
        Context::TEXTURE_WRAP_S,
        Context::REPEAT as i32,
    );
    ctxt.tex_parameteri(
        Context::TEXTURE_2D,
        Context::TEXTURE_WRAP_T,
        Context::CLAMP_TO_EDGE as i32,
    );
    ctxt.tex_parameteri(
        Context::TEXTURE_2D,
        Context::TEXTURE_MIN_FILTER,
        Context::LINEAR as i32,
    );
    ctxt.tex_parameteri(
        Context::TEXTURE_2D,
        Context::TEXTURE_MAG_FILTER,
        Context::LINEAR as i32,
    );

    texture
}
