use crate::{
    refs::{ObjectReferences, RefType},
    Error,
};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

#[derive(Clone)]
enum RasterData {
    /// RGB JPEG bytes, which PDF viewers can decode as-is
    DirectlyEmbeddableJpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image, such as the company logo printed in the page header
#[derive(Clone)]
pub struct Image {
    data: RasterData,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Read and decode an image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Decode an image from memory, guessing its format from the data
    pub fn from_bytes(data: Vec<u8>) -> Result<Image, Error> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = image.dimensions();

        let data = match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::DirectlyEmbeddableJpeg(data),
            _ => RasterData::Decoded(image),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    /// Wrap an already decoded image
    pub fn from_image(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            data: RasterData::Decoded(image),
            width,
            height,
        }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
