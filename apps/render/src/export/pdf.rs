//! Single-page PDF encoding of a page-fitted raster.
//!
//! The ARGB buffer becomes one DeviceRGB image XObject (FlateDecode), with a
//! DeviceGray soft mask when any pixel is not fully opaque. The page content is a
//! single `cm` + `Do` placing the image at the page-fit placement.

use chrono::{DateTime, Datelike, Timelike, Utc};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use tracing::debug;

use crate::render::ArgbBuffer;

use super::page_fit::{fit_to_page_size, PagePlacement, PageSize};

const COMPRESSION_LEVEL: u8 = 6;
const IMAGE_NAME: &[u8] = b"Im1";

/// Document-info entries written into the PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    pub title: String,
    pub created: DateTime<Utc>,
}

impl PdfMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        PdfMetadata {
            title: title.into(),
            created: Utc::now(),
        }
    }
}

/// Encodes `buffer` onto one page of `page` size. The buffer must not be empty.
pub fn encode_single_page(
    buffer: &ArgbBuffer,
    page: PageSize,
    metadata: &PdfMetadata,
) -> (Vec<u8>, PagePlacement) {
    let placement = fit_to_page_size(page, buffer.width(), buffer.height());
    let (page_width, page_height) = page.dimensions();

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let mask_id = Ref::new(5);
    let content_id = Ref::new(6);
    let info_id = Ref::new(7);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    let (rgb, alpha) = buffer.to_rgb_and_alpha();
    let has_alpha = alpha.iter().any(|a| *a < 255);
    let (width, height) = (buffer.width() as i32, buffer.height() as i32);

    if has_alpha {
        let compressed_alpha = compress_to_vec_zlib(&alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
    }

    let compressed_rgb = compress_to_vec_zlib(&rgb, COMPRESSION_LEVEL);
    let mut image = pdf.image_xobject(image_id, &compressed_rgb);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if has_alpha {
        image.s_mask(mask_id);
    }
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([
        placement.width,
        0.0,
        0.0,
        placement.height,
        placement.x,
        placement.y,
    ]);
    content.x_object(Name(IMAGE_NAME));
    content.restore_state();
    let compressed_content = compress_to_vec_zlib(&content.finish(), COMPRESSION_LEVEL);
    pdf.stream(content_id, &compressed_content)
        .filter(Filter::FlateDecode);

    let mut page_writer = pdf.page(page_id);
    page_writer
        .media_box(Rect::new(0.0, 0.0, page_width, page_height))
        .parent(pages_id)
        .contents(content_id);
    page_writer
        .resources()
        .x_objects()
        .pair(Name(IMAGE_NAME), image_id);
    page_writer.finish();

    let producer = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    pdf.document_info(info_id)
        .title(TextStr(&metadata.title))
        .producer(TextStr(&producer))
        .creation_date(pdf_date(&metadata.created));

    let bytes = pdf.finish();
    debug!(
        bytes = bytes.len(),
        image_width = width,
        image_height = height,
        scale = placement.scale,
        soft_mask = has_alpha,
        "Encoded PDF page"
    );
    (bytes, placement)
}

fn pdf_date(at: &DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}
