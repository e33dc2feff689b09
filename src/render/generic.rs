//! Last-resort layout: departmental header plus an ordered field dump.

use super::layouts;
use super::page::PageWriter;
use crate::assets::AssetStore;
use crate::record::PermitRecord;

/// Everything past this line would collide with the QR stamp.
const CLIP_Y: f32 = 700.0;

pub(super) fn draw(page: &PageWriter, record: &PermitRecord, assets: &AssetStore, title: &str) {
    layouts::header(page, assets, title);

    page.set_color(0.0, 0.0, 0.0);
    let mut y = 180.0;
    for (label, value) in record.display_fields() {
        if y > CLIP_Y {
            break;
        }
        page.text(format!("{label}:"), 10.0, 50.0, y, &page.fonts.bold);
        page.text(value, 10.0, 200.0, y, &page.fonts.regular);
        y += 20.0;
    }
}
