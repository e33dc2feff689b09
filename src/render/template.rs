//! Overlay rendering onto prebuilt template images.
//!
//! Each supported type carries a static table of overlay fields: where on
//! the template a value goes, in what font and size, and how to extract it
//! from the record. Absent values are simply not drawn; the template
//! already shows a blank field.

use super::page::{PageWriter, PAGE_HEIGHT, PAGE_WIDTH};
use super::RenderError;
use crate::record::PermitRecord;

#[derive(Clone, Copy)]
pub enum FontStyle {
    Regular,
    Bold,
    TimesRoman,
    TimesBold,
}

pub struct OverlayField {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontStyle,
    pub uppercase: bool,
    pub value: fn(&PermitRecord) -> Option<String>,
}

fn permit_number(r: &PermitRecord) -> Option<String> {
    r.permit_number.clone()
}

fn reference_or_permit(r: &PermitRecord) -> Option<String> {
    r.reference_number.clone().or_else(|| r.permit_number.clone())
}

fn reference_number(r: &PermitRecord) -> Option<String> {
    r.reference_number.clone()
}

fn control_number(r: &PermitRecord) -> Option<String> {
    r.control_number.clone()
}

fn surname(r: &PermitRecord) -> Option<String> {
    r.surname.clone().or_else(|| {
        Some(r.name.as_deref()?.split_whitespace().last()?.to_string())
    })
}

fn forename(r: &PermitRecord) -> Option<String> {
    r.forename.clone().or_else(|| {
        let name = r.name.as_deref()?;
        let words: Vec<&str> = name.split_whitespace().collect();
        if words.len() < 2 {
            return None;
        }
        Some(words[..words.len() - 1].join(" "))
    })
}

fn full_name(r: &PermitRecord) -> Option<String> {
    let name = r.full_name();
    (!name.is_empty()).then_some(name)
}

fn nationality(r: &PermitRecord) -> Option<String> {
    r.nationality.clone()
}

fn date_of_birth(r: &PermitRecord) -> Option<String> {
    r.date_of_birth.clone()
}

fn gender(r: &PermitRecord) -> Option<String> {
    r.gender.clone()
}

fn passport(r: &PermitRecord) -> Option<String> {
    r.passport.clone()
}

fn issue_date(r: &PermitRecord) -> Option<String> {
    (!r.issue_date.is_empty()).then(|| r.issue_date.clone())
}

fn expiry_date(r: &PermitRecord) -> Option<String> {
    r.expiry_date.clone()
}

pub(super) static PERMANENT_RESIDENCE_OVERLAY: &[OverlayField] = &[
    OverlayField { x: 150.0, y: 165.0, size: 11.0, font: FontStyle::Bold, uppercase: false, value: permit_number },
    OverlayField { x: 400.0, y: 165.0, size: 11.0, font: FontStyle::Bold, uppercase: false, value: reference_or_permit },
    OverlayField { x: 150.0, y: 255.0, size: 12.0, font: FontStyle::Regular, uppercase: true, value: surname },
    OverlayField { x: 150.0, y: 340.0, size: 12.0, font: FontStyle::Regular, uppercase: true, value: forename },
    OverlayField { x: 150.0, y: 380.0, size: 12.0, font: FontStyle::Regular, uppercase: true, value: nationality },
    OverlayField { x: 150.0, y: 420.0, size: 12.0, font: FontStyle::Regular, uppercase: false, value: date_of_birth },
    OverlayField { x: 400.0, y: 420.0, size: 12.0, font: FontStyle::Regular, uppercase: true, value: gender },
    OverlayField { x: 150.0, y: 540.0, size: 12.0, font: FontStyle::Regular, uppercase: false, value: issue_date },
];

pub(super) static NATURALIZATION_OVERLAY: &[OverlayField] = &[
    OverlayField { x: 100.0, y: 350.0, size: 16.0, font: FontStyle::TimesBold, uppercase: true, value: full_name },
    OverlayField { x: 100.0, y: 650.0, size: 10.0, font: FontStyle::TimesRoman, uppercase: false, value: permit_number },
    OverlayField { x: 100.0, y: 670.0, size: 10.0, font: FontStyle::TimesRoman, uppercase: false, value: reference_number },
];

pub(super) static WORK_PERMIT_OVERLAY: &[OverlayField] = &[
    OverlayField { x: 200.0, y: 180.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: control_number },
    OverlayField { x: 200.0, y: 210.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: permit_number },
    OverlayField { x: 200.0, y: 250.0, size: 10.0, font: FontStyle::Regular, uppercase: true, value: full_name },
    OverlayField { x: 200.0, y: 280.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: passport },
    OverlayField { x: 200.0, y: 360.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: issue_date },
    OverlayField { x: 200.0, y: 390.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: expiry_date },
];

pub(super) static RELATIVES_PERMIT_OVERLAY: &[OverlayField] = &[
    OverlayField { x: 200.0, y: 180.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: control_number },
    OverlayField { x: 200.0, y: 210.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: permit_number },
    OverlayField { x: 200.0, y: 250.0, size: 10.0, font: FontStyle::Regular, uppercase: true, value: full_name },
    OverlayField { x: 200.0, y: 280.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: passport },
    OverlayField { x: 200.0, y: 330.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: issue_date },
    OverlayField { x: 200.0, y: 360.0, size: 10.0, font: FontStyle::Regular, uppercase: false, value: expiry_date },
];

/// Draw the template full-page, then the record's values on top.
pub(super) fn overlay(
    page: &PageWriter,
    record: &PermitRecord,
    fields: &[OverlayField],
    template: &[u8],
) -> Result<(), RenderError> {
    page.image(template, 0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT)?;
    page.set_color(0.0, 0.0, 0.0);
    for field in fields {
        let Some(value) = (field.value)(record) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let value = if field.uppercase {
            value.to_uppercase()
        } else {
            value
        };
        let font = match field.font {
            FontStyle::Regular => &page.fonts.regular,
            FontStyle::Bold => &page.fonts.bold,
            FontStyle::TimesRoman => &page.fonts.times,
            FontStyle::TimesBold => &page.fonts.times_bold,
        };
        page.text(value, field.size, field.x, field.y, font);
    }
    Ok(())
}
